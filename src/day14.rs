// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use crate::{error::Error, search::{self, Graph, Grid}};


const SOURCE: [usize; 2] = [500, 0];

struct Cave {
	/// Rock down to, but excluding, the floor; wide enough for sand piling
	/// up from the source to the floor.
	rock: Grid<bool>,
	/// X coordinate of the leftmost column.
	x_offset: usize,
	source: usize,
}

impl Cave {
	fn floor(&self) -> usize { self.rock.height() }

	/// Positions sand at `pos` can fall to, in order of preference: down,
	/// down to the left & down to the right.
	fn falls(&self, pos: usize) -> impl Iterator<Item = usize> + '_ {
		let [x, y] = self.rock.xy(pos);
		let below = (y + 1 < self.floor()).then(|| pos + self.rock.width());
		[
			below,
			below.filter(|_| x > 0).map(|below| below - 1),
			below.filter(|_| x + 1 < self.rock.width()).map(|below| below + 1),
		].into_iter().flatten().filter(move |&next| !self.rock[next])
	}
}

/// Sand falling from the source.
impl Graph for Cave {
	type State = usize;
	fn successors(&self, pos: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
		self.falls(pos).map(|next| (next, 1))
	}
}


/// Pours sand until it either falls into the abyss below the lowest rock
/// (`ABYSS`) or, resting on the floor, piles up to the source. Returns the
/// units come to rest & where they did.
fn pour<const ABYSS: bool>(cave: &Cave) -> (usize, Grid<bool>) {
	let mut sand = Grid::from_fn(cave.rock.width(), cave.floor(), |_| false);
	let mut rested = 0;
	// Where the current unit came from, as every next unit falls the same way
	let mut path = vec![cave.source];
	while let Some(&pos) = path.last() {
		if ABYSS && cave.rock.xy(pos)[1] + 1 == cave.floor() { break }
		match cave.falls(pos).find(|&next| !sand[next]) {
			Some(next) => path.push(next),
			None => {
				sand[pos] = true;
				rested += 1;
				path.pop();
			}
		}
	}
	tracing::trace!("\n{}", cave.fmt_sand(&sand));
	(rested, sand)
}


fn input_cave_from_str(s: &str) -> Result<Cave, Error> {
	s.parse().map_err(Error::input)
}


fn part1_impl(input_cave: &Cave) -> usize {
	pour::<true>(input_cave).0
}

pub(crate) fn part1(input: &str) -> Result<usize, Error> {
	Ok(part1_impl(&input_cave_from_str(input)?))
}


/// All positions sand can reach fill up, and nothing else.
fn part2_impl(input_cave: &Cave) -> usize {
	search::reachable(input_cave, input_cave.source).len()
}

pub(crate) fn part2(input: &str) -> Result<usize, Error> {
	Ok(part2_impl(&input_cave_from_str(input)?))
}


mod parsing {
	use std::{num::ParseIntError, str::FromStr};
	use itertools::{iproduct, Itertools as _, MinMaxResult};
	use crate::search::Grid;
	use super::{Cave, SOURCE};

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) enum PointError {
		Format,
		X(ParseIntError),
		Y(ParseIntError),
	}

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) enum CaveError {
		Point { line: usize, point: usize, source: PointError },
		/// Neither horizontally nor vertically aligned with the previous point.
		Unaligned { line: usize, point: usize },
	}

	fn try_point_from_str(s: &str) -> Result<[usize; 2], PointError> {
		let (x, y) = s.split_once(',').ok_or(PointError::Format)?;
		Ok([x.parse().map_err(PointError::X)?, y.parse().map_err(PointError::Y)?])
	}

	fn try_paths_from_str(s: &str) -> Result<Vec<Vec<[usize; 2]>>, CaveError> {
		s.lines().enumerate().map(|(l, line)| {
			let path = line.split(" -> ")
				.enumerate()
				.map(|(p, point)| try_point_from_str(point)
					.map_err(|e| CaveError::Point { line: l + 1, point: p + 1, source: e }))
				.collect::<Result<Vec<_>, _>>()?;
			if let Some(p) = path.windows(2).position(|w| w[0][0] != w[1][0] && w[0][1] != w[1][1]) {
				return Err(CaveError::Unaligned { line: l + 1, point: p + 2 })
			}
			Ok(path)
		}).collect()
	}

	impl FromStr for Cave {
		type Err = CaveError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			let paths = try_paths_from_str(s)?;
			let points = || paths.iter().flatten();

			let floor = points().map(|&[_, y]| y).max().unwrap_or(0) + 2;
			let [x_min, x_max] = match points().map(|&[x, _]| x).minmax() {
				MinMaxResult::NoElements => [SOURCE[0]; 2],
				MinMaxResult::OneElement(x) => [x; 2],
				MinMaxResult::MinMax(min, max) => [min, max],
			};
			let x_offset = x_min.min(SOURCE[0].saturating_sub(floor)).saturating_sub(1);
			let width = x_max.max(SOURCE[0] + floor) + 2 - x_offset;

			let mut rock = Grid::from_fn(width, floor, |_| false);
			for path in &paths {
				// A path of a single point is a single rock
				for segment in path.windows(2).chain(path.chunks(1).take(usize::from(path.len() == 1))) {
					let ([x0, y0], [x1, y1]) = (segment[0], segment[segment.len() - 1]);
					for (x, y) in iproduct!(x0.min(x1)..=x0.max(x1), y0.min(y1)..=y0.max(y1)) {
						let pos = rock.pos([x - x_offset, y]);
						rock[pos] = true;
					}
				}
			}

			let source = rock.pos([SOURCE[0] - x_offset, SOURCE[1]]);
			Ok(Cave { rock, x_offset, source })
		}
	}
}


impl Cave {
	fn fmt_sand(&self, sand: &Grid<bool>) -> String {
		let mut s = String::with_capacity((self.rock.width() + 1) * self.floor());
		for (y, (rock, sand)) in self.rock.rows().zip(sand.rows()).enumerate() {
			for (x, (&rock, &sand)) in rock.iter().zip(sand).enumerate() {
				s.push(match (rock, sand) {
					(true, _) => '#',
					(_, true) => 'o',
					_ if [x + self.x_offset, y] == SOURCE => '+',
					_ => '.',
				});
			}
			s.push('\n');
		}
		s
	}
}


#[cfg(test)]
mod tests {
	use super::*;

	const INPUT: &str = indoc::indoc! { "
		498,4 -> 498,6 -> 496,6
		503,4 -> 502,4 -> 502,9 -> 494,9
	" };

	#[test]
	fn example() {
		let cave = input_cave_from_str(INPUT).unwrap();
		assert_eq!(cave.floor(), 11);
		assert_eq!(part1_impl(&cave), 24);
		assert_eq!(part2_impl(&cave), 93);
	}

	#[test]
	fn flood_fill_matches_pouring() {
		let cave = input_cave_from_str(INPUT).unwrap();
		let (rested, sand) = pour::<false>(&cave);
		assert_eq!(rested, 93);
		let reached = search::reachable(&cave, cave.source);
		assert!(sand.iter().enumerate().all(|(pos, &sand)| sand == reached.contains(&pos)));
	}

	#[test]
	fn first_units() {
		let cave = input_cave_from_str(INPUT).unwrap();
		let (_, sand) = pour::<true>(&cave);
		let pos = |x: usize, y| sand.pos([x - cave.x_offset, y]);
		assert!(sand[pos(500, 8)] && sand[pos(499, 8)] && sand[pos(501, 8)]);
		assert!(sand[pos(495, 8)] && !sand[pos(494, 8)]);
		assert!(sand[pos(500, 2)] && !sand[pos(500, 1)]);
	}

	#[test]
	fn no_rock() {
		let cave = input_cave_from_str("").unwrap();
		assert_eq!(part1_impl(&cave), 0);
		assert_eq!(part2_impl(&cave), 4);
		let cave = input_cave_from_str("500,3\n").unwrap();
		assert_eq!(part1_impl(&cave), 0);
		assert_eq!(part2_impl(&cave), 5 * 5 - 1);
	}

	#[test]
	fn invalid() {
		assert!(matches!(input_cave_from_str("498,4 -> 496,6\n"), Err(Error::Input(_))));
		assert!(matches!(input_cave_from_str("498,4 -> 498\n"), Err(Error::Input(_))));
		assert!(matches!(input_cave_from_str("498,4 => 498,6\n"), Err(Error::Input(_))));
	}
}
