// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use crate::{error::Error, search::{self, Graph, Grid, SearchSpace}};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dir { North, East, South, West }

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tile {
	Wall,
	Clear,
	/// Clear but for a blizzard starting out here.
	Blizzard(Dir),
}

struct Valley {
	/// Walls included.
	tiles: Grid<Tile>,
	entrance: usize,
	exit: usize,
	/// Blizzards are back in their starting positions after this many minutes.
	period: usize,
}

impl Valley {
	/// Interior width & height, which the blizzards wrap around.
	fn interior(&self) -> [usize; 2] {
		[self.tiles.width() - 2, self.tiles.height() - 2]
	}

	/// Whether `pos` is neither a wall nor hit by a blizzard at `time`.
	fn is_clear(&self, pos: usize, time: usize) -> bool {
		if self.tiles[pos] == Tile::Wall { return false }
		let [x, y] = self.tiles.xy(pos);
		if y == 0 || y == self.tiles.height() - 1 { return true }

		let ([w, h], [x, y]) = (self.interior(), [x - 1, y - 1]);
		let blizzard_from = |[x0, y0]: [usize; 2], dir|
			self.tiles[self.tiles.pos([x0 + 1, y0 + 1])] == Tile::Blizzard(dir);
		!(blizzard_from([(x + w - time % w) % w, y], Dir::East)
			|| blizzard_from([(x + time) % w, y], Dir::West)
			|| blizzard_from([x, (y + h - time % h) % h], Dir::South)
			|| blizzard_from([x, (y + time) % h], Dir::North))
	}
}


/// Crossing the valley from one gap in its walls to the other, departing at
/// some time. States are positions & the time modulo [`Valley::period`].
struct Trip<'v> {
	valley: &'v Valley,
	departure: usize,
	destination: usize,
}

impl Graph for Trip<'_> {
	type State = (usize, usize);

	fn successors(&self, (pos, phase): (usize, usize)) -> impl Iterator<Item = ((usize, usize), usize)> + '_ {
		let time = phase + 1;
		std::iter::once(pos)
			.chain(self.valley.tiles.adjacent(pos))
			.filter(move |&next| self.valley.is_clear(next, time))
			.map(move |next| ((next, time % self.valley.period), 1))
	}
}

impl SearchSpace for Trip<'_> {
	fn is_goal(&self, (pos, _): (usize, usize)) -> bool { pos == self.destination }

	fn heuristic(&self, (pos, _): (usize, usize)) -> usize {
		self.valley.tiles.manhattan(pos, self.destination)
	}
}

impl Valley {
	/// Time of arrival at `destination`, leaving `origin` at `departure`.
	fn cross(&self, origin: usize, destination: usize, departure: usize) -> Result<usize, Error> {
		let trip = Trip { valley: self, departure, destination };
		let path = search::shortest_path(&trip, (origin, departure % self.period))?;
		tracing::debug!(departure, minutes = path.cost, arrived = ?path.goal(), "crossed");
		Ok(trip.departure + path.cost)
	}
}


fn input_valley_from_str(s: &str) -> Result<Valley, Error> {
	s.parse().map_err(Error::input)
}


fn part1_impl(input_valley: &Valley) -> Result<usize, Error> {
	input_valley.cross(input_valley.entrance, input_valley.exit, 0)
}

pub(crate) fn part1(input: &str) -> Result<usize, Error> {
	part1_impl(&input_valley_from_str(input)?)
}


fn part2_impl(input_valley: &Valley) -> Result<usize, Error> {
	let Valley { entrance, exit, .. } = *input_valley;
	[(entrance, exit), (exit, entrance), (entrance, exit)].into_iter()
		.try_fold(0, |time, (origin, destination)| input_valley.cross(origin, destination, time))
}

pub(crate) fn part2(input: &str) -> Result<usize, Error> {
	part2_impl(&input_valley_from_str(input)?)
}


mod parsing {
	use std::str::FromStr;
	use crate::search::Grid;
	use super::{Dir, Tile, Valley};

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) enum ValleyError {
		TooSmall,
		LineLen { line: usize, len: usize, found: usize },
		InvalidByte { line: usize, column: usize, found: u8 },
		/// The outer walls must be solid but for one gap in the top & one in the bottom wall.
		Gaps { line: usize },
	}

	fn gcd(a: usize, b: usize) -> usize {
		if b == 0 { a } else { gcd(b, a % b) }
	}

	impl FromStr for Valley {
		type Err = ValleyError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			use ValleyError as E;

			let lines = s.lines().collect::<Vec<_>>();
			let stride = lines.first().map_or(0, |line| line.len());
			if stride < 3 || lines.len() < 3 { return Err(E::TooSmall) }
			let last = lines.len() - 1;

			let mut tiles = Vec::with_capacity(stride * lines.len());
			let mut gaps = Vec::new();
			for (l, line) in lines.iter().enumerate() {
				if line.len() != stride {
					return Err(E::LineLen { line: l + 1, len: stride, found: line.len() })
				}
				let border_row = l == 0 || l == last;
				for (c, b) in line.bytes().enumerate() {
					let border = border_row || c == 0 || c == stride - 1;
					tiles.push(match b {
						b'#' => Tile::Wall,
						b'.' if border => { gaps.push((l, tiles.len())); Tile::Clear }
						b'.' => Tile::Clear,
						b'^' if !border => Tile::Blizzard(Dir::North),
						b'>' if !border => Tile::Blizzard(Dir::East),
						b'v' if !border => Tile::Blizzard(Dir::South),
						b'<' if !border => Tile::Blizzard(Dir::West),
						found => return Err(E::InvalidByte { line: l + 1, column: c + 1, found }),
					});
				}
			}

			let (entrance, exit) = match gaps[..] {
				[(0, entrance), (l, exit)] if l == last => (entrance, exit),
				[(0, _), (l, _), ..] | [(l, _), ..] => return Err(E::Gaps { line: l + 1 }),
				[] => return Err(E::Gaps { line: 1 }),
			};

			let [w, h] = [stride - 2, lines.len() - 2];
			Ok(Valley { tiles: Grid::new(tiles, stride), entrance, exit, period: w / gcd(w, h) * h })
		}
	}
}
