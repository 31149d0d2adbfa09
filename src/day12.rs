// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use crate::{error::Error, search::{self, Graph, Grid, SearchSpace}};


struct Heightmap {
	heights: Grid<u8>,
	start: usize,
	end: usize,
}

impl Heightmap {
	/// Positions adjacent to `pos` that can be climbed to from it.
	fn climbable(&self, pos: usize) -> impl Iterator<Item = usize> + '_ {
		let height = self.heights[pos];
		self.heights.adjacent(pos).filter(move |&next| self.heights[next] <= height + 1)
	}

	/// Positions adjacent to `pos` from which it can be climbed to.
	fn descendable(&self, pos: usize) -> impl Iterator<Item = usize> + '_ {
		let height = self.heights[pos];
		self.heights.adjacent(pos).filter(move |&next| self.heights[next] + 1 >= height)
	}
}

/// Climbing from the start towards the end.
impl Graph for Heightmap {
	type State = usize;
	fn successors(&self, pos: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
		self.climbable(pos).map(|next| (next, 1))
	}
}

impl SearchSpace for Heightmap {
	fn is_goal(&self, pos: usize) -> bool { pos == self.end }
	fn heuristic(&self, pos: usize) -> usize { self.heights.manhattan(pos, self.end) }
}

/// Walking back down from the end towards any lowest position.
struct Descent<'h>(&'h Heightmap);

impl Graph for Descent<'_> {
	type State = usize;
	fn successors(&self, pos: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
		self.0.descendable(pos).map(|next| (next, 1))
	}
}

impl SearchSpace for Descent<'_> {
	fn is_goal(&self, pos: usize) -> bool { self.0.heights[pos] == 0 }
}


fn input_heightmap_from_str(s: &str) -> Result<Heightmap, Error> {
	s.parse().map_err(Error::input)
}


fn part1_impl(input_heightmap: &Heightmap) -> Result<usize, Error> {
	let path = search::shortest_path(input_heightmap, input_heightmap.start)?;
	tracing::trace!("{}", input_heightmap.fmt_path(&path.states));
	Ok(path.steps())
}

pub(crate) fn part1(input: &str) -> Result<usize, Error> {
	part1_impl(&input_heightmap_from_str(input)?)
}


fn part2_impl(input_heightmap: &Heightmap) -> Result<usize, Error> {
	Ok(search::breadth_first(&Descent(input_heightmap), input_heightmap.end)?.steps())
}

pub(crate) fn part2(input: &str) -> Result<usize, Error> {
	part2_impl(&input_heightmap_from_str(input)?)
}


mod parsing {
	use std::str::FromStr;
	use crate::search::Grid;
	use super::Heightmap;

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) enum HeightmapError {
		Empty,
		LineLen { line: usize, len: usize, found: usize },
		InvalidByte { line: usize, column: usize, found: u8 },
		DuplicateStart { line: usize, column: usize },
		DuplicateEnd { line: usize, column: usize },
		NoStart,
		NoEnd,
	}

	impl FromStr for Heightmap {
		type Err = HeightmapError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			use HeightmapError as E;

			let stride = s.lines().next().map(str::len).filter(|&len| len > 0).ok_or(E::Empty)?;
			let mut heights = Vec::with_capacity(s.len());
			let (mut start, mut end) = (None, None);

			for (l, line) in s.lines().enumerate() {
				if line.len() != stride {
					return Err(E::LineLen { line: l + 1, len: stride, found: line.len() })
				}
				for (c, b) in line.bytes().enumerate() {
					let pos = heights.len();
					heights.push(match b {
						b'S' if start.is_some() => return Err(E::DuplicateStart { line: l + 1, column: c + 1 }),
						b'E' if end.is_some() => return Err(E::DuplicateEnd { line: l + 1, column: c + 1 }),
						b'S' => { start = Some(pos); 0 }
						b'E' => { end = Some(pos); 25 }
						b'a'..=b'z' => b - b'a',
						found => return Err(E::InvalidByte { line: l + 1, column: c + 1, found }),
					});
				}
			}

			Ok(Heightmap {
				heights: Grid::new(heights, stride),
				start: start.ok_or(E::NoStart)?,
				end: end.ok_or(E::NoEnd)?,
			})
		}
	}
}


impl Heightmap {
	/// The heightmap with `path` drawn over it in capitals.
	fn fmt_path(&self, path: &[usize]) -> String {
		let mut s = String::with_capacity(self.heights.len() + self.heights.height());
		for (pos, &height) in self.heights.iter().enumerate() {
			let c = (b'a' + height) as char;
			s.push(if path.contains(&pos) { c.to_ascii_uppercase() } else { c });
			if (pos + 1) % self.heights.width() == 0 { s.push('\n') }
		}
		s
	}
}
