// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::{collections::{HashMap, HashSet}, fmt::{self, Write as _}, ops::RangeInclusive};
use crate::error::Error;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dir { North, South, West, East }

impl Dir {
	/// In the order considered during the first round.
	const ALL: [Dir; 4] = [Dir::North, Dir::South, Dir::West, Dir::East];

	/// The three positions that must be free to move in this direction,
	/// the first being where the move goes.
	fn looks(self, [x, y]: [isize; 2]) -> [[isize; 2]; 3] {
		match self {
			Dir::North => [[x, y - 1], [x - 1, y - 1], [x + 1, y - 1]],
			Dir::South => [[x, y + 1], [x - 1, y + 1], [x + 1, y + 1]],
			Dir::West => [[x - 1, y], [x - 1, y - 1], [x - 1, y + 1]],
			Dir::East => [[x + 1, y], [x + 1, y - 1], [x + 1, y + 1]],
		}
	}
}

fn neighbours([x, y]: [isize; 2]) -> impl Iterator<Item = [isize; 2]> {
	itertools::iproduct!(-1..=1, -1..=1)
		.filter(|&d| d != (0, 0))
		.map(move |(dx, dy)| [x + dx, y + dy])
}


struct Elves(HashSet<[isize; 2]>);

impl Elves {
	/// Where the elf at `pos` proposes to move in `round`, if anywhere.
	fn proposal(&self, pos: [isize; 2], round: usize) -> Option<[isize; 2]> {
		if !neighbours(pos).any(|adj| self.0.contains(&adj)) { return None }
		(0..Dir::ALL.len())
			.map(|i| Dir::ALL[(round + i) % Dir::ALL.len()].looks(pos))
			.find(|looks| looks.iter().all(|adj| !self.0.contains(adj)))
			.map(|[to, ..]| to)
	}

	/// Plays one round (zero-based); returns how many elves moved.
	fn play(&mut self, round: usize) -> usize {
		use rayon::iter::{IntoParallelRefIterator as _, ParallelIterator as _};

		let proposals = self.0.par_iter()
			.filter_map(|&from| self.proposal(from, round).map(|to| (to, from)))
			.collect::<Vec<_>>();

		let mut contenders = HashMap::<_, usize>::new();
		for &(to, _) in &proposals { *contenders.entry(to).or_default() += 1 }

		let mut moved = 0;
		for (to, from) in proposals {
			if contenders[&to] > 1 { continue }
			self.0.remove(&from);
			self.0.insert(to);
			moved += 1;
		}
		tracing::trace!(round, moved, "\n{self}");
		moved
	}

	/// Smallest rectangle containing every elf.
	fn bounds(&self) -> Option<[RangeInclusive<isize>; 2]> {
		use itertools::Itertools as _;
		let x = self.0.iter().map(|[x, _]| *x).minmax().into_option()?;
		let y = self.0.iter().map(|[_, y]| *y).minmax().into_option()?;
		Some([x.0..=x.1, y.0..=y.1])
	}

	fn empty_ground(&self) -> usize {
		let Some([x, y]) = self.bounds() else { return 0 };
		x.count() * y.count() - self.0.len()
	}
}

impl fmt::Display for Elves {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let Some([xs, ys]) = self.bounds() else { return Ok(()) };
		for y in ys {
			for x in xs.clone() {
				f.write_char(if self.0.contains(&[x, y]) { '#' } else { '.' })?;
			}
			f.write_char('\n')?;
		}
		Ok(())
	}
}


fn input_elves_from_str(s: &str) -> Result<Elves, Error> {
	s.parse().map_err(Error::input)
}


fn part1_impl(mut input_elves: Elves) -> usize {
	for round in 0..10 {
		if input_elves.play(round) == 0 { break }
	}
	input_elves.empty_ground()
}

pub(crate) fn part1(input: &str) -> Result<usize, Error> {
	Ok(part1_impl(input_elves_from_str(input)?))
}


/// Number of the first round in which no elf moves.
fn part2_impl(mut input_elves: Elves) -> usize {
	(0..).find(|&round| input_elves.play(round) == 0).map_or(0, |round| round + 1)
}

pub(crate) fn part2(input: &str) -> Result<usize, Error> {
	Ok(part2_impl(input_elves_from_str(input)?))
}


mod parsing {
	use std::{collections::HashSet, str::FromStr};
	use super::Elves;

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) enum ElvesError {
		InvalidByte { line: usize, column: usize, found: u8 },
	}

	impl FromStr for Elves {
		type Err = ElvesError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			let mut elves = HashSet::new();
			for (l, line) in s.lines().enumerate() {
				for (c, b) in line.bytes().enumerate() {
					match b {
						b'#' => { elves.insert([c as isize, l as isize]); }
						b'.' => (),
						found => return Err(ElvesError::InvalidByte { line: l + 1, column: c + 1, found }),
					}
				}
			}
			Ok(Elves(elves))
		}
	}
}
