// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::fmt::{self, Write as _};
use crate::{error::Error, search::{CycleDetector, Extrapolation}};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Jet { Left, Right }

const WIDTH: usize = 7;

/// Rows of each rock, bottom-up, as they appear: two units from the left
/// wall. Bit 6 is the leftmost column.
const ROCKS: [&[u8]; 5] = [
	&[0b0011110],
	&[0b0001000, 0b0011100, 0b0001000],
	&[0b0011100, 0b0000100, 0b0000100],
	&[0b0010000, 0b0010000, 0b0010000, 0b0010000],
	&[0b0011000, 0b0011000],
];

/// Rows of the top of the tower making up a cycle key.
const SKYLINE: usize = 32;

type Skyline = [u8; SKYLINE];


struct Chamber<'j> {
	jets: &'j [Jet],
	/// Index of the next jet.
	jet: usize,
	/// Settled rock, bottom-up.
	rows: Vec<u8>,
	rocks: usize,
}

impl<'j> Chamber<'j> {
	fn new(jets: &'j [Jet]) -> Self {
		Chamber { jets, jet: 0, rows: Vec::new(), rocks: 0 }
	}

	fn height(&self) -> usize { self.rows.len() }

	fn collides(&self, rock: &[u8], y: usize) -> bool {
		rock.iter().enumerate()
			.any(|(dy, row)| self.rows.get(y + dy).map_or(false, |settled| settled & row != 0))
	}

	fn pushed(rock: &[u8; 4], len: usize, jet: Jet) -> Option<[u8; 4]> {
		let rows = &rock[..len];
		match jet {
			Jet::Left if rows.iter().all(|row| row & 1 << (WIDTH - 1) == 0) => Some(rock.map(|row| row << 1)),
			Jet::Right if rows.iter().all(|row| row & 1 == 0) => Some(rock.map(|row| row >> 1)),
			_ => None,
		}
	}

	fn drop_rock(&mut self) {
		let shape = ROCKS[self.rocks % ROCKS.len()];
		let len = shape.len();
		let mut rock = [0; 4];
		rock[..len].copy_from_slice(shape);

		let mut y = self.height() + 3;
		loop {
			let jet = self.jets[self.jet];
			self.jet = (self.jet + 1) % self.jets.len();
			if let Some(pushed) = Self::pushed(&rock, len, jet) {
				if !self.collides(&pushed[..len], y) { rock = pushed }
			}
			if y == 0 || self.collides(&rock[..len], y - 1) { break }
			y -= 1;
		}

		if self.rows.len() < y + len { self.rows.resize(y + len, 0) }
		for (settled, row) in self.rows[y..].iter_mut().zip(&rock[..len]) { *settled |= row }
		self.rocks += 1;
	}

	/// Top rows of the tower, the floor counting as full rows.
	fn skyline(&self) -> Skyline {
		std::array::from_fn(|i| self.height().checked_sub(i + 1)
			.map_or((1 << WIDTH) - 1, |y| self.rows[y]))
	}
}

impl fmt::Display for Chamber<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for row in self.rows.iter().rev() {
			f.write_char('|')?;
			for x in 0..WIDTH {
				f.write_char(if row & 1 << (WIDTH - 1 - x) != 0 { '#' } else { '.' })?;
			}
			f.write_str("|\n")?;
		}
		f.write_str("+-------+")
	}
}


/// Tower height after `rocks` rocks, skipping ahead once the shape, jet &
/// skyline of the tower repeat.
fn height_after(jets: &[Jet], rocks: usize) -> usize {
	let mut chamber = Chamber::new(jets);
	let mut detector = CycleDetector::<(usize, usize, Skyline)>::default();
	while chamber.rocks < rocks {
		let key = (chamber.rocks % ROCKS.len(), chamber.jet, chamber.skyline());
		if let Some(cycle) = detector.observe(key, chamber.rocks, chamber.height()) {
			let Extrapolation { cycles, skipped, remaining } = cycle.extrapolate(rocks);
			tracing::debug!(rocks = chamber.rocks, cycles, remaining, "skipping ahead");
			for _ in 0..remaining { chamber.drop_rock() }
			return chamber.height() + skipped
		}
		chamber.drop_rock();
	}
	tracing::trace!("\n{chamber}");
	chamber.height()
}


fn input_jets_from_str(s: &str) -> Result<Vec<Jet>, Error> {
	parsing::jets_from_str(s).map_err(Error::input)
}


fn part1_impl(input_jets: &[Jet]) -> usize {
	height_after(input_jets, 2022)
}

pub(crate) fn part1(input: &str) -> Result<usize, Error> {
	Ok(part1_impl(&input_jets_from_str(input)?))
}


fn part2_impl(input_jets: &[Jet]) -> usize {
	height_after(input_jets, 1_000_000_000_000)
}

pub(crate) fn part2(input: &str) -> Result<usize, Error> {
	Ok(part2_impl(&input_jets_from_str(input)?))
}


mod parsing {
	use super::Jet;

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) enum JetsError {
		Empty,
		InvalidByte { column: usize, found: u8 },
	}

	pub(super) fn jets_from_str(s: &str) -> Result<Vec<Jet>, JetsError> {
		let jets = s.trim_end()
			.bytes()
			.enumerate()
			.map(|(c, b)| match b {
				b'<' => Ok(Jet::Left),
				b'>' => Ok(Jet::Right),
				found => Err(JetsError::InvalidByte { column: c + 1, found }),
			})
			.collect::<Result<Vec<_>, _>>()?;
		if jets.is_empty() { return Err(JetsError::Empty) }
		Ok(jets)
	}
}


#[cfg(test)]
mod tests {
	use super::*;

	const INPUT: &str = ">>><<><>><<<>><>>><<<>>><<<><<<>><>><<>>\n";

	fn simulated(jets: &[Jet], rocks: usize) -> usize {
		let mut chamber = Chamber::new(jets);
		for _ in 0..rocks { chamber.drop_rock() }
		chamber.height()
	}

	#[test]
	fn example() {
		let jets = input_jets_from_str(INPUT).unwrap();
		assert_eq!(part1_impl(&jets), 3068);
		assert_eq!(part2_impl(&jets), 1514285714288);
	}

	#[test]
	fn first_rocks() {
		let jets = input_jets_from_str(INPUT).unwrap();
		let mut chamber = Chamber::new(&jets);
		chamber.drop_rock();
		chamber.drop_rock();
		assert_eq!(chamber.to_string(), indoc::indoc! { "
			|...#...|
			|..###..|
			|...#...|
			|..####.|
			+-------+"
		});
		assert_eq!(simulated(&jets, 10), 17);
	}

	#[test]
	fn skipping_matches_simulating() {
		let jets = input_jets_from_str(INPUT).unwrap();
		for rocks in [0, 1, 5, 100, 1234, 5000] {
			assert_eq!(height_after(&jets, rocks), simulated(&jets, rocks));
		}
	}

	#[test]
	fn single_jet() {
		// Every rock gets pushed flush against the right wall
		let jets = input_jets_from_str(">").unwrap();
		assert_eq!(simulated(&jets, 5), 13);
		assert_eq!(height_after(&jets, 5), 13);
		assert_eq!(height_after(&jets, 5_000_000), 13 * 1_000_000);
	}

	#[test]
	fn invalid() {
		assert!(matches!(input_jets_from_str(""), Err(Error::Input(_))));
		assert!(matches!(input_jets_from_str("<<v>"), Err(Error::Input(_))));
	}
}
