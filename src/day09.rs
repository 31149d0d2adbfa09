// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::collections::HashSet;
use crate::error::Error;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dir { Up, Down, Left, Right }

impl Dir {
	fn delta(self) -> [isize; 2] {
		match self { Dir::Up => [0, 1], Dir::Down => [0, -1], Dir::Left => [-1, 0], Dir::Right => [1, 0] }
	}
}

#[derive(Debug, Clone, Copy)]
struct Move(Dir, usize);


/// `KNOTS` knots, the first being the head.
#[derive(Debug)]
struct Rope<const KNOTS: usize> {
	knots: [[isize; 2]; KNOTS],
}

impl<const KNOTS: usize> Rope<KNOTS> {
	fn new() -> Self {
		Rope { knots: [[0; 2]; KNOTS] }
	}

	fn tail(&self) -> [isize; 2] {
		self.knots[KNOTS - 1]
	}

	/// Moves the head one step; every other knot that ends up out of touch
	/// with the one ahead of it moves one step (diagonally if needed) towards it.
	fn pull(&mut self, dir: Dir) {
		let [dx, dy] = dir.delta();
		self.knots[0][0] += dx;
		self.knots[0][1] += dy;
		for k in 1..KNOTS {
			let (ahead, knot) = (self.knots[k - 1], self.knots[k]);
			let delta = [ahead[0] - knot[0], ahead[1] - knot[1]];
			if delta[0].abs() <= 1 && delta[1].abs() <= 1 { break }
			self.knots[k] = [knot[0] + delta[0].signum(), knot[1] + delta[1].signum()];
		}
	}
}


/// Number of distinct positions the tail visits.
fn tail_visits<const KNOTS: usize>(moves: &[Move]) -> usize {
	let mut rope = Rope::<KNOTS>::new();
	let mut visited = HashSet::from([rope.tail()]);
	for &Move(dir, amount) in moves {
		for _ in 0..amount {
			rope.pull(dir);
			visited.insert(rope.tail());
		}
		tracing::trace!(?dir, amount, head = ?rope.knots[0], tail = ?rope.tail(), "moved");
	}
	visited.len()
}


fn input_moves_from_str(s: &str) -> Result<Vec<Move>, Error> {
	parsing::try_moves_from_str(s).map_err(Error::input)
}


fn part1_impl(input_moves: &[Move]) -> usize {
	tail_visits::<2>(input_moves)
}

pub(crate) fn part1(input: &str) -> Result<usize, Error> {
	Ok(part1_impl(&input_moves_from_str(input)?))
}


fn part2_impl(input_moves: &[Move]) -> usize {
	tail_visits::<10>(input_moves)
}

pub(crate) fn part2(input: &str) -> Result<usize, Error> {
	Ok(part2_impl(&input_moves_from_str(input)?))
}


mod parsing {
	use {std::{num::ParseIntError, str::FromStr}, itertools::Itertools as _};
	use super::{Dir, Move};

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) enum MoveError {
		Format,
		Dir(String),
		Amount(ParseIntError),
	}

	impl FromStr for Move {
		type Err = MoveError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			let (dir, amount) = s.split(' ').collect_tuple().ok_or(MoveError::Format)?;
			let dir = match dir {
				"U" => Dir::Up,
				"D" => Dir::Down,
				"L" => Dir::Left,
				"R" => Dir::Right,
				_ => return Err(MoveError::Dir(dir.to_owned())),
			};
			Ok(Move(dir, amount.parse().map_err(MoveError::Amount)?))
		}
	}

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) struct MovesError { line: usize, source: MoveError }

	pub(super) fn try_moves_from_str(s: &str) -> Result<Vec<Move>, MovesError> {
		s.lines().enumerate()
			.map(|(l, line)| line.parse().map_err(|source| MovesError { line: l + 1, source }))
			.collect()
	}
}


#[cfg(test)]
mod tests {
	use test_case::test_case;
	use super::*;

	const INPUTS: [&str; 2] = [
		indoc::indoc! { "
			R 4
			U 4
			L 3
			D 1
			R 4
			D 1
			L 5
			R 2
		" },
		indoc::indoc! { "
			R 5
			U 8
			L 8
			D 3
			R 17
			D 10
			L 25
			U 20
		" },
	];

	#[test]
	fn examples() {
		let [short, long] = INPUTS.map(|input| input_moves_from_str(input).unwrap());
		assert_eq!(part1_impl(&short), 13);
		assert_eq!(part2_impl(&short), 1);
		assert_eq!(part2_impl(&long), 36);
	}

	#[test_case(&[Dir::Right, Dir::Right], [1, 0] ; "straight")]
	#[test_case(&[Dir::Right, Dir::Up], [0, 0] ; "still touching")]
	#[test_case(&[Dir::Right, Dir::Up, Dir::Up], [1, 1] ; "diagonal")]
	fn tail_follows(pulls: &[Dir], tail: [isize; 2]) {
		let mut rope = Rope::<2>::new();
		for &dir in pulls { rope.pull(dir) }
		assert_eq!(rope.tail(), tail);
	}

	#[test]
	fn invalid() {
		assert!(matches!(input_moves_from_str("R4\n"), Err(Error::Input(_))));
		assert!(matches!(input_moves_from_str("X 4\n"), Err(Error::Input(_))));
		assert!(matches!(input_moves_from_str("UP 4\n"), Err(Error::Input(_))));
		assert!(matches!(input_moves_from_str("R -4\n"), Err(Error::Input(_))));
		assert!(matches!(input_moves_from_str("R 4 2\n"), Err(Error::Input(_))));
	}
}
