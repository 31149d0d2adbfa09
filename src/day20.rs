// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use crate::{error::Error, ring::Ring};


struct File {
	numbers: Vec<i64>,
	/// Index of the file's only zero.
	zero: usize,
}

fn input_file_from_str(s: &str) -> Result<File, Error> {
	s.parse().map_err(Error::input)
}


fn part1and2_impl<const MIXES: usize, const DECRYPTION_KEY: i64>(input_file: &File) -> i64 {
	let mut ring = input_file.numbers.iter().map(|number| number * DECRYPTION_KEY).collect::<Ring<_>>();
	for mix in 0..MIXES {
		for index in 0..ring.len() {
			let offset = *ring.get(index);
			ring.shift(index, offset);
		}
		tracing::trace!(mix, from_zero = ?ring.iter_from(input_file.zero).collect::<Vec<_>>(), "mixed");
	}

	// Values keep their insertion index
	[1000, 2000, 3000].into_iter()
		.map(|n| *ring.get(ring.nth_after(input_file.zero, n)))
		.sum()
}


fn part1_impl(input_file: &File) -> i64 {
	part1and2_impl::<1, 1>(input_file)
}

pub(crate) fn part1(input: &str) -> Result<i64, Error> {
	Ok(part1_impl(&input_file_from_str(input)?))
}


fn part2_impl(input_file: &File) -> i64 {
	part1and2_impl::<10, 811589153>(input_file)
}

pub(crate) fn part2(input: &str) -> Result<i64, Error> {
	Ok(part2_impl(&input_file_from_str(input)?))
}


mod parsing {
	use std::{num::ParseIntError, str::FromStr};
	use super::File;

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) enum FileError {
		Number { line: usize, source: ParseIntError },
		NoZero,
		MultipleZeros { line: usize },
	}

	impl FromStr for File {
		type Err = FileError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			let mut numbers = Vec::new();
			let mut zero = None;
			for (l, line) in s.lines().enumerate() {
				let number: i64 = line.trim().parse()
					.map_err(|e| FileError::Number { line: l + 1, source: e })?;
				if number == 0 {
					if zero.is_some() { return Err(FileError::MultipleZeros { line: l + 1 }) }
					zero = Some(l);
				}
				numbers.push(number);
			}
			Ok(File { numbers, zero: zero.ok_or(FileError::NoZero)? })
		}
	}
}


#[cfg(test)]
mod tests {
	use super::*;

	const INPUT: &str = indoc::indoc! { "
		1
		2
		-3
		3
		-2
		0
		4
	" };

	#[test]
	fn example() {
		let file = input_file_from_str(INPUT).unwrap();
		assert_eq!(part1_impl(&file), 3);
		assert_eq!(part2_impl(&file), 1623178306);
	}

	#[test]
	fn mixed_once() {
		let file = input_file_from_str(INPUT).unwrap();
		let mut ring = file.numbers.iter().copied().collect::<Ring<_>>();
		for index in 0..ring.len() {
			let offset = *ring.get(index);
			ring.shift(index, offset);
		}
		assert_eq!(ring.iter_from(file.zero).copied().collect::<Vec<_>>(), [0, 3, -2, 1, 2, -3, 4]);
	}

	#[test]
	fn zero_only() {
		let file = input_file_from_str("0\n").unwrap();
		assert_eq!(part1_impl(&file), 0);
		assert_eq!(part2_impl(&file), 0);
	}

	#[test]
	fn invalid() {
		assert!(matches!(input_file_from_str(""), Err(Error::Input(_))));
		assert!(matches!(input_file_from_str("1\n2\n"), Err(Error::Input(_))));
		assert!(matches!(input_file_from_str("0\n1\n0\n"), Err(Error::Input(_))));
		assert!(matches!(input_file_from_str("0\nx\n"), Err(Error::Input(_))));
	}
}
