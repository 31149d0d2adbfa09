// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::path::PathBuf;
use clap::Parser;
use crate::util::Part;


/// Solve one part of one day's puzzle, printing the answer.
#[derive(Parser, Debug)]
#[command(name = "advent22-search", version)]
pub(crate) struct Args {
	/// Day to solve
	#[arg(value_parser = clap::value_parser!(u8).range(1..=25))]
	pub(crate) day: u8,

	/// `part1`/`1` or `part2`/`2`, and/or an input file ending in `.txt`
	/// (the last of each kind wins)
	pub(crate) selectors: Vec<String>,

	/// Directory holding the default `dayNN.txt` inputs
	#[arg(long, default_value = "input")]
	pub(crate) input_dir: PathBuf,

	/// Tracing filter to use when `RUST_LOG` is not set
	#[arg(long, default_value = "warn")]
	pub(crate) log: String,
}

#[derive(Debug, PartialEq, Eq)]
enum Selector {
	Part(Part),
	Input(PathBuf),
}

impl Selector {
	fn parse(token: &str) -> Option<Selector> {
		match token {
			"part1" | "1" => Some(Selector::Part(Part::One)),
			"part2" | "2" => Some(Selector::Part(Part::Two)),
			path if path.ends_with(".txt") => Some(Selector::Input(path.into())),
			_ => None,
		}
	}
}

impl Args {
	/// Part & input path selected by [`Args::selectors`], with defaults filled in.
	pub(crate) fn selection(&self) -> (Part, PathBuf) {
		let mut part = Part::default();
		let mut input = None;
		for token in &self.selectors {
			match Selector::parse(token) {
				Some(Selector::Part(p)) => part = p,
				Some(Selector::Input(path)) => input = Some(path),
				None => tracing::warn!(%token, "ignoring unrecognized selector"),
			}
		}
		let input = input.unwrap_or_else(|| self.input_dir.join(format!("day{:02}.txt", self.day)));
		(part, input)
	}
}


#[cfg(test)]
mod tests {
	use std::path::PathBuf;
	use test_case::test_case;
	use clap::Parser as _;
	use super::{Args, Part};

	#[test_case(&["12"], Part::One, "input/day12.txt" ; "defaults")]
	#[test_case(&["12", "part2"], Part::Two, "input/day12.txt" ; "part2 token")]
	#[test_case(&["9", "2", "big.txt"], Part::Two, "big.txt" ; "short token & file")]
	#[test_case(&["19", "sample.txt", "2", "part1"], Part::One, "sample.txt" ; "last part wins")]
	#[test_case(&["17", "--input-dir", "inputs", "nonsense"], Part::One, "inputs/day17.txt" ; "input dir")]
	fn selection(args: &[&str], part: Part, input: &str) {
		let args = Args::try_parse_from(std::iter::once("advent22-search").chain(args.iter().copied()))
			.unwrap();
		assert_eq!(args.selection(), (part, PathBuf::from(input)));
	}

	#[test]
	fn day_out_of_range() {
		assert!(Args::try_parse_from(["advent22-search", "26"]).is_err());
		assert!(Args::try_parse_from(["advent22-search"]).is_err());
	}
}
