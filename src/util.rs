// Copyright (c) 2022 Bastiaan Marinus van de Weerd


#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum Part {
	#[default]
	One,
	Two,
}

impl std::fmt::Display for Part {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Part::One => f.write_str("part 1"),
			Part::Two => f.write_str("part 2"),
		}
	}
}


/// Declares a `dayNN` module per listed day, and a `run` function
/// dispatching to their `part1` & `part2` functions, which take the puzzle
/// input & return a [`Display`](std::fmt::Display)able answer.
macro_rules! mod_days { ( $( $day:literal ),+ $(,)? ) => { paste::paste! {
	$( mod [<day $day>]; )+

	pub(crate) const DAYS: &[u8] = &[$( $day ),+];

	pub(crate) fn run(day: u8, part: $crate::util::Part, input: &str)
	-> Result<String, $crate::error::Error> {
		use $crate::util::Part;
		match (day, part) {
			$(
				($day, Part::One) => [<day $day>]::part1(input).map(|answer| answer.to_string()),
				($day, Part::Two) => [<day $day>]::part2(input).map(|answer| answer.to_string()),
			)+
			_ => Err($crate::error::Error::UnknownDay(day)),
		}
	}
} } }

pub(crate) use mod_days;


#[cfg(test)]
mod tests {
	use super::Part;

	#[test]
	fn unknown_day() {
		assert!(matches!(crate::run(1, Part::One, ""), Err(crate::error::Error::UnknownDay(1))));
		assert!(!crate::DAYS.contains(&1));
	}

	#[test]
	fn dispatch() {
		assert_eq!(crate::run(20, Part::One, "1\n2\n-3\n3\n-2\n0\n4\n").unwrap(), "3");
		assert!(matches!(crate::run(12, Part::Two, "Sx\n"), Err(crate::error::Error::Input(_))));
	}
}
