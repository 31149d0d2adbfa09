// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use crate::search::Exhausted;


#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
	/// Puzzle input that the day's parser rejected.
	#[error("invalid input: {0}")]
	Input(String),

	#[error(transparent)]
	Exhausted(#[from] Exhausted),

	/// Well-formed input that admits no answer.
	#[error("unsolvable: {0}")]
	Unsolvable(String),

	#[error("day {0} has no solver")]
	UnknownDay(u8),
}

impl Error {
	/// Wraps a day's own parsing error, keeping its line/column details.
	pub(crate) fn input(err: impl std::fmt::Debug) -> Self {
		Error::Input(format!("{err:?}"))
	}

	pub(crate) fn unsolvable(err: impl std::fmt::Debug) -> Self {
		Error::Unsolvable(format!("{err:?}"))
	}
}
