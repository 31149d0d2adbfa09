// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::collections::HashMap;
use crate::error::Error;


const ROOT: &str = "root";
const HUMAN: &str = "humn";


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator { Add, Sub, Mul, Div }

impl Operator {
	fn apply(self, left: i64, right: i64) -> Option<i64> {
		match self {
			Operator::Add => left.checked_add(right),
			Operator::Sub => left.checked_sub(right),
			Operator::Mul => left.checked_mul(right),
			Operator::Div => left.checked_div(right),
		}
	}

	/// `left` such that `left <op> right == output`.
	fn solve_left(self, output: i64, right: i64) -> Option<i64> {
		match self {
			Operator::Add => output.checked_sub(right),
			Operator::Sub => output.checked_add(right),
			Operator::Mul => exact_div(output, right),
			Operator::Div => output.checked_mul(right),
		}
	}

	/// `right` such that `left <op> right == output`.
	fn solve_right(self, output: i64, left: i64) -> Option<i64> {
		match self {
			Operator::Add => output.checked_sub(left),
			Operator::Sub => left.checked_sub(output),
			Operator::Mul => exact_div(output, left),
			Operator::Div => exact_div(left, output),
		}
	}
}

fn exact_div(dividend: i64, divisor: i64) -> Option<i64> {
	(dividend.checked_rem(divisor)? == 0).then(|| dividend / divisor)
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Job<'s> {
	Number(i64),
	Operation(Operator, [&'s str; 2]),
}

struct Monkeys<'s>(HashMap<&'s str, Job<'s>>);

#[allow(dead_code)]
#[derive(Debug)]
enum SolveError {
	Unknown(String),
	Cycle(String),
	Arithmetic(String),
	/// The human's number is needed by both operands of this monkey (or neither).
	Ambiguous(String),
}

impl<'s> Monkeys<'s> {
	fn job(&self, name: &str) -> Result<Job<'s>, SolveError> {
		self.0.get(name).copied().ok_or_else(|| SolveError::Unknown(name.to_owned()))
	}

	/// `root` & every monkey it depends on, each after the monkeys it depends on.
	fn order(&self, root: &'s str) -> Result<Vec<&'s str>, SolveError> {
		let mut done = HashMap::new();
		let mut order = Vec::new();
		let mut stack = vec![(root, false)];
		while let Some((name, operands_done)) = stack.pop() {
			if operands_done {
				done.insert(name, true);
				order.push(name);
				continue
			}
			match done.get(name) {
				// Pushed more than once before being visited
				Some(true) => continue,
				Some(false) => return Err(SolveError::Cycle(name.to_owned())),
				None => { done.insert(name, false); }
			}
			stack.push((name, true));
			if let Job::Operation(_, operands) = self.job(name)? {
				for operand in operands {
					match done.get(operand) {
						Some(true) => (),
						Some(false) => return Err(SolveError::Cycle(operand.to_owned())),
						None => stack.push((operand, false)),
					}
				}
			}
		}
		Ok(order)
	}

	/// Numbers yelled by `root` & the monkeys it depends on, leaving out
	/// those that depend on `unknown`.
	fn evaluate(&self, root: &'s str, unknown: Option<&str>) -> Result<HashMap<&'s str, i64>, SolveError> {
		let mut numbers = HashMap::new();
		for name in self.order(root)? {
			if Some(name) == unknown { continue }
			let number = match self.job(name)? {
				Job::Number(number) => number,
				Job::Operation(operator, [left, right]) => {
					let (Some(&left), Some(&right)) = (numbers.get(left), numbers.get(right)) else { continue };
					operator.apply(left, right).ok_or_else(|| SolveError::Arithmetic(name.to_owned()))?
				}
			};
			numbers.insert(name, number);
		}
		tracing::debug!(root, evaluated = numbers.len(), "evaluated");
		Ok(numbers)
	}

	fn root_number(&self) -> Result<i64, SolveError> {
		self.evaluate(ROOT, None)?
			.get(ROOT)
			.copied()
			.ok_or_else(|| SolveError::Unknown(ROOT.to_owned()))
	}

	/// The number the human must yell for both of root's operands to match.
	fn human_number(&self) -> Result<i64, SolveError> {
		let numbers = self.evaluate(ROOT, Some(HUMAN))?;

		let Job::Operation(_, [left, right]) = self.job(ROOT)? else {
			return Err(SolveError::Ambiguous(ROOT.to_owned()))
		};
		let (mut name, mut target) = match (numbers.get(left), numbers.get(right)) {
			(None, Some(&right)) => (left, right),
			(Some(&left), None) => (right, left),
			_ => return Err(SolveError::Ambiguous(ROOT.to_owned())),
		};

		while name != HUMAN {
			let Job::Operation(operator, [left, right]) = self.job(name)? else {
				unreachable!("only the human's number is unknown")
			};
			let solved = match (numbers.get(left), numbers.get(right)) {
				(None, Some(&right)) => operator.solve_left(target, right).map(|number| (left, number)),
				(Some(&left), None) => operator.solve_right(target, left).map(|number| (right, number)),
				_ => return Err(SolveError::Ambiguous(name.to_owned())),
			};
			(name, target) = solved.ok_or_else(|| SolveError::Arithmetic(name.to_owned()))?;
			tracing::trace!(monkey = name, target, "solved");
		}
		Ok(target)
	}
}


fn input_monkeys_from_str(s: &str) -> Result<Monkeys<'_>, Error> {
	parsing::try_monkeys_from_str(s).map_err(Error::input)
}


fn part1_impl(input_monkeys: &Monkeys) -> Result<i64, Error> {
	input_monkeys.root_number().map_err(Error::unsolvable)
}

pub(crate) fn part1(input: &str) -> Result<i64, Error> {
	part1_impl(&input_monkeys_from_str(input)?)
}


fn part2_impl(input_monkeys: &Monkeys) -> Result<i64, Error> {
	input_monkeys.human_number().map_err(Error::unsolvable)
}

pub(crate) fn part2(input: &str) -> Result<i64, Error> {
	part2_impl(&input_monkeys_from_str(input)?)
}


mod parsing {
	use {std::{collections::HashMap, num::ParseIntError}, itertools::Itertools as _};
	use super::{Job, Monkeys, Operator};

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) enum MonkeyError {
		Format,
		Name { found: String },
		Number(ParseIntError),
		Operator { found: String },
	}

	fn is_name(s: &str) -> bool {
		!s.is_empty() && s.bytes().all(|b| b.is_ascii_lowercase())
	}

	fn try_name(s: &str) -> Result<&str, MonkeyError> {
		if is_name(s) { Ok(s) } else { Err(MonkeyError::Name { found: s.to_owned() }) }
	}

	/// E.g. “root: pppw + sjmn” or “dbpl: 5”.
	fn try_monkey_from_str(s: &str) -> Result<(&str, Job<'_>), MonkeyError> {
		use MonkeyError as E;

		let (name, job) = s.split_once(": ").ok_or(E::Format)?;
		let name = try_name(name)?;
		let job = match job.split(' ').collect_tuple() {
			Some((left, operator, right)) => {
				let operator = match operator {
					"+" => Operator::Add,
					"-" => Operator::Sub,
					"*" => Operator::Mul,
					"/" => Operator::Div,
					found => return Err(E::Operator { found: found.to_owned() }),
				};
				Job::Operation(operator, [try_name(left)?, try_name(right)?])
			}
			None => Job::Number(job.parse().map_err(E::Number)?),
		};
		Ok((name, job))
	}

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) enum MonkeysError {
		Monkey { line: usize, source: MonkeyError },
		Duplicate { line: usize, name: String },
		Unknown { line: usize, name: String },
	}

	pub(super) fn try_monkeys_from_str(s: &str) -> Result<Monkeys<'_>, MonkeysError> {
		use MonkeysError as E;

		let mut monkeys = HashMap::new();
		let mut lines = HashMap::new();
		for (l, line) in s.lines().enumerate() {
			let (name, job) = try_monkey_from_str(line).map_err(|source| E::Monkey { line: l + 1, source })?;
			if monkeys.insert(name, job).is_some() { return Err(E::Duplicate { line: l + 1, name: name.to_owned() }) }
			lines.insert(name, l + 1);
		}

		for (name, job) in &monkeys {
			let Job::Operation(_, operands) = job else { continue };
			if let Some(unknown) = operands.iter().copied().find(|&operand| !monkeys.contains_key(operand)) {
				return Err(E::Unknown { line: lines[name], name: unknown.to_owned() })
			}
		}
		Ok(Monkeys(monkeys))
	}
}


#[cfg(test)]
mod tests {
	use test_case::test_case;
	use super::*;

	const INPUT: &str = indoc::indoc! { "
		root: pppw + sjmn
		dbpl: 5
		cczh: sllz + lgvd
		zczc: 2
		ptdq: humn - dvpt
		dvpt: 3
		lfqf: 4
		humn: 5
		ljgn: 2
		sjmn: drzm * dbpl
		sllz: 4
		pppw: cczh / lfqf
		lgvd: ljgn * ptdq
		drzm: hmdt - zczc
		hmdt: 32
	" };

	#[test]
	fn example() {
		let monkeys = input_monkeys_from_str(INPUT).unwrap();
		assert_eq!(part1_impl(&monkeys).unwrap(), 152);
		assert_eq!(part2_impl(&monkeys).unwrap(), 301);
	}

	#[test]
	fn evaluation_order() {
		let monkeys = input_monkeys_from_str(INPUT).unwrap();
		let order = monkeys.order("pppw").unwrap();
		assert_eq!(order.len(), 9);
		assert_eq!(order.last(), Some(&"pppw"));
		let position = |name| order.iter().position(|&n| n == name).unwrap();
		assert!(position("humn") < position("ptdq"));
		assert!(position("ptdq") < position("lgvd"));
		assert!(position("lgvd") < position("cczh"));
		assert!(!order.contains(&"sjmn"));
	}

	#[test_case("root: abcd + ijkl\nabcd: humn + efgh\nefgh: 7\nijkl: 20\nhumn: 1\n", 28, 13 ; "add")]
	#[test_case("root: abcd + ijkl\nabcd: humn - efgh\nefgh: 7\nijkl: 20\nhumn: 1\n", 14, 27 ; "subtract")]
	#[test_case("root: abcd + ijkl\nabcd: efgh - humn\nefgh: 7\nijkl: 20\nhumn: 1\n", 26, -13 ; "subtract from")]
	#[test_case("root: abcd + ijkl\nabcd: efgh * humn\nefgh: 5\nijkl: 20\nhumn: 1\n", 25, 4 ; "multiply")]
	#[test_case("root: abcd + ijkl\nabcd: humn / efgh\nefgh: 5\nijkl: 20\nhumn: 1\n", 20, 100 ; "divide")]
	#[test_case("root: abcd + ijkl\nabcd: efgh / humn\nefgh: 60\nijkl: 20\nhumn: 1\n", 80, 3 ; "divide by")]
	#[test_case("root: efgh * abcd\nabcd: efgh - humn\nefgh: 4\nhumn: 1\n", 12, 0 ; "operand used twice")]
	#[test_case("root: humn + abcd\nhumn: 1\nabcd: 7\n", 8, 7 ; "at the root")]
	fn human(input: &str, root: i64, human: i64) {
		let monkeys = input_monkeys_from_str(input).unwrap();
		assert_eq!(part1_impl(&monkeys).unwrap(), root);
		assert_eq!(part2_impl(&monkeys).unwrap(), human);
	}

	#[test]
	fn unsolvable() {
		let cyclic = input_monkeys_from_str("root: abcd + humn\nabcd: root * humn\nhumn: 1\n").unwrap();
		assert!(matches!(part1_impl(&cyclic), Err(Error::Unsolvable(_))));
		let both_sides = input_monkeys_from_str("root: humn + humn\nhumn: 1\n").unwrap();
		assert!(matches!(part2_impl(&both_sides), Err(Error::Unsolvable(_))));
		let inexact = input_monkeys_from_str("root: abcd + ijkl\nabcd: humn * efgh\nefgh: 3\nijkl: 7\nhumn: 1\n").unwrap();
		assert!(matches!(part2_impl(&inexact), Err(Error::Unsolvable(_))));
		let by_zero = input_monkeys_from_str("root: abcd / efgh\nabcd: 1\nefgh: 0\n").unwrap();
		assert!(matches!(part1_impl(&by_zero), Err(Error::Unsolvable(_))));
		let no_root = input_monkeys_from_str("humn: 1\n").unwrap();
		assert!(matches!(part1_impl(&no_root), Err(Error::Unsolvable(_))));
	}

	#[test]
	fn invalid() {
		assert!(matches!(input_monkeys_from_str("root 5\n"), Err(Error::Input(_))));
		assert!(matches!(input_monkeys_from_str("root: abcd % efgh\n"), Err(Error::Input(_))));
		assert!(matches!(input_monkeys_from_str("root: abcd + efgh\nabcd: 1\n"), Err(Error::Input(_))));
		assert!(matches!(input_monkeys_from_str("root: 1\nroot: 2\n"), Err(Error::Input(_))));
		assert!(matches!(input_monkeys_from_str("Root: 1\n"), Err(Error::Input(_))));
		assert!(matches!(input_monkeys_from_str("root: x\n"), Err(Error::Input(_))));
	}
}
