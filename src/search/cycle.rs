// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::{collections::{hash_map::Entry, HashMap}, hash::Hash};


/// Remembers at which step (and with which accumulated value) each key was
/// first observed, to find the period of a deterministic simulation.
///
/// Keys must capture everything that determines the simulation's future:
/// equal keys at two steps mean the steps in between repeat forever.
#[derive(Debug)]
pub(crate) struct CycleDetector<K> {
	seen: HashMap<K, (usize, usize)>,
}

impl<K> Default for CycleDetector<K> {
	fn default() -> Self {
		CycleDetector { seen: HashMap::new() }
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cycle {
	/// Step & value at the first occurrence of the repeated key.
	pub(crate) first: (usize, usize),
	/// Step & value at the second occurrence.
	pub(crate) second: (usize, usize),
}

/// How to reach a target step from [`Cycle::second`] without simulating
/// every step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Extrapolation {
	/// Whole periods skipped.
	pub(crate) cycles: usize,
	/// Value gained over the skipped periods.
	pub(crate) skipped: usize,
	/// Steps left to simulate after skipping.
	pub(crate) remaining: usize,
}

impl<K: Eq + Hash> CycleDetector<K> {
	/// Records `key` at `step`; returns the cycle if `key` was seen before.
	pub(crate) fn observe(&mut self, key: K, step: usize, value: usize) -> Option<Cycle> {
		match self.seen.entry(key) {
			Entry::Vacant(entry) => { entry.insert((step, value)); None }
			Entry::Occupied(entry) => {
				let cycle = Cycle { first: *entry.get(), second: (step, value) };
				tracing::debug!(period = cycle.period(), delta = cycle.delta(), "cycle detected");
				Some(cycle)
			}
		}
	}
}

impl Cycle {
	pub(crate) fn period(&self) -> usize { self.second.0 - self.first.0 }
	pub(crate) fn delta(&self) -> usize { self.second.1 - self.first.1 }

	/// Skips as many whole periods as fit between the second occurrence and `target`.
	pub(crate) fn extrapolate(&self, target: usize) -> Extrapolation {
		let left = target.saturating_sub(self.second.0);
		let cycles = left / self.period();
		Extrapolation { cycles, skipped: cycles * self.delta(), remaining: left % self.period() }
	}
}


#[cfg(test)]
mod tests {
	use test_case::test_case;
	use super::*;

	/// Value accumulated over the first `steps` steps of a sequence that
	/// adds `lead_in` once, then `increments` over and over.
	fn accumulate(lead_in: &[usize], increments: &[usize], steps: usize) -> usize {
		let head = lead_in.iter().take(steps).sum::<usize>();
		let tail = steps.saturating_sub(lead_in.len());
		head + tail / increments.len() * increments.iter().sum::<usize>()
			+ increments[..tail % increments.len()].iter().sum::<usize>()
	}

	#[test_case(&[], &[3], 1_000_000 ; "constant")]
	#[test_case(&[9, 1], &[1, 4, 2, 0, 7], 1_000_000_007 ; "lead-in")]
	#[test_case(&[5, 5, 5], &[2, 2, 1, 3, 1, 1, 8], 12 ; "short target")]
	fn extrapolates(lead_in: &[usize], increments: &[usize], target: usize) {
		let period = increments.len();
		let increment = |step: usize| step.checked_sub(lead_in.len())
			.map_or_else(|| lead_in[step], |i| increments[i % period]);

		let mut detector = CycleDetector::default();
		let (mut step, mut value) = (0_usize, 0);
		let cycle = loop {
			// Lead-in steps get keys of their own
			let key = step.checked_sub(lead_in.len()).map_or(step, |i| lead_in.len() + i % period);
			if let Some(cycle) = detector.observe(key, step, value) { break cycle }
			value += increment(step);
			step += 1;
		};
		assert_eq!(cycle.period(), period);
		assert_eq!(cycle.first.0, lead_in.len());

		let Extrapolation { cycles, skipped, remaining } = cycle.extrapolate(target);
		let resumed = step + cycles * period;
		assert_eq!(resumed + remaining, target);
		let rest = (resumed..target).map(increment).sum::<usize>();
		assert_eq!(value + skipped + rest, accumulate(lead_in, increments, target));
	}

	#[test]
	fn first_sighting() {
		let mut detector = CycleDetector::default();
		assert_eq!(detector.observe('a', 0, 0), None);
		assert_eq!(detector.observe('b', 1, 4), None);
		assert_eq!(detector.observe('a', 2, 10),
			Some(Cycle { first: (0, 0), second: (2, 10) }));
	}
}
