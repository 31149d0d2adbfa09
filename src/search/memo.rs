// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::{collections::HashMap, hash::Hash};


/// A time-bounded decision process: every transition brings a state closer
/// to a terminal state, and [`maximize`] maximizes the rewards gained along
/// the way.
pub(crate) trait RewardSpace {
	type State: Clone + Eq + Hash + std::fmt::Debug;

	fn is_terminal(&self, state: &Self::State) -> bool;

	/// Reward held at a state the process can't continue from.
	fn reward(&self, state: &Self::State) -> usize;

	/// Legal successor states, after pruning dominated choices, each with the
	/// reward gained by moving there.
	fn transitions(&self, state: &Self::State) -> impl Iterator<Item = (Self::State, usize)> + '_;

	/// Maps `state` onto a representative of the states that share its
	/// outcome; used as the cache key.
	fn canonicalize(&self, state: Self::State) -> Self::State { state }
}


/// Storage for already evaluated states.
pub(crate) trait Cache<K, V> {
	fn lookup(&mut self, key: &K) -> Option<V>;
	fn store(&mut self, key: K, value: V);
}

/// Caches nothing; every state is evaluated from scratch.
impl<K, V> Cache<K, V> for () {
	fn lookup(&mut self, _key: &K) -> Option<V> { None }
	fn store(&mut self, _key: K, _value: V) {}
}

#[derive(Debug)]
pub(crate) struct MemoCache<K, V> {
	entries: HashMap<K, V>,
	hits: usize,
	misses: usize,
}

impl<K, V> Default for MemoCache<K, V> {
	fn default() -> Self {
		MemoCache { entries: HashMap::new(), hits: 0, misses: 0 }
	}
}

impl<K, V> MemoCache<K, V> {
	pub(crate) fn len(&self) -> usize { self.entries.len() }

	/// Lookups answered from the cache and lookups that were not.
	pub(crate) fn stats(&self) -> [usize; 2] { [self.hits, self.misses] }
}

impl<K: Eq + Hash, V: Clone> Cache<K, V> for MemoCache<K, V> {
	fn lookup(&mut self, key: &K) -> Option<V> {
		let value = self.entries.get(key).cloned();
		if value.is_some() { self.hits += 1 } else { self.misses += 1 }
		value
	}

	fn store(&mut self, key: K, value: V) {
		self.entries.insert(key, value);
	}
}


/// Largest total reward collectable from `state` on, evaluating each
/// distinct (canonical) state at most once per `cache`.
pub(crate) fn maximize<Space, C>(space: &Space, state: Space::State, cache: &mut C) -> usize
where Space: RewardSpace + ?Sized, C: Cache<Space::State, usize> + ?Sized {
	let state = space.canonicalize(state);
	if space.is_terminal(&state) { return space.reward(&state) }
	if let Some(best) = cache.lookup(&state) { return best }

	let best = space.transitions(&state)
		.map(|(next, gain)| gain + maximize(space, next, cache))
		.max()
		.unwrap_or_else(|| space.reward(&state));

	tracing::trace!(?state, best, "evaluated");
	cache.store(state, best);
	best
}


#[cfg(test)]
mod tests {
	use super::*;

	/// Collect coins for a number of turns, or spend a turn to double the
	/// per-turn income (at most up to `cap`).
	struct Coins { cap: usize }

	#[derive(Debug, Clone, PartialEq, Eq, Hash)]
	struct Purse { turns: usize, savings: usize, income: usize }

	impl RewardSpace for Coins {
		type State = Purse;
		fn is_terminal(&self, purse: &Purse) -> bool { purse.turns == 0 }
		fn reward(&self, purse: &Purse) -> usize { purse.savings }
		fn transitions(&self, purse: &Purse) -> impl Iterator<Item = (Purse, usize)> + '_ {
			let turns = purse.turns - 1;
			let collect = (Purse { turns, ..*purse }, purse.income);
			let invest = (purse.income * 2 <= self.cap)
				.then(|| (Purse { turns, income: purse.income * 2, ..*purse }, 0));
			std::iter::once(collect).chain(invest)
		}
	}

	#[test]
	fn memoization_is_transparent() {
		let space = Coins { cap: 64 };
		for turns in 0..12 {
			let start = Purse { turns, savings: 0, income: 1 };
			let mut cache = MemoCache::default();
			let memoized = maximize(&space, start.clone(), &mut cache);
			assert_eq!(memoized, maximize(&space, start.clone(), &mut ()));
			assert_eq!(memoized, maximize(&space, start, &mut MemoCache::default()));
		}
	}

	#[test]
	fn optimum() {
		// Doubling twice then collecting 6 turns beats every other schedule
		let space = Coins { cap: 4 };
		assert_eq!(maximize(&space, Purse { turns: 8, savings: 0, income: 1 }, &mut ()), 24);
		assert_eq!(maximize(&space, Purse { turns: 0, savings: 5, income: 1 }, &mut ()), 5);
		assert_eq!(maximize(&space, Purse { turns: 1, savings: 5, income: 3 }, &mut ()), 8);
	}

	#[test]
	fn cache_hits() {
		let space = Coins { cap: 8 };
		let mut cache = MemoCache::default();
		maximize(&space, Purse { turns: 6, savings: 0, income: 1 }, &mut cache);
		let [hits, misses] = cache.stats();
		assert!(hits > 0);
		assert_eq!(misses, cache.len());
	}
}
