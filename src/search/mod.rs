// Copyright (c) 2022 Bastiaan Marinus van de Weerd

//! Discrete state-space search: the graph model shared by all puzzles, the
//! traversal strategies over it, memoized reward maximization and period
//! detection for long-running simulations.

mod best_first;
mod cycle;
mod grid;
mod memo;

pub(crate) use best_first::{breadth_first, reachable, shortest_path};
pub(crate) use cycle::{CycleDetector, Extrapolation};
pub(crate) use grid::Grid;
pub(crate) use memo::{maximize, MemoCache, RewardSpace};


/// A discrete space of states, each with a finite set of successors.
pub(crate) trait Graph {
	type State: Copy + Eq + Ord + std::hash::Hash + std::fmt::Debug;

	/// Successor states of `state`, each paired with the (non-negative) cost of the step.
	fn successors(&self, state: Self::State) -> impl Iterator<Item = (Self::State, usize)> + '_;
}

/// A [`Graph`] with a goal to search for.
pub(crate) trait SearchSpace: Graph {
	fn is_goal(&self, state: Self::State) -> bool;

	/// Lower bound of the cost from `state` to the nearest goal. Must be
	/// consistent (never overestimate a single step) for [`shortest_path`]
	/// to return optimal paths.
	fn heuristic(&self, _state: Self::State) -> usize { 0 }
}


/// A chain of states from the start of a search to the goal it reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Path<S> {
	pub(crate) states: Vec<S>,
	pub(crate) cost: usize,
}

impl<S> Path<S> {
	/// Number of steps taken (not counting the start state).
	pub(crate) fn steps(&self) -> usize {
		self.states.len().saturating_sub(1)
	}

	pub(crate) fn goal(&self) -> Option<&S> {
		self.states.last()
	}
}


/// The search ran out of states to expand without reaching a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no path found after expanding {expanded} states")]
pub(crate) struct Exhausted {
	pub(crate) expanded: usize,
}
