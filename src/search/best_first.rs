// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::collections::{hash_map::Entry, BinaryHeap, HashMap, HashSet, VecDeque};
use super::{Exhausted, Graph, Path, SearchSpace};


/// Follows predecessor links back from `goal` to the start of the search.
fn reconstruct<S: Copy + Eq + std::hash::Hash>(
	predecessors: &HashMap<S, Option<S>>,
	goal: S,
	cost: usize,
) -> Path<S> {
	let mut states = std::iter::successors(Some(goal), |state| predecessors.get(state).copied().flatten())
		.collect::<Vec<_>>();
	states.reverse();
	Path { states, cost }
}


/// A* search from `start` to the nearest goal of `space`.
///
/// States are expanded in order of estimated total cost `g + h`; ties are
/// broken by the lowest state, so equal inputs always yield equal paths.
pub(crate) fn shortest_path<Space: SearchSpace + ?Sized>(space: &Space, start: Space::State)
-> Result<Path<Space::State>, Exhausted> {
	use std::cmp::Reverse;

	let mut open = BinaryHeap::new();
	let mut costs = HashMap::new();
	let mut predecessors = HashMap::new();
	let mut finalized = HashSet::new();

	costs.insert(start, 0);
	predecessors.insert(start, None);
	open.push(Reverse((space.heuristic(start), start)));

	while let Some(Reverse((estimate, state))) = open.pop() {
		if !finalized.insert(state) { continue }
		let cost = costs[&state];

		tracing::trace!(?state, cost, estimate, "expand");

		if space.is_goal(state) {
			tracing::debug!(expanded = finalized.len(), cost, "reached goal");
			return Ok(reconstruct(&predecessors, state, cost))
		}

		for (next, step_cost) in space.successors(state) {
			if finalized.contains(&next) { continue }
			let tentative = cost + step_cost;
			match costs.entry(next) {
				Entry::Occupied(entry) if *entry.get() <= tentative => continue,
				Entry::Occupied(mut entry) => { entry.insert(tentative); }
				Entry::Vacant(entry) => { entry.insert(tentative); }
			}
			predecessors.insert(next, Some(state));
			open.push(Reverse((tentative + space.heuristic(next), next)));
		}
	}

	tracing::debug!(expanded = finalized.len(), "exhausted");
	Err(Exhausted { expanded: finalized.len() })
}


/// Breadth-first search from `start` to the nearest goal of `space`,
/// counting every step as one regardless of its cost.
pub(crate) fn breadth_first<Space: SearchSpace + ?Sized>(space: &Space, start: Space::State)
-> Result<Path<Space::State>, Exhausted> {
	let mut queue = VecDeque::new();
	let mut predecessors = HashMap::new();
	predecessors.insert(start, None);
	queue.push_back((start, 0));

	let mut expanded = 0;
	while let Some((state, steps)) = queue.pop_front() {
		expanded += 1;
		tracing::trace!(?state, steps, "visit");

		if space.is_goal(state) {
			tracing::debug!(expanded, steps, "reached goal");
			return Ok(reconstruct(&predecessors, state, steps))
		}

		for (next, _) in space.successors(state) {
			if let Entry::Vacant(entry) = predecessors.entry(next) {
				entry.insert(Some(state));
				queue.push_back((next, steps + 1));
			}
		}
	}

	tracing::debug!(expanded, "exhausted");
	Err(Exhausted { expanded })
}


/// All states reachable from `start` (itself included).
pub(crate) fn reachable<G: Graph + ?Sized>(graph: &G, start: G::State) -> HashSet<G::State> {
	let mut seen = HashSet::from([start]);
	let mut stack = vec![start];
	while let Some(state) = stack.pop() {
		for (next, _) in graph.successors(state) {
			if seen.insert(next) { stack.push(next) }
		}
	}
	tracing::debug!(reached = seen.len(), "flood fill");
	seen
}
