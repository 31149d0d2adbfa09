// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use crate::{error::Error, search::{self, Graph, MemoCache, RewardSpace, SearchSpace}};


const START: Label = Label(*b"AA");

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
struct Label([u8; 2]);

impl std::fmt::Display for Label {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use std::fmt::Write as _;
		self.0.iter().try_for_each(|&b| f.write_char(b as char))
	}
}

impl std::fmt::Debug for Label {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "\"{self}\"")
	}
}

#[derive(Debug)]
struct Valve {
	label: Label,
	flow_rate: usize,
	/// Indices of the valves tunnels lead to.
	tunnels: Vec<usize>,
}


/// Walking through the tunnels towards one valve.
struct Hop<'v> {
	valves: &'v [Valve],
	to: usize,
}

impl Graph for Hop<'_> {
	type State = usize;
	fn successors(&self, valve: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
		self.valves[valve].tunnels.iter().map(|&next| (next, 1))
	}
}

impl SearchSpace for Hop<'_> {
	fn is_goal(&self, valve: usize) -> bool { valve == self.to }
}


/// The valves worth opening, and the start, with the minutes it takes to
/// walk between any two of them.
#[derive(Debug)]
struct Network {
	labels: Vec<Label>,
	flow_rates: Vec<usize>,
	/// `None` where no tunnels lead.
	distances: Vec<Vec<Option<usize>>>,
	/// Index of the start (after all useful valves).
	start: usize,
}

impl Network {
	fn new(valves: &[Valve], start: usize) -> Self {
		let mut nodes = valves.iter()
			.enumerate()
			.filter(|(_, valve)| valve.flow_rate > 0)
			.map(|(v, _)| v)
			.collect::<Vec<_>>();
		let useful = nodes.len();
		nodes.push(start);

		let distances = nodes.iter()
			.map(|&from| nodes.iter()
				.map(|&to| search::breadth_first(&Hop { valves, to }, from).ok().map(|path| path.steps()))
				.collect::<Vec<_>>())
			.collect::<Vec<_>>();

		Network {
			labels: nodes.iter().map(|&v| valves[v].label).collect(),
			flow_rates: nodes[..useful].iter().map(|&v| valves[v].flow_rate).collect(),
			distances,
			start: useful,
		}
	}
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Tour {
	/// Index into the network's nodes.
	at: usize,
	minutes_left: usize,
	/// Bit set of opened valves.
	opened: u64,
	/// Helpers yet to set out from the start, with the full time budget,
	/// once this tour is over.
	helpers: usize,
}

/// Opening valves within `minutes`, alone or with helpers taking turns.
struct Eruption<'n> {
	network: &'n Network,
	minutes: usize,
}

impl RewardSpace for Eruption<'_> {
	type State = Tour;

	fn is_terminal(&self, tour: &Tour) -> bool {
		tour.minutes_left == 0 && tour.helpers == 0
	}

	fn reward(&self, _tour: &Tour) -> usize { 0 }

	/// Walking to a closed valve & opening it, which releases its pressure
	/// for the rest of the time; or handing over to the next helper.
	fn transitions(&self, tour: &Tour) -> impl Iterator<Item = (Tour, usize)> + '_ {
		let tour = *tour;
		let network = self.network;
		let opens = (0..network.flow_rates.len())
			.filter(move |&v| tour.opened & 1 << v == 0)
			.filter_map(move |v| {
				let distance = network.distances[tour.at][v]?;
				let minutes_left = tour.minutes_left.checked_sub(distance + 1).filter(|&m| m > 0)?;
				let next = Tour { at: v, minutes_left, opened: tour.opened | 1 << v, ..tour };
				Some((next, network.flow_rates[v] * minutes_left))
			});
		let hand_over = (tour.helpers > 0).then(|| Tour {
			at: network.start,
			minutes_left: self.minutes,
			helpers: tour.helpers - 1,
			..tour
		});
		opens.chain(hand_over.map(|next| (next, 0)))
	}
}

impl Network {
	fn max_pressure<const MINUTES: usize, const HELPERS: usize>(&self) -> usize {
		let eruption = Eruption { network: self, minutes: MINUTES };
		let start = Tour { at: self.start, minutes_left: MINUTES, opened: 0, helpers: HELPERS };
		let mut cache = MemoCache::default();
		let pressure = search::maximize(&eruption, start, &mut cache);
		let [hits, misses] = cache.stats();
		tracing::debug!(pressure, states = cache.len(), hits, misses, "released");
		pressure
	}
}


fn input_network_from_str(s: &str) -> Result<Network, Error> {
	let (valves, start) = parsing::try_valves_from_str(s).map_err(Error::input)?;
	let network = Network::new(&valves, start);
	tracing::trace!(labels = ?network.labels, distances = ?network.distances, "network");
	Ok(network)
}


fn part1_impl(input_network: &Network) -> usize {
	input_network.max_pressure::<30, 0>()
}

pub(crate) fn part1(input: &str) -> Result<usize, Error> {
	Ok(part1_impl(&input_network_from_str(input)?))
}


/// Teaching an elephant takes four minutes, after which both open valves.
fn part2_impl(input_network: &Network) -> usize {
	input_network.max_pressure::<26, 1>()
}

pub(crate) fn part2(input: &str) -> Result<usize, Error> {
	Ok(part2_impl(&input_network_from_str(input)?))
}


mod parsing {
	use std::{collections::HashMap, num::ParseIntError, str::FromStr};
	use super::{Label, Valve, START};

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) struct LabelError { found: String }

	impl FromStr for Label {
		type Err = LabelError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			match *s.as_bytes() {
				[b0, b1] if b0.is_ascii_uppercase() && b1.is_ascii_uppercase() => Ok(Label([b0, b1])),
				_ => Err(LabelError { found: s.to_owned() }),
			}
		}
	}

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) enum ValveError {
		Format { expected: &'static str },
		Label(LabelError),
		FlowRate(ParseIntError),
		Tunnel { offset: usize, source: LabelError },
	}

	fn try_valve_from_str(s: &str) -> Result<(Label, usize, Vec<Label>), ValveError> {
		use ValveError as E;

		let s = s.strip_prefix("Valve ").ok_or(E::Format { expected: "Valve " })?;
		let (label, s) = s.split_once(" has flow rate=").ok_or(E::Format { expected: " has flow rate=" })?;
		let label = label.parse().map_err(E::Label)?;
		let (flow_rate, s) = s.split_once("; ").ok_or(E::Format { expected: "; " })?;
		let flow_rate = flow_rate.parse().map_err(E::FlowRate)?;
		let tunnels = s.strip_prefix("tunnels lead to valves ")
			.or_else(|| s.strip_prefix("tunnel leads to valve "))
			.ok_or(E::Format { expected: "tunnels lead to valves " })?;
		let tunnels = tunnels.split(", ")
			.enumerate()
			.map(|(offset, tunnel)| tunnel.parse().map_err(|source| E::Tunnel { offset, source }))
			.collect::<Result<_, _>>()?;
		Ok((label, flow_rate, tunnels))
	}

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) enum ValvesError {
		Valve { line: usize, source: ValveError },
		Duplicate { line: usize, label: Label },
		Unknown { line: usize, label: Label },
		NoStart,
		/// Opened valves are kept in a 64-bit set.
		TooManyFlowing { found: usize },
	}

	/// Valves (with tunnels resolved to indices) & the index of the start.
	pub(super) fn try_valves_from_str(s: &str) -> Result<(Vec<Valve>, usize), ValvesError> {
		use ValvesError as E;

		let lines = s.lines()
			.enumerate()
			.map(|(l, line)| try_valve_from_str(line).map_err(|source| E::Valve { line: l + 1, source }))
			.collect::<Result<Vec<_>, _>>()?;

		let mut indices = HashMap::new();
		for (l, (label, _, _)) in lines.iter().enumerate() {
			if indices.insert(*label, l).is_some() { return Err(E::Duplicate { line: l + 1, label: *label }) }
		}
		let start = *indices.get(&START).ok_or(E::NoStart)?;

		let valves = lines.iter()
			.enumerate()
			.map(|(l, &(label, flow_rate, ref tunnels))| tunnels.iter()
				.map(|tunnel| indices.get(tunnel).copied().ok_or(E::Unknown { line: l + 1, label: *tunnel }))
				.collect::<Result<Vec<_>, _>>()
				.map(|tunnels| Valve { label, flow_rate, tunnels }))
			.collect::<Result<Vec<_>, _>>()?;

		let flowing = valves.iter().filter(|valve| valve.flow_rate > 0).count();
		if flowing > 64 { return Err(E::TooManyFlowing { found: flowing }) }
		Ok((valves, start))
	}
}


#[cfg(test)]
mod tests {
	use test_case::test_case;
	use super::*;

	const INPUT: &str = indoc::indoc! { "
		Valve AA has flow rate=0; tunnels lead to valves DD, II, BB
		Valve BB has flow rate=13; tunnels lead to valves CC, AA
		Valve CC has flow rate=2; tunnels lead to valves DD, BB
		Valve DD has flow rate=20; tunnels lead to valves CC, AA, EE
		Valve EE has flow rate=3; tunnels lead to valves FF, DD
		Valve FF has flow rate=0; tunnels lead to valves EE, GG
		Valve GG has flow rate=0; tunnels lead to valves FF, HH
		Valve HH has flow rate=22; tunnel leads to valve GG
		Valve II has flow rate=0; tunnels lead to valves AA, JJ
		Valve JJ has flow rate=21; tunnel leads to valve II
	" };

	#[test]
	fn example() {
		let network = input_network_from_str(INPUT).unwrap();
		assert_eq!(part1_impl(&network), 1651);
		assert_eq!(part2_impl(&network), 1707);
	}

	#[test]
	fn distances() {
		let network = input_network_from_str(INPUT).unwrap();
		assert_eq!(network.labels.iter().map(Label::to_string).collect::<Vec<_>>(),
			["BB", "CC", "DD", "EE", "HH", "JJ", "AA"]);
		assert_eq!(network.flow_rates, [13, 2, 20, 3, 22, 21]);
		let from_start = network.distances[network.start].iter().map(|d| d.unwrap()).collect::<Vec<_>>();
		assert_eq!(from_start, [1, 2, 1, 2, 5, 2, 0]);
		assert_eq!(network.distances[4][5], Some(7));
	}

	#[test]
	fn memoization_is_transparent() {
		let network = input_network_from_str(INPUT).unwrap();
		let eruption = Eruption { network: &network, minutes: 30 };
		let start = Tour { at: network.start, minutes_left: 30, opened: 0, helpers: 0 };
		assert_eq!(search::maximize(&eruption, start, &mut ()), 1651);
	}

	#[test_case(indoc::indoc! { "
		Valve AA has flow rate=0; tunnel leads to valve BB
		Valve BB has flow rate=10; tunnel leads to valve AA
	" }, 280, 240 ; "one valve")]
	#[test_case("Valve AA has flow rate=0; tunnel leads to valve AA\n", 0, 0 ; "nothing flows")]
	#[test_case(indoc::indoc! { "
		Valve AA has flow rate=0; tunnel leads to valve BB
		Valve BB has flow rate=1; tunnel leads to valve AA
		Valve CC has flow rate=50; tunnel leads to valve CC
	" }, 28, 24 ; "unreachable valve")]
	#[test_case(indoc::indoc! { "
		Valve AA has flow rate=0; tunnels lead to valves BB, CC
		Valve BB has flow rate=10; tunnel leads to valve AA
		Valve CC has flow rate=10; tunnel leads to valve AA
	" }, 270 + 260, 240 + 240 ; "two ways")]
	fn pressure(input: &str, alone: usize, helped: usize) {
		let network = input_network_from_str(input).unwrap();
		assert_eq!(part1_impl(&network), alone);
		assert_eq!(part2_impl(&network), helped);
	}

	#[test]
	fn invalid() {
		assert!(matches!(input_network_from_str("Valve AA has flow rate=x; tunnel leads to valve AA\n"),
			Err(Error::Input(_))));
		assert!(matches!(input_network_from_str("Valve AB has flow rate=0; tunnel leads to valve AB\n"),
			Err(Error::Input(_))));
		assert!(matches!(input_network_from_str("Valve AA has flow rate=0; tunnel leads to valve BB\n"),
			Err(Error::Input(_))));
		assert!(matches!(input_network_from_str("Valve Aa has flow rate=0; tunnel leads to valve AA\n"),
			Err(Error::Input(_))));
		assert!(matches!(input_network_from_str("Valve AA has flow rate=0; tunnels to AA\n"),
			Err(Error::Input(_))));
	}
}
