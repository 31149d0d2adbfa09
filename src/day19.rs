// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::ops::{Index, IndexMut};
use crate::{error::Error, search::{self, MemoCache, RewardSpace}};


macro_rules! resources { ( $( $name:ident ),+ ) => { paste::paste! {
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
	enum Resource { $( $name ),+ }

	impl Resource {
		const ALL: [Resource; 4] = [$( Resource::$name ),+];

		fn name(self) -> &'static str {
			match self { $( Resource::$name => stringify!([<$name:lower>]) ),+ }
		}
	}
} } }
resources!(Ore, Clay, Obsidian, Geode);

/// Some amount of every resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
struct Amounts([usize; 4]);

impl Index<Resource> for Amounts {
	type Output = usize;
	fn index(&self, resource: Resource) -> &usize { &self.0[resource as usize] }
}

impl IndexMut<Resource> for Amounts {
	fn index_mut(&mut self, resource: Resource) -> &mut usize { &mut self.0[resource as usize] }
}

impl Amounts {
	fn covers(&self, cost: &Amounts) -> bool {
		self.0.iter().zip(cost.0).all(|(&have, need)| have >= need)
	}
}


#[derive(Debug)]
struct Blueprint {
	id: usize,
	/// Cost of a robot collecting the indexed resource.
	costs: [Amounts; 4],
	/// Most robots of each kind worth having; more could not all be put to
	/// use, as only one robot can be built per minute.
	caps: Amounts,
}

impl Blueprint {
	fn new(id: usize, costs: [Amounts; 4]) -> Self {
		let mut caps = Amounts::default();
		for resource in Resource::ALL {
			caps[resource] = costs.iter().map(|cost| cost[resource]).max().unwrap_or(0);
		}
		caps[Resource::Geode] = usize::MAX;
		Blueprint { id, costs, caps }
	}

	fn cost(&self, robot: Resource) -> &Amounts {
		&self.costs[robot as usize]
	}
}


/// Geodes cracked so far aren't tracked: they're the reward gained on the way.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Inventory {
	minutes_left: usize,
	stock: Amounts,
	robots: Amounts,
	/// Robots that were affordable since the last robot was built, but weren't built.
	passed_up: [bool; 4],
}

impl Inventory {
	fn start(minutes: usize) -> Self {
		let mut robots = Amounts::default();
		robots[Resource::Ore] = 1;
		Inventory { minutes_left: minutes, stock: Amounts::default(), robots, passed_up: [false; 4] }
	}

	/// A minute later, having only collected (geodes aside).
	fn collected(&self) -> Self {
		let mut next = self.clone();
		next.minutes_left -= 1;
		for resource in [Resource::Ore, Resource::Clay, Resource::Obsidian] {
			next.stock[resource] += self.robots[resource];
		}
		next
	}
}

impl Blueprint {
	fn can_build(&self, inventory: &Inventory, robot: Resource) -> bool {
		inventory.robots[robot] < self.caps[robot]
			&& !inventory.passed_up[robot as usize]
			&& inventory.stock.covers(self.cost(robot))
	}

	/// Whether waiting can make a robot affordable that isn't now.
	fn worth_waiting(&self, inventory: &Inventory) -> bool {
		Resource::ALL.into_iter().any(|robot| {
			let cost = self.cost(robot);
			inventory.robots[robot] < self.caps[robot]
				&& !inventory.stock.covers(cost)
				&& Resource::ALL.into_iter()
					.all(|input| inventory.stock[input] >= cost[input] || inventory.robots[input] > 0)
		})
	}

	/// `collected`, with `robot` having been built meanwhile.
	fn built(&self, collected: &Inventory, robot: Resource) -> Inventory {
		let mut next = collected.clone();
		for resource in Resource::ALL { next.stock[resource] -= self.cost(robot)[resource] }
		next.robots[robot] += 1;
		next.passed_up = [false; 4];
		next
	}
}

impl RewardSpace for Blueprint {
	type State = Inventory;

	fn is_terminal(&self, inventory: &Inventory) -> bool {
		inventory.minutes_left == 0
	}

	/// Geodes held at the outset; the ones cracked later are gained by transitions.
	fn reward(&self, inventory: &Inventory) -> usize {
		inventory.stock[Resource::Geode]
	}

	fn transitions(&self, inventory: &Inventory) -> impl Iterator<Item = (Inventory, usize)> + '_ {
		use Resource::*;

		let cracked = inventory.robots[Geode];
		let collected = inventory.collected();

		// A robot built during the last minute never gets to collect
		let options = if inventory.minutes_left < 2 {
			[Some(collected), None, None, None, None]
		} else {
			let robots = [Geode, Obsidian, Clay, Ore];
			let builds = robots.map(|robot| self.can_build(inventory, robot).then(|| self.built(&collected, robot)));
			let idle = (self.worth_waiting(inventory) || builds.iter().all(Option::is_none)).then(|| {
				let mut passed_up = inventory.passed_up;
				for (robot, build) in robots.into_iter().zip(&builds) {
					if build.is_some() { passed_up[robot as usize] = true }
				}
				Inventory { passed_up, ..collected.clone() }
			});
			let [geode, obsidian, clay, ore] = builds;
			[geode, obsidian, clay, ore, idle]
		};
		options.into_iter().flatten().map(move |next| (next, cracked))
	}

	/// Caps the stock of every resource but geodes at what can still be spent
	/// before time runs out.
	fn canonicalize(&self, mut inventory: Inventory) -> Inventory {
		let minutes = inventory.minutes_left;
		if minutes == 0 { return inventory }
		for resource in [Resource::Ore, Resource::Clay, Resource::Obsidian] {
			let (cap, robots) = (self.caps[resource], inventory.robots[resource]);
			if robots > cap { continue }
			let spendable = minutes * cap - robots * (minutes - 1);
			inventory.stock[resource] = inventory.stock[resource].min(spendable);
		}
		inventory
	}
}

impl Blueprint {
	fn max_geodes<const MINUTES: usize>(&self) -> usize {
		self.max_geodes_at(MINUTES)
	}

	fn max_geodes_at(&self, minutes: usize) -> usize {
		let mut cache = MemoCache::default();
		let geodes = search::maximize(self, Inventory::start(minutes), &mut cache);
		let [hits, misses] = cache.stats();
		tracing::debug!(id = self.id, geodes, states = cache.len(), hits, misses, "optimized blueprint");
		geodes
	}

	fn quality_level<const MINUTES: usize>(&self) -> usize {
		self.id * self.max_geodes::<MINUTES>()
	}
}


fn input_blueprints_from_str(s: &str) -> Result<Vec<Blueprint>, Error> {
	parsing::try_blueprints_from_str(s).map_err(Error::input)
}


fn part1_impl(input_blueprints: &[Blueprint]) -> usize {
	use rayon::iter::{IntoParallelRefIterator as _, ParallelIterator as _};
	input_blueprints
		.par_iter()
		.map(Blueprint::quality_level::<24>)
		.sum()
}

pub(crate) fn part1(input: &str) -> Result<usize, Error> {
	Ok(part1_impl(&input_blueprints_from_str(input)?))
}


fn part2_impl(input_blueprints: &[Blueprint]) -> usize {
	use rayon::iter::{IntoParallelRefIterator as _, ParallelIterator as _};
	input_blueprints[..input_blueprints.len().min(3)]
		.par_iter()
		.map(Blueprint::max_geodes::<32>)
		.product()
}

pub(crate) fn part2(input: &str) -> Result<usize, Error> {
	Ok(part2_impl(&input_blueprints_from_str(input)?))
}


mod parsing {
	use std::{iter::{Enumerate, Peekable}, num::ParseIntError, str::SplitWhitespace};
	use either::Either;
	use super::{Amounts, Blueprint, Resource};

	type Words<'s> = Peekable<Enumerate<SplitWhitespace<'s>>>;

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) enum CostError {
		EndOfString,
		Amount(ParseIntError),
		Resource { word: usize, expected: Resource },
	}

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) enum BlueprintError {
		/// Word number (if not at the end of the string) & the word expected there.
		Format { word: Option<usize>, expected: &'static str },
		Id(ParseIntError),
		Ore(CostError),
		Clay(CostError),
		Obsidian(Either<CostError, CostError>),
		Geode(Either<CostError, CostError>),
	}

	fn expect(words: &mut Words, expected: &'static str) -> Result<usize, BlueprintError> {
		match words.next() {
			Some((w, word)) if word == expected => Ok(w),
			found => Err(BlueprintError::Format { word: found.map(|(w, _)| w + 1), expected }),
		}
	}

	/// Parses e.g. “3 ore”, ignoring a trailing period.
	fn try_cost_from_words(words: &mut Words, expected: Resource) -> Result<usize, CostError> {
		let (_, amount) = words.next().ok_or(CostError::EndOfString)?;
		let amount = amount.parse().map_err(CostError::Amount)?;
		let (w, resource) = words.next().ok_or(CostError::EndOfString)?;
		if resource.trim_end_matches('.') != expected.name() {
			return Err(CostError::Resource { word: w + 1, expected })
		}
		Ok(amount)
	}

	fn try_robot_from_words(words: &mut Words, robot: Resource) -> Result<(), BlueprintError> {
		for expected in ["Each", robot.name(), "robot", "costs"] { expect(words, expected)?; }
		Ok(())
	}

	fn try_blueprint_from_words(words: &mut Words) -> Result<Blueprint, BlueprintError> {
		use {BlueprintError as E, Resource::*};

		expect(words, "Blueprint")?;
		let (w, id) = words.next().ok_or(E::Format { word: None, expected: "id" })?;
		let id = id.strip_suffix(':').ok_or(E::Format { word: Some(w + 1), expected: ":" })?;
		let id = id.parse().map_err(E::Id)?;

		let mut costs = [Amounts::default(); 4];
		macro_rules! cost { ( $robot:ident, $resource:ident, $err:expr ) => {
			costs[$robot as usize][$resource] = try_cost_from_words(words, $resource).map_err($err)?;
		} }

		try_robot_from_words(words, Ore)?;
		cost!(Ore, Ore, E::Ore);
		try_robot_from_words(words, Clay)?;
		cost!(Clay, Ore, E::Clay);
		try_robot_from_words(words, Obsidian)?;
		cost!(Obsidian, Ore, |e| E::Obsidian(Either::Left(e)));
		expect(words, "and")?;
		cost!(Obsidian, Clay, |e| E::Obsidian(Either::Right(e)));
		try_robot_from_words(words, Geode)?;
		cost!(Geode, Ore, |e| E::Geode(Either::Left(e)));
		expect(words, "and")?;
		cost!(Geode, Obsidian, |e| E::Geode(Either::Right(e)));

		Ok(Blueprint::new(id, costs))
	}

	/// Blueprints separated by any whitespace (line breaks included).
	fn blueprints_from_str(s: &str) -> impl Iterator<Item = Result<Blueprint, BlueprintError>> + '_ {
		let mut words = s.split_whitespace().enumerate().peekable();
		std::iter::from_fn(move || words.peek().is_some().then(|| try_blueprint_from_words(&mut words)))
	}

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) enum BlueprintsError {
		Empty,
		Blueprint { index: usize, source: BlueprintError },
	}

	pub(super) fn try_blueprints_from_str(s: &str) -> Result<Vec<Blueprint>, BlueprintsError> {
		let blueprints = blueprints_from_str(s)
			.enumerate()
			.map(|(b, result)| result.map_err(|source| BlueprintsError::Blueprint { index: b + 1, source }))
			.collect::<Result<Vec<_>, _>>()?;
		if blueprints.is_empty() { return Err(BlueprintsError::Empty) }
		Ok(blueprints)
	}
}
