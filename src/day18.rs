// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::{collections::BTreeSet, ops::RangeInclusive};
use crate::{error::Error, search::{self, Graph}};


#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
struct Cube { pos: [isize; 3] }

const FACES: [[isize; 3]; 6] = [[-1, 0, 0], [1, 0, 0], [0, -1, 0], [0, 1, 0], [0, 0, -1], [0, 0, 1]];

impl Cube {
	/// Cubes sharing a face with this one.
	fn adjacent_cubes(self) -> impl Iterator<Item = Cube> {
		FACES.into_iter().map(move |d| Cube { pos: std::array::from_fn(|axis| self.pos[axis] + d[axis]) })
	}
}

type Cubes = BTreeSet<Cube>;

/// The air around a droplet, within a box one cube larger than the droplet
/// on every side.
struct Exterior<'c> {
	droplet: &'c Cubes,
	hull: [RangeInclusive<isize>; 3],
}

impl<'c> Exterior<'c> {
	fn around(droplet: &'c Cubes) -> Self {
		let hull = std::array::from_fn(|axis| {
			let (min, max) = droplet.iter()
				.map(|cube| cube.pos[axis])
				.fold((isize::MAX, isize::MIN), |(min, max), c| (min.min(c), max.max(c)));
			min.saturating_sub(1)..=max.saturating_add(1)
		});
		Exterior { droplet, hull }
	}

	fn corner(&self) -> Cube {
		Cube { pos: std::array::from_fn(|axis| *self.hull[axis].start()) }
	}
}

impl Graph for Exterior<'_> {
	type State = Cube;
	fn successors(&self, cube: Cube) -> impl Iterator<Item = (Cube, usize)> + '_ {
		cube.adjacent_cubes()
			.filter(move |adj| adj.pos.iter().zip(&self.hull).all(|(c, range)| range.contains(c)))
			.filter(move |adj| !self.droplet.contains(adj))
			.map(|adj| (adj, 1))
	}
}


/// Faces of `cubes` adjacent to a cube for which `exposed` holds.
fn count_faces(cubes: &Cubes, exposed: impl Fn(&Cube) -> bool) -> usize {
	cubes.iter()
		.map(|cube| cube.adjacent_cubes().filter(|adj| exposed(adj)).count())
		.sum()
}


fn input_cubes_from_str(s: &str) -> Result<Cubes, Error> {
	parsing::try_cubes_from_str(s).map_err(Error::input)
}


fn part1_impl(input_cubes: &Cubes) -> usize {
	count_faces(input_cubes, |adj| !input_cubes.contains(adj))
}

pub(crate) fn part1(input: &str) -> Result<usize, Error> {
	Ok(part1_impl(&input_cubes_from_str(input)?))
}


fn part2_impl(input_cubes: &Cubes) -> usize {
	if input_cubes.is_empty() { return 0 }
	let exterior = Exterior::around(input_cubes);
	let air = search::reachable(&exterior, exterior.corner());
	count_faces(input_cubes, |adj| air.contains(adj))
}

pub(crate) fn part2(input: &str) -> Result<usize, Error> {
	Ok(part2_impl(&input_cubes_from_str(input)?))
}


mod parsing {
	use std::{num::ParseIntError, str::FromStr};
	use super::{Cube, Cubes};

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) enum CubeError {
		Format { column: usize },
		X(ParseIntError),
		Y(ParseIntError),
		Z(ParseIntError),
		Duplicate,
	}

	impl FromStr for Cube {
		type Err = CubeError;
		fn from_str(s: &str) -> Result<Self, Self::Err> {
			use CubeError as E;
			let (x, rest) = s.split_once(',').ok_or(E::Format { column: 1 })?;
			let (y, z) = rest.split_once(',').ok_or(E::Format { column: x.len() + 2 })?;
			Ok(Cube { pos: [
				x.parse().map_err(E::X)?,
				y.parse().map_err(E::Y)?,
				z.parse().map_err(E::Z)?,
			] })
		}
	}

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) struct CubesError { line: usize, source: CubeError }

	pub(super) fn try_cubes_from_str(s: &str) -> Result<Cubes, CubesError> {
		let mut cubes = Cubes::new();
		for (l, line) in s.lines().enumerate() {
			let cube = line.parse::<Cube>().map_err(|e| CubesError { line: l + 1, source: e })?;
			if !cubes.insert(cube) { return Err(CubesError { line: l + 1, source: CubeError::Duplicate }) }
		}
		Ok(cubes)
	}
}
