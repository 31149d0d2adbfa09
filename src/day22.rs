// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::collections::HashMap;
use crate::{error::Error, search::Grid};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tile { Void, Open, Wall }

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Turn { Left, Right }

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
	Turn(Turn),
	Forward(usize),
}

/// In clockwise order, starting with the facing worth 0 in the password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Facing { Right, Down, Left, Up }

impl Facing {
	const ALL: [Facing; 4] = [Facing::Right, Facing::Down, Facing::Left, Facing::Up];

	fn turned(self, turn: Turn) -> Self {
		let quarters = match turn { Turn::Right => 1, Turn::Left => 3 };
		Facing::ALL[(self as usize + quarters) % 4]
	}
}

struct Board {
	tiles: Grid<Tile>,
	/// Leftmost open tile of the top row.
	start: usize,
}

impl Board {
	/// The tile next to `pos` in direction `facing`, if the board has one there.
	fn neighbour(&self, pos: usize, facing: Facing) -> Option<usize> {
		let [x, y] = self.tiles.xy(pos);
		let [x, y] = match facing {
			Facing::Right => [x + 1, y],
			Facing::Down => [x, y + 1],
			Facing::Left => [x.checked_sub(1)?, y],
			Facing::Up => [x, y.checked_sub(1)?],
		};
		if x >= self.tiles.width() || y >= self.tiles.height() { return None }
		let next = self.tiles.pos([x, y]);
		(self.tiles[next] != Tile::Void).then_some(next)
	}
}

struct Notes {
	board: Board,
	path: Vec<Step>,
}


/// Where walking off the board's edge leads.
trait Wrapping {
	/// The tile ahead of `pos`, and the facing once there.
	fn ahead(&self, pos: usize, facing: Facing) -> (usize, Facing);
}

/// Walking off an edge comes back in on the opposite side of the board.
struct Flat<'b>(&'b Board);

impl Wrapping for Flat<'_> {
	fn ahead(&self, pos: usize, facing: Facing) -> (usize, Facing) {
		if let Some(next) = self.0.neighbour(pos, facing) { return (next, facing) }
		let tiles = &self.0.tiles;
		let ([w, h], [mut x, mut y]) = ([tiles.width(), tiles.height()], tiles.xy(pos));
		loop {
			match facing {
				Facing::Right => x = (x + 1) % w,
				Facing::Down => y = (y + 1) % h,
				Facing::Left => x = (x + w - 1) % w,
				Facing::Up => y = (y + h - 1) % h,
			}
			let next = tiles.pos([x, y]);
			if tiles[next] != Tile::Void { return (next, facing) }
		}
	}
}


type Vec3 = [i64; 3];

fn neg(v: Vec3) -> Vec3 { v.map(|c| -c) }

fn dot(a: Vec3, b: Vec3) -> i64 { a.iter().zip(b).map(|(a, b)| a * b).sum() }

/// Combines `terms` of vectors times factors.
fn sum(terms: &[(Vec3, i64)]) -> Vec3 {
	std::array::from_fn(|axis| terms.iter().map(|(v, f)| v[axis] * f).sum())
}

/// Orientation of a face of the folded cube: its outward normal, and the
/// directions its tiles' right & down point to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame { normal: Vec3, right: Vec3, down: Vec3 }

impl Frame {
	fn toward(&self, facing: Facing) -> Vec3 {
		match facing {
			Facing::Right => self.right,
			Facing::Down => self.down,
			Facing::Left => neg(self.right),
			Facing::Up => neg(self.down),
		}
	}

	/// The frame of the face next to this one in direction `facing`, folding
	/// the board along their shared edge.
	fn rolled(self, facing: Facing) -> Self {
		let Frame { normal, right, down } = self;
		match facing {
			Facing::Right => Frame { normal: right, right: neg(normal), down },
			Facing::Down => Frame { normal: down, right, down: neg(normal) },
			Facing::Left => Frame { normal: neg(right), right: normal, down },
			Facing::Up => Frame { normal: neg(down), right, down: normal },
		}
	}
}

/// The board folded into a cube, each face covering a square of `size` tiles.
struct Cube<'b> {
	board: &'b Board,
	size: usize,
	/// By face position (in units of `size`).
	faces: HashMap<[usize; 2], Frame>,
	by_normal: HashMap<Vec3, [usize; 2]>,
}

#[allow(dead_code)]
#[derive(Debug)]
enum FoldError {
	TileCount(usize),
	/// The face at this position (in units of the face size) is partly void.
	Ragged([usize; 2]),
	/// Two faces end up on the same side.
	Overlap([usize; 2]),
}

impl<'b> Cube<'b> {
	fn fold(board: &'b Board) -> Result<Self, FoldError> {
		let tiles = &board.tiles;
		let count = tiles.iter().filter(|&&tile| tile != Tile::Void).count();
		let size = (1..).find(|size| 6 * size * size >= count).unwrap_or(0);
		if count == 0 || 6 * size * size != count || tiles.width() % size != 0 || tiles.height() % size != 0 {
			return Err(FoldError::TileCount(count))
		}

		let blocks = [tiles.width() / size, tiles.height() / size];
		let is_face = |[bx, by]: [usize; 2]| -> Result<bool, FoldError> {
			let mut cells = itertools::iproduct!(0..size, 0..size)
				.map(|(y, x)| tiles[tiles.pos([bx * size + x, by * size + y])] != Tile::Void);
			let first = cells.next().unwrap_or(false);
			if cells.any(|face| face != first) { return Err(FoldError::Ragged([bx, by])) }
			Ok(first)
		};

		let first = [board.start % tiles.width() / size, 0];
		let mut faces = HashMap::from([(first, Frame { normal: [0, 0, 1], right: [1, 0, 0], down: [0, 1, 0] })]);
		let mut by_normal = HashMap::from([([0, 0, 1], first)]);
		let mut stack = vec![first];
		while let Some([bx, by]) = stack.pop() {
			let frame = faces[&[bx, by]];
			for facing in Facing::ALL {
				let next = match facing {
					Facing::Right => [bx + 1, by],
					Facing::Down => [bx, by + 1],
					Facing::Left if bx > 0 => [bx - 1, by],
					Facing::Up if by > 0 => [bx, by - 1],
					_ => continue,
				};
				if next[0] >= blocks[0] || next[1] >= blocks[1] || faces.contains_key(&next) || !is_face(next)? {
					continue
				}
				let rolled = frame.rolled(facing);
				if by_normal.insert(rolled.normal, next).is_some() { return Err(FoldError::Overlap(next)) }
				faces.insert(next, rolled);
				stack.push(next);
			}
		}

		if faces.len() != 6 { return Err(FoldError::TileCount(count)) }
		tracing::debug!(size, ?faces, "folded");
		Ok(Cube { board, size, faces, by_normal })
	}
}

impl Wrapping for Cube<'_> {
	/// Past an edge, continues onto the face whose normal points the way
	/// we were heading, now heading away from the face we left.
	fn ahead(&self, pos: usize, facing: Facing) -> (usize, Facing) {
		if let Some(next) = self.board.neighbour(pos, facing) { return (next, facing) }

		let (tiles, n) = (&self.board.tiles, self.size);
		let [x, y] = tiles.xy(pos);
		let Some(&from) = self.faces.get(&[x / n, y / n]) else { unreachable!("every tile is on a face") };

		// Tile centers at doubled coordinates, with the cube's center at the origin
		let (n, [i, j]) = (n as i64, [(x % self.size) as i64, (y % self.size) as i64]);
		let heading = from.toward(facing);
		let center = sum(&[(from.normal, n - 1), (from.right, 2 * i - (n - 1)), (from.down, 2 * j - (n - 1)), (heading, 1)]);

		let Some(&[bx, by]) = self.by_normal.get(&heading) else { unreachable!("every side has a face") };
		let onto = self.faces[&[bx, by]];
		let [i, j] = [onto.right, onto.down].map(|axis| ((dot(center, axis) + n - 1) / 2) as usize);
		let Some(facing) = Facing::ALL.into_iter().find(|&f| onto.toward(f) == neg(from.normal)) else {
			unreachable!("adjacent faces share an edge")
		};
		(tiles.pos([bx * self.size + i, by * self.size + j]), facing)
	}
}


/// Follows the path from the start; returns the final row, column & facing
/// combined into the password.
fn walk(notes: &Notes, wrapping: &impl Wrapping) -> usize {
	let tiles = &notes.board.tiles;
	let (mut pos, mut facing) = (notes.board.start, Facing::Right);
	for &step in &notes.path {
		match step {
			Step::Turn(turn) => facing = facing.turned(turn),
			Step::Forward(count) => for _ in 0..count {
				let (next, next_facing) = wrapping.ahead(pos, facing);
				if tiles[next] == Tile::Wall { break }
				(pos, facing) = (next, next_facing);
			}
		}
		tracing::trace!(?step, at = ?tiles.xy(pos), ?facing);
	}
	let [x, y] = tiles.xy(pos);
	1000 * (y + 1) + 4 * (x + 1) + facing as usize
}


fn input_notes_from_str(s: &str) -> Result<Notes, Error> {
	parsing::try_notes_from_str(s).map_err(Error::input)
}


fn part1_impl(input_notes: &Notes) -> usize {
	walk(input_notes, &Flat(&input_notes.board))
}

pub(crate) fn part1(input: &str) -> Result<usize, Error> {
	Ok(part1_impl(&input_notes_from_str(input)?))
}


fn part2_impl(input_notes: &Notes) -> Result<usize, Error> {
	let cube = Cube::fold(&input_notes.board).map_err(Error::unsolvable)?;
	Ok(walk(input_notes, &cube))
}

pub(crate) fn part2(input: &str) -> Result<usize, Error> {
	part2_impl(&input_notes_from_str(input)?)
}


mod parsing {
	use std::num::ParseIntError;
	use crate::search::Grid;
	use super::{Board, Notes, Step, Tile, Turn};

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) enum BoardError {
		Empty,
		InvalidByte { line: usize, column: usize, found: u8 },
		/// The top row has no open tile.
		NoStart,
	}

	fn try_board_from_str(s: &str) -> Result<Board, BoardError> {
		use BoardError as E;

		let width = s.lines().map(str::len).max().unwrap_or(0);
		if width == 0 { return Err(E::Empty) }
		let mut tiles = Vec::new();
		for (l, line) in s.lines().enumerate() {
			for (c, b) in line.bytes().enumerate() {
				tiles.push(match b {
					b' ' => Tile::Void,
					b'.' => Tile::Open,
					b'#' => Tile::Wall,
					found => return Err(E::InvalidByte { line: l + 1, column: c + 1, found }),
				});
			}
			tiles.resize(width * (l + 1), Tile::Void);
		}

		let start = tiles[..width].iter().position(|&tile| tile == Tile::Open).ok_or(E::NoStart)?;
		Ok(Board { tiles: Grid::new(tiles, width), start })
	}

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) enum PathError {
		Empty,
		Forward { column: usize, source: ParseIntError },
		Turn { column: usize, found: char },
	}

	/// E.g. “10R5L5”.
	fn try_path_from_str(s: &str) -> Result<Vec<Step>, PathError> {
		use PathError as E;

		let mut path = Vec::new();
		let mut rest = s;
		while let Some(first) = rest.chars().next() {
			let column = s.len() - rest.len() + 1;
			let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
			if digits > 0 {
				let count = rest[..digits].parse().map_err(|source| E::Forward { column, source })?;
				path.push(Step::Forward(count));
				rest = &rest[digits..];
				continue
			}
			path.push(Step::Turn(match first {
				'L' => Turn::Left,
				'R' => Turn::Right,
				found => return Err(E::Turn { column, found }),
			}));
			rest = &rest[1..];
		}
		if path.is_empty() { return Err(E::Empty) }
		Ok(path)
	}

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) enum NotesError {
		/// The board & the path must be separated by an empty line.
		Format,
		Board(BoardError),
		Path { line: usize, source: PathError },
	}

	pub(super) fn try_notes_from_str(s: &str) -> Result<Notes, NotesError> {
		use NotesError as E;
		let (board, path) = s.split_once("\n\n").ok_or(E::Format)?;
		let line = board.lines().count() + 2;
		Ok(Notes {
			board: try_board_from_str(board).map_err(E::Board)?,
			path: try_path_from_str(path.trim_end_matches('\n')).map_err(|source| E::Path { line, source })?,
		})
	}
}


#[cfg(test)]
mod tests {
	use test_case::test_case;
	use super::*;

	const INPUT: &str = indoc::indoc! { "
		        ...#
		        .#..
		        #...
		        ....
		...#.......#
		........#...
		..#....#....
		..........#.
		        ...#....
		        .....#..
		        .#......
		        ......#.

		10R5L5R10L4R5L5
	" };

	/// The other common net, with faces of two by two tiles.
	const NET: &str = indoc::indoc! { "
		  ....
		  ....
		  ..
		  ..
		....
		....
		..
		..

		1
	" };

	fn at(notes: &Notes, [x, y]: [usize; 2]) -> usize {
		notes.board.tiles.pos([x, y])
	}

	#[test]
	fn example() {
		let notes = input_notes_from_str(INPUT).unwrap();
		assert_eq!(notes.path.len(), 13);
		assert_eq!(notes.path[..3], [Step::Forward(10), Step::Turn(Turn::Right), Step::Forward(5)]);
		assert_eq!(part1_impl(&notes), 6032);
		assert_eq!(part2_impl(&notes).unwrap(), 5031);
	}

	#[test_case([8, 0], Facing::Left, [11, 0] ; "row")]
	#[test_case([8, 0], Facing::Up, [8, 11] ; "column")]
	#[test_case([0, 4], Facing::Left, [11, 4] ; "wide row")]
	#[test_case([5, 7], Facing::Down, [5, 4] ; "short column")]
	fn flat_wraps(from: [usize; 2], facing: Facing, to: [usize; 2]) {
		let notes = input_notes_from_str(INPUT).unwrap();
		assert_eq!(Flat(&notes.board).ahead(at(&notes, from), facing), (at(&notes, to), facing));
	}

	#[test_case(INPUT, [11, 5], Facing::Right, [14, 8], Facing::Down ; "onto the right")]
	#[test_case(INPUT, [10, 11], Facing::Down, [1, 7], Facing::Up ; "onto the bottom")]
	#[test_case(INPUT, [6, 4], Facing::Up, [8, 2], Facing::Right ; "onto the top")]
	#[test_case(NET, [2, 0], Facing::Up, [0, 6], Facing::Right ; "top edge")]
	#[test_case(NET, [0, 7], Facing::Down, [4, 0], Facing::Down ; "bottom edge")]
	fn cube_wraps(input: &str, from: [usize; 2], facing: Facing, to: [usize; 2], to_facing: Facing) {
		let notes = input_notes_from_str(input).unwrap();
		let cube = Cube::fold(&notes.board).unwrap();
		assert_eq!(cube.ahead(at(&notes, from), facing), (at(&notes, to), to_facing));
	}

	#[test_case(INPUT ; "example")]
	#[test_case(NET ; "net")]
	fn around_the_cube(input: &str) {
		let notes = input_notes_from_str(input).unwrap();
		let cube = Cube::fold(&notes.board).unwrap();
		for (pos, _) in notes.board.tiles.iter().enumerate().filter(|&(_, &tile)| tile != Tile::Void) {
			for facing in Facing::ALL {
				let around = (0..4 * cube.size).fold((pos, facing), |(pos, facing), _| cube.ahead(pos, facing));
				assert_eq!(around, (pos, facing));
			}
		}
	}

	#[test]
	fn unfoldable() {
		let strip = input_notes_from_str("......\n\n1\n").unwrap();
		assert_eq!(part1_impl(&strip), 1000 + 4 * 2);
		assert!(matches!(part2_impl(&strip), Err(Error::Unsolvable(_))));
		let rectangle = input_notes_from_str("...\n...\n\n1\n").unwrap();
		assert!(matches!(part2_impl(&rectangle), Err(Error::Unsolvable(_))));
		let odd = input_notes_from_str("....\n\n1\n").unwrap();
		assert!(matches!(part2_impl(&odd), Err(Error::Unsolvable(_))));
	}

	#[test]
	fn invalid() {
		assert!(matches!(input_notes_from_str("...\n1\n"), Err(Error::Input(_))));
		assert!(matches!(input_notes_from_str(".x.\n\n1\n"), Err(Error::Input(_))));
		assert!(matches!(input_notes_from_str("  ##\n\n1\n"), Err(Error::Input(_))));
		assert!(matches!(input_notes_from_str("...\n\n1X2\n"), Err(Error::Input(_))));
		assert!(matches!(input_notes_from_str("...\n\n\n"), Err(Error::Input(_))));
		assert!(matches!(input_notes_from_str("\n\n1\n"), Err(Error::Input(_))));
	}
}
