// Copyright (c) 2022 Bastiaan Marinus van de Weerd


/// Row-major 2D grid of cells, addressed either by position (index into the
/// rows laid end to end) or by `[x, y]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Grid<T> {
	cells: Vec<T>,
	stride: usize,
}

impl<T> Grid<T> {
	/// Panics if `cells` does not hold a whole number of rows of `stride` cells.
	pub(crate) fn new(cells: Vec<T>, stride: usize) -> Self {
		assert!(stride > 0 && cells.len() % stride == 0, "ragged grid");
		Grid { cells, stride }
	}

	pub(crate) fn from_fn(width: usize, height: usize, mut f: impl FnMut([usize; 2]) -> T) -> Self {
		let cells = itertools::iproduct!(0..height, 0..width)
			.map(|(y, x)| f([x, y]))
			.collect();
		Grid::new(cells, width)
	}

	pub(crate) fn width(&self) -> usize { self.stride }
	pub(crate) fn height(&self) -> usize { self.cells.len() / self.stride }
	pub(crate) fn len(&self) -> usize { self.cells.len() }

	pub(crate) fn xy(&self, pos: usize) -> [usize; 2] {
		[pos % self.stride, pos / self.stride]
	}

	pub(crate) fn pos(&self, [x, y]: [usize; 2]) -> usize {
		debug_assert!(x < self.stride);
		y * self.stride + x
	}

	/// In-bounds orthogonal neighbours of `pos`: above, left, right & below.
	pub(crate) fn adjacent(&self, pos: usize) -> impl Iterator<Item = usize> {
		let (s, len) = (self.stride, self.cells.len());
		let above = (pos >= s).then(|| pos - s);
		let left = (pos % s > 0).then(|| pos - 1);
		let right = (pos % s < s - 1).then(|| pos + 1);
		let below = (pos + s < len).then(|| pos + s);
		[above, left, right, below].into_iter().flatten()
	}

	pub(crate) fn manhattan(&self, a: usize, b: usize) -> usize {
		let ([ax, ay], [bx, by]) = (self.xy(a), self.xy(b));
		ax.abs_diff(bx) + ay.abs_diff(by)
	}

	pub(crate) fn iter(&self) -> impl Iterator<Item = &T> + '_ {
		self.cells.iter()
	}

	pub(crate) fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
		self.cells.chunks(self.stride)
	}
}

impl<T> std::ops::Index<usize> for Grid<T> {
	type Output = T;
	fn index(&self, pos: usize) -> &T { &self.cells[pos] }
}

impl<T> std::ops::IndexMut<usize> for Grid<T> {
	fn index_mut(&mut self, pos: usize) -> &mut T { &mut self.cells[pos] }
}


#[cfg(test)]
mod tests {
	use super::Grid;

	#[test]
	fn adjacent() {
		let grid = Grid::from_fn(3, 3, |[x, y]| x + y);
		assert_eq!(grid.adjacent(0).collect::<Vec<_>>(), [1, 3]);
		assert_eq!(grid.adjacent(4).collect::<Vec<_>>(), [1, 3, 5, 7]);
		assert_eq!(grid.adjacent(8).collect::<Vec<_>>(), [5, 7]);
		assert_eq!(grid.adjacent(5).collect::<Vec<_>>(), [2, 4, 8]);
	}

	#[test]
	fn geometry() {
		let grid = Grid::from_fn(4, 2, |[x, y]| (x, y));
		assert_eq!([grid.width(), grid.height(), grid.len()], [4, 2, 8]);
		assert_eq!(grid[grid.pos([3, 1])], (3, 1));
		assert_eq!(grid.xy(6), [2, 1]);
		assert_eq!(grid.manhattan(0, 7), 4);
		assert_eq!(grid.rows().map(|row| row.len()).collect::<Vec<_>>(), [4, 4]);
	}

	#[test]
	#[should_panic]
	fn ragged() {
		Grid::new(vec![0; 5], 2);
	}
}
