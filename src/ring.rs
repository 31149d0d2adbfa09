// Copyright (c) 2022 Bastiaan Marinus van de Weerd


/// Cyclic doubly-linked list, its links being indices into an arena that
/// keeps every value at its insertion index.
#[derive(Debug, Clone)]
pub(crate) struct Ring<T> {
	links: Vec<Link<T>>,
}

#[derive(Debug, Clone)]
struct Link<T> {
	value: T,
	prev: usize,
	next: usize,
}

impl<T> FromIterator<T> for Ring<T> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		let mut links = iter.into_iter()
			.enumerate()
			.map(|(i, value)| Link { value, prev: i.wrapping_sub(1), next: i + 1 })
			.collect::<Vec<_>>();
		let len = links.len();
		if let Some(first) = links.first_mut() { first.prev = len - 1 }
		if let Some(last) = links.last_mut() { last.next = 0 }
		Ring { links }
	}
}

impl<T> Ring<T> {
	pub(crate) fn len(&self) -> usize { self.links.len() }

	/// Value inserted at `index`.
	pub(crate) fn get(&self, index: usize) -> &T { &self.links[index].value }

	/// Index of the value `n` places after the one at `index`.
	pub(crate) fn nth_after(&self, index: usize, n: usize) -> usize {
		(0..n % self.len()).fold(index, |i, _| self.links[i].next)
	}

	/// Values in ring order, starting at `index`.
	pub(crate) fn iter_from(&self, index: usize) -> impl Iterator<Item = &T> + '_ {
		std::iter::successors(Some(index), move |&i| Some(self.links[i].next))
			.take(self.len())
			.map(move |i| &self.links[i].value)
	}

	fn unlink(&mut self, index: usize) -> usize {
		let Link { prev, next, .. } = self.links[index];
		self.links[prev].next = next;
		self.links[next].prev = prev;
		prev
	}

	fn link_after(&mut self, index: usize, prev: usize) {
		let next = self.links[prev].next;
		self.links[prev].next = index;
		self.links[next].prev = index;
		self.links[index].prev = prev;
		self.links[index].next = next;
	}

	/// Moves the value at `index` by `offset` places past the other values
	/// (forward if positive); walks whichever way round is shorter.
	pub(crate) fn shift(&mut self, index: usize, offset: i64) {
		let others = self.len().saturating_sub(1);
		if others == 0 { return }
		let forward = offset.rem_euclid(others as i64) as usize;
		if forward == 0 { return }

		let mut prev = self.unlink(index);
		if forward <= others / 2 {
			for _ in 0..forward { prev = self.links[prev].next }
		} else {
			for _ in 0..others - forward { prev = self.links[prev].prev }
		}
		self.link_after(index, prev);
	}
}


#[cfg(test)]
mod tests {
	use test_case::test_case;
	use super::Ring;

	fn order(ring: &Ring<char>) -> String {
		ring.iter_from(0).collect()
	}

	#[test_case(0, 1, "acdeb" ; "one forward")]
	#[test_case(0, -1, "aebcd" ; "one backward")]
	#[test_case(2, 4, "abcde" ; "full lap")]
	#[test_case(2, 3, "acbde" ; "wraps forward")]
	#[test_case(1, -6, "acdbe" ; "wraps backward")]
	#[test_case(4, 0, "abcde" ; "still")]
	fn shift(index: usize, offset: i64, expected: &str) {
		let mut ring = "abcde".chars().collect::<Ring<_>>();
		ring.shift(index, offset);
		assert_eq!(order(&ring), expected);
		assert_eq!(*ring.get(index), "abcde".as_bytes()[index] as char);
	}

	#[test]
	fn navigation() {
		let ring = [1, 2, 3].into_iter().collect::<Ring<_>>();
		assert_eq!(ring.nth_after(0, 1), 1);
		assert_eq!(ring.nth_after(0, 1000), 1);
		assert_eq!(ring.nth_after(2, 1), 0);
		assert_eq!(ring.iter_from(1).copied().collect::<Vec<_>>(), [2, 3, 1]);
	}

	#[test]
	fn singleton() {
		let mut ring = std::iter::once('x').collect::<Ring<_>>();
		ring.shift(0, 7);
		assert_eq!(order(&ring), "x");
		assert_eq!(ring.nth_after(0, 3), 0);
	}
}
