use std::iter::FromIterator;

use super::Node;

/// The largest number of vertices a [`VertexSet`] can hold.
pub const MAX_VERTICES: usize = 64;

/// A set of vertices stored as a single 64-bit mask.
///
/// Copying, membership tests and updates are word operations, so search states
/// can carry their own set without allocating.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct VertexSet(u64);

impl VertexSet {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn singleton(node: Node) -> Self {
        Self::empty().with(node)
    }

    /// All vertices `0..n`.
    pub fn range(n: usize) -> Self {
        debug_assert!(n <= MAX_VERTICES);
        if n >= MAX_VERTICES {
            Self(u64::MAX)
        } else {
            Self((1u64 << n) - 1)
        }
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn insert(&mut self, n: Node) -> bool {
        let missing = !self.contains(n);
        self.0 |= Self::bit(n);
        missing
    }

    pub fn remove(&mut self, n: Node) -> bool {
        let present = self.contains(n);
        self.0 &= !Self::bit(n);
        present
    }

    pub fn contains(&self, n: Node) -> bool {
        n.id() < MAX_VERTICES && self.0 & Self::bit(n) != 0
    }

    /// A copy of this set with `n` added.
    pub fn with(mut self, n: Node) -> Self {
        self.insert(n);
        self
    }

    /// A copy of this set with `n` removed.
    pub fn without(mut self, n: Node) -> Self {
        self.remove(n);
        self
    }

    pub fn iter(&self) -> VertexIter {
        VertexIter(self.0)
    }

    fn bit(n: Node) -> u64 {
        debug_assert!(n.id() < MAX_VERTICES, "vertex {} out of range", n);
        1u64 << n.id()
    }
}

/// Iterates the members of a [`VertexSet`] in ascending order.
#[derive(Clone, Debug)]
pub struct VertexIter(u64);

impl Iterator for VertexIter {
    type Item = Node;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            return None;
        }
        let id = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(Node::new(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for VertexIter {}

impl IntoIterator for VertexSet {
    type Item = Node;
    type IntoIter = VertexIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a VertexSet {
    type Item = Node;
    type IntoIter = VertexIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Node> for VertexSet {
    fn from_iter<T: IntoIterator<Item = Node>>(iter: T) -> Self {
        let mut set = VertexSet::empty();
        for n in iter {
            set.insert(n);
        }
        set
    }
}

impl std::fmt::Display for VertexSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}]",
            self.iter()
                .map(|n| n.to_string())
                .collect::<Vec<String>>()
                .join(",")
        )
    }
}
