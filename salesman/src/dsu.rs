use crate::graph::Node;

/// Disjoint-set union over vertex ids with union by rank and path compression.
///
/// Every vertex `0..n` starts as its own singleton set.
#[derive(Debug, Clone)]
pub struct DisjointSets {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSets {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    /// The representative of the set containing `node`. Every vertex on the
    /// way to the root is re-linked directly to it.
    pub fn get(&mut self, node: Node) -> Node {
        let mut root = node.id();
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = node.id();
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        Node::new(root)
    }

    /// Merges the sets of `a` and `b`. Returns `false` if they were already
    /// in the same set.
    pub fn join(&mut self, a: Node, b: Node) -> bool {
        let mut ra = self.get(a).id();
        let mut rb = self.get(b).id();
        if ra == rb {
            return false;
        }
        if self.rank[ra] > self.rank[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[ra] = rb;
        if self.rank[ra] == self.rank[rb] {
            self.rank[rb] += 1;
        }
        true
    }

    pub fn connected(&mut self, a: Node, b: Node) -> bool {
        self.get(a) == self.get(b)
    }
}
