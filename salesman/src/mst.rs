use crate::{
    dsu::DisjointSets,
    error::UnknownStrategy,
    graph::{Node, VertexSet},
    matrix::CostMatrix,
    Cost,
};
use binary_heap_plus::BinaryHeap;
use compare::Compare;
use std::{cmp::Ordering, str::FromStr};

/// Which algorithm computes the spanning tree bound. Both return the same
/// weight.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MstStrategy {
    Kruskal,
    Prim,
}

impl Default for MstStrategy {
    fn default() -> Self {
        MstStrategy::Kruskal
    }
}

impl FromStr for MstStrategy {
    type Err = UnknownStrategy;
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "kruskal" => Ok(MstStrategy::Kruskal),
            "prim" => Ok(MstStrategy::Prim),
            _ => Err(UnknownStrategy(name.to_owned())),
        }
    }
}

impl std::fmt::Display for MstStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MstStrategy::Kruskal => write!(f, "kruskal"),
            MstStrategy::Prim => write!(f, "prim"),
        }
    }
}

impl MstStrategy {
    pub fn weight(&self, matrix: &CostMatrix, vertices: VertexSet) -> Cost {
        match self {
            MstStrategy::Kruskal => kruskal_weight(matrix, vertices),
            MstStrategy::Prim => prims_weight(matrix, vertices),
        }
    }
}

/// Weight of a minimum spanning forest on the subgraph induced by `vertices`.
///
/// Both directions of every pair are candidate edges; absent edges are skipped.
pub fn kruskal_weight(matrix: &CostMatrix, vertices: VertexSet) -> Cost {
    let mut edges: Vec<(Cost, Node, Node)> = Vec::with_capacity(vertices.len() * vertices.len());
    for u in vertices {
        for v in vertices {
            if let Some(cost) = matrix.cost(u, v) {
                edges.push((cost, u, v));
            }
        }
    }
    edges.sort_by_key(|&(cost, _, _)| cost);

    let mut dsu = DisjointSets::new(matrix.n());
    let mut missing = vertices.len().saturating_sub(1);
    let mut total = Cost::new(0);
    for (cost, u, v) in edges {
        if missing == 0 {
            break;
        }
        if dsu.get(u) != dsu.get(v) {
            dsu.join(u, v);
            total += cost;
            missing -= 1;
        }
    }
    total
}

struct CheapestFirst;

impl Compare<(Cost, Node)> for CheapestFirst {
    fn compare(&self, l: &(Cost, Node), r: &(Cost, Node)) -> Ordering {
        r.cmp(l)
    }
}

fn undirected_cost(matrix: &CostMatrix, u: Node, v: Node) -> Option<Cost> {
    match (matrix.cost(u, v), matrix.cost(v, u)) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Same weight as [`kruskal_weight`], grown from the lowest vertex of every
/// component with a lazy binary heap.
pub fn prims_weight(matrix: &CostMatrix, vertices: VertexSet) -> Cost {
    let mut in_tree = VertexSet::empty();
    let mut total = Cost::new(0);

    for root in vertices {
        if in_tree.contains(root) {
            continue;
        }
        let mut heap = BinaryHeap::from_vec_cmp(vec![(Cost::new(0), root)], CheapestFirst);
        while let Some((cost, u)) = heap.pop() {
            if !in_tree.insert(u) {
                continue;
            }
            total += cost;
            for v in vertices {
                if in_tree.contains(v) {
                    continue;
                }
                if let Some(c) = undirected_cost(matrix, u, v) {
                    heap.push((c, v));
                }
            }
        }
    }
    total
}
