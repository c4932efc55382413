use crate::{matrix::CostMatrix, Cost};

use super::{Node, VertexSet};

/// A closed tour through the vertices of a cost matrix.
///
/// The closing edge `nodes.last() -> nodes.first()` is part of `cost` but is not
/// repeated in `nodes`. A tour whose cost is [`Cost::max`] does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tour {
    nodes: Vec<Node>,
    cost: Cost,
}

impl From<(Vec<usize>, Cost)> for Tour {
    fn from(input: (Vec<usize>, Cost)) -> Self {
        Tour::new(input.0.into_iter().map(|n| n.into()).collect(), input.1)
    }
}

impl IntoIterator for Tour {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a> IntoIterator for &'a Tour {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl Tour {
    pub fn empty() -> Self {
        Self {
            nodes: vec![],
            cost: Cost::new(0),
        }
    }

    /// The "no solution" tour: no vertices and the sentinel cost.
    pub fn infeasible() -> Self {
        Self {
            nodes: vec![],
            cost: Cost::max(),
        }
    }

    pub fn new(nodes: Vec<Node>, cost: Cost) -> Self {
        debug_assert_eq!(
            nodes.iter().copied().collect::<VertexSet>().len(),
            nodes.len()
        );
        Self { nodes, cost }
    }

    /// Evaluates the cycle through `nodes`. Uses the sentinel cost if the cycle
    /// needs an edge the matrix does not have.
    pub fn with_cost_from(nodes: Vec<Node>, matrix: &CostMatrix) -> Self {
        let cost = matrix.cycle_cost(&nodes).unwrap_or_else(Cost::max);
        Self::new(nodes, cost)
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn is_feasible(&self) -> bool {
        !self.cost.is_max()
    }

    pub fn nodes(&self) -> &[Node] {
        self.nodes.as_slice()
    }

    pub fn ids(&self) -> Vec<usize> {
        self.nodes.iter().map(|n| n.id()).collect()
    }

    pub fn first(&self) -> Option<Node> {
        self.nodes.first().copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl std::fmt::Display for Tour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<String> = self.nodes.iter().map(|n| n.to_string()).collect();
        if let Some(first) = self.first() {
            if self.nodes.len() > 1 {
                ids.push(first.to_string());
            }
        }
        write!(f, "{} (cost {})", ids.join(" -> "), self.cost)
    }
}
