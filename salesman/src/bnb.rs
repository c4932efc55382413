use crate::{
    bounds::combined_bound,
    graph::{Node, Tour, VertexSet},
    matrix::CostMatrix,
    mst::MstStrategy,
    Cost,
};

/// Counters collected during one branch-and-bound run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Search nodes entered, including complete tours.
    pub explored: usize,
    /// Candidates dropped because their bound could not beat the incumbent.
    pub pruned: usize,
    /// How often the incumbent was replaced.
    pub improvements: usize,
}

/// A partial tour. Every recursive call gets its own extended copy.
#[derive(Debug, Clone)]
struct PartialPath {
    nodes: Vec<Node>,
    cost: Cost,
    unvisited: VertexSet,
}

impl PartialPath {
    fn origin(matrix: &CostMatrix) -> Self {
        let mut nodes = Vec::with_capacity(matrix.n());
        nodes.push(Node::origin());
        Self {
            nodes,
            cost: Cost::new(0),
            unvisited: matrix.vertices().without(Node::origin()),
        }
    }

    fn head(&self) -> Node {
        self.nodes[0]
    }

    fn tail(&self) -> Node {
        self.nodes[self.nodes.len() - 1]
    }

    fn extended(&self, node: Node, edge: Cost) -> Self {
        let mut nodes = Vec::with_capacity(self.nodes.len() + 1);
        nodes.extend_from_slice(&self.nodes);
        nodes.push(node);
        Self {
            nodes,
            cost: self.cost + edge,
            unvisited: self.unvisited.without(node),
        }
    }
}

/// Exact solver: depth-first branch and bound over partial tours starting at
/// vertex `0`.
///
/// Candidates are explored in order of `max(lightest edges, spanning tree) +
/// edge cost` and dropped once that estimate plus the path cost exceeds the
/// best tour found so far.
#[derive(Debug, Clone, Copy)]
pub struct BranchAndBound<'a> {
    matrix: &'a CostMatrix,
    mst: MstStrategy,
}

impl<'a> BranchAndBound<'a> {
    pub fn new(matrix: &'a CostMatrix) -> Self {
        Self {
            matrix,
            mst: MstStrategy::default(),
        }
    }

    pub fn with_mst_strategy(mut self, mst: MstStrategy) -> Self {
        self.mst = mst;
        self
    }

    /// The optimal tour, or [`Tour::infeasible`] if the matrix has none.
    pub fn solve(&self) -> Tour {
        self.solve_with_stats().0
    }

    pub fn solve_with_stats(&self) -> (Tour, SearchStats) {
        let n = self.matrix.n();
        if n == 0 {
            return (Tour::empty(), SearchStats::default());
        }
        if n == 1 {
            return (
                Tour::new(vec![Node::origin()], Cost::new(0)),
                SearchStats::default(),
            );
        }

        log::info!(
            "Start branch and bound on {} vertices ({} spanning tree bound).",
            n,
            self.mst
        );
        let mut search = Search {
            matrix: self.matrix,
            mst: self.mst,
            incumbent: Tour::infeasible(),
            stats: SearchStats::default(),
        };
        search.branch(PartialPath::origin(self.matrix));

        log::info!(
            "Finished branch and bound: cost {} after {} search nodes.",
            search.incumbent.cost(),
            search.stats.explored
        );
        log::debug!("Search statistics: {:?}", search.stats);
        (search.incumbent, search.stats)
    }
}

struct Search<'a> {
    matrix: &'a CostMatrix,
    mst: MstStrategy,
    incumbent: Tour,
    stats: SearchStats,
}

impl Search<'_> {
    fn branch(&mut self, state: PartialPath) {
        self.stats.explored += 1;

        if state.nodes.len() == self.matrix.n() {
            self.close(state);
            return;
        }

        let tail = state.tail();
        let mut candidates: Vec<(Cost, Node)> = state
            .unvisited
            .iter()
            .map(|v| {
                let priority = match self.matrix.cost(tail, v) {
                    Some(edge) => {
                        combined_bound(
                            self.matrix,
                            state.head(),
                            state.nodes.len(),
                            state.unvisited,
                            v,
                            self.mst,
                        ) + edge
                    }
                    None => Cost::max(),
                };
                (priority, v)
            })
            .collect();
        candidates.sort_by_key(|&(priority, _)| priority);

        for (priority, v) in candidates {
            let edge = match self.matrix.cost(tail, v) {
                Some(edge) => edge,
                None => continue,
            };
            if priority + state.cost > self.incumbent.cost() {
                self.stats.pruned += 1;
                log::trace!(
                    "Prune {:?} -> {}: {} exceeds {}",
                    state.nodes,
                    v,
                    priority + state.cost,
                    self.incumbent.cost()
                );
                continue;
            }
            self.branch(state.extended(v, edge));
        }
    }

    fn close(&mut self, state: PartialPath) {
        let closing = match self.matrix.cost(state.tail(), state.head()) {
            Some(closing) => closing,
            None => return,
        };
        let cost = state.cost + closing;
        if cost <= self.incumbent.cost() {
            log::debug!("New incumbent {:?} with cost {}", state.nodes, cost);
            self.stats.improvements += 1;
            self.incumbent = Tour::new(state.nodes, cost);
        }
    }
}

#[cfg(test)]
mod test_bnb {
    use super::*;
    use crate::{
        brute_force::brute_force,
        testing::{benchmark_matrix, random_matrix},
    };

    #[test]
    fn test_benchmark() {
        let matrix = benchmark_matrix();
        let tour = BranchAndBound::new(&matrix).solve();
        assert_eq!(tour.cost(), 80.into());
        let ids = tour.ids();
        assert!(ids == vec![0, 1, 3, 2] || ids == vec![0, 2, 3, 1], "{:?}", ids);
    }

    #[test]
    fn test_empty_and_singleton() {
        let empty = CostMatrix::from_rows::<[i64; 0]>(&[]).unwrap();
        let tour = BranchAndBound::new(&empty).solve();
        assert_eq!(tour.cost(), 0.into());
        assert!(tour.is_empty());

        let single = CostMatrix::from_rows(&[[-1]]).unwrap();
        let tour = BranchAndBound::new(&single).solve();
        assert_eq!(tour.cost(), 0.into());
        assert_eq!(tour.ids(), vec![0]);
    }

    #[test]
    fn test_two_vertices() {
        let matrix = CostMatrix::from_rows(&[[-1, 4], [7, -1]]).unwrap();
        let tour = BranchAndBound::new(&matrix).solve();
        assert_eq!(tour.cost(), 11.into());
        assert_eq!(tour.ids(), vec![0, 1]);
    }

    #[test]
    fn test_ties_replace_incumbent() {
        // every tour costs 4, so each complete tour becomes the new incumbent
        let matrix = CostMatrix::from_rows(&[
            [-1, 1, 1, 1],
            [1, -1, 1, 1],
            [1, 1, -1, 1],
            [1, 1, 1, -1],
        ])
        .unwrap();
        let (tour, stats) = BranchAndBound::new(&matrix).solve_with_stats();
        assert_eq!(tour.cost(), 4.into());
        assert_eq!(tour.ids(), vec![0, 3, 2, 1]);
        assert_eq!(stats.improvements, 6);
        assert_eq!(stats.pruned, 0);
    }

    #[test]
    fn test_infeasible() {
        // vertex 2 cannot be left
        let matrix = CostMatrix::from_rows(&[[-1, 1, 1], [1, -1, 1], [-1, -1, -1]]).unwrap();
        let (tour, stats) = BranchAndBound::new(&matrix).solve_with_stats();
        assert!(!tour.is_feasible());
        assert!(tour.cost().is_max());
        assert!(tour.is_empty());
        assert_eq!(stats.improvements, 0);
    }

    #[test]
    fn test_avoids_missing_edges() {
        // the cheap ring 0 -> 1 -> 2 -> 3 -> 0 misses 2 -> 3
        let matrix = CostMatrix::from_rows(&[
            [-1, 1, 9, 9],
            [9, -1, 1, 9],
            [9, 9, -1, -1],
            [1, 9, 9, -1],
        ])
        .unwrap();
        let tour = BranchAndBound::new(&matrix).solve();
        assert!(tour.is_feasible());
        assert_eq!(matrix.cycle_cost(tour.nodes()), Some(tour.cost()));
        assert_eq!(tour.cost(), brute_force(&matrix).cost());
    }

    #[test]
    fn test_matches_brute_force() {
        for seed in 0..40 {
            let n = 2 + (seed as usize % 7);
            let matrix = random_matrix(n, seed % 2 == 0, seed);
            let exact = brute_force(&matrix);
            for &strategy in &[MstStrategy::Kruskal, MstStrategy::Prim] {
                let tour = BranchAndBound::new(&matrix)
                    .with_mst_strategy(strategy)
                    .solve();
                assert_eq!(tour.cost(), exact.cost(), "seed {} n {}", seed, n);
                assert_eq!(tour.len(), n);
                assert_eq!(tour.first(), Some(Node::origin()));
                assert_eq!(matrix.cycle_cost(tour.nodes()), Some(tour.cost()));
            }
        }
    }

    #[test]
    fn test_pruning_happens() {
        let matrix = random_matrix(8, true, 3);
        let (_, stats) = BranchAndBound::new(&matrix).solve_with_stats();
        // 7! complete orderings without pruning
        assert!(stats.explored < 5040);
        assert!(stats.pruned > 0);
        assert!(stats.improvements >= 1);
    }

    #[test]
    fn test_engine_is_reusable() {
        let matrix = random_matrix(6, false, 11);
        let engine = BranchAndBound::new(&matrix);
        assert_eq!(engine.solve(), engine.solve());
    }
}
