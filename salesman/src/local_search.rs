use crate::{
    graph::{Node, Tour},
    matrix::{CostMatrix, MAX_EDGE_COST},
    Cost,
};

/// Weight used for an absent edge when estimating removal deltas. Large enough
/// to dominate any real cost, small enough not to overflow a sum of three.
const MISSING_EDGE_PENALTY: i64 = 1 << 48;

/// Approximate solver that repeatedly moves the city which looks most
/// misplaced to the position where it lowers the tour cost the most.
///
/// Starts from the identity tour and stops after `n` improvements or as soon
/// as no relocation helps. Vertex `0` never moves.
pub struct Relocation<'a> {
    current_tour: Vec<Node>,
    current_cost: Cost,
    start_cost: Cost,
    iteration: usize,
    matrix: &'a CostMatrix,
}

impl<'a> Relocation<'a> {
    pub fn new(matrix: &'a CostMatrix) -> Self {
        Self::with_start_tour(matrix, matrix.nodes().collect())
    }

    /// Starts from `start_tour`, which must begin with vertex `0` and visit
    /// every vertex once.
    fn with_start_tour(matrix: &'a CostMatrix, start_tour: Vec<Node>) -> Self {
        debug_assert!(start_tour.is_empty() || start_tour[0] == Node::origin());
        debug_assert_eq!(start_tour.len(), matrix.n());
        let cost = tour_cost(matrix, &start_tour);
        Relocation {
            current_tour: start_tour,
            current_cost: cost,
            start_cost: cost,
            iteration: 0,
            matrix,
        }
    }

    pub fn current_tour(&self) -> Tour {
        Tour::new(self.current_tour.clone(), self.current_cost)
    }

    pub fn iterations(&self) -> usize {
        self.iteration
    }

    pub fn run(&mut self) -> Tour {
        let n = self.matrix.n();
        log::info!(
            "Starting relocation search. Initial tour cost: {}",
            self.current_cost
        );

        'iter: while self.iteration < n {
            let deltas = self.removal_deltas();
            match deltas.first() {
                Some(&(delta, _)) if delta >= 0 => {}
                _ => {
                    log::debug!("Stopping relocation early: every removal delta is negative.");
                    break 'iter;
                }
            }

            for &(delta, position) in &deltas {
                if let Some((tour, cost)) = self.best_swap_at(position) {
                    self.iteration += 1;
                    log::trace!(
                        "Iteration {}/{}: moved city {} (delta {}), {} -> {}",
                        self.iteration,
                        n,
                        self.current_tour[position],
                        delta,
                        self.current_cost,
                        cost
                    );
                    self.current_tour = tour;
                    self.current_cost = cost;
                    continue 'iter;
                }
            }
            log::debug!("Stopping relocation early: No improvement could be made.");
            break 'iter;
        }

        log::info!(
            "Relocation results after {} iterations: {} -> {}",
            self.iteration,
            self.start_cost,
            self.current_cost
        );
        self.current_tour()
    }

    /// `(delta, position)` for every non-origin position, largest delta first.
    /// Equal deltas keep their position order.
    fn removal_deltas(&self) -> Vec<(i64, usize)> {
        let n = self.current_tour.len();
        let mut deltas: Vec<(i64, usize)> = (1..n)
            .map(|i| {
                let prev = self.current_tour[(i + n - 1) % n];
                let cur = self.current_tour[i];
                let next = self.current_tour[(i + 1) % n];
                let kept = self.weight(prev, cur).saturating_add(self.weight(cur, next));
                (kept.saturating_sub(self.weight(prev, next)), i)
            })
            .collect();
        deltas.sort_by(|a, b| b.0.cmp(&a.0));
        deltas
    }

    /// Tries swapping the city at `position` with every other non-origin
    /// position, each time starting from the best tour found so far. Returns the
    /// result if it beats the current tour.
    fn best_swap_at(&self, position: usize) -> Option<(Vec<Node>, Cost)> {
        let mut best = self.current_tour.clone();
        let mut best_cost = self.current_cost;
        for j in 1..self.current_tour.len() {
            let mut candidate = best.clone();
            candidate.swap(position, j);
            let cost = tour_cost(self.matrix, &candidate);
            if cost < best_cost {
                best = candidate;
                best_cost = cost;
            }
        }
        if best_cost < self.current_cost {
            Some((best, best_cost))
        } else {
            None
        }
    }

    fn weight(&self, from: Node, to: Node) -> i64 {
        self.matrix
            .cost(from, to)
            .map_or(MISSING_EDGE_PENALTY, |c| c.value() as i64)
    }
}

fn tour_cost(matrix: &CostMatrix, nodes: &[Node]) -> Cost {
    matrix.cycle_cost(nodes).unwrap_or_else(Cost::max)
}
