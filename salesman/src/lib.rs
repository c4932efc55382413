pub mod bnb;
pub mod bounds;
pub mod brute_force;
pub mod cost;
pub mod dsu;
pub mod error;
pub mod graph;
pub mod local_search;
pub mod matrix;
pub mod mst;
#[cfg(test)]
mod testing;

pub use cost::Cost;
pub use error::MatrixError;
pub use matrix::CostMatrix;

use bnb::BranchAndBound;
use graph::Tour;
use local_search::Relocation;

/// Optimal tour starting and ending at vertex `0`. A tour with cost
/// [`Cost::max`] and no vertices means there is none.
pub fn solve_exact(matrix: &CostMatrix) -> Tour {
    BranchAndBound::new(matrix).solve()
}

/// A good but not necessarily optimal tour, found by local search.
pub fn solve_approx(matrix: &CostMatrix) -> Tour {
    Relocation::new(matrix).run()
}
