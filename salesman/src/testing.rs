use ndarray::Array2;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{matrix::CostMatrix, Cost};

/// Random complete matrix with costs in `1..=100`; only the diagonal is absent.
pub fn random_matrix(n: usize, symmetric: bool, seed: u64) -> CostMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut weights = Array2::from_elem((n, n), None);
    for i in 0..n {
        for j in 0..n {
            if i == j || (symmetric && j < i) {
                continue;
            }
            let cost: Cost = rng.gen_range(Cost::new(1)..=Cost::new(100));
            weights[[i, j]] = Some(cost);
            if symmetric {
                weights[[j, i]] = Some(cost);
            }
        }
    }
    CostMatrix::from_costs(weights).unwrap()
}

pub fn benchmark_matrix() -> CostMatrix {
    CostMatrix::from_rows(&[
        [-1, 10, 15, 20],
        [10, -1, 35, 25],
        [15, 35, -1, 30],
        [20, 25, 30, -1],
    ])
    .unwrap()
}
