use ndarray::Array2;
use rand::{rngs::StdRng, Rng, SeedableRng};
use salesman::{Cost, CostMatrix};

pub struct CostConfig {
    min: Cost,
    max: Cost,
}

/// Endless stream of complete random cost matrices with `n` vertices.
pub struct RandomMatrixGenerator {
    n: usize,
    symmetric: bool,
    cost_config: CostConfig,
    rng: StdRng,
}

impl RandomMatrixGenerator {
    pub fn default_costs(n: usize, symmetric: bool) -> Self {
        RandomMatrixGenerator {
            n,
            symmetric,
            cost_config: CostConfig {
                min: 1.into(),
                max: 10.into(),
            },
            rng: StdRng::from_entropy(),
        }
    }

    /// Costs are drawn uniformly from `min..=max`.
    pub fn with_costs(mut self, min: Cost, max: Cost) -> Self {
        debug_assert!(min <= max);
        self.cost_config = CostConfig { min, max };
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    fn random_cost(&mut self) -> Cost {
        self.rng
            .gen_range(self.cost_config.min..=self.cost_config.max)
    }
}

impl Iterator for RandomMatrixGenerator {
    type Item = CostMatrix;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.n;
        let mut weights: Array2<Option<Cost>> = Array2::from_elem((n, n), None);
        for i in 0..n {
            for j in 0..n {
                if i == j || (self.symmetric && j < i) {
                    continue;
                }
                let cost = self.random_cost();
                weights[[i, j]] = Some(cost);
                if self.symmetric {
                    weights[[j, i]] = Some(cost);
                }
            }
        }

        match CostMatrix::from_costs(weights) {
            Ok(matrix) => Some(matrix),
            Err(err) => {
                log::error!("Could not generate matrix: {}", err);
                None
            }
        }
    }
}
