use std::{error::Error, fmt};

use indicatif::ParallelProgressIterator;
use rayon::prelude::*;
use salesman::{
    bnb::BranchAndBound, brute_force::brute_force, graph::Tour, local_search::Relocation,
    mst::MstStrategy, CostMatrix,
};

use crate::{gen_matrices::RandomMatrixGenerator, matrix_import::export_matrix, samples};

/// Results of every solver on one instance.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub kruskal: Tour,
    pub prim: Tour,
    pub brute_force: Tour,
    pub approx: Tour,
}

impl Comparison {
    pub fn run(matrix: &CostMatrix) -> Self {
        Comparison {
            kruskal: BranchAndBound::new(matrix)
                .with_mst_strategy(MstStrategy::Kruskal)
                .solve(),
            prim: BranchAndBound::new(matrix)
                .with_mst_strategy(MstStrategy::Prim)
                .solve(),
            brute_force: brute_force(matrix),
            approx: Relocation::new(matrix).run(),
        }
    }

    /// Descriptions of every way the solvers disagree with brute force or
    /// report a cost their tour does not have.
    pub fn problems(&self, matrix: &CostMatrix) -> Vec<String> {
        let reference = self.brute_force.cost();
        let mut problems = vec![];
        for (name, tour) in &[("kruskal", &self.kruskal), ("prim", &self.prim)] {
            if tour.cost() != reference {
                problems.push(format!(
                    "{} found {} but the optimum is {}",
                    name,
                    tour.cost(),
                    reference
                ));
            }
        }
        if self.approx.cost() < reference {
            problems.push(format!(
                "approx found {} below the optimum {}",
                self.approx.cost(),
                reference
            ));
        }
        for (name, tour) in &[
            ("kruskal", &self.kruskal),
            ("prim", &self.prim),
            ("approx", &self.approx),
        ] {
            if tour.is_feasible() && matrix.cycle_cost(tour.nodes()) != Some(tour.cost()) {
                problems.push(format!("{} reports a wrong cost for {}", name, tour));
            }
        }
        problems
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "kruskal: {}, prim: {}, brute force: {}, approx: {}",
            self.kruskal.cost(),
            self.prim.cost(),
            self.brute_force.cost(),
            self.approx.cost()
        )
    }
}

/// Cross-checks both branch-and-bound variants against brute force on `num`
/// random instances. Disagreeing instances are written to
/// `mismatch_<i>.txt`.
pub fn execute_validation(
    generator: RandomMatrixGenerator,
    num: usize,
) -> Result<(), Box<dyn Error>> {
    let matrices: Vec<CostMatrix> = generator.take(num).collect();
    let pb = samples::progress_bar(matrices.len() as u64, "Validation");

    let failures: Vec<(usize, CostMatrix, Vec<String>)> = matrices
        .into_par_iter()
        .enumerate()
        .progress_with(pb)
        .filter_map(|(i, matrix)| {
            let comparison = Comparison::run(&matrix);
            log::debug!("Instance {}: {}", i, comparison);
            let problems = comparison.problems(&matrix);
            if problems.is_empty() {
                None
            } else {
                Some((i, matrix, problems))
            }
        })
        .collect();

    if failures.is_empty() {
        log::info!("All {} instances agree.", num);
        println!("Validation: ✔️");
        return Ok(());
    }

    for (i, matrix, problems) in &failures {
        for problem in problems {
            log::error!("Instance {}: {}", i, problem);
        }
        export_matrix(format!("mismatch_{}.txt", i), matrix)?;
    }
    Err(format!("{} of {} instances disagree", failures.len(), num).into())
}

#[cfg(test)]
mod test_validate {
    use super::*;
    use salesman::Cost;

    #[test]
    fn test_random_instances_agree() {
        let generator = RandomMatrixGenerator::default_costs(6, false).with_seed(5);
        for matrix in generator.take(10) {
            let comparison = Comparison::run(&matrix);
            assert!(comparison.problems(&matrix).is_empty(), "{}", comparison);
        }
    }

    #[test]
    fn test_detects_wrong_optimum() {
        let matrix: CostMatrix = "3 -1 1 2 2 -1 1 1 2 -1".parse().unwrap();
        let mut comparison = Comparison::run(&matrix);
        comparison.prim = Tour::new(comparison.prim.nodes().to_vec(), Cost::new(1));
        let problems = comparison.problems(&matrix);
        assert_eq!(problems.len(), 2);
        assert!(problems[0].starts_with("prim found 1"));
    }
}
