use std::{error::Error, path::Path};

use salesman::mst::MstStrategy;

use crate::{
    gen_matrices::RandomMatrixGenerator,
    samples::{self, Sample},
};

/// Solves `num` random instances exactly and approximately and writes one
/// CSV row per instance to `output`.
pub fn execute_random_matrices(
    generator: RandomMatrixGenerator,
    num: usize,
    mst: MstStrategy,
    output: &Path,
) -> Result<(), Box<dyn Error>> {
    let matrices = generator.take(num).collect();
    let samples: Vec<Sample> = samples::create_samples(matrices, mst);

    let gaps: Vec<f64> = samples
        .iter()
        .flat_map(|s| s.results.iter().map(move |r| s.gap(r)))
        .filter(|g| g.is_finite())
        .collect();
    if !gaps.is_empty() {
        let mean = gaps.iter().sum::<f64>() / gaps.len() as f64;
        let worst = gaps.iter().cloned().fold(0.0, f64::max);
        log::info!("Approximation gap: mean {:.2}%, worst {:.2}%", mean, worst);
        println!(
            "Random instances: ✔️ (mean gap {:.2}%, worst {:.2}%)",
            mean, worst
        );
    }
    for sample in &samples {
        log::debug!("{}", sample);
    }

    samples::export(samples, output)
}
