use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    path::Path,
};

use csv::WriterBuilder;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use salesman::{
    bnb::{BranchAndBound, SearchStats},
    graph::Tour,
    local_search::Relocation,
    mst::MstStrategy,
    Cost, CostMatrix,
};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct AlgResult {
    name: String,
    pub(crate) cost: Cost,
}

impl AlgResult {
    pub fn new(name: String, cost: Cost) -> Self {
        Self { name, cost }
    }
}

impl Display for AlgResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.cost)
    }
}

pub trait ResultRow {
    type RowType: Serialize;
    fn to_row(&self) -> Self::RowType;

    fn headers(&self) -> Vec<String>;
}

/// One random instance: the optimum with its search statistics and the
/// results of the heuristics run against it.
#[derive(Debug, Clone)]
pub struct Sample {
    pub n: usize,
    pub tour: Tour,
    pub stats: SearchStats,
    pub results: Vec<AlgResult>,
}

impl Sample {
    pub fn evaluate(matrix: &CostMatrix, mst: MstStrategy) -> Self {
        let (tour, stats) = BranchAndBound::new(matrix)
            .with_mst_strategy(mst)
            .solve_with_stats();
        let approx = Relocation::new(matrix).run();
        Sample {
            n: matrix.n(),
            tour,
            stats,
            results: vec![AlgResult::new("approx".into(), approx.cost())],
        }
    }

    /// Relative excess of `result` over the optimum in percent.
    pub fn gap(&self, result: &AlgResult) -> f64 {
        let opt = self.tour.cost();
        if opt.is_max() || result.cost.is_max() {
            return f64::NAN;
        }
        if opt == Cost::new(0) {
            return 0.0;
        }
        (result.cost - opt).as_float() / opt.as_float() * 100.0
    }
}

#[derive(Serialize, Clone)]
pub struct Row {
    n: usize,
    exact: Cost,
    explored: usize,
    pruned: usize,
    results: Vec<Cost>,
    gaps: Vec<f64>,
}

impl ResultRow for Sample {
    type RowType = Row;

    fn to_row(&self) -> Self::RowType {
        Row {
            n: self.n,
            exact: self.tour.cost(),
            explored: self.stats.explored,
            pruned: self.stats.pruned,
            results: self.results.iter().map(|r| r.cost).collect(),
            gaps: self.results.iter().map(|r| self.gap(r)).collect(),
        }
    }

    fn headers(&self) -> Vec<String> {
        let mut header: Vec<String> = vec!["n", "exact", "explored", "pruned"]
            .into_iter()
            .map(String::from)
            .collect();
        header.extend(self.results.iter().map(|res| res.name.clone()));
        header.extend(self.results.iter().map(|res| format!("{} gap", res.name)));
        header
    }
}

impl Display for Sample {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n: {}, exact: {}, {}",
            self.n,
            self.tour.cost(),
            self.results
                .iter()
                .map(|res| format!("{}", res))
                .collect::<Vec<String>>()
                .join(", ")
        )
    }
}

pub fn create_samples(matrices: Vec<CostMatrix>, mst: MstStrategy) -> Vec<Sample> {
    let pb = progress_bar(matrices.len() as u64, "Random instances");

    let samples: Vec<Sample> = matrices
        .into_par_iter()
        .progress_with(pb)
        .map(|matrix| Sample::evaluate(&matrix, mst))
        .collect();

    log::info!("Finished evaluating {} instances.", samples.len());
    samples
}

pub fn progress_bar(len: u64, message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar().template(
            "{msg} {spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] ({pos}/{len})",
        ),
    );
    pb.enable_steady_tick(20);
    pb.set_message(message);
    pb
}

pub fn export<I: ResultRow, P: AsRef<Path>>(
    samples: Vec<I>,
    path: P,
) -> Result<(), Box<dyn Error>> {
    log::info!("Exporting results to {:?}.", path.as_ref());
    let headers = match samples.first() {
        Some(sample) => sample.headers(),
        None => {
            log::warn!("No samples to export.");
            return Ok(());
        }
    };
    let mut wtr = WriterBuilder::new().has_headers(false).from_path(path)?;
    wtr.write_record(headers)?;
    for sample in samples {
        let row = sample.to_row();
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod test_samples {
    use super::*;

    fn benchmark() -> CostMatrix {
        "4 -1 10 15 20 10 -1 35 25 15 35 -1 30 20 25 30 -1"
            .parse()
            .unwrap()
    }

    #[test]
    fn test_evaluate_benchmark() {
        let sample = Sample::evaluate(&benchmark(), MstStrategy::Kruskal);
        assert_eq!(sample.n, 4);
        assert_eq!(sample.tour.cost(), 80.into());
        assert_eq!(sample.results[0].cost, 80.into());
        assert_eq!(sample.gap(&sample.results[0]), 0.0);
        assert!(sample.stats.explored > 0);
    }

    #[test]
    fn test_gap() {
        let sample = Sample {
            n: 4,
            tour: Tour::from((vec![0, 1, 2, 3], Cost::new(80))),
            stats: SearchStats::default(),
            results: vec![],
        };
        let worse = AlgResult::new("approx".into(), 100.into());
        assert!((sample.gap(&worse) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_export() {
        let samples = create_samples(vec![benchmark(), benchmark()], MstStrategy::Prim);
        assert_eq!(
            samples[0].headers(),
            vec!["n", "exact", "explored", "pruned", "approx", "approx gap"]
        );

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        export(samples, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "n,exact,explored,pruned,approx,approx gap");
        assert!(lines[1].starts_with("4,80,"));
        assert!(lines[1].ends_with(",80,0.0"));
    }
}
