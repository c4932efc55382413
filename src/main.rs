mod gen_matrices;
mod matrix_import;
mod result_random;
mod result_validate;
mod samples;
mod tour_io;

use std::{error::Error, path::PathBuf};

use clap::{Args, Parser};
use gen_matrices::RandomMatrixGenerator;
use matrix_import::import_matrix;
use result_random::execute_random_matrices;
use result_validate::execute_validation;
use salesman::{
    bnb::BranchAndBound, graph::MAX_VERTICES, local_search::Relocation, matrix::MAX_EDGE_COST,
    mst::MstStrategy,
};
use tour_io::{export_tour, import_tour};

/// Exact and approximate travelling salesman tours on directed cost matrices.
#[derive(Parser)]
#[clap(name = "tsp")]
enum Cli {
    Solve(Solve),
    Check(Check),
    Random(Random),
    Validate(Validate),
}

#[derive(Args)]
struct Solve {
    /// Matrix file: vertex count followed by the row-major entries
    #[clap(parse(from_os_str))]
    input: PathBuf,

    /// Also run the local search
    #[clap(short, long)]
    approx: bool,

    #[clap(long, default_value = "kruskal")]
    mst: MstStrategy,

    /// Export the optimal tour
    #[clap(short, long, parse(from_os_str))]
    write_tour: Option<PathBuf>,
}

#[derive(Args)]
struct Check {
    #[clap(parse(from_os_str))]
    input: PathBuf,

    /// One vertex id per line
    #[clap(parse(from_os_str))]
    tour: PathBuf,
}

#[derive(Args, Clone, Debug)]
pub struct InstanceOptions {
    #[clap(short, long, default_value = "8")]
    num_nodes: usize,

    #[clap(long)]
    symmetric: bool,

    #[clap(long, default_value = "1")]
    min: usize,

    #[clap(long, default_value = "10")]
    max: usize,

    #[clap(long)]
    seed: Option<u64>,
}

impl InstanceOptions {
    fn generator(&self) -> Result<RandomMatrixGenerator, Box<dyn Error>> {
        if self.num_nodes > MAX_VERTICES {
            return Err(format!(
                "at most {} vertices are supported, got {}",
                MAX_VERTICES, self.num_nodes
            )
            .into());
        }
        if self.min > self.max {
            return Err(format!("empty cost range {}..={}", self.min, self.max).into());
        }
        if self.max > MAX_EDGE_COST {
            return Err(format!("costs may not exceed {}, got {}", MAX_EDGE_COST, self.max).into());
        }
        let generator = RandomMatrixGenerator::default_costs(self.num_nodes, self.symmetric)
            .with_costs(self.min.into(), self.max.into());
        Ok(match self.seed {
            Some(seed) => generator.with_seed(seed),
            None => generator,
        })
    }
}

#[derive(Args)]
struct Random {
    num: usize,

    #[clap(flatten)]
    instances: InstanceOptions,

    #[clap(long, default_value = "kruskal")]
    mst: MstStrategy,

    #[clap(short, long, default_value = "results.csv", parse(from_os_str))]
    output: PathBuf,
}

#[derive(Args)]
struct Validate {
    num: usize,

    #[clap(flatten)]
    instances: InstanceOptions,
}

fn execute_solve(solve: Solve) -> Result<(), Box<dyn Error>> {
    let matrix = import_matrix(&solve.input)?;
    println!("Imported matrix with {} vertices.", matrix.n());

    let (tour, stats) = BranchAndBound::new(&matrix)
        .with_mst_strategy(solve.mst)
        .solve_with_stats();
    if tour.is_feasible() {
        println!("Optimal tour: {}", tour);
    } else {
        println!("No tour exists.");
    }
    println!(
        "Search nodes: {} explored, {} pruned",
        stats.explored, stats.pruned
    );

    if solve.approx {
        let approx = Relocation::new(&matrix).run();
        if approx.is_feasible() {
            println!("Approximate tour: {}", approx);
        } else {
            println!("Local search found no tour.");
        }
    }

    if let Some(path) = &solve.write_tour {
        if tour.is_feasible() {
            log::info!("Exporting tour to {:?}.", path);
            export_tour(path, &tour)?;
        } else {
            log::warn!("No tour to export to {:?}.", path);
        }
    }
    Ok(())
}

fn execute_check(check: Check) -> Result<(), Box<dyn Error>> {
    let matrix = import_matrix(&check.input)?;
    let tour = import_tour(&check.tour, &matrix)?;
    if tour.is_feasible() {
        println!("Tour valid: {}", tour);
    } else {
        println!("Tour uses a missing edge.");
    }
    Ok(())
}

fn set_up_logging() -> Result<(), fern::InitError> {
    std::fs::create_dir_all("logs")?;
    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date}][{level}] {message}",
                date = chrono::Local::now().format("%H:%M:%S"),
                level = record.level(),
                message = message
            ));
        })
        .level(log::LevelFilter::Info)
        .chain(fern::log_file(format!(
            "logs/{}.log",
            chrono::Local::now().format("%d%m%Y-%H%M")
        ))?)
        .apply()?;

    log::info!("Logger set up!");

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    set_up_logging()?;
    let cli = Cli::parse();

    match cli {
        Cli::Solve(solve) => execute_solve(solve),
        Cli::Check(check) => execute_check(check),
        Cli::Random(random) => execute_random_matrices(
            random.instances.generator()?,
            random.num,
            random.mst,
            &random.output,
        ),
        Cli::Validate(validate) => execute_validation(validate.instances.generator()?, validate.num),
    }
}

#[cfg(test)]
mod test_cli {
    use super::*;

    fn options(num_nodes: usize, min: usize, max: usize) -> InstanceOptions {
        InstanceOptions {
            num_nodes,
            symmetric: false,
            min,
            max,
            seed: Some(3),
        }
    }

    #[test]
    fn test_instance_limits() {
        assert!(options(8, 1, 10).generator().is_ok());
        assert!(options(MAX_VERTICES + 1, 1, 10).generator().is_err());
        assert!(options(8, 10, 1).generator().is_err());
        assert!(options(8, 1, MAX_EDGE_COST + 1).generator().is_err());

        let mut generator = options(5, MAX_EDGE_COST, MAX_EDGE_COST).generator().unwrap();
        assert_eq!(generator.next().map(|m| m.n()), Some(5));
    }
}
