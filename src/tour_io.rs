use std::{
    error::Error,
    fs::File,
    io::BufReader,
    io::{BufRead, BufWriter, Write},
    path::Path,
};

use salesman::{
    graph::{Node, Tour, VertexSet},
    CostMatrix,
};

/// Reads one vertex id per line and evaluates the tour on `matrix`.
pub fn import_tour(filename: &Path, matrix: &CostMatrix) -> Result<Tour, Box<dyn Error>> {
    let file = File::open(filename)?;
    let reader = BufReader::new(file);

    let mut ids: Vec<usize> = vec![];
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            ids.push(line.parse::<usize>()?);
        }
    }
    check_tour(matrix, &ids)?;
    Ok(Tour::with_cost_from(
        ids.into_iter().map(Node::new).collect(),
        matrix,
    ))
}

/// Checks that `ids` visit every vertex of `matrix` exactly once, starting at 0.
pub fn check_tour(matrix: &CostMatrix, ids: &[usize]) -> Result<(), String> {
    if ids.len() != matrix.n() {
        return Err(format!(
            "tour has {} vertices but the matrix has {}",
            ids.len(),
            matrix.n()
        ));
    }
    if let Some(&first) = ids.first() {
        if first != 0 {
            return Err(format!("tour starts at {} instead of 0", first));
        }
    }
    let mut seen = VertexSet::empty();
    for &id in ids {
        if id >= matrix.n() {
            return Err(format!("vertex {} does not exist", id));
        }
        if !seen.insert(Node::new(id)) {
            return Err(format!("vertex {} is visited twice", id));
        }
    }
    Ok(())
}

pub fn export_tour(filename: &Path, tour: &Tour) -> Result<(), Box<dyn Error>> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    for node in tour {
        writeln!(writer, "{}", node.id())?;
    }
    writer.flush()?;

    Ok(())
}
