use std::{error::Error, fs, path::Path};

use salesman::CostMatrix;

/// Reads a matrix file: the vertex count followed by `n * n` whitespace
/// separated entries in row-major order, `-1` for a missing edge.
pub fn import_matrix<P: AsRef<Path>>(filename: P) -> Result<CostMatrix, Box<dyn Error>> {
    let text = fs::read_to_string(filename.as_ref())?;
    let matrix = text.parse::<CostMatrix>()?;
    log::info!(
        "Imported matrix with {} vertices from {:?}.",
        matrix.n(),
        filename.as_ref()
    );
    Ok(matrix)
}

pub fn export_matrix<P: AsRef<Path>>(filename: P, matrix: &CostMatrix) -> Result<(), Box<dyn Error>> {
    fs::write(filename, matrix.to_string())?;
    Ok(())
}

#[cfg(test)]
mod test_import {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_import_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matrix.txt");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "3\n-1 1 2\n3 -1 4\n5 6 -1").unwrap();

        let matrix = import_matrix(&path).unwrap();
        assert_eq!(matrix.n(), 3);
        assert_eq!(matrix.raw(2.into(), 1.into()), 6);

        let copy = dir.path().join("copy.txt");
        export_matrix(&copy, &matrix).unwrap();
        assert_eq!(import_matrix(&copy).unwrap(), matrix);
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.txt");
        fs::write(&path, "2\n-1 1\n1").unwrap();
        let err = import_matrix(&path).unwrap_err();
        assert_eq!(err.to_string(), "expected 4 matrix entries but found 3");

        assert!(import_matrix(dir.path().join("missing.txt")).is_err());
    }
}
