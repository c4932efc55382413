use thiserror::Error;

/// Reasons a cost matrix cannot be built from its input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    #[error("matrix text is empty, expected the number of vertices first")]
    MissingSize,
    #[error("could not parse `{token}` as an integer")]
    InvalidToken { token: String },
    #[error("expected {expected} matrix entries but found {found}")]
    WrongEntryCount { expected: usize, found: usize },
    #[error("row {row} has {len} entries but the matrix has {n} rows")]
    NotSquare { row: usize, len: usize, n: usize },
    #[error("entry ({from}, {to}) is {value}; costs must be non-negative or -1")]
    InvalidCost { from: usize, to: usize, value: i64 },
    #[error("entry ({from}, {to}) is {value}; costs may not exceed 2^40")]
    CostTooLarge { from: usize, to: usize, value: i64 },
    #[error("{n} vertices exceed the supported maximum of 64")]
    TooManyVertices { n: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown MST strategy `{0}`, expected `kruskal` or `prim`")]
pub struct UnknownStrategy(pub String);
