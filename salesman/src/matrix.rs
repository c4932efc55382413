//! The directed cost matrix every solver works on.

use std::{fmt, str::FromStr};

use ndarray::Array2;

use crate::{
    error::MatrixError,
    graph::{Node, VertexSet, MAX_VERTICES},
    Cost,
};

/// Raw encoding of an absent edge.
pub const NO_EDGE: i64 = -1;

/// Largest accepted edge cost. A tour over [`MAX_VERTICES`] such edges stays
/// far below [`Cost::max`] and every removal delta fits into an `i64`.
pub const MAX_EDGE_COST: usize = 1 << 40;

/// An immutable `n x n` matrix of directed edge costs. Absent edges (`-1` in the
/// raw input) are stored as `None`; the diagonal is never used by a tour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostMatrix {
    weights: Array2<Option<Cost>>,
}

impl CostMatrix {
    /// Builds a matrix from raw rows where `-1` marks a missing edge.
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, MatrixError>
    where
        R: AsRef<[i64]>,
    {
        let n = rows.len();
        if n > MAX_VERTICES {
            return Err(MatrixError::TooManyVertices { n });
        }
        let mut weights = Array2::from_elem((n, n), None);
        for (from, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n {
                return Err(MatrixError::NotSquare {
                    row: from,
                    len: row.len(),
                    n,
                });
            }
            for (to, &value) in row.iter().enumerate() {
                weights[[from, to]] = parse_weight(from, to, value)?;
            }
        }
        Ok(Self { weights })
    }

    /// Builds a matrix from already validated costs.
    pub fn from_costs(weights: Array2<Option<Cost>>) -> Result<Self, MatrixError> {
        let (n, m) = weights.dim();
        if n != m {
            return Err(MatrixError::NotSquare {
                row: 0,
                len: m,
                n,
            });
        }
        if n > MAX_VERTICES {
            return Err(MatrixError::TooManyVertices { n });
        }
        if let Some(((from, to), cost)) = weights
            .indexed_iter()
            .find_map(|(idx, w)| w.filter(|c| c.value() > MAX_EDGE_COST).map(|c| (idx, c)))
        {
            return Err(MatrixError::CostTooLarge {
                from,
                to,
                value: cost.value() as i64,
            });
        }
        Ok(Self { weights })
    }

    pub fn n(&self) -> usize {
        self.weights.nrows()
    }

    /// The cost of the directed edge `from -> to`, if the edge exists.
    pub fn cost(&self, from: Node, to: Node) -> Option<Cost> {
        if from == to {
            return None;
        }
        self.weights[[from.id(), to.id()]]
    }

    /// The entry as it appears in the textual encoding.
    pub fn raw(&self, from: Node, to: Node) -> i64 {
        self.weights[[from.id(), to.id()]].map_or(NO_EDGE, |c| c.value() as i64)
    }

    pub fn nodes(&self) -> impl Iterator<Item = Node> {
        (0..self.n()).map(Node::new)
    }

    pub fn vertices(&self) -> VertexSet {
        VertexSet::range(self.n())
    }

    /// Cost of the closed cycle `nodes[0] -> nodes[1] -> ... -> nodes[0]`, or
    /// `None` if one of its edges is absent. Cycles over fewer than two vertices
    /// cost nothing.
    pub fn cycle_cost(&self, nodes: &[Node]) -> Option<Cost> {
        if nodes.len() < 2 {
            return Some(Cost::new(0));
        }
        let closing = self.cost(nodes[nodes.len() - 1], nodes[0])?;
        nodes
            .windows(2)
            .map(|e| self.cost(e[0], e[1]))
            .sum::<Option<Cost>>()
            .map(|path| path + closing)
    }

    pub fn is_symmetric(&self) -> bool {
        self.weights == self.weights.t()
    }
}

fn parse_weight(from: usize, to: usize, value: i64) -> Result<Option<Cost>, MatrixError> {
    match value {
        NO_EDGE => Ok(None),
        v if v > MAX_EDGE_COST as i64 => Err(MatrixError::CostTooLarge { from, to, value }),
        v if v >= 0 => Ok(Some(Cost::new(v as usize))),
        value => Err(MatrixError::InvalidCost { from, to, value }),
    }
}

impl FromStr for CostMatrix {
    type Err = MatrixError;

    /// Parses `n` followed by `n * n` whitespace separated entries in row-major
    /// order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let n = match tokens.next() {
            Some(token) => token
                .parse::<usize>()
                .map_err(|_| MatrixError::InvalidToken {
                    token: token.to_owned(),
                })?,
            None => return Err(MatrixError::MissingSize),
        };
        if n > MAX_VERTICES {
            return Err(MatrixError::TooManyVertices { n });
        }

        let values = tokens
            .map(|token| {
                token.parse::<i64>().map_err(|_| MatrixError::InvalidToken {
                    token: token.to_owned(),
                })
            })
            .collect::<Result<Vec<i64>, MatrixError>>()?;
        if values.len() != n * n {
            return Err(MatrixError::WrongEntryCount {
                expected: n * n,
                found: values.len(),
            });
        }

        let rows: Vec<&[i64]> = if n == 0 {
            vec![]
        } else {
            values.chunks(n).collect()
        };
        CostMatrix::from_rows(&rows)
    }
}

impl fmt::Display for CostMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.n())?;
        for from in self.nodes() {
            let row: Vec<String> = self
                .nodes()
                .map(|to| self.raw(from, to).to_string())
                .collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}
