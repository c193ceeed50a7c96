//! Dense cost matrix.

use crate::error::{MatrixDefect, RoutingError, RoutingResult};

/// A validated n×n cost matrix stored in row-major order.
///
/// Entries are non-negative integers. Diagonal entries are kept as given:
/// a non-zero diagonal is a real self-loop cost.
///
/// # Examples
///
/// ```
/// use md_routing::distance::CostMatrix;
///
/// let cm = CostMatrix::from_rows(vec![
///     vec![0, 5, 8],
///     vec![5, 0, 4],
///     vec![8, 4, 0],
/// ]).unwrap();
/// assert_eq!(cm.get(0, 1), 5);
/// assert_eq!(cm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct CostMatrix {
    data: Vec<i64>,
    size: usize,
}

impl CostMatrix {
    /// Builds a matrix from explicit rows.
    ///
    /// Fails with [`RoutingError::InvalidMatrix`] if there are no rows, a row
    /// length differs from the number of rows, or any entry is negative.
    pub fn from_rows(rows: Vec<Vec<i64>>) -> RoutingResult<Self> {
        let size = rows.len();
        let invalid = |defect| RoutingError::InvalidMatrix { rows: size, defect };

        if size == 0 {
            return Err(invalid(MatrixDefect::Empty));
        }

        let mut data = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(invalid(MatrixDefect::NotSquare {
                    row,
                    len: values.len(),
                }));
            }
            if let Some((col, &value)) = values.iter().enumerate().find(|(_, v)| **v < 0) {
                return Err(invalid(MatrixDefect::NegativeEntry { row, col, value }));
            }
            data.extend(values);
        }

        Ok(Self { data, size })
    }

    /// Builds a matrix from a flat row-major buffer of `size * size` entries.
    pub fn from_data(size: usize, data: Vec<i64>) -> RoutingResult<Self> {
        if size == 0 {
            return Err(RoutingError::InvalidMatrix {
                rows: 0,
                defect: MatrixDefect::Empty,
            });
        }
        if data.len() != size * size {
            return Err(RoutingError::InvalidMatrix {
                rows: size,
                defect: MatrixDefect::NotSquare {
                    row: data.len() / size,
                    len: data.len() % size,
                },
            });
        }
        if let Some((idx, &value)) = data.iter().enumerate().find(|(_, v)| **v < 0) {
            return Err(RoutingError::InvalidMatrix {
                rows: size,
                defect: MatrixDefect::NegativeEntry {
                    row: idx / size,
                    col: idx % size,
                    value,
                },
            });
        }
        Ok(Self { data, size })
    }

    /// Returns the cost from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> i64 {
        self.data[from * self.size + to]
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric.
    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| ((i + 1)..self.size).all(|j| self.get(i, j) == self.get(j, i)))
    }

    /// Sums the costs of consecutive arcs along a location path.
    ///
    /// Paths with fewer than two locations cost nothing. The sum saturates
    /// at `i64::MAX`.
    pub fn path_cost(&self, path: &[usize]) -> i64 {
        path.windows(2)
            .fold(0i64, |acc, w| acc.saturating_add(self.get(w[0], w[1])))
    }
}
