//! Coordinate-format sparse matrices.
//!
//! Entries are kept in insertion order and duplicates are allowed (a dense view sums them).
//! The Laplacian operators only need two things from this type: building it from an edge
//! list and inserting a diagonal.

use crate::graph::EdgeIndex;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct CooMatrix {
    indices: EdgeIndex,
    values: Vec<f32>,
    shape: (usize, usize),
}

impl CooMatrix {
    pub fn new(indices: EdgeIndex, values: Vec<f32>, shape: (usize, usize)) -> Result<Self> {
        if indices.len() != values.len() {
            return Err(Error::InvalidArgument(format!(
                "sparse matrix has {} indices but {} values",
                indices.len(),
                values.len()
            )));
        }
        if let Some(r) = indices.rows().iter().find(|&&r| r >= shape.0) {
            return Err(Error::IndexOutOfBounds(*r));
        }
        if let Some(c) = indices.cols().iter().find(|&&c| c >= shape.1) {
            return Err(Error::IndexOutOfBounds(*c));
        }
        Ok(Self { indices, values, shape })
    }

    pub fn indices(&self) -> &EdgeIndex {
        &self.indices
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    pub fn into_parts(self) -> (EdgeIndex, Vec<f32>) {
        (self.indices, self.values)
    }

    /// Insert `fill_values[n]` on the diagonal for every node `n < num_nodes`.
    ///
    /// A node that already has a `(n, n)` entry gets the fill added to its first such entry;
    /// every other node gets a new entry appended, in node order.
    pub fn add_self_loop(self, num_nodes: usize, fill_values: &[f32]) -> Result<Self> {
        if fill_values.len() != num_nodes {
            return Err(Error::InvalidArgument(format!(
                "expected {num_nodes} self-loop fill values, got {}",
                fill_values.len()
            )));
        }
        if num_nodes > self.shape.0.min(self.shape.1) {
            return Err(Error::IndexOutOfBounds(num_nodes - 1));
        }

        let Self { indices, mut values, shape } = self;
        let mut existing: Vec<Option<usize>> = vec![None; num_nodes];
        for (e, (r, c)) in indices.pairs().enumerate() {
            if r == c && r < num_nodes && existing[r].is_none() {
                existing[r] = Some(e);
            }
        }

        let (mut rows, mut cols) = (indices.rows().to_vec(), indices.cols().to_vec());
        for (node, (&fill, slot)) in fill_values.iter().zip(&existing).enumerate() {
            match *slot {
                Some(e) => values[e] += fill,
                None => {
                    rows.push(node);
                    cols.push(node);
                    values.push(fill);
                }
            }
        }

        Ok(Self { indices: EdgeIndex::new(rows, cols)?, values, shape })
    }

    /// Dense row-major view, summing duplicate entries.
    pub fn to_dense(&self) -> Vec<Vec<f32>> {
        let mut dense = vec![vec![0.0f32; self.shape.1]; self.shape.0];
        for ((r, c), &v) in self.indices.pairs().zip(&self.values) {
            dense[r][c] += v;
        }
        dense
    }
}
