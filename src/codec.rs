//! Edge <-> linear index bijection.
//!
//! Each [`GraphMode`] defines a set of eligible node pairs and numbers them densely as
//! `0..population`, so a sampler can draw integers instead of scanning an `n x n` grid.
//!
//! | mode | eligible pairs | population |
//! |---|---|---|
//! | bipartite | every `(r, c)` | `n^2` |
//! | directed | `r != c` | `n^2 - n` |
//! | undirected | `r < c` (after swapping `r > c`) | `n(n-1)/2` |
//!
//! Ineligible pairs (self-loops outside bipartite mode) are dropped by [`EdgeCodec::encode`],
//! so the encoded vector can be shorter than the input.

use crate::bucket::bucketize;
use crate::graph::{EdgeIndex, GraphMode};
use crate::{Error, Result};

/// Precomputed codec for one `(num_nodes, mode)` pair.
#[derive(Debug, Clone)]
pub struct EdgeCodec {
    num_nodes: usize,
    mode: GraphMode,
    population: usize,
    /// Undirected only: `offsets[r]` = cells of rows `0..=r` at or below the diagonal.
    offsets: Vec<usize>,
    /// Undirected only: first linear index of rows `1..n-1`.
    boundaries: Vec<usize>,
}

impl EdgeCodec {
    /// `size` is `(rows, cols)` of the adjacency; only square sizes are meaningful.
    pub fn new(size: (usize, usize), mode: GraphMode) -> Result<Self> {
        let (n, m) = size;
        if n != m {
            return Err(Error::InvalidArgument(format!(
                "edge codec needs a square size, got ({n}, {m})"
            )));
        }

        let cells = n.checked_mul(n).ok_or_else(|| {
            Error::InvalidArgument(format!("{n} nodes overflow the linear edge index"))
        })?;
        // `cells >= n` once the multiplication fits.
        let population = match mode {
            GraphMode::Bipartite => cells,
            GraphMode::Directed => cells - n,
            GraphMode::Undirected => (cells - n) / 2,
        };

        let (offsets, boundaries) = if mode == GraphMode::Undirected {
            let offsets = running_sum(1..n);
            let boundaries = running_sum((1..n).rev());
            (offsets, boundaries)
        } else {
            (Vec::new(), Vec::new())
        };

        Ok(Self { num_nodes: n, mode, population, offsets, boundaries })
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn mode(&self) -> GraphMode {
        self.mode
    }

    /// Number of eligible pairs, i.e. the exclusive upper bound of every linear index.
    pub fn population(&self) -> usize {
        self.population
    }

    /// Linear index of one in-range pair, or `None` if the mode excludes it.
    pub fn encode_pair(&self, row: usize, col: usize) -> Option<usize> {
        let n = self.num_nodes;
        match self.mode {
            GraphMode::Bipartite => Some(row * n + col),
            GraphMode::Directed => {
                if row == col {
                    return None;
                }
                // Close the gap left by the diagonal.
                let col = if col > row { col - 1 } else { col };
                Some(row * (n - 1) + col)
            }
            GraphMode::Undirected => {
                if row == col {
                    return None;
                }
                let (row, col) = if row < col { (row, col) } else { (col, row) };
                Some(row * n + col - self.offsets[row])
            }
        }
    }

    /// Encode every eligible edge, in input order.
    pub fn encode(&self, edges: &EdgeIndex) -> Result<Vec<usize>> {
        edges.check_bounds(self.num_nodes)?;
        Ok(edges.pairs().filter_map(|(r, c)| self.encode_pair(r, c)).collect())
    }

    /// The canonical pair behind one linear index (`row < col` in undirected mode).
    pub fn decode_index(&self, idx: usize) -> Result<(usize, usize)> {
        self.check_index(idx)?;
        let n = self.num_nodes;
        Ok(match self.mode {
            GraphMode::Bipartite => (idx / n, idx % n),
            GraphMode::Directed => {
                let row = idx / (n - 1);
                let col = idx % (n - 1);
                (row, if row <= col { col + 1 } else { col })
            }
            GraphMode::Undirected => {
                let row = self.boundaries.partition_point(|&b| b <= idx);
                (row, (self.offsets[row] + idx) % n)
            }
        })
    }

    /// Decode a batch of linear indices.
    ///
    /// Undirected mode emits both orientations: the canonical `(row, col)` pairs for every
    /// index first, then the reversed `(col, row)` pairs, so the output has `2 * idx.len()`
    /// edges.
    pub fn decode(&self, idx: &[usize]) -> Result<EdgeIndex> {
        match self.mode {
            GraphMode::Bipartite | GraphMode::Directed => {
                let pairs = idx.iter().map(|&i| self.decode_index(i)).collect::<Result<Vec<_>>>()?;
                Ok(EdgeIndex::from_pairs(&pairs))
            }
            GraphMode::Undirected => {
                for &i in idx {
                    self.check_index(i)?;
                }
                let rows = bucketize(&self.boundaries, idx);
                let cols: Vec<usize> = rows
                    .iter()
                    .zip(idx)
                    .map(|(&r, &i)| (self.offsets[r] + i) % self.num_nodes)
                    .collect();

                let mut a = rows.clone();
                a.extend_from_slice(&cols);
                let mut b = cols;
                b.extend_from_slice(&rows);
                EdgeIndex::new(a, b)
            }
        }
    }

    fn check_index(&self, idx: usize) -> Result<()> {
        if idx >= self.population {
            return Err(Error::IndexOutOfBounds(idx));
        }
        Ok(())
    }
}

fn running_sum(xs: impl Iterator<Item = usize>) -> Vec<usize> {
    xs.scan(0usize, |acc, x| {
        *acc += x;
        Some(*acc)
    })
    .collect()
}

/// Encode `edge_index` under `mode`; returns `(linear_indices, population)`.
pub fn edge_index_to_vector(
    edge_index: &EdgeIndex,
    size: (usize, usize),
    mode: GraphMode,
) -> Result<(Vec<usize>, usize)> {
    let codec = EdgeCodec::new(size, mode)?;
    let idx = codec.encode(edge_index)?;
    Ok((idx, codec.population()))
}

/// Decode linear indices under `mode` (see [`EdgeCodec::decode`] for the undirected layout).
pub fn vector_to_edge_index(idx: &[usize], size: (usize, usize), mode: GraphMode) -> Result<EdgeIndex> {
    EdgeCodec::new(size, mode)?.decode(idx)
}
