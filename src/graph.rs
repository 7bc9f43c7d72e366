//! Edge-list types and minimal graph adapter traits.

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A graph seen as numbered nodes `0..node_count()` with weighted out-edges.
///
/// This is the hook for feeding an existing graph type to [`EdgeIndex::from_graph`] or
/// straight into [`laplacian_of`](crate::laplacian::laplacian_of).
pub trait Graph {
    fn node_count(&self) -> usize;

    /// `(target, weight)` for every edge leaving `node`.
    fn out_edges(&self, node: usize) -> Vec<(usize, f32)>;
}

/// Dense adjacency rows; every non-zero entry `a[r][c]` is an edge `r -> c` of that weight.
pub struct AdjacencyMatrix<'a>(pub &'a [Vec<f32>]);

impl Graph for AdjacencyMatrix<'_> {
    fn node_count(&self) -> usize {
        self.0.len()
    }

    fn out_edges(&self, node: usize) -> Vec<(usize, f32)> {
        self.0[node]
            .iter()
            .enumerate()
            .filter(|&(_, &w)| w != 0.0)
            .map(|(c, &w)| (c, w))
            .collect()
    }
}

/// Edge payloads that can stand in for a Laplacian weight.
#[cfg(feature = "petgraph")]
pub trait EdgeWeight {
    fn weight(&self) -> f32;
}

#[cfg(feature = "petgraph")]
impl EdgeWeight for () {
    fn weight(&self) -> f32 {
        1.0
    }
}

#[cfg(feature = "petgraph")]
impl EdgeWeight for f32 {
    fn weight(&self) -> f32 {
        *self
    }
}

#[cfg(feature = "petgraph")]
impl EdgeWeight for f64 {
    fn weight(&self) -> f32 {
        *self as f32
    }
}

/// Undirected petgraph graphs report each edge from both endpoints.
#[cfg(feature = "petgraph")]
impl<N, E, Ty, Ix> Graph for petgraph::Graph<N, E, Ty, Ix>
where
    E: EdgeWeight,
    Ty: petgraph::EdgeType,
    Ix: petgraph::graph::IndexType,
{
    fn node_count(&self) -> usize {
        self.node_count()
    }

    fn out_edges(&self, node: usize) -> Vec<(usize, f32)> {
        use petgraph::visit::EdgeRef;

        self.edges(petgraph::graph::NodeIndex::new(node))
            .map(|e| {
                let (s, t) = (e.source().index(), e.target().index());
                (if s == node { t } else { s }, e.weight().weight())
            })
            .collect()
    }
}

/// How node pairs are counted when mapping edges to a linear index.
///
/// - `Directed`: `(r, c)` and `(c, r)` are distinct; self-loops are not eligible.
/// - `Undirected`: `(r, c)` and `(c, r)` are one edge; self-loops are not eligible.
/// - `Bipartite`: every cell of the `n x n` grid is eligible, diagonal included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GraphMode {
    Directed,
    #[default]
    Undirected,
    Bipartite,
}

impl FromStr for GraphMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "directed" => Ok(Self::Directed),
            "undirected" => Ok(Self::Undirected),
            "bipartite" => Ok(Self::Bipartite),
            other => Err(Error::InvalidArgument(format!(
                "unknown graph mode {other:?}, expected directed, undirected or bipartite"
            ))),
        }
    }
}

impl fmt::Display for GraphMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Directed => "directed",
            Self::Undirected => "undirected",
            Self::Bipartite => "bipartite",
        })
    }
}

/// Orientation of an edge collection.
///
/// `Pairs` is a sequence of `(row, col)` pairs (`"more"` in the string form, one entry per
/// edge); `Rows` is a `(rows, cols)` tuple of two equal-length sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeFormat {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "more", alias = "pairs"))]
    Pairs,
    #[cfg_attr(feature = "serde", serde(rename = "rows"))]
    Rows,
}

impl FromStr for EdgeFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "more" | "pairs" => Ok(Self::Pairs),
            "rows" => Ok(Self::Rows),
            other => Err(Error::InvalidArgument(format!(
                "unknown edge format {other:?}, expected more, pairs or rows"
            ))),
        }
    }
}

impl fmt::Display for EdgeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pairs => "more",
            Self::Rows => "rows",
        })
    }
}

/// Coordinate edge list: `rows[e] -> cols[e]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EdgeIndex {
    rows: Vec<usize>,
    cols: Vec<usize>,
}

impl EdgeIndex {
    pub fn new(rows: Vec<usize>, cols: Vec<usize>) -> Result<Self> {
        if rows.len() != cols.len() {
            return Err(Error::InvalidArgument(format!(
                "edge index rows and cols differ in length: {} vs {}",
                rows.len(),
                cols.len()
            )));
        }
        Ok(Self { rows, cols })
    }

    pub fn from_pairs(pairs: &[(usize, usize)]) -> Self {
        let (rows, cols) = pairs.iter().copied().unzip();
        Self { rows, cols }
    }

    /// Every edge of `graph` in node order, with the weight of each edge alongside.
    pub fn from_graph<G: Graph + ?Sized>(graph: &G) -> (Self, Vec<f32>) {
        let mut rows = Vec::new();
        let mut cols = Vec::new();
        let mut weights = Vec::new();
        for u in 0..graph.node_count() {
            for (v, w) in graph.out_edges(u) {
                rows.push(u);
                cols.push(v);
                weights.push(w);
            }
        }
        (Self { rows, cols }, weights)
    }

    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn cols(&self) -> &[usize] {
        &self.cols
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().copied().zip(self.cols.iter().copied())
    }

    pub fn into_pairs(self) -> Vec<(usize, usize)> {
        self.rows.into_iter().zip(self.cols).collect()
    }

    pub fn truncate(&mut self, len: usize) {
        self.rows.truncate(len);
        self.cols.truncate(len);
    }

    /// Fails on the first node id `>= num_nodes`.
    pub fn check_bounds(&self, num_nodes: usize) -> Result<()> {
        match self.rows.iter().chain(&self.cols).find(|&&v| v >= num_nodes) {
            Some(&v) => Err(Error::IndexOutOfBounds(v)),
            None => Ok(()),
        }
    }
}

/// An edge collection in either orientation; operators answer in the orientation they
/// were given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeList {
    Pairs(Vec<(usize, usize)>),
    Rows(EdgeIndex),
}

impl EdgeList {
    pub fn format(&self) -> EdgeFormat {
        match self {
            Self::Pairs(_) => EdgeFormat::Pairs,
            Self::Rows(_) => EdgeFormat::Rows,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Pairs(p) => p.len(),
            Self::Rows(e) => e.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_edge_index(&self) -> EdgeIndex {
        match self {
            Self::Pairs(p) => EdgeIndex::from_pairs(p),
            Self::Rows(e) => e.clone(),
        }
    }

    pub fn from_edge_index(edges: EdgeIndex, format: EdgeFormat) -> Self {
        match format {
            EdgeFormat::Pairs => Self::Pairs(edges.into_pairs()),
            EdgeFormat::Rows => Self::Rows(edges),
        }
    }

    /// Build from nested sequences, interpreting them per `format`.
    ///
    /// `Pairs` expects `[[r, c], ...]`; `Rows` expects `[[r...], [c...]]`.
    pub fn from_nested(nested: Vec<Vec<usize>>, format: EdgeFormat) -> Result<Self> {
        match format {
            EdgeFormat::Pairs => nested
                .into_iter()
                .map(|pair| match pair.as_slice() {
                    &[r, c] => Ok((r, c)),
                    other => Err(Error::InvalidArgument(format!(
                        "edge pair must have exactly 2 entries, got {}",
                        other.len()
                    ))),
                })
                .collect::<Result<Vec<_>>>()
                .map(Self::Pairs),
            EdgeFormat::Rows => {
                let [rows, cols]: [Vec<usize>; 2] = nested.try_into().map_err(|v: Vec<_>| {
                    Error::InvalidArgument(format!(
                        "row-oriented edges need exactly 2 sequences, got {}",
                        v.len()
                    ))
                })?;
                EdgeIndex::new(rows, cols).map(Self::Rows)
            }
        }
    }
}
