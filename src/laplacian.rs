//! Graph Laplacians in coordinate format.
//!
//! With `A` the weighted adjacency and `D` the diagonal of out-degrees (row sums of `A`):
//! - [`Normalization::None`]: `L = D - A`
//! - [`Normalization::Symmetric`]: `L = I - D^{-1/2} A D^{-1/2}`
//! - [`Normalization::RandomWalk`]: `L = I - D^{-1} A`
//!
//! Isolated nodes have zero degree; their inverse degree is taken as 0 rather than
//! propagating `inf`/`NaN`.
//!
//! Output layout: the input edges in input order (negated and scaled), followed by one
//! diagonal entry per node in node order. An input self-loop absorbs its node's diagonal
//! entry instead of producing a second one.

use crate::graph::{EdgeIndex, Graph};
use crate::sparse::CooMatrix;
use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Normalization {
    None,
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "sym"))]
    Symmetric,
    #[cfg_attr(feature = "serde", serde(alias = "rw"))]
    RandomWalk,
}

impl Normalization {
    /// Parse an optional normalization name; `None` means no normalization.
    pub fn parse(name: Option<&str>) -> Result<Self> {
        name.map_or(Ok(Self::None), |s| s.parse())
    }
}

impl FromStr for Normalization {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(Self::None),
            "sym" | "symmetric" => Ok(Self::Symmetric),
            "rw" | "random-walk" => Ok(Self::RandomWalk),
            other => Err(Error::InvalidArgument(format!(
                "invalid normalization {other:?}, expected none, sym or rw"
            ))),
        }
    }
}

impl fmt::Display for Normalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Symmetric => "sym",
            Self::RandomWalk => "rw",
        })
    }
}

/// Build the Laplacian of a `num_nodes`-node graph.
///
/// Missing `edge_weight` means unit weights. Returns `(edge_index, edge_weight)` with the
/// layout described in the module docs.
pub fn get_laplacian(
    edge_index: &EdgeIndex,
    edge_weight: Option<&[f32]>,
    normalization: Normalization,
    num_nodes: usize,
) -> Result<(EdgeIndex, Vec<f32>)> {
    edge_index.check_bounds(num_nodes)?;
    let edge_weight = resolve_weights(edge_index, edge_weight)?;
    let deg = degree(edge_index, &edge_weight, num_nodes);
    let shape = (num_nodes, num_nodes);

    log::trace!(
        "laplacian: {} edges, {num_nodes} nodes, normalization={normalization}",
        edge_index.len()
    );

    let laplacian = match normalization {
        Normalization::None => {
            let negated = edge_weight.iter().map(|w| -w).collect();
            CooMatrix::new(edge_index.clone(), negated, shape)?.add_self_loop(num_nodes, &deg)?
        }
        Normalization::Symmetric => {
            let deg_inv_sqrt: Vec<f32> = deg.iter().map(|&d| finite_or_zero(d.powf(-0.5))).collect();
            let scaled = scale_edges(edge_index, &edge_weight, |r, c, w| {
                -(deg_inv_sqrt[r] * w * deg_inv_sqrt[c])
            });
            CooMatrix::new(edge_index.clone(), scaled, shape)?
                .add_self_loop(num_nodes, &vec![1.0; num_nodes])?
        }
        Normalization::RandomWalk => {
            let deg_inv: Vec<f32> = deg.iter().map(|&d| finite_or_zero(1.0 / d)).collect();
            let scaled = scale_edges(edge_index, &edge_weight, |r, _, w| -(deg_inv[r] * w));
            CooMatrix::new(edge_index.clone(), scaled, shape)?
                .add_self_loop(num_nodes, &vec![1.0; num_nodes])?
        }
    };

    Ok(laplacian.into_parts())
}

/// [`get_laplacian`] of any [`Graph`], using its own node count and edge weights.
pub fn laplacian_of<G: Graph + ?Sized>(
    graph: &G,
    normalization: Normalization,
) -> Result<(EdgeIndex, Vec<f32>)> {
    let (edges, weights) = EdgeIndex::from_graph(graph);
    get_laplacian(&edges, Some(&weights), normalization, graph.node_count())
}

/// Weighted out-degree: `deg[n] = sum of w[e] over edges with rows[e] == n`.
pub fn degree(edge_index: &EdgeIndex, edge_weight: &[f32], num_nodes: usize) -> Vec<f32> {
    let mut deg = vec![0.0f32; num_nodes];
    for (&r, &w) in edge_index.rows().iter().zip(edge_weight) {
        deg[r] += w;
    }
    deg
}

pub(crate) fn resolve_weights(edge_index: &EdgeIndex, edge_weight: Option<&[f32]>) -> Result<Vec<f32>> {
    match edge_weight {
        None => Ok(vec![1.0; edge_index.len()]),
        Some(w) if w.len() == edge_index.len() => Ok(w.to_vec()),
        Some(w) => Err(Error::InvalidArgument(format!(
            "edge_weight has {} entries for {} edges",
            w.len(),
            edge_index.len()
        ))),
    }
}

pub(crate) fn finite_or_zero(x: f32) -> f32 {
    if x.is_finite() {
        x
    } else {
        0.0
    }
}

fn scale_edges<F>(edge_index: &EdgeIndex, edge_weight: &[f32], f: F) -> Vec<f32>
where
    F: Fn(usize, usize, f32) -> f32 + Sync,
{
    #[cfg(feature = "parallel")]
    {
        edge_index
            .rows()
            .par_iter()
            .zip(edge_index.cols())
            .zip(edge_weight)
            .map(|((&r, &c), &w)| f(r, c, w))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        edge_index.pairs().zip(edge_weight).map(|((r, c), &w)| f(r, c, w)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: &[f32], b: &[f32]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-5)
    }

    #[test]
    fn parse_accepts_short_and_long_names() {
        assert_eq!(Normalization::parse(None).unwrap(), Normalization::None);
        assert_eq!(Normalization::parse(Some("sym")).unwrap(), Normalization::Symmetric);
        assert_eq!(Normalization::parse(Some("random-walk")).unwrap(), Normalization::RandomWalk);
        assert!(matches!(Normalization::parse(Some("bad")), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn random_walk_scales_by_source_degree() {
        // 0 -> 1 (1.0), 0 -> 2 (3.0), 1 -> 2 (2.0); node 2 has no out-edges.
        let e = EdgeIndex::from_pairs(&[(0, 1), (0, 2), (1, 2)]);
        let (idx, w) = get_laplacian(&e, Some(&[1.0, 3.0, 2.0]), Normalization::RandomWalk, 3).unwrap();
        assert_eq!(idx.len(), 6);
        assert!(approx(&w, &[-0.25, -0.75, -1.0, 1.0, 1.0, 1.0]));
    }

    #[test]
    fn input_self_loop_absorbs_the_degree_entry() {
        let e = EdgeIndex::from_pairs(&[(0, 0), (0, 1), (1, 0)]);
        let (idx, w) = get_laplacian(&e, None, Normalization::None, 2).unwrap();
        assert_eq!(idx.into_pairs(), vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
        // deg = [2, 1]; diagonal of node 0 is deg - a_00 = 2 - 1.
        assert!(approx(&w, &[1.0, -1.0, -1.0, 1.0]));
    }

    #[test]
    fn adjacency_matrix_feeds_the_laplacian_directly() {
        use crate::graph::AdjacencyMatrix;

        // Path 0 - 1 - 2 with weights 2 and 1, plus an isolated node 3.
        let adj = vec![
            vec![0.0, 2.0, 0.0, 0.0],
            vec![2.0, 0.0, 1.0, 0.0],
            vec![0.0, 1.0, 0.0, 0.0],
            vec![0.0; 4],
        ];
        let (idx, w) = laplacian_of(&AdjacencyMatrix(&adj), Normalization::None).unwrap();
        assert_eq!(
            idx.into_pairs(),
            vec![(0, 1), (1, 0), (1, 2), (2, 1), (0, 0), (1, 1), (2, 2), (3, 3)]
        );
        assert!(approx(&w, &[-2.0, -2.0, -1.0, -1.0, 2.0, 3.0, 1.0, 0.0]));

        let e = EdgeIndex::from_pairs(&[(0, 1), (1, 0), (1, 2), (2, 1)]);
        let by_hand = get_laplacian(&e, Some(&[2.0, 2.0, 1.0, 1.0]), Normalization::Symmetric, 4);
        let adapted = laplacian_of(&AdjacencyMatrix(&adj), Normalization::Symmetric);
        assert_eq!(adapted.unwrap(), by_hand.unwrap());
    }

    #[test]
    fn mismatched_weights_are_rejected() {
        let e = EdgeIndex::from_pairs(&[(0, 1)]);
        assert!(matches!(
            get_laplacian(&e, Some(&[1.0, 2.0]), Normalization::None, 2),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            get_laplacian(&e, None, Normalization::None, 1),
            Err(Error::IndexOutOfBounds(1))
        ));
    }
}
