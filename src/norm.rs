//! Rescaled Laplacian for Chebyshev spectral filters.
//!
//! Chebyshev polynomials live on `[-1, 1]`, while a normalized Laplacian has spectrum in
//! `[0, lambda_max]`. [`norm`] returns `2 L / lambda_max - I`.

use crate::graph::EdgeIndex;
use crate::laplacian::{finite_or_zero, get_laplacian, Normalization};
use crate::sparse::CooMatrix;
use crate::{Error, Result};
use ordered_float::NotNan;

/// Spectral bound of the Laplacian.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LambdaMax {
    /// One bound for the whole graph.
    Scalar(f32),
    /// One bound per graph of a batch, looked up through the source node's batch id.
    PerGraph(Vec<f32>),
}

/// Build the Laplacian with `normalization` and rescale it to `2 L / lambda_max - I`.
///
/// - `lambda_max = None` uses `2 * max(edge_weight)` of the Laplacian. NaN Laplacian
///   weights are skipped when taking that max; an all-NaN (or empty) Laplacian gives 0.
/// - `LambdaMax::PerGraph` with more than one entry needs `batch`, one graph id per node.
/// - Non-finite rescaled weights (e.g. `lambda_max == 0`) become 0.
pub fn norm(
    edge_index: &EdgeIndex,
    num_nodes: usize,
    edge_weight: Option<&[f32]>,
    normalization: Normalization,
    lambda_max: Option<&LambdaMax>,
    batch: Option<&[usize]>,
) -> Result<(EdgeIndex, Vec<f32>)> {
    let (edge_index, edge_weight) = get_laplacian(edge_index, edge_weight, normalization, num_nodes)?;

    let lambda: Vec<f32> = match lambda_max {
        None => {
            let max = edge_weight
                .iter()
                .filter_map(|&w| NotNan::new(w).ok())
                .max()
                .map_or(0.0, NotNan::into_inner);
            log::debug!("norm: lambda_max defaulted to {}", 2.0 * max);
            vec![2.0 * max; edge_weight.len()]
        }
        Some(LambdaMax::Scalar(l)) => vec![*l; edge_weight.len()],
        Some(LambdaMax::PerGraph(per_graph)) if per_graph.len() == 1 => {
            vec![per_graph[0]; edge_weight.len()]
        }
        Some(LambdaMax::PerGraph(per_graph)) => {
            let batch = batch.ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "{} lambda_max entries given without a batch vector",
                    per_graph.len()
                ))
            })?;
            per_edge_lambda(&edge_index, per_graph, batch, num_nodes)?
        }
    };

    let rescaled: Vec<f32> =
        edge_weight.iter().zip(&lambda).map(|(&w, &l)| finite_or_zero(2.0 * w / l)).collect();

    let shifted = CooMatrix::new(edge_index, rescaled, (num_nodes, num_nodes))?
        .add_self_loop(num_nodes, &vec![-1.0; num_nodes])?;
    Ok(shifted.into_parts())
}

fn per_edge_lambda(
    edge_index: &EdgeIndex,
    per_graph: &[f32],
    batch: &[usize],
    num_nodes: usize,
) -> Result<Vec<f32>> {
    if batch.len() != num_nodes {
        return Err(Error::InvalidArgument(format!(
            "batch has {} entries for {num_nodes} nodes",
            batch.len()
        )));
    }
    edge_index
        .rows()
        .iter()
        .map(|&r| {
            let graph = batch[r];
            per_graph.get(graph).copied().ok_or(Error::IndexOutOfBounds(graph))
        })
        .collect()
}
