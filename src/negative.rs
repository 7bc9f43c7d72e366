//! Negative (non-edge) sampling by rejection over the linear edge index.
//!
//! Candidates are drawn uniformly without replacement from `0..population` and rejected if
//! they hit a positive edge or an already-accepted negative. The draw size is oversampled
//! from the graph density so one round usually suffices. The loop runs at most
//! [`MAX_ROUNDS`] times and then fails, so an impossible request can't spin forever.

use crate::codec::EdgeCodec;
use crate::graph::{EdgeList, GraphMode};
use crate::{Error, Result};
use rand::prelude::*;
use rand::seq::index;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

pub const MAX_ROUNDS: usize = 3;

/// Oversampling on top of the density estimate.
const OVERSAMPLE: f64 = 1.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NegativeSampleConfig {
    pub mode: GraphMode,
    pub seed: u64,
}

impl Default for NegativeSampleConfig {
    fn default() -> Self {
        Self { mode: GraphMode::Undirected, seed: 42 }
    }
}

/// Sample `num_neg_samples` distinct non-edges of a `node`-node graph.
///
/// `num_neg_samples = None` asks for as many negatives as there are positives. The result
/// has the same orientation as `positive`.
pub fn negative_sample(
    positive: &EdgeList,
    node: usize,
    num_neg_samples: Option<usize>,
    config: NegativeSampleConfig,
) -> Result<EdgeList> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    negative_sample_with_rng(&mut rng, positive, node, num_neg_samples, config.mode)
}

/// [`negative_sample`] with a caller-owned RNG.
///
/// In undirected mode each accepted index stands for both `(a, b)` and `(b, a)`, so only
/// `ceil(num_neg_samples / 2)` indices are drawn. The canonical orientations come first in
/// the output, followed by the reversed ones, truncated to exactly `num_neg_samples`.
pub fn negative_sample_with_rng<R: Rng + ?Sized>(
    rng: &mut R,
    positive: &EdgeList,
    node: usize,
    num_neg_samples: Option<usize>,
    mode: GraphMode,
) -> Result<EdgeList> {
    let edges = positive.to_edge_index();
    let num_neg = num_neg_samples.unwrap_or(edges.len());

    let codec = EdgeCodec::new((node, node), mode)?;
    let occupied: HashSet<usize> = codec.encode(&edges)?.into_iter().collect();
    let population = codec.population();

    let target = match mode {
        GraphMode::Undirected => num_neg.div_ceil(2),
        GraphMode::Directed | GraphMode::Bipartite => num_neg,
    };
    let available = population - occupied.len();
    if target > available {
        return Err(Error::UnsatisfiableSample { requested: target, found: available });
    }

    let accepted = draw_negatives(rng, population, &occupied, target)?;

    let mut negatives = codec.decode(&accepted)?;
    negatives.truncate(num_neg);
    Ok(EdgeList::from_edge_index(negatives, positive.format()))
}

/// Rejection loop over linear indices. Returns exactly `target` distinct indices, none of
/// them in `occupied`.
fn draw_negatives<R: Rng + ?Sized>(
    rng: &mut R,
    population: usize,
    occupied: &HashSet<usize>,
    target: usize,
) -> Result<Vec<usize>> {
    reject_rounds(population, occupied, target, |k| index::sample(rng, population, k).into_vec())
}

/// The bounded retry loop; `draw(k)` yields `k` candidate indices per round.
fn reject_rounds<D>(
    population: usize,
    occupied: &HashSet<usize>,
    target: usize,
    mut draw: D,
) -> Result<Vec<usize>>
where
    D: FnMut(usize) -> Vec<usize>,
{
    if target == 0 {
        return Ok(Vec::new());
    }

    let prob = 1.0 - occupied.len() as f64 / population as f64;
    let sample_size = ((OVERSAMPLE * target as f64 / prob).ceil() as usize).min(population);

    let mut accepted: Vec<usize> = Vec::with_capacity(target);
    let mut seen: HashSet<usize> = HashSet::with_capacity(target);
    for round in 0..MAX_ROUNDS {
        for candidate in draw(sample_size) {
            if !occupied.contains(&candidate) && seen.insert(candidate) {
                accepted.push(candidate);
            }
        }
        log::debug!(
            "negative sampling round {}: drew {sample_size}, accepted {}/{target}",
            round + 1,
            accepted.len()
        );
        if accepted.len() >= target {
            accepted.truncate(target);
            return Ok(accepted);
        }
    }

    Err(Error::UnsatisfiableSample { requested: target, found: accepted.len() })
}
