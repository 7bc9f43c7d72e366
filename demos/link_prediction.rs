//! Link-prediction preprocessing sketch: Chebyshev-ready operator + balanced negatives.
//!
//! A two-community graph is turned into:
//! - the rescaled Laplacian `2L/lambda_max - I` a ChebConv layer consumes
//! - one negative pair per positive edge, for a binary edge classifier

use gnnprep::{negative_sample, norm, EdgeIndex, EdgeList, GraphMode, NegativeSampleConfig, Normalization};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn two_block(n: usize, p_in: f64, p_out: f64, seed: u64) -> Vec<(usize, usize)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let half = n / 2;
    let mut edges = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            let p = if (i < half) == (j < half) { p_in } else { p_out };
            if rng.random::<f64>() < p {
                edges.push((i, j));
            }
        }
    }
    edges
}

fn main() -> gnnprep::Result<()> {
    let n = 200;
    let edges = two_block(n, 0.08, 0.005, 7);
    println!("graph: {n} nodes, {} undirected edges", edges.len());

    let mut both = edges.clone();
    both.extend(edges.iter().map(|&(u, v)| (v, u)));
    let (op_index, op_weight) =
        norm(&EdgeIndex::from_pairs(&both), n, None, Normalization::Symmetric, None, None)?;
    println!("scaled laplacian: {} entries", op_index.len());
    let diag: f32 = op_index.pairs().zip(&op_weight).filter(|((r, c), _)| r == c).map(|(_, w)| w).sum();
    println!("trace: {diag:.3}");

    let cfg = NegativeSampleConfig { mode: GraphMode::Undirected, seed: 7 };
    let positive = EdgeList::Pairs(edges);
    let negatives = negative_sample(&positive, n, None, cfg)?;
    println!("negatives: {}", negatives.len());
    if let EdgeList::Pairs(pairs) = &negatives {
        for (u, v) in pairs.iter().take(5) {
            println!("  {u} -/- {v}");
        }
    }
    Ok(())
}
