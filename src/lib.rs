//! `gnnprep`: graph preprocessing for GNN pipelines.
//!
//! Two families of operators over coordinate-format edge lists:
//! - **Laplacians**: `L = D - A` and its symmetric / random-walk normalizations, plus the
//!   rescaled operator `2L/lambda_max - I` used by Chebyshev spectral filters.
//! - **Negative sampling**: draw node pairs that are *not* edges, without materializing the
//!   `n x n` adjacency, via a bijection between edges and a compact linear index.
//!
//! Public invariants (must not drift):
//! - **Node order**: node ids are `0..num_nodes`; self-loops appended by the Laplacian
//!   operators come in node order after the input edges.
//! - **Codec bijection**: for every mode, `vector_to_edge_index(edge_index_to_vector(e))`
//!   reproduces `e` on valid edges (undirected decode yields both orientations).
//! - **Exact counts**: negative sampling returns exactly the requested number of distinct
//!   non-edges, or an error. Never a truncated result.
//! - **Determinism**: sampling is deterministic given the same inputs and seed/RNG state.

#[cfg(feature = "serde")]
pub mod args;
pub mod bucket;
pub mod codec;
pub mod graph;
pub mod laplacian;
pub mod negative;
pub mod norm;
pub mod sparse;

#[cfg(feature = "serde")]
pub use args::NegativeSampleArgs;
pub use bucket::bucketize;
pub use codec::{edge_index_to_vector, vector_to_edge_index, EdgeCodec};
#[cfg(feature = "petgraph")]
pub use graph::EdgeWeight;
pub use graph::{AdjacencyMatrix, EdgeFormat, EdgeIndex, EdgeList, Graph, GraphMode};
pub use laplacian::{get_laplacian, laplacian_of, Normalization};
pub use negative::{negative_sample, negative_sample_with_rng, NegativeSampleConfig};
pub use norm::{norm, LambdaMax};
pub use sparse::CooMatrix;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("index out of bounds: {0}")]
    IndexOutOfBounds(usize),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
    #[error("unsatisfiable sample: requested {requested} negatives, found {found}")]
    UnsatisfiableSample { requested: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
