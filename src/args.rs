//! Dynamically-typed entry point for negative sampling.
//!
//! Pipelines that pass arguments as JSON (config files, RPC payloads) go through
//! [`NegativeSampleArgs`]. Every field is type-checked while parsing, so a request such as
//! `{"node": "3"}` fails with [`Error::TypeMismatch`] before any sampling work starts.

use crate::graph::{EdgeFormat, EdgeList, GraphMode};
use crate::negative::{negative_sample, NegativeSampleConfig};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NegativeSampleArgs {
    /// `[[r, c], ...]` for `re = "more"`, `[[r...], [c...]]` for `re = "rows"`.
    pub positive: Vec<Vec<usize>>,
    pub node: usize,
    #[serde(default)]
    pub num_neg_samples: Option<usize>,
    #[serde(default)]
    pub mode: GraphMode,
    #[serde(default)]
    pub re: EdgeFormat,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_seed() -> u64 {
    NegativeSampleConfig::default().seed
}

impl NegativeSampleArgs {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::TypeMismatch(e.to_string()))
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::TypeMismatch(e.to_string()))
    }

    pub fn run(&self) -> Result<EdgeList> {
        let positive = EdgeList::from_nested(self.positive.clone(), self.re)?;
        let config = NegativeSampleConfig { mode: self.mode, seed: self.seed };
        negative_sample(&positive, self.node, self.num_neg_samples, config)
    }
}
