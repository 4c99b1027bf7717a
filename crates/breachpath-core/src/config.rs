//! Engine configuration.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (BREACHPATH_ prefix)
//! 2. Config file (breachpath.toml)
//! 3. Defaults
//!
//! The clamping ranges here belong to the caller side of the engine
//! contract: the engine itself tolerates any non-negative node
//! penalty and any K, while front ends keep user input inside these
//! bounds before issuing a request.

use serde::{Deserialize, Serialize};

/// Caller-side clamp range for the node penalty coefficient.
pub const NODE_PENALTY_RANGE: (f64, f64) = (0.0, 2.0);
/// Caller-side clamp range for K.
pub const K_RANGE: (usize, usize) = (1, 10);

/// Tunable defaults for analysis requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Node penalty used when a request leaves it unset.
    pub default_node_penalty: f64,
    /// K used when a request leaves it unset.
    pub default_k: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_node_penalty: 0.0,
            default_k: 3,
        }
    }
}

impl EngineConfig {
    /// Load configuration from file and environment, falling back to defaults.
    pub fn load(file_prefix: &str) -> Self {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(
                config::Environment::with_prefix("BREACHPATH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build();

        match cfg {
            Ok(c) => Self {
                default_node_penalty: c
                    .get_float("engine.default_node_penalty")
                    .map(clamp_node_penalty)
                    .unwrap_or(0.0),
                default_k: c
                    .get_int("engine.default_k")
                    .map(|k| clamp_k(k.max(0) as usize))
                    .unwrap_or(3),
            },
            Err(_) => Self::default(),
        }
    }
}

/// Clamp a node penalty into the caller-side range.
pub fn clamp_node_penalty(value: f64) -> f64 {
    value.clamp(NODE_PENALTY_RANGE.0, NODE_PENALTY_RANGE.1)
}

/// Clamp K into the caller-side range.
pub fn clamp_k(k: usize) -> usize {
    k.clamp(K_RANGE.0, K_RANGE.1)
}
