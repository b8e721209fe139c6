//! Iteration bounds for the randomized and linear searches.
//!
//! # Environment Variables
//!
//! - `PAIRING_CURVE_MAX_ATTEMPTS`: samples drawn by non-residue searches and
//!   `x` candidates scanned by `random_point` (default: 10000)
//! - `PAIRING_CURVE_MAX_EMBEDDING_DEGREE`: largest `k` tried by
//!   `embedding_degree` (default: 65536)
//! - `PAIRING_CURVE_MAX_ORDER`: largest order `Point::order` will count to
//!   (default: 16777216)

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

const ENV_MAX_ATTEMPTS: &str = "PAIRING_CURVE_MAX_ATTEMPTS";
const ENV_MAX_EMBEDDING_DEGREE: &str = "PAIRING_CURVE_MAX_EMBEDDING_DEGREE";
const ENV_MAX_ORDER: &str = "PAIRING_CURVE_MAX_ORDER";

/// Upper bounds for every loop whose length depends on the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchBounds {
    /// Random samples or scan steps a search may take before giving up.
    pub max_attempts: u64,
    /// Largest embedding degree tried.
    pub max_embedding_degree: u64,
    /// Largest point order counted by the naive order computation.
    pub max_order: u64,
}

impl Default for SearchBounds {
    fn default() -> Self {
        SearchBounds {
            max_attempts: 10_000,
            max_embedding_degree: 1 << 16,
            max_order: 1 << 24,
        }
    }
}

impl SearchBounds {
    /// Defaults overridden by any well-formed environment variable.
    pub fn from_env() -> Self {
        let defaults = SearchBounds::default();
        SearchBounds {
            max_attempts: read_env(ENV_MAX_ATTEMPTS).unwrap_or(defaults.max_attempts),
            max_embedding_degree: read_env(ENV_MAX_EMBEDDING_DEGREE)
                .unwrap_or(defaults.max_embedding_degree),
            max_order: read_env(ENV_MAX_ORDER).unwrap_or(defaults.max_order),
        }
    }

    /// Process-wide bounds, read from the environment on first use.
    pub fn global() -> SearchBounds {
        static BOUNDS: OnceLock<SearchBounds> = OnceLock::new();
        *BOUNDS.get_or_init(SearchBounds::from_env)
    }

    pub fn with_max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_max_embedding_degree(mut self, max_embedding_degree: u64) -> Self {
        self.max_embedding_degree = max_embedding_degree;
        self
    }

    pub fn with_max_order(mut self, max_order: u64) -> Self {
        self.max_order = max_order;
        self
    }
}

fn read_env(name: &str) -> Option<u64> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 => {
            info!("{}={} (from environment)", name, value);
            Some(value)
        }
        _ => {
            warn!("Ignoring malformed {} value '{}'", name, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let bounds = SearchBounds::default()
            .with_max_attempts(3)
            .with_max_embedding_degree(4)
            .with_max_order(5);
        assert_eq!(bounds.max_attempts, 3);
        assert_eq!(bounds.max_embedding_degree, 4);
        assert_eq!(bounds.max_order, 5);
    }

    #[test]
    fn test_unset_variable_is_ignored() {
        assert_eq!(read_env("PAIRING_CURVE_TEST_UNSET_VARIABLE"), None);
    }
}
