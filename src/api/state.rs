//! Application state for the hours API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, RuleConfig};

/// Shared application state.
///
/// Holds the rule configuration; it is read-only for the lifetime of the
/// router, so handlers can share it across worker tasks without locking.
#[derive(Clone)]
pub struct AppState {
    config: Arc<RuleConfig>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(loader: ConfigLoader) -> Self {
        Self {
            config: Arc::new(loader.into_config()),
        }
    }

    /// Returns a shared handle to the rule configuration.
    pub fn shared_config(&self) -> Arc<RuleConfig> {
        Arc::clone(&self.config)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            config: Arc::new(RuleConfig::default()),
        }
    }
}
