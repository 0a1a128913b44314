//! Configuration loading and management for the hours engine.
//!
//! This module provides functionality to load rule configurations from YAML files:
//! overtime and double-time thresholds, the weekly window policy, and the
//! jurisdiction allow-list used to pick a regime per worker.
//!
//! # Example
//!
//! ```no_run
//! use overtime_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Default regime: {}", config.default_regime());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_DAILY_DOUBLETIME_HOURS, DEFAULT_DAILY_OVERTIME_HOURS, DEFAULT_WEEKLY_REGULAR_HOURS,
    Jurisdiction, JurisdictionConfig, RuleConfig, RulesFile, Thresholds, WeekBoundary,
};
