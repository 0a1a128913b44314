//! Hours and overtime computation engine
//!
//! This crate turns raw clock-in/clock-out records into per-worker totals of
//! regular, overtime, and double-time hours, applying either a tiered
//! daily/weekly regime or a flat weekly regime chosen from the worker's
//! payroll-code jurisdiction.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
