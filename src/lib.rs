//! tickvol: Monte Carlo intraday realized volatility estimator
//!
//! This library provides the core components for:
//! - Loading tick-level (timestamp, price) data from CSV
//! - Partitioning observations into trading days
//! - Start/end-of-day anchor price extraction
//! - Random-subsampling Monte Carlo volatility trials
//! - RMS aggregation of trials into per-day estimates
//! - Parallel per-day execution with failure isolation
//! - Result export to CSV/JSON
//! - Structured logging

pub mod cli;
pub mod config;
pub mod data;
pub mod estimator;
pub mod pipeline;
pub mod scheduler;
pub mod session;
pub mod telemetry;
