//! `ipol-scan` library crate.
//!
//! Builds per-bin polynomial surrogate models from an ensemble of simulation
//! run directories. The binary (`ipol`) is a thin wrapper around this library so
//! that the pipeline is testable without spawning processes.

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod logging;
pub mod math;
pub mod models;
pub mod report;
