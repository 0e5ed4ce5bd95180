//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - run directories and their parameter vectors (`RunDir`, `ParamPoint`)
//! - the training parameter space (`ParameterSpace`)
//! - requested observables and their values (`BinDescriptor`, `ObservableMatrix`)
//! - resolved run configuration (`BuildConfig`, `BinsConfig`)

pub mod types;

pub use types::*;
