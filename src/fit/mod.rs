//! Interpolation orchestration.
//!
//! Responsibilities:
//!
//! - split the sorted runs into held-out and training sets
//! - fit candidate orders per bin and keep the best one on held-out runs

pub mod selection;
pub mod split;

pub use selection::*;
pub use split::*;
