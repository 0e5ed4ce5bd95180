//! Input/output helpers.
//!
//! - run-directory scanning (`runs`)
//! - bin-list read/write (`bins`)
//! - observable stores (`store`)
//! - observable extraction + validation (`ingest`)
//! - interpolation file export (`export`)

pub mod bins;
pub mod export;
pub mod ingest;
pub mod runs;
pub mod store;

pub use bins::*;
pub use export::*;
pub use ingest::*;
pub use runs::*;
pub use store::*;
