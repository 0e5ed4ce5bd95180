//! Polynomial interpolation models.
//!
//! The selector only talks to the `Interpolator` / `IpolModel` traits, so the
//! fitting backend can be swapped (or counted in tests) without touching the
//! cross-validation logic.

pub mod ipol;

pub use ipol::*;
