//! Interpolation file export.
//!
//! The file is an optional parameter-space header followed by one three-line
//! block per bin, in bin-list order:
//!
//! ```text
//! ParamNames: a b
//! MinParamVals: 0 1
//! MaxParamVals: 4 5
//! Dimension: 2
//! ---
//! /h#0 0 1
//!   var: 2 1 <coeffs...> 0 1 4 5
//!   err: 2 0 0 0 1 4 5
//! ```
//!
//! Formatting is pure; the file is only created once the whole document has
//! been rendered.

use std::fs;
use std::path::Path;

use crate::domain::ParameterSpace;
use crate::error::AppError;
use crate::fit::selection::SelectedModel;
use crate::models::IpolModel;

/// Magnitudes outside `[SCI_LOWER, SCI_UPPER)` are written in scientific form.
const SCI_LOWER: f64 = 1e-4;
const SCI_UPPER: f64 = 1e16;

/// Variable token used for the coefficient line.
pub const VAR_TOKEN: &str = "var";

/// Parameter-space header of the interpolation file.
#[derive(Debug, Clone, PartialEq)]
pub struct IpolHeader {
    pub names: Vec<String>,
    pub mins: Vec<f64>,
    pub maxs: Vec<f64>,
}

impl IpolHeader {
    pub fn new(names: Vec<String>, space: &ParameterSpace) -> Self {
        Self {
            names,
            mins: space.mins().to_vec(),
            maxs: space.maxs().to_vec(),
        }
    }

    pub fn dim(&self) -> usize {
        self.mins.len()
    }
}

/// Render the full interpolation document.
///
/// `header` supplies the bounds appended to every block; `include_header`
/// controls whether the header block itself is emitted.
pub fn format_ipol_document<M: IpolModel>(
    header: &IpolHeader,
    include_header: bool,
    selected: &[SelectedModel<M>],
) -> String {
    let bounds = format!("{} {}", join(&header.mins), join(&header.maxs));
    let mut out = String::new();

    if include_header {
        out.push_str(&format!("ParamNames: {}\n", header.names.join(" ")));
        out.push_str(&format!("MinParamVals: {}\n", join(&header.mins)));
        out.push_str(&format!("MaxParamVals: {}\n", join(&header.maxs)));
        out.push_str(&format!("Dimension: {}\n", header.dim()));
        out.push_str("---\n");
    }

    for s in selected {
        out.push_str(&format!("{} {} {}\n", s.bin, s.bin.index, s.bin.index + 1));
        out.push_str(&format!("  {} {bounds}\n", s.model.render(VAR_TOKEN)));
        out.push_str(&format!("  err: {} 0 0 {bounds}\n", header.dim()));
    }

    out
}

/// Write a rendered document to `path`.
pub fn write_ipol_file(path: &Path, document: &str) -> Result<(), AppError> {
    fs::write(path, document).map_err(|e| {
        AppError::config(format!("Failed to write interpolation file '{}': {e}", path.display()))
    })
}

/// Shortest round-trip text for `v`: plain decimal for moderate magnitudes,
/// `{:e}` otherwise (`1e-300`, not three hundred digits).
pub fn format_number(v: f64) -> String {
    let mag = v.abs();
    if v == 0.0 || !v.is_finite() || (SCI_LOWER..SCI_UPPER).contains(&mag) {
        v.to_string()
    } else {
        format!("{v:e}")
    }
}

fn join(values: &[f64]) -> String {
    values
        .iter()
        .map(|&v| format_number(v))
        .collect::<Vec<_>>()
        .join(" ")
}
