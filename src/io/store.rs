//! Observable stores: named, binned numeric series for one run.
//!
//! The on-disk format is a JSON document mapping full series paths to their
//! bin contents:
//!
//! ```json
//! { "histograms": { "/ANALYSIS/d01-x01-y01": [1.5, 2.25, null] } }
//! ```
//!
//! `null` bin contents are read as NaN, so they reach extraction and fail
//! validation there rather than at parse time.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::AppError;

/// Read access to the binned series of one run.
pub trait ObservableStore {
    /// Human-readable origin (usually the file path), used in diagnostics.
    fn source(&self) -> &str;

    /// Bin contents of the named series, if present.
    fn series(&self, name: &str) -> Option<&[f64]>;

    /// All series names, sorted.
    fn series_names(&self) -> Vec<String>;
}

#[derive(Debug, Deserialize)]
struct StoreFile {
    histograms: BTreeMap<String, Vec<Option<f64>>>,
}

/// JSON-backed [`ObservableStore`]. Dropping it releases the file contents.
#[derive(Debug, Clone)]
pub struct JsonStore {
    source: String,
    series: BTreeMap<String, Vec<f64>>,
}

impl JsonStore {
    /// Open and parse a store file.
    pub fn open(path: &Path) -> Result<Self, AppError> {
        let file = File::open(path).map_err(|e| {
            AppError::config(format!("Failed to open observable store '{}': {e}", path.display()))
        })?;
        let raw: StoreFile = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            AppError::config(format!("Invalid observable store '{}': {e}", path.display()))
        })?;
        Ok(Self::from_raw(path.display().to_string(), raw))
    }

    /// Parse a store from JSON text.
    pub fn from_json_str(source: impl Into<String>, json: &str) -> Result<Self, AppError> {
        let source = source.into();
        let raw: StoreFile = serde_json::from_str(json)
            .map_err(|e| AppError::config(format!("Invalid observable store '{source}': {e}")))?;
        Ok(Self::from_raw(source, raw))
    }

    fn from_raw(source: String, raw: StoreFile) -> Self {
        let series = raw
            .histograms
            .into_iter()
            .map(|(name, bins)| {
                let bins: Vec<f64> = bins.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect();
                (name, bins)
            })
            .collect();
        Self { source, series }
    }
}

impl ObservableStore for JsonStore {
    fn source(&self) -> &str {
        &self.source
    }

    fn series(&self, name: &str) -> Option<&[f64]> {
        self.series.get(name).map(Vec::as_slice)
    }

    fn series_names(&self) -> Vec<String> {
        self.series.keys().cloned().collect()
    }
}
