//! Observable extraction.
//!
//! Turns the per-run observable stores into one bin-major `ObservableMatrix`.
//!
//! Design goals:
//! - **One open store at a time**: each run's store is opened, every requested
//!   bin is read from it, and it is dropped before the next run is opened.
//! - **Strict validation**: a missing series, an out-of-range bin or a
//!   non-finite value aborts the whole extraction (exit code 3). There is no
//!   partial-result mode.

use crate::domain::{BinDescriptor, ObservableMatrix, RunDir};
use crate::error::AppError;
use crate::io::store::{JsonStore, ObservableStore};

/// Extract every requested bin from every run's store file.
///
/// `prediction_file` is resolved relative to each run directory.
pub fn load_observables(
    runs: &[RunDir],
    bins: &[BinDescriptor],
    prediction_file: &str,
) -> Result<ObservableMatrix, AppError> {
    extract_observables(runs, bins, |run| JsonStore::open(&run.path.join(prediction_file)))
}

/// Extract every requested bin using `open` to obtain each run's store.
///
/// Columns follow the order of `runs`, rows the order of `bins`.
pub fn extract_observables<S, F>(
    runs: &[RunDir],
    bins: &[BinDescriptor],
    mut open: F,
) -> Result<ObservableMatrix, AppError>
where
    S: ObservableStore,
    F: FnMut(&RunDir) -> Result<S, AppError>,
{
    let mut matrix = ObservableMatrix::zeros(bins.len(), runs.len());

    for (col, run) in runs.iter().enumerate() {
        let store = open(run)?;
        for (row, bin) in bins.iter().enumerate() {
            let value = read_bin(&store, bin, run)?;
            matrix.set(row, col, value);
        }
        tracing::debug!(run = %run.name, bins = bins.len(), "read observables");
    }

    Ok(matrix)
}

fn read_bin(store: &impl ObservableStore, bin: &BinDescriptor, run: &RunDir) -> Result<f64, AppError> {
    let series = store.series(&bin.name).ok_or_else(|| {
        AppError::data(format!(
            "Histogram {} not found in file {} (run {}).",
            bin.name,
            store.source(),
            run.name
        ))
    })?;

    let value = *series.get(bin.index).ok_or_else(|| {
        AppError::data(format!(
            "Bin {} out of range for histogram {} with {} bins in file {} (run {}).",
            bin.index,
            bin.name,
            series.len(),
            store.source(),
            run.name
        ))
    })?;

    if !value.is_finite() {
        return Err(AppError::data(format!(
            "Invalid value {value} for histogram {} in file {} (run {}).",
            bin.name,
            store.source(),
            run.name
        )));
    }

    Ok(value)
}
