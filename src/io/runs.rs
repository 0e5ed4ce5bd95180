//! Run-directory scanning and parameter-file parsing.
//!
//! Each immediate subdirectory of the scan root is one run. Its parameter file
//! holds lines of `<name> <value> [ignored...]`; line order is axis order.

use std::fs;
use std::path::Path;

use crate::domain::{ParamPoint, RunDir};
use crate::error::AppError;

/// Enumerate run directories under `root`, sorted by directory name.
///
/// Directory enumeration order is platform dependent; sorting here is what
/// makes the held-out split (`first n_test runs`) reproducible.
pub fn scan_runs(root: &Path, param_file: &str) -> Result<Vec<RunDir>, AppError> {
    let entries = fs::read_dir(root).map_err(|e| {
        AppError::config(format!("Failed to read scan directory '{}': {e}", root.display()))
    })?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            AppError::config(format!("Failed to list scan directory '{}': {e}", root.display()))
        })?;
        let path = entry.path();
        if path.is_dir() {
            dirs.push((entry.file_name().to_string_lossy().into_owned(), path));
        }
    }
    dirs.sort_by(|a, b| a.0.cmp(&b.0));

    dirs.into_iter()
        .map(|(name, path)| {
            let params = read_params(&path.join(param_file))?;
            Ok(RunDir { name, path, params })
        })
        .collect()
}

/// Read the parameter values (second token of each line).
///
/// Lines with fewer than two tokens are skipped. NaN and infinite values are
/// data errors.
pub fn read_params(path: &Path) -> Result<ParamPoint, AppError> {
    let text = read_to_string(path)?;
    let mut params = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let mut tokens = line.split_whitespace();
        let (Some(name), Some(value)) = (tokens.next(), tokens.next()) else {
            continue;
        };
        let value: f64 = value.parse().map_err(|_| {
            AppError::data(format!(
                "Invalid value '{value}' for parameter '{name}' in {} (line {}).",
                path.display(),
                idx + 1
            ))
        })?;
        if !value.is_finite() {
            return Err(AppError::data(format!(
                "Non-finite value '{value}' for parameter '{name}' in {} (line {}).",
                path.display(),
                idx + 1
            )));
        }
        params.push(value);
    }
    Ok(params)
}

/// Read the parameter names (first token of each line).
///
/// Uses the same line filter as [`read_params`], so names and values line up
/// axis by axis.
pub fn read_names(path: &Path) -> Result<Vec<String>, AppError> {
    let text = read_to_string(path)?;
    Ok(text
        .lines()
        .filter_map(|line| {
            let mut tokens = line.split_whitespace();
            let name = tokens.next()?;
            tokens.next().map(|_| name.to_string())
        })
        .collect())
}

fn read_to_string(path: &Path) -> Result<String, AppError> {
    fs::read_to_string(path).map_err(|e| {
        AppError::config(format!("Failed to read parameter file '{}': {e}", path.display()))
    })
}
