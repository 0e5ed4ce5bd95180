//! Shared domain types.
//!
//! These types are plain data: they are built once by the scanner/ingest stages
//! and then handed by reference to the fitting and export stages.

use std::fmt;
use std::path::PathBuf;

use crate::error::AppError;

/// One parameter vector, ordered by axis as listed in the run's parameter file.
pub type ParamPoint = Vec<f64>;

/// A single simulation run discovered under the scan directory.
#[derive(Debug, Clone, PartialEq)]
pub struct RunDir {
    /// Directory name, used as the stable sort key.
    pub name: String,
    pub path: PathBuf,
    pub params: ParamPoint,
}

/// Training parameter points plus their per-axis bounds.
///
/// Every point has exactly `dim()` components.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpace {
    points: Vec<ParamPoint>,
    mins: Vec<f64>,
    maxs: Vec<f64>,
}

impl ParameterSpace {
    /// Build the space from the training points.
    ///
    /// Fails on an empty point set, on points with differing dimension and on
    /// NaN or infinite components.
    pub fn from_points(points: Vec<ParamPoint>) -> Result<Self, AppError> {
        let Some(first) = points.first() else {
            return Err(AppError::data(
                "Training set is empty: at least one run must remain after removing test points.",
            ));
        };
        let dim = first.len();
        if dim == 0 {
            return Err(AppError::data("Parameter points have no components."));
        }

        let mut mins = vec![f64::INFINITY; dim];
        let mut maxs = vec![f64::NEG_INFINITY; dim];
        for (idx, p) in points.iter().enumerate() {
            if p.len() != dim {
                return Err(AppError::data(format!(
                    "Parameter point {idx} has dimension {}, expected {dim}.",
                    p.len()
                )));
            }
            for (axis, &v) in p.iter().enumerate() {
                if !v.is_finite() {
                    return Err(AppError::data(format!(
                        "Parameter point {idx} has non-finite component {v} on axis {axis}."
                    )));
                }
                mins[axis] = mins[axis].min(v);
                maxs[axis] = maxs[axis].max(v);
            }
        }

        Ok(Self { points, mins, maxs })
    }

    pub fn dim(&self) -> usize {
        self.mins.len()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[ParamPoint] {
        &self.points
    }

    pub fn mins(&self) -> &[f64] {
        &self.mins
    }

    pub fn maxs(&self) -> &[f64] {
        &self.maxs
    }

    /// Map a point into the unit box spanned by the training bounds.
    ///
    /// Axes with zero extent map to 0. Points outside the bounds extrapolate
    /// linearly (values below 0 or above 1).
    pub fn unit_scaled(&self, point: &[f64]) -> Vec<f64> {
        crate::math::unit_scale(point, &self.mins, &self.maxs)
    }
}

/// One requested observable bin: `(series name, 0-based bin index)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BinDescriptor {
    pub name: String,
    pub index: usize,
}

impl BinDescriptor {
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index,
        }
    }
}

impl fmt::Display for BinDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.index)
    }
}

/// Bin-major matrix of observable values, indexed `[bin][run]`.
///
/// Columns follow the sorted run order (held-out runs first).
#[derive(Debug, Clone, PartialEq)]
pub struct ObservableMatrix {
    n_bins: usize,
    n_runs: usize,
    values: Vec<f64>,
}

impl ObservableMatrix {
    pub(crate) fn zeros(n_bins: usize, n_runs: usize) -> Self {
        Self {
            n_bins,
            n_runs,
            values: vec![0.0; n_bins * n_runs],
        }
    }

    /// Build a matrix directly from bin rows.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        let n_bins = rows.len();
        let n_runs = rows.first().map_or(0, Vec::len);
        assert!(
            rows.iter().all(|r| r.len() == n_runs),
            "observable rows must have equal length"
        );
        Self {
            n_bins,
            n_runs,
            values: rows.into_iter().flatten().collect(),
        }
    }

    pub(crate) fn set(&mut self, bin: usize, run: usize, value: f64) {
        self.values[bin * self.n_runs + run] = value;
    }

    pub fn n_bins(&self) -> usize {
        self.n_bins
    }

    pub fn n_runs(&self) -> usize {
        self.n_runs
    }

    pub fn get(&self, bin: usize, run: usize) -> f64 {
        self.values[bin * self.n_runs + run]
    }

    /// All run values for one bin.
    pub fn row(&self, bin: usize) -> &[f64] {
        let start = bin * self.n_runs;
        &self.values[start..start + self.n_runs]
    }
}

/// Resolved configuration for `ipol build`.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub scan_dir: PathBuf,
    pub prediction_file: String,
    pub param_file: String,
    pub bin_list: PathBuf,
    pub order: usize,
    pub n_test: usize,
    pub output: PathBuf,
    pub include_header: bool,
}

impl BuildConfig {
    /// Check inputs that can be verified before any data is read.
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.scan_dir.is_dir() {
            return Err(AppError::config(format!(
                "{} is not a valid directory.\nUsage: ipol build --scan-dir <DIR> [OPTIONS] (see `ipol build --help`)",
                self.scan_dir.display()
            )));
        }
        Ok(())
    }
}

/// Resolved configuration for `ipol bins`.
#[derive(Debug, Clone)]
pub struct BinsConfig {
    pub input: PathBuf,
    pub output: PathBuf,
}
