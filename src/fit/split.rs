//! Train/test partitioning of the sorted run list.
//!
//! The first `n_test` runs are held out; the remainder form the training
//! `ParameterSpace`. Bounds and dimension come from the training runs only.

use crate::domain::{ParamPoint, ParameterSpace, RunDir};
use crate::error::AppError;

/// Training space plus held-out parameter points.
#[derive(Debug, Clone)]
pub struct Split {
    pub space: ParameterSpace,
    /// Held-out points, in run order. Their observables occupy the first
    /// `test_points.len()` matrix columns.
    pub test_points: Vec<ParamPoint>,
}

impl Split {
    pub fn n_test(&self) -> usize {
        self.test_points.len()
    }
}

/// Split `runs` into held-out and training sets.
pub fn split_runs(runs: &[RunDir], n_test: usize) -> Result<Split, AppError> {
    if n_test >= runs.len() {
        return Err(AppError::data(format!(
            "n-test ({n_test}) must be smaller than the number of runs ({}); no training runs would remain.",
            runs.len()
        )));
    }

    // Held-out points must share the training dimension too.
    let dim = runs[0].params.len();
    if let Some(bad) = runs.iter().find(|r| r.params.len() != dim) {
        return Err(AppError::data(format!(
            "Run {} has {} parameters, expected {dim} (from run {}).",
            bad.name,
            bad.params.len(),
            runs[0].name
        )));
    }

    let (test, train) = runs.split_at(n_test);
    let space = ParameterSpace::from_points(train.iter().map(|r| r.params.clone()).collect())?;
    let test_points = test.iter().map(|r| r.params.clone()).collect();

    Ok(Split { space, test_points })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::error::EXIT_DATA;

    fn runs(values: &[f64]) -> Vec<RunDir> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| RunDir {
                name: format!("run{i}"),
                path: PathBuf::from(format!("run{i}")),
                params: vec![v, 10.0 * v],
            })
            .collect()
    }

    #[test]
    fn first_runs_are_held_out() {
        let split = split_runs(&runs(&[5.0, -1.0, 2.0, 3.0]), 2).unwrap();
        assert_eq!(split.test_points, vec![vec![5.0, 50.0], vec![-1.0, -10.0]]);
        assert_eq!(split.space.len(), 2);
    }

    #[test]
    fn bounds_exclude_held_out_points() {
        let split = split_runs(&runs(&[100.0, 1.0, 2.0, 3.0]), 1).unwrap();
        assert_eq!(split.space.mins(), &[1.0, 10.0]);
        assert_eq!(split.space.maxs(), &[3.0, 30.0]);
        assert_eq!(split.space.dim(), 2);
    }

    #[test]
    fn zero_test_points_keeps_every_run() {
        let split = split_runs(&runs(&[0.0, 1.0]), 0).unwrap();
        assert_eq!(split.n_test(), 0);
        assert_eq!(split.space.len(), 2);
    }

    #[test]
    fn holding_out_everything_fails() {
        let err = split_runs(&runs(&[0.0, 1.0]), 2).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_DATA);
        let err = split_runs(&runs(&[0.0, 1.0]), 3).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_DATA);
    }

    #[test]
    fn inconsistent_dimension_fails() {
        let mut rs = runs(&[0.0, 1.0, 2.0]);
        rs[0].params.pop();
        let err = split_runs(&rs, 1).unwrap_err();
        assert!(err.message().contains("run1"));
    }
}
