//! Per-bin polynomial order selection by held-out residuals.
//!
//! For every bin:
//! - without held-out runs, fit once at the configured maximum order
//! - otherwise fit every order `0..=max_order` on the training runs, score each
//!   by the sum of squared residuals at the held-out points, and keep the
//!   minimum
//!
//! Orders are swept in increasing order and only a strictly smaller score
//! replaces the current best, so exact ties resolve to the lowest order.

use crate::domain::{BinDescriptor, ObservableMatrix};
use crate::error::AppError;
use crate::fit::split::Split;
use crate::models::{Interpolator, IpolModel};

/// Held-out score of one candidate order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderScore {
    pub order: usize,
    /// Sum of squared residuals at the held-out points.
    pub sse: f64,
}

/// The chosen model for one bin.
#[derive(Debug, Clone)]
pub struct SelectedModel<M> {
    pub bin: BinDescriptor,
    pub model: M,
    /// Scores for every candidate order; empty when nothing was held out.
    pub scores: Vec<OrderScore>,
}

impl<M: IpolModel> SelectedModel<M> {
    pub fn order(&self) -> usize {
        self.model.order()
    }
}

/// Select a model for every bin, in bin-list order.
///
/// `matrix` rows must follow `bins`; its first `split.n_test()` columns are the
/// held-out runs.
pub fn select_models<I: Interpolator>(
    interp: &I,
    split: &Split,
    bins: &[BinDescriptor],
    matrix: &ObservableMatrix,
    max_order: usize,
) -> Result<Vec<SelectedModel<I::Model>>, AppError> {
    if matrix.n_bins() != bins.len() {
        return Err(AppError::data(format!(
            "Observable matrix has {} rows for {} bins.",
            matrix.n_bins(),
            bins.len()
        )));
    }

    let mut out = Vec::with_capacity(bins.len());
    for (row, bin) in bins.iter().enumerate() {
        let name = bin.to_string();
        let (model, scores) = select_order(interp, split, matrix.row(row), max_order, &name)?;
        out.push(SelectedModel {
            bin: bin.clone(),
            model,
            scores,
        });
    }
    Ok(out)
}

/// Select the model for a single bin.
///
/// `values` holds the bin's value for every run: held-out runs first, then the
/// training runs in the order of `split.space`.
pub fn select_order<I: Interpolator>(
    interp: &I,
    split: &Split,
    values: &[f64],
    max_order: usize,
    name: &str,
) -> Result<(I::Model, Vec<OrderScore>), AppError> {
    let n_test = split.n_test();
    if values.len() != n_test + split.space.len() {
        return Err(AppError::data(format!(
            "{name}: {} values for {} runs.",
            values.len(),
            n_test + split.space.len()
        )));
    }

    if n_test == 0 {
        let model = interp.fit(&split.space, values, max_order, name)?;
        return Ok((model, Vec::new()));
    }

    let (test_values, train_values) = values.split_at(n_test);
    let mut scores = Vec::with_capacity(max_order + 1);
    let mut best: Option<(I::Model, f64)> = None;

    for order in 0..=max_order {
        let model = interp.fit(&split.space, train_values, order, name)?;
        let sse = held_out_sse(&model, &split.test_points, test_values);
        scores.push(OrderScore { order, sse });
        tracing::debug!(bin = name, order, sse, "scored candidate order");

        let replace = match &best {
            None => true,
            Some((_, best_sse)) => sse < *best_sse,
        };
        if replace {
            best = Some((model, sse));
        }
    }

    // The sweep always covers order 0, so a best model exists.
    let (model, _) = best.ok_or_else(|| AppError::fit(format!("{name}: no candidate order fitted.")))?;
    Ok((model, scores))
}

fn held_out_sse<M: IpolModel>(model: &M, points: &[Vec<f64>], values: &[f64]) -> f64 {
    points
        .iter()
        .zip(values)
        .map(|(p, &y)| {
            let r = model.value(p) - y;
            r * r
        })
        .sum()
}
