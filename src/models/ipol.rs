//! Least-squares polynomial interpolation over a parameter space.
//!
//! The fitter relies on two primitive operations:
//! - build a design row of monomials for a scaled parameter point (for OLS)
//! - evaluate the fitted coefficients at a new point (for held-out scoring)
//!
//! Parameters are scaled into the unit box of the training space before either
//! step, so coefficients stay well conditioned regardless of the raw axis units.

use nalgebra::{DMatrix, DVector};

use crate::domain::ParameterSpace;
use crate::error::AppError;
use crate::io::export::format_number;
use crate::math::{exponents, fill_design_row, n_coeffs, solve_least_squares, unit_scale};

/// A fitted, evaluable interpolation.
pub trait IpolModel {
    /// Identifier of the observable this model was fitted for.
    fn name(&self) -> &str;

    /// Polynomial order the model was built with.
    fn order(&self) -> usize;

    /// Evaluate the model at a raw (unscaled) parameter point.
    fn value(&self, point: &[f64]) -> f64;

    /// Text rendering of the coefficients, keyed by `var`.
    fn render(&self, var: &str) -> String;
}

/// Builds an [`IpolModel`] from training data.
pub trait Interpolator {
    type Model: IpolModel;

    /// Fit `values` (one per training point of `space`, in order) at `order`.
    fn fit(
        &self,
        space: &ParameterSpace,
        values: &[f64],
        order: usize,
        name: &str,
    ) -> Result<Self::Model, AppError>;
}

/// Default [`Interpolator`]: monomial basis + SVD least squares.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolyFitter;

/// Polynomial produced by [`PolyFitter`].
#[derive(Debug, Clone, PartialEq)]
pub struct PolyIpol {
    name: String,
    order: usize,
    exps: Vec<Vec<u32>>,
    coeffs: Vec<f64>,
    mins: Vec<f64>,
    maxs: Vec<f64>,
}

impl PolyIpol {
    pub fn dim(&self) -> usize {
        self.mins.len()
    }

    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }
}

impl IpolModel for PolyIpol {
    fn name(&self) -> &str {
        &self.name
    }

    fn order(&self) -> usize {
        self.order
    }

    fn value(&self, point: &[f64]) -> f64 {
        let x = unit_scale(point, &self.mins, &self.maxs);
        let mut row = vec![0.0; self.exps.len()];
        fill_design_row(&x, &self.exps, &mut row);
        row.iter().zip(&self.coeffs).map(|(r, c)| r * c).sum()
    }

    fn render(&self, var: &str) -> String {
        let mut out = format!("{var}: {} {}", self.dim(), self.order);
        for c in &self.coeffs {
            out.push(' ');
            out.push_str(&format_number(*c));
        }
        out
    }
}

impl Interpolator for PolyFitter {
    type Model = PolyIpol;

    fn fit(
        &self,
        space: &ParameterSpace,
        values: &[f64],
        order: usize,
        name: &str,
    ) -> Result<PolyIpol, AppError> {
        let n = space.len();
        if values.len() != n {
            return Err(AppError::fit(format!(
                "{name}: {} values supplied for {n} parameter points.",
                values.len()
            )));
        }

        let dim = space.dim();
        let Some(p) = n_coeffs(dim, order) else {
            return Err(AppError::fit(format!(
                "{name}: order {order} in {dim} dimension(s) has too many coefficients."
            )));
        };
        if n < p {
            return Err(AppError::fit(format!(
                "{name}: order {order} in {dim} dimension(s) needs at least {p} training points, got {n}."
            )));
        }

        let exps = exponents(dim, order);
        let mut x = DMatrix::<f64>::zeros(n, p);
        let mut row = vec![0.0; p];
        for (i, point) in space.points().iter().enumerate() {
            fill_design_row(&space.unit_scaled(point), &exps, &mut row);
            for (j, v) in row.iter().enumerate() {
                x[(i, j)] = *v;
            }
        }
        let y = DVector::from_column_slice(values);

        let coeffs = solve_least_squares(&x, &y).ok_or_else(|| {
            AppError::fit(format!(
                "{name}: least-squares system for order {order} is singular."
            ))
        })?;

        Ok(PolyIpol {
            name: name.to_string(),
            order,
            exps,
            coeffs: coeffs.iter().copied().collect(),
            mins: space.mins().to_vec(),
            maxs: space.maxs().to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EXIT_FIT;

    fn line_space(xs: &[f64]) -> ParameterSpace {
        ParameterSpace::from_points(xs.iter().map(|&x| vec![x]).collect()).unwrap()
    }

    #[test]
    fn quadratic_is_reproduced_exactly() {
        let space = line_space(&[0.0, 1.0, 2.0, 3.0, 4.0]);
        let values = [0.0, 1.0, 4.0, 9.0, 16.0];
        let ipol = PolyFitter.fit(&space, &values, 2, "/h#0").unwrap();

        for (x, y) in [0.0, 1.0, 2.0, 3.0, 4.0].iter().zip(values) {
            assert!((ipol.value(&[*x]) - y).abs() < 1e-9);
        }
        // Extrapolation follows the same polynomial.
        assert!((ipol.value(&[5.0]) - 25.0).abs() < 1e-8);
    }

    #[test]
    fn two_dimensional_plane() {
        let points = vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 1.0],
            vec![0.5, 0.25],
        ];
        let values: Vec<f64> = points.iter().map(|p| 1.0 + 2.0 * p[0] - 3.0 * p[1]).collect();
        let space = ParameterSpace::from_points(points).unwrap();

        let ipol = PolyFitter.fit(&space, &values, 1, "plane").unwrap();
        assert_eq!(ipol.coeffs().len(), 3);
        assert!((ipol.value(&[0.25, 0.75]) - (1.0 + 0.5 - 2.25)).abs() < 1e-9);
    }

    #[test]
    fn too_few_points_is_a_fit_error() {
        let space = line_space(&[0.0, 1.0, 2.0]);
        let err = PolyFitter.fit(&space, &[1.0, 2.0, 3.0], 3, "/h#1").unwrap_err();
        assert_eq!(err.exit_code(), EXIT_FIT);
        assert!(err.message().contains("/h#1"));
    }

    #[test]
    fn huge_order_is_a_fit_error() {
        let points: Vec<Vec<f64>> = (0..30)
            .map(|i| (0..20).map(|axis| ((i * 7 + axis) % 11) as f64).collect())
            .collect();
        let values = vec![1.0; points.len()];
        let space = ParameterSpace::from_points(points).unwrap();

        let err = PolyFitter.fit(&space, &values, 100, "/h#0").unwrap_err();
        assert_eq!(err.exit_code(), EXIT_FIT);
        assert!(err.message().contains("too many coefficients"));
    }

    #[test]
    fn render_uses_scientific_form_for_tiny_coeffs() {
        let ipol = PolyIpol {
            name: "tiny".to_string(),
            order: 1,
            exps: vec![vec![0], vec![1]],
            coeffs: vec![2.0, 3e-17],
            mins: vec![0.0],
            maxs: vec![1.0],
        };
        assert_eq!(ipol.render("var"), "var: 1 1 2 3e-17");
    }

    #[test]
    fn render_lists_dim_order_and_coeffs() {
        let space = line_space(&[0.0, 2.0]);
        let ipol = PolyFitter.fit(&space, &[3.0, 3.0], 0, "const").unwrap();
        assert_eq!(ipol.name(), "const");
        assert_eq!(ipol.order(), 0);
        let text = ipol.render("var");
        assert!(text.starts_with("var: 1 0 "), "got {text}");
        let c: f64 = text.rsplit(' ').next().unwrap().parse().unwrap();
        assert!((c - 3.0).abs() < 1e-12);
    }
}
