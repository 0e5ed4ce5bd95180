//! Least squares solver.
//!
//! Every candidate interpolation is a linear regression of the form:
//!
//! ```text
//! minimize Σ (y_i - x_i^T c)^2
//! ```
//!
//! where `x_i` is the monomial design row of training point `i`. The system is
//! solved once per (bin, order) pair.
//!
//! Implementation choices:
//! - SVD is used so tall systems (more runs than coefficients) and square ones
//!   share a single code path.
//!   (Nalgebra's `QR::solve` is intended for square systems and will panic for
//!   non-square matrices.)
//! - Flat parameter axes produce collinear columns; the SVD tolerance drops the
//!   null directions instead of failing.
//! - The SVD iteration count is bounded, so a non-finite design matrix fails
//!   instead of spinning forever.

use nalgebra::{DMatrix, DVector};

const MAX_SVD_ITERS: usize = 1000;

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().try_svd(true, true, f64::EPSILON, MAX_SVD_ITERS)?;

    for &tol in &[1e-12, 1e-10, 1e-8] {
        if let Ok(coeffs) = svd.solve(y, tol) {
            if coeffs.iter().all(|v| v.is_finite()) {
                return Some(coeffs);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let c = solve_least_squares(&x, &y).unwrap();
        assert!((c[0] - 2.0).abs() < 1e-10);
        assert!((c[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn least_squares_averages_constant_fit() {
        let x = DMatrix::from_element(4, 1, 1.0);
        let y = DVector::from_row_slice(&[1.0, 4.0, 9.0, 16.0]);

        let c = solve_least_squares(&x, &y).unwrap();
        assert!((c[0] - 7.5).abs() < 1e-10);
    }

    #[test]
    fn non_finite_design_matrix_is_rejected() {
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, f64::NAN, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[0.0, 1.0, 4.0]);

        assert!(solve_least_squares(&x, &y).is_none());
    }
}
