//! Monomial basis for multivariate polynomials.
//!
//! A polynomial of order `k` in `D` variables uses every monomial
//! `x_1^e_1 * ... * x_D^e_D` with `Σ e_i <= k`. Terms are ordered:
//!
//! - by total degree, ascending (constant term first)
//! - within one degree, by exponent vector, descending lexicographically
//!
//! For `D = 2, k = 2` this gives `1, x1, x2, x1², x1·x2, x2²`.

/// Map `x` into the unit box `[mins, maxs]` axis by axis.
///
/// Axes with zero extent map to 0.
pub fn unit_scale(x: &[f64], mins: &[f64], maxs: &[f64]) -> Vec<f64> {
    x.iter()
        .zip(mins.iter().zip(maxs))
        .map(|(&v, (&lo, &hi))| {
            let span = hi - lo;
            if span > 0.0 { (v - lo) / span } else { 0.0 }
        })
        .collect()
}

/// Number of monomials of total degree `<= order` in `dim` variables,
/// i.e. `C(dim + order, order)`, or `None` if the count overflows `usize`.
pub fn n_coeffs(dim: usize, order: usize) -> Option<usize> {
    // Multiplicative form keeps every intermediate value an exact integer.
    let mut out = 1usize;
    for i in 1..=order {
        out = out.checked_mul(dim.checked_add(i)?)? / i;
    }
    Some(out)
}

/// All exponent vectors for the given dimension and maximum order.
pub fn exponents(dim: usize, order: usize) -> Vec<Vec<u32>> {
    let mut out = Vec::with_capacity(n_coeffs(dim, order).unwrap_or(0));
    for degree in 0..=order {
        let mut current = Vec::with_capacity(dim);
        push_compositions(dim, degree as u32, &mut current, &mut out);
    }
    out
}

fn push_compositions(dim: usize, remaining: u32, current: &mut Vec<u32>, out: &mut Vec<Vec<u32>>) {
    if current.len() + 1 == dim {
        current.push(remaining);
        out.push(current.clone());
        current.pop();
        return;
    }
    for e in (0..=remaining).rev() {
        current.push(e);
        push_compositions(dim, remaining - e, current, out);
        current.pop();
    }
}

/// Fill a design row with every monomial evaluated at `x`.
///
/// # Panics
/// Panics if `out.len() != exps.len()`.
pub fn fill_design_row(x: &[f64], exps: &[Vec<u32>], out: &mut [f64]) {
    assert_eq!(out.len(), exps.len(), "design row length mismatch");
    for (slot, e) in out.iter_mut().zip(exps) {
        *slot = x
            .iter()
            .zip(e)
            .map(|(&xi, &ei)| xi.powi(ei as i32))
            .product();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coefficient_counts() {
        assert_eq!(n_coeffs(1, 0), Some(1));
        assert_eq!(n_coeffs(1, 3), Some(4));
        assert_eq!(n_coeffs(2, 2), Some(6));
        assert_eq!(n_coeffs(3, 3), Some(20));
        assert_eq!(n_coeffs(4, 0), Some(1));
    }

    #[test]
    fn coefficient_count_overflow_is_none() {
        assert_eq!(n_coeffs(20, 100), None);
        assert_eq!(n_coeffs(usize::MAX, 1), None);
    }

    #[test]
    fn exponent_order_two_dims() {
        let exps = exponents(2, 2);
        let expected: Vec<Vec<u32>> = vec![
            vec![0, 0],
            vec![1, 0],
            vec![0, 1],
            vec![2, 0],
            vec![1, 1],
            vec![0, 2],
        ];
        assert_eq!(exps, expected);
    }

    #[test]
    fn exponent_count_matches_formula() {
        for dim in 1..5 {
            for order in 0..5 {
                assert_eq!(Some(exponents(dim, order).len()), n_coeffs(dim, order));
            }
        }
    }

    #[test]
    fn design_row_evaluates_monomials() {
        let exps = exponents(2, 2);
        let mut row = vec![0.0; exps.len()];
        fill_design_row(&[2.0, 3.0], &exps, &mut row);
        assert_eq!(row, vec![1.0, 2.0, 3.0, 4.0, 6.0, 9.0]);
    }
}
