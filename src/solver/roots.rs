//! Numeric root finding for dense polynomials.

use std::f64::consts::TAU;

use num_complex::Complex;

/// Convergence threshold for the iteration, and the cutoff below which a
/// leading coefficient is treated as zero.
pub const ROOT_TOLERANCE: f64 = 1e-9;

/// Iteration cap; polynomials that have not converged by then yield whatever
/// approximations the last sweep produced.
pub const MAX_ITERATIONS: usize = 1000;

/// Roots whose imaginary part is below this are reported as real.
pub const IMAGINARY_TOLERANCE: f64 = 1e-6;

/// Find the real roots of the polynomial with ascending coefficients
/// `[c0, c1, ..., cn]` via the Durand-Kerner iteration.
///
/// Complex roots are found too and then filtered; only those within
/// [`IMAGINARY_TOLERANCE`] of the real axis survive. Degenerate inputs (a
/// constant, or all-zero coefficients) have no roots to report.
pub fn find_real_roots(coefficients: &[f64]) -> Vec<f64> {
    let mut coefficients = coefficients.to_vec();
    while coefficients.len() > 1 {
        match coefficients.last() {
            Some(&c) if c.abs() < ROOT_TOLERANCE => {
                coefficients.pop();
            }
            _ => break,
        }
    }
    let degree = coefficients.len().saturating_sub(1);
    if degree == 0 {
        return Vec::new();
    }

    // Monic normalization keeps the update step well-scaled.
    let leading = coefficients[degree];
    let monic: Vec<Complex<f64>> = coefficients
        .iter()
        .map(|&c| Complex::new(c / leading, 0.0))
        .collect();

    // Seeds spread uniformly around the unit circle. The phase offset keeps
    // every seed off the real axis, where the iteration can stall on
    // polynomials whose roots are all conjugate pairs.
    const SEED_PHASE: f64 = 0.4;
    let mut roots: Vec<Complex<f64>> = (0..degree)
        .map(|k| Complex::from_polar(1.0, SEED_PHASE + TAU * k as f64 / degree as f64))
        .collect();

    for _ in 0..MAX_ITERATIONS {
        let mut worst = 0.0f64;
        for i in 0..degree {
            let mut denominator = Complex::new(1.0, 0.0);
            for j in 0..degree {
                if j != i {
                    denominator *= roots[i] - roots[j];
                }
            }
            if denominator.norm() == 0.0 {
                continue;
            }
            let delta = eval_complex(&monic, roots[i]) / denominator;
            roots[i] -= delta;
            worst = worst.max(delta.norm());
        }
        if worst < ROOT_TOLERANCE {
            break;
        }
    }

    roots
        .into_iter()
        .filter(|root| root.im.abs() < IMAGINARY_TOLERANCE)
        .map(|root| root.re)
        .collect()
}

/// Evaluate the polynomial at `x` using Horner's method.
pub fn eval_poly(coefficients: &[f64], x: f64) -> f64 {
    coefficients
        .iter()
        .rev()
        .fold(0.0, |acc, &c| acc * x + c)
}

fn eval_complex(coefficients: &[Complex<f64>], x: Complex<f64>) -> Complex<f64> {
    coefficients
        .iter()
        .rev()
        .fold(Complex::new(0.0, 0.0), |acc, &c| acc * x + c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut roots: Vec<f64>) -> Vec<f64> {
        roots.sort_by(|a, b| a.partial_cmp(b).unwrap());
        roots
    }

    #[test]
    fn quadratic_with_two_real_roots() {
        // x^2 - 9
        let roots = sorted(find_real_roots(&[-9.0, 0.0, 1.0]));
        assert_eq!(roots.len(), 2);
        assert!((roots[0] + 3.0).abs() < 1e-6);
        assert!((roots[1] - 3.0).abs() < 1e-6);
    }

    #[test]
    fn quadratic_with_no_real_roots() {
        // x^2 + 1
        assert!(find_real_roots(&[1.0, 0.0, 1.0]).is_empty());
    }

    #[test]
    fn cubic_keeps_only_the_real_root() {
        // x^3 - 10
        let roots = find_real_roots(&[-10.0, 0.0, 0.0, 1.0]);
        assert_eq!(roots.len(), 1);
        assert!((roots[0] - 10f64.cbrt()).abs() < 1e-6);
    }

    #[test]
    fn constants_have_no_roots() {
        assert!(find_real_roots(&[5.0]).is_empty());
        assert!(find_real_roots(&[0.0]).is_empty());
        assert!(find_real_roots(&[3.0, 0.0]).is_empty());
    }

    #[test]
    fn horner_evaluation() {
        // 2x^2 + 3x + 1 at x = 2
        assert_eq!(eval_poly(&[1.0, 3.0, 2.0], 2.0), 15.0);
    }
}
