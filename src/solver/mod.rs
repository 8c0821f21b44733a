//! Equation solving.
//!
//! [`solve_equation`] is the front door: it takes an `Equality` root, moves
//! everything to one side, and tries the linear fast path first. When the
//! equation is not linear in the unknown it falls back to polynomial
//! extraction and a complex root finder, keeping only the (numerically) real
//! roots.

mod linear;
mod poly;
mod roots;

pub use linear::{extract_linear_coeffs, solve_linear, LinearSolve};
pub use poly::{extract_polynomial, Polynomial};
pub use roots::{eval_poly, find_real_roots, IMAGINARY_TOLERANCE, MAX_ITERATIONS, ROOT_TOLERANCE};

use crate::display::render;
use crate::error::EngineError;
use crate::factory::NodeFactory;
use crate::node::{Node, NodeId};
use crate::trace::Trace;

/// Solve the equation rooted at `id` for `var`.
///
/// Returns every real solution found; an empty vector means the polynomial
/// has no real roots, not that solving failed. Non-equations, non-polynomial
/// equations and terms involving other free variables are errors.
pub fn solve_equation(
    f: &NodeFactory,
    id: NodeId,
    var: &str,
    trace: Option<&Trace>,
) -> Result<Vec<f64>, EngineError> {
    let (lhs, rhs) = match f.node(id) {
        Node::Equality(l, r) => (l, r),
        _ => return Err(EngineError::NotAnEquation),
    };

    match solve_linear(f, lhs, rhs, var, trace)? {
        LinearSolve::Root(root) => Ok(vec![root]),
        LinearSolve::Unsolved(diff) => {
            let poly = extract_polynomial(f.arena(), diff, var)?;
            let roots = find_real_roots(&poly.coefficients());
            if let Some(trace) = trace {
                trace.record(
                    "polynomial roots",
                    render(f.arena(), diff),
                    format!("{:?}", roots),
                );
            }
            Ok(roots)
        }
    }
}
