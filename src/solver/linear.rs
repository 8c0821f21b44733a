//! The linear fast path.

use crate::arena::NodeArena;
use crate::display::render;
use crate::error::EngineError;
use crate::factory::NodeFactory;
use crate::node::{Node, NodeId};
use crate::simplify::simplify;
use crate::trace::Trace;

/// Outcome of the linear fast path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LinearSolve {
    /// The equation was linear in the unknown; here is its root.
    Root(f64),
    /// Not linear. Carries the simplified `lhs - rhs` tree so the caller can
    /// hand it to the polynomial path without re-deriving it.
    Unsolved(NodeId),
}

/// Extract `(a, b)` such that the tree equals `a * var + b`, or `None` when
/// the tree is not linear in `var`.
///
/// Two long-standing quirks are part of the contract. A sum or difference
/// succeeds when at least one side does, with the failed side contributing
/// `(0, 0)`; and a subtree with no occurrence of `var` only counts as
/// constant when it folds all the way down (a foreign variable makes it
/// fail, it does not read as zero).
pub fn extract_linear_coeffs(arena: &NodeArena, id: NodeId, var: &str) -> Option<(f64, f64)> {
    match arena.node(id) {
        Node::Number(n) => Some((0.0, n)),
        Node::Variable(name) => {
            if name.as_ref() == var {
                Some((1.0, 0.0))
            } else {
                None
            }
        }

        Node::Add(l, r) => {
            let left = extract_linear_coeffs(arena, l, var);
            let right = extract_linear_coeffs(arena, r, var);
            if left.is_none() && right.is_none() {
                return None;
            }
            let (a1, b1) = left.unwrap_or((0.0, 0.0));
            let (a2, b2) = right.unwrap_or((0.0, 0.0));
            Some((a1 + a2, b1 + b2))
        }
        Node::Sub(l, r) => {
            let left = extract_linear_coeffs(arena, l, var);
            let right = extract_linear_coeffs(arena, r, var);
            if left.is_none() && right.is_none() {
                return None;
            }
            let (a1, b1) = left.unwrap_or((0.0, 0.0));
            let (a2, b2) = right.unwrap_or((0.0, 0.0));
            Some((a1 - a2, b1 - b2))
        }

        // One factor must be a pure constant, or the product is quadratic
        // (or worse) in the unknown.
        Node::Mul(l, r) => {
            let left = extract_linear_coeffs(arena, l, var)?;
            let right = extract_linear_coeffs(arena, r, var)?;
            match (left, right) {
                ((a, b), (a2, c)) if a2 == 0.0 => Some((a * c, b * c)),
                ((a2, c), (a, b)) if a2 == 0.0 => Some((a * c, b * c)),
                _ => None,
            }
        }

        Node::Div(l, r) => {
            let (a, b) = extract_linear_coeffs(arena, l, var)?;
            match extract_linear_coeffs(arena, r, var)? {
                (a2, c) if a2 == 0.0 && c != 0.0 => Some((a / c, b / c)),
                _ => None,
            }
        }

        Node::Pow(base, exponent) => {
            let (a, b) = extract_linear_coeffs(arena, base, var)?;
            match extract_linear_coeffs(arena, exponent, var)? {
                (a2, e) if a2 == 0.0 && e == 0.0 => Some((0.0, 1.0)),
                (a2, e) if a2 == 0.0 && e == 1.0 => Some((a, b)),
                _ => None,
            }
        }

        // Transcendentals are only linear when they fold to a constant, and
        // only inside their domain.
        Node::Sin(a) => constant_operand(arena, a, var).map(|v| (0.0, v.sin())),
        Node::Cos(a) => constant_operand(arena, a, var).map(|v| (0.0, v.cos())),
        Node::Tan(a) => constant_operand(arena, a, var).map(|v| (0.0, v.tan())),
        Node::Ln(a) => match constant_operand(arena, a, var) {
            Some(v) if v > 0.0 => Some((0.0, v.ln())),
            _ => None,
        },
        Node::Log { base, operand } => {
            let base = constant_operand(arena, base, var)?;
            let operand = constant_operand(arena, operand, var)?;
            if base > 0.0 && base != 1.0 && operand > 0.0 {
                Some((0.0, operand.ln() / base.ln()))
            } else {
                None
            }
        }

        Node::Function { args, callback, .. } => {
            let mut values = Vec::with_capacity(args.len());
            for &arg in &args {
                values.push(constant_operand(arena, arg, var)?);
            }
            Some((0.0, callback.call(&values)))
        }

        Node::Equality(_, _) => None,
    }
}

fn constant_operand(arena: &NodeArena, id: NodeId, var: &str) -> Option<f64> {
    match extract_linear_coeffs(arena, id, var) {
        Some((a, b)) if a == 0.0 => Some(b),
        _ => None,
    }
}

/// Try to solve `lhs == rhs` as a linear equation in `var`.
pub fn solve_linear(
    f: &NodeFactory,
    lhs: NodeId,
    rhs: NodeId,
    var: &str,
    trace: Option<&Trace>,
) -> Result<LinearSolve, EngineError> {
    let diff = simplify(f, f.sub(lhs, rhs))?;
    match extract_linear_coeffs(f.arena(), diff, var) {
        Some((a, b)) if a != 0.0 => {
            let root = -b / a;
            if let Some(trace) = trace {
                trace.record(
                    "linear solve",
                    render(f.arena(), diff),
                    format!("{} = {}", var, root),
                );
            }
            Ok(LinearSolve::Root(root))
        }
        _ => Ok(LinearSolve::Unsolved(diff)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::NodeFactory;

    #[test]
    fn extracts_slope_and_intercept() {
        let arena = NodeArena::new();
        let f = NodeFactory::new(&arena);
        // 2x + 5
        let expr = f.add(f.mul(f.num(2.0), f.var("x")), f.num(5.0));
        assert_eq!(extract_linear_coeffs(&arena, expr, "x"), Some((2.0, 5.0)));
    }

    #[test]
    fn failed_summand_contributes_zero() {
        let arena = NodeArena::new();
        let f = NodeFactory::new(&arena);
        // sin(x) + 3x: the sine side fails, the linear side carries.
        let expr = f.add(f.sin(f.var("x")), f.mul(f.num(3.0), f.var("x")));
        assert_eq!(extract_linear_coeffs(&arena, expr, "x"), Some((3.0, 0.0)));
    }

    #[test]
    fn products_of_two_linear_terms_fail() {
        let arena = NodeArena::new();
        let f = NodeFactory::new(&arena);
        let expr = f.mul(f.var("x"), f.var("x"));
        assert_eq!(extract_linear_coeffs(&arena, expr, "x"), None);
    }

    #[test]
    fn foreign_variables_are_not_constants() {
        let arena = NodeArena::new();
        let f = NodeFactory::new(&arena);
        let expr = f.add(f.var("x"), f.var("y"));
        // y fails, so the sum still succeeds with y contributing nothing.
        assert_eq!(extract_linear_coeffs(&arena, expr, "x"), Some((1.0, 0.0)));
        // But y as a lone factor poisons a product.
        let product = f.mul(f.var("y"), f.var("x"));
        assert_eq!(extract_linear_coeffs(&arena, product, "x"), None);
    }

    #[test]
    fn constant_transcendentals_fold() {
        let arena = NodeArena::new();
        let f = NodeFactory::new(&arena);
        let expr = f.add(f.var("x"), f.cos(f.num(0.0)));
        assert_eq!(extract_linear_coeffs(&arena, expr, "x"), Some((1.0, 1.0)));

        let bad_ln = f.mul(f.ln(f.num(-1.0)), f.var("x"));
        assert_eq!(extract_linear_coeffs(&arena, bad_ln, "x"), None);
    }
}
