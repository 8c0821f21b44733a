//! Bottom-up simplification: constant folding plus per-kind identities.

use crate::compare::nodes_equal;
use crate::display::render;
use crate::error::EngineError;
use crate::factory::NodeFactory;
use crate::node::{Node, NodeId};

/// Simplify the tree rooted at `id`, returning a new root.
///
/// Children are simplified first; then, when every operand is a number, the
/// node folds to a single constant (division by zero while folding is a
/// domain error, not a silent skip); otherwise the per-kind identities
/// apply (`x + 0`, `x * 1`, `x ^ 0`, `ln(1)`, `log_b(b)`, `x - x`, ...);
/// failing all of that, the node is rebuilt with its simplified children.
pub fn simplify(f: &NodeFactory, id: NodeId) -> Result<NodeId, EngineError> {
    match f.node(id) {
        Node::Number(_) | Node::Variable(_) => Ok(id),

        Node::Add(l, r) => {
            let l = simplify(f, l)?;
            let r = simplify(f, r)?;
            match (f.node(l).as_number(), f.node(r).as_number()) {
                (Some(a), Some(b)) => Ok(f.num(a + b)),
                (Some(a), _) if a == 0.0 => Ok(r),
                (_, Some(b)) if b == 0.0 => Ok(l),
                _ => Ok(f.add(l, r)),
            }
        }

        Node::Sub(l, r) => {
            let l = simplify(f, l)?;
            let r = simplify(f, r)?;
            match (f.node(l).as_number(), f.node(r).as_number()) {
                (Some(a), Some(b)) => Ok(f.num(a - b)),
                (_, Some(b)) if b == 0.0 => Ok(l),
                _ => {
                    if nodes_equal(f.arena(), l, r) {
                        Ok(f.num(0.0))
                    } else {
                        Ok(f.sub(l, r))
                    }
                }
            }
        }

        Node::Mul(l, r) => {
            let l = simplify(f, l)?;
            let r = simplify(f, r)?;
            match (f.node(l).as_number(), f.node(r).as_number()) {
                (Some(a), Some(b)) => Ok(f.num(a * b)),
                (Some(a), _) if a == 0.0 => Ok(f.num(0.0)),
                (_, Some(b)) if b == 0.0 => Ok(f.num(0.0)),
                (Some(a), _) if a == 1.0 => Ok(r),
                (_, Some(b)) if b == 1.0 => Ok(l),
                _ => Ok(f.mul(l, r)),
            }
        }

        Node::Div(l, r) => {
            let l = simplify(f, l)?;
            let r = simplify(f, r)?;
            match (f.node(l).as_number(), f.node(r).as_number()) {
                (Some(_), Some(b)) if b == 0.0 => Err(EngineError::DivisionByZero {
                    expr: render(f.arena(), id),
                }),
                (Some(a), Some(b)) => Ok(f.num(a / b)),
                (_, Some(b)) if b == 1.0 => Ok(l),
                (Some(a), _) if a == 0.0 => Ok(f.num(0.0)),
                _ => Ok(f.div(l, r)),
            }
        }

        Node::Pow(b, e) => {
            let b = simplify(f, b)?;
            let e = simplify(f, e)?;
            // Exponent identities first, then base identities, matching the
            // historical rule order (so 0 ^ 0 simplifies to 1).
            if let Some(exponent) = f.node(e).as_number() {
                if exponent == 0.0 {
                    return Ok(f.num(1.0));
                }
                if exponent == 1.0 {
                    return Ok(b);
                }
            }
            if let Some(base) = f.node(b).as_number() {
                if base == 0.0 {
                    return Ok(f.num(0.0));
                }
                if base == 1.0 {
                    return Ok(f.num(1.0));
                }
                if let Some(exponent) = f.node(e).as_number() {
                    return Ok(f.num(base.powf(exponent)));
                }
            }
            Ok(f.pow(b, e))
        }

        Node::Sin(a) => {
            let a = simplify(f, a)?;
            match f.node(a).as_number() {
                Some(v) => Ok(f.num(v.sin())),
                None => Ok(f.sin(a)),
            }
        }
        Node::Cos(a) => {
            let a = simplify(f, a)?;
            match f.node(a).as_number() {
                Some(v) => Ok(f.num(v.cos())),
                None => Ok(f.cos(a)),
            }
        }
        Node::Tan(a) => {
            let a = simplify(f, a)?;
            match f.node(a).as_number() {
                Some(v) => Ok(f.num(v.tan())),
                None => Ok(f.tan(a)),
            }
        }

        Node::Ln(a) => {
            let a = simplify(f, a)?;
            match f.node(a).as_number() {
                Some(operand) if operand <= 0.0 => Err(EngineError::LnDomain { operand }),
                Some(operand) => Ok(f.num(operand.ln())),
                None => Ok(f.ln(a)),
            }
        }

        Node::Log { base, operand } => {
            let base = simplify(f, base)?;
            let operand = simplify(f, operand)?;
            // log_b(b) = 1, by structural equality of base and operand.
            if nodes_equal(f.arena(), base, operand) {
                return Ok(f.num(1.0));
            }
            match (f.node(base).as_number(), f.node(operand).as_number()) {
                (Some(b), Some(x)) => {
                    if b <= 0.0 || b == 1.0 || x <= 0.0 {
                        return Err(EngineError::LogDomain {
                            base: b,
                            operand: x,
                        });
                    }
                    Ok(f.num(x.ln() / b.ln()))
                }
                _ => Ok(f.log(base, operand)),
            }
        }

        Node::Function {
            name,
            arity,
            args,
            callback,
        } => {
            // Arguments simplify, but the call itself never folds; only the
            // solver's coefficient extraction invokes the callback.
            let mut simplified = Vec::with_capacity(args.len());
            for &arg in &args {
                simplified.push(simplify(f, arg)?);
            }
            Ok(f.func_rebuilt(name, arity, simplified, callback))
        }

        Node::Equality(l, r) => {
            let l = simplify(f, l)?;
            let r = simplify(f, r)?;
            if nodes_equal(f.arena(), l, r) {
                // Both sides agree structurally: the equation is true.
                Ok(f.num(1.0))
            } else {
                Ok(f.eq(l, r))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::NodeArena;

    fn rendered(f: &NodeFactory<'_>, id: NodeId) -> String {
        render(f.arena(), id)
    }

    #[test]
    fn additive_and_multiplicative_identities() {
        let arena = NodeArena::new();
        let f = NodeFactory::new(&arena);
        let x = f.var("x");

        assert_eq!(rendered(&f, simplify(&f, f.add(x, f.num(0.0))).unwrap()), "x");
        assert_eq!(rendered(&f, simplify(&f, f.add(f.num(0.0), x)).unwrap()), "x");
        assert_eq!(rendered(&f, simplify(&f, f.mul(x, f.num(1.0))).unwrap()), "x");
        assert_eq!(rendered(&f, simplify(&f, f.mul(x, f.num(0.0))).unwrap()), "0");
        assert_eq!(rendered(&f, simplify(&f, f.mul(f.num(0.0), x)).unwrap()), "0");
    }

    #[test]
    fn subtraction_of_equal_trees_is_zero() {
        let arena = NodeArena::new();
        let f = NodeFactory::new(&arena);
        let a = f.mul(f.num(2.0), f.sin(f.var("x")));
        let b = f.mul(f.num(2.0), f.sin(f.var("x")));
        assert_eq!(rendered(&f, simplify(&f, f.sub(a, b)).unwrap()), "0");
    }

    #[test]
    fn power_identities() {
        let arena = NodeArena::new();
        let f = NodeFactory::new(&arena);
        let x = f.var("x");

        assert_eq!(rendered(&f, simplify(&f, f.pow(x, f.num(0.0))).unwrap()), "1");
        assert_eq!(rendered(&f, simplify(&f, f.pow(x, f.num(1.0))).unwrap()), "x");
        assert_eq!(rendered(&f, simplify(&f, f.pow(f.num(0.0), x)).unwrap()), "0");
        assert_eq!(rendered(&f, simplify(&f, f.pow(f.num(1.0), x)).unwrap()), "1");
        assert_eq!(
            rendered(&f, simplify(&f, f.pow(f.num(2.0), f.num(10.0))).unwrap()),
            "1024"
        );
    }

    #[test]
    fn logarithm_identities() {
        let arena = NodeArena::new();
        let f = NodeFactory::new(&arena);

        assert_eq!(rendered(&f, simplify(&f, f.ln(f.num(1.0))).unwrap()), "0");

        let base = f.add(f.var("b"), f.num(1.0));
        let operand = f.add(f.var("b"), f.num(1.0));
        assert_eq!(
            rendered(&f, simplify(&f, f.log(base, operand)).unwrap()),
            "1"
        );
    }

    #[test]
    fn folding_division_by_zero_is_an_error() {
        let arena = NodeArena::new();
        let f = NodeFactory::new(&arena);
        let expr = f.div(f.num(1.0), f.sub(f.num(3.0), f.num(3.0)));
        assert!(matches!(
            simplify(&f, expr),
            Err(EngineError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn equality_of_equal_sides_collapses_to_true() {
        let arena = NodeArena::new();
        let f = NodeFactory::new(&arena);
        let lhs = f.add(f.var("x"), f.num(2.0));
        let rhs = f.add(f.var("x"), f.add(f.num(1.0), f.num(1.0)));
        let eq = f.eq(lhs, rhs);
        assert_eq!(rendered(&f, simplify(&f, eq).unwrap()), "1");
    }
}
