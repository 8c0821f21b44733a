//! Symbolic differentiation.

use crate::error::EngineError;
use crate::factory::NodeFactory;
use crate::node::{Node, NodeId};

/// Differentiate the tree rooted at `id` with respect to `var`.
///
/// Standard closed-form rules: sum/difference, product, quotient and chain
/// rules; the power rule splits on constant versus general exponent. The
/// result is not simplified; run [`simplify`](crate::simplify::simplify)
/// afterwards if a tidy form matters.
///
/// Differentiating a [`Node::Function`] is an error: the engine cannot see
/// inside a host callback, and a silently wrong derivative is worse than a
/// loud failure.
pub fn derivative(f: &NodeFactory, id: NodeId, var: &str) -> Result<NodeId, EngineError> {
    match f.node(id) {
        Node::Number(_) => Ok(f.num(0.0)),
        Node::Variable(name) => Ok(f.num(if name.as_ref() == var { 1.0 } else { 0.0 })),

        Node::Add(l, r) => {
            let dl = derivative(f, l, var)?;
            let dr = derivative(f, r, var)?;
            Ok(f.add(dl, dr))
        }
        Node::Sub(l, r) => {
            let dl = derivative(f, l, var)?;
            let dr = derivative(f, r, var)?;
            Ok(f.sub(dl, dr))
        }

        // (fg)' = f'g + fg'
        Node::Mul(l, r) => {
            let dl = derivative(f, l, var)?;
            let dr = derivative(f, r, var)?;
            Ok(f.add(f.mul(dl, r), f.mul(l, dr)))
        }

        // (f/g)' = (f'g - fg') / g²
        Node::Div(l, r) => {
            let dl = derivative(f, l, var)?;
            let dr = derivative(f, r, var)?;
            let numerator = f.sub(f.mul(dl, r), f.mul(l, dr));
            let denominator = f.mul(r, r);
            Ok(f.div(numerator, denominator))
        }

        Node::Pow(b, e) => {
            if let Some(n) = f.node(e).as_number() {
                // Power rule: (f^n)' = n * f^(n-1) * f'
                let db = derivative(f, b, var)?;
                let scaled = f.mul(f.num(n), f.pow(b, f.num(n - 1.0)));
                Ok(f.mul(scaled, db))
            } else {
                // General case: (f^g)' = f^g * (g' ln f + g f'/f)
                let db = derivative(f, b, var)?;
                let de = derivative(f, e, var)?;
                let term1 = f.mul(de, f.ln(b));
                let term2 = f.mul(e, f.div(db, b));
                Ok(f.mul(f.pow(b, e), f.add(term1, term2)))
            }
        }

        Node::Sin(a) => {
            let da = derivative(f, a, var)?;
            Ok(f.mul(f.cos(a), da))
        }
        Node::Cos(a) => {
            let da = derivative(f, a, var)?;
            Ok(f.mul(f.mul(f.num(-1.0), f.sin(a)), da))
        }
        // tan' = 1/cos² · dx
        Node::Tan(a) => {
            let da = derivative(f, a, var)?;
            let sec2 = f.div(f.num(1.0), f.mul(f.cos(a), f.cos(a)));
            Ok(f.mul(sec2, da))
        }
        Node::Ln(a) => Ok(f.div(f.num(1.0), a)),
        // log_b(x)' = 1 / (x ln b)
        Node::Log { base, operand } => Ok(f.div(f.num(1.0), f.mul(operand, f.ln(base)))),

        Node::Function { name, .. } => Err(EngineError::unsupported(format!(
            "cannot differentiate host function {}",
            name
        ))),

        Node::Equality(l, r) => {
            let dl = derivative(f, l, var)?;
            let dr = derivative(f, r, var)?;
            Ok(f.eq(dl, dr))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::NodeArena;
    use crate::display::render;

    #[test]
    fn variable_rule() {
        let arena = NodeArena::new();
        let f = NodeFactory::new(&arena);
        let x = f.var("x");
        assert_eq!(render(&arena, derivative(&f, x, "x").unwrap()), "1");
        assert_eq!(render(&arena, derivative(&f, x, "y").unwrap()), "0");
    }

    #[test]
    fn power_rule_with_constant_exponent() {
        let arena = NodeArena::new();
        let f = NodeFactory::new(&arena);
        let expr = f.pow(f.var("x"), f.num(3.0));
        let d = derivative(&f, expr, "x").unwrap();
        assert_eq!(render(&arena, d), "((3 * (x ^ 2)) * 1)");
    }

    #[test]
    fn function_nodes_refuse_differentiation() {
        let arena = NodeArena::new();
        let f = NodeFactory::new(&arena);
        let cb = crate::node::FunctionCallback::new(|args| args[0]);
        let call = f.func("blackbox", 1, vec![f.var("x")], cb).unwrap();
        assert!(matches!(
            derivative(&f, call, "x"),
            Err(EngineError::UnsupportedOperation(_))
        ));
    }
}
