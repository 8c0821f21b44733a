//! Numeric evaluation of expression trees.

use crate::arena::NodeArena;
use crate::display::render;
use crate::error::EngineError;
use crate::node::{Env, Node, NodeId};

/// Tolerance when the two sides of an equation are compared numerically.
pub const EQUALITY_TOLERANCE: f64 = 1e-9;

/// Evaluate the tree rooted at `id` against `env`.
///
/// Variables missing from `env` evaluate to `0.0` (legacy convention).
/// Domain violations (division by zero, logarithms of non-positive values,
/// zero to a non-positive power, a function arity mismatch) fail fast.
pub fn evaluate(arena: &NodeArena, id: NodeId, env: &Env) -> Result<f64, EngineError> {
    match arena.node(id) {
        Node::Number(n) => Ok(n),
        Node::Variable(name) => Ok(env.get(name.as_ref()).copied().unwrap_or(0.0)),

        Node::Sin(a) => Ok(evaluate(arena, a, env)?.sin()),
        Node::Cos(a) => Ok(evaluate(arena, a, env)?.cos()),
        Node::Tan(a) => Ok(evaluate(arena, a, env)?.tan()),
        Node::Ln(a) => {
            let operand = evaluate(arena, a, env)?;
            if operand <= 0.0 {
                return Err(EngineError::LnDomain { operand });
            }
            Ok(operand.ln())
        }

        Node::Add(l, r) => Ok(evaluate(arena, l, env)? + evaluate(arena, r, env)?),
        Node::Sub(l, r) => Ok(evaluate(arena, l, env)? - evaluate(arena, r, env)?),
        Node::Mul(l, r) => Ok(evaluate(arena, l, env)? * evaluate(arena, r, env)?),
        Node::Div(l, r) => {
            let denominator = evaluate(arena, r, env)?;
            if denominator == 0.0 {
                return Err(EngineError::DivisionByZero {
                    expr: render(arena, id),
                });
            }
            Ok(evaluate(arena, l, env)? / denominator)
        }
        Node::Pow(b, e) => {
            let base = evaluate(arena, b, env)?;
            let exponent = evaluate(arena, e, env)?;
            if base == 0.0 && exponent <= 0.0 {
                return Err(EngineError::ZeroPower { exponent });
            }
            Ok(base.powf(exponent))
        }
        Node::Log { base, operand } => {
            let base = evaluate(arena, base, env)?;
            let operand = evaluate(arena, operand, env)?;
            if base <= 0.0 || base == 1.0 || operand <= 0.0 {
                return Err(EngineError::LogDomain { base, operand });
            }
            Ok(operand.ln() / base.ln())
        }

        Node::Function {
            name,
            arity,
            args,
            callback,
        } => {
            // The count cannot actually change post-construction; the check
            // is kept as a hard invariant guard.
            if args.len() != arity {
                return Err(EngineError::ArityMismatch {
                    name: name.to_string(),
                    expected: arity,
                    got: args.len(),
                });
            }
            let mut values = Vec::with_capacity(args.len());
            for &arg in &args {
                values.push(evaluate(arena, arg, env)?);
            }
            Ok(callback.call(&values))
        }

        Node::Equality(l, r) => {
            let left = evaluate(arena, l, env)?;
            let right = evaluate(arena, r, env)?;
            Ok(if (left - right).abs() < EQUALITY_TOLERANCE {
                1.0
            } else {
                0.0
            })
        }
    }
}
