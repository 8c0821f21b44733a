//! Box-owned expression trees.
//!
//! `OwnedNode` is the self-contained counterpart of the arena tree: each node
//! owns its children through `Box`, so a tree can outlive any arena and be
//! moved across threads of ownership freely. It supports construction,
//! evaluation and display; for everything else (simplification, derivatives,
//! solving) convert into an arena with [`OwnedNode::into_arena`].

use std::fmt;
use std::sync::Arc;

use crate::error::EngineError;
use crate::factory::NodeFactory;
use crate::node::{Env, FunctionCallback, NodeId};

#[derive(Clone, Debug)]
pub enum OwnedNode {
    Number(f64),
    Variable(Arc<str>),

    Sin(Box<OwnedNode>),
    Cos(Box<OwnedNode>),
    Tan(Box<OwnedNode>),
    Ln(Box<OwnedNode>),

    Add(Box<OwnedNode>, Box<OwnedNode>),
    Sub(Box<OwnedNode>, Box<OwnedNode>),
    Mul(Box<OwnedNode>, Box<OwnedNode>),
    Div(Box<OwnedNode>, Box<OwnedNode>),
    Pow(Box<OwnedNode>, Box<OwnedNode>),
    Log {
        base: Box<OwnedNode>,
        operand: Box<OwnedNode>,
    },

    Function {
        name: Arc<str>,
        arity: usize,
        args: Vec<OwnedNode>,
        callback: FunctionCallback,
    },

    Equality(Box<OwnedNode>, Box<OwnedNode>),
}

impl OwnedNode {
    pub fn num(value: f64) -> Self {
        OwnedNode::Number(value)
    }

    pub fn var(name: &str) -> Self {
        OwnedNode::Variable(Arc::from(name))
    }

    pub fn sin(operand: OwnedNode) -> Self {
        OwnedNode::Sin(Box::new(operand))
    }

    pub fn cos(operand: OwnedNode) -> Self {
        OwnedNode::Cos(Box::new(operand))
    }

    pub fn tan(operand: OwnedNode) -> Self {
        OwnedNode::Tan(Box::new(operand))
    }

    pub fn ln(operand: OwnedNode) -> Self {
        OwnedNode::Ln(Box::new(operand))
    }

    pub fn add(left: OwnedNode, right: OwnedNode) -> Self {
        OwnedNode::Add(Box::new(left), Box::new(right))
    }

    pub fn sub(left: OwnedNode, right: OwnedNode) -> Self {
        OwnedNode::Sub(Box::new(left), Box::new(right))
    }

    pub fn mul(left: OwnedNode, right: OwnedNode) -> Self {
        OwnedNode::Mul(Box::new(left), Box::new(right))
    }

    pub fn div(left: OwnedNode, right: OwnedNode) -> Self {
        OwnedNode::Div(Box::new(left), Box::new(right))
    }

    pub fn pow(base: OwnedNode, exponent: OwnedNode) -> Self {
        OwnedNode::Pow(Box::new(base), Box::new(exponent))
    }

    pub fn log(base: OwnedNode, operand: OwnedNode) -> Self {
        OwnedNode::Log {
            base: Box::new(base),
            operand: Box::new(operand),
        }
    }

    pub fn equality(left: OwnedNode, right: OwnedNode) -> Self {
        OwnedNode::Equality(Box::new(left), Box::new(right))
    }

    /// Build a function node, validating the argument count against `arity`.
    pub fn func(
        name: &str,
        arity: usize,
        args: Vec<OwnedNode>,
        callback: FunctionCallback,
    ) -> Result<Self, EngineError> {
        if args.len() != arity {
            return Err(EngineError::ArityMismatch {
                name: name.to_string(),
                expected: arity,
                got: args.len(),
            });
        }
        Ok(OwnedNode::Function {
            name: Arc::from(name),
            arity,
            args,
            callback,
        })
    }

    /// Evaluate against `env` with the same semantics as the arena
    /// [`evaluate`](crate::eval::evaluate): missing variables read as zero,
    /// domain violations fail fast.
    pub fn evaluate(&self, env: &Env) -> Result<f64, EngineError> {
        match self {
            OwnedNode::Number(n) => Ok(*n),
            OwnedNode::Variable(name) => Ok(env.get(name.as_ref()).copied().unwrap_or(0.0)),

            OwnedNode::Sin(a) => Ok(a.evaluate(env)?.sin()),
            OwnedNode::Cos(a) => Ok(a.evaluate(env)?.cos()),
            OwnedNode::Tan(a) => Ok(a.evaluate(env)?.tan()),
            OwnedNode::Ln(a) => {
                let operand = a.evaluate(env)?;
                if operand <= 0.0 {
                    return Err(EngineError::LnDomain { operand });
                }
                Ok(operand.ln())
            }

            OwnedNode::Add(l, r) => Ok(l.evaluate(env)? + r.evaluate(env)?),
            OwnedNode::Sub(l, r) => Ok(l.evaluate(env)? - r.evaluate(env)?),
            OwnedNode::Mul(l, r) => Ok(l.evaluate(env)? * r.evaluate(env)?),
            OwnedNode::Div(l, r) => {
                let denominator = r.evaluate(env)?;
                if denominator == 0.0 {
                    return Err(EngineError::DivisionByZero {
                        expr: self.to_string(),
                    });
                }
                Ok(l.evaluate(env)? / denominator)
            }
            OwnedNode::Pow(b, e) => {
                let base = b.evaluate(env)?;
                let exponent = e.evaluate(env)?;
                if base == 0.0 && exponent <= 0.0 {
                    return Err(EngineError::ZeroPower { exponent });
                }
                Ok(base.powf(exponent))
            }
            OwnedNode::Log { base, operand } => {
                let base = base.evaluate(env)?;
                let operand = operand.evaluate(env)?;
                if base <= 0.0 || base == 1.0 || operand <= 0.0 {
                    return Err(EngineError::LogDomain { base, operand });
                }
                Ok(operand.ln() / base.ln())
            }

            OwnedNode::Function {
                name,
                arity,
                args,
                callback,
            } => {
                if args.len() != *arity {
                    return Err(EngineError::ArityMismatch {
                        name: name.to_string(),
                        expected: *arity,
                        got: args.len(),
                    });
                }
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(arg.evaluate(env)?);
                }
                Ok(callback.call(&values))
            }

            OwnedNode::Equality(l, r) => {
                let left = l.evaluate(env)?;
                let right = r.evaluate(env)?;
                Ok(if (left - right).abs() < crate::eval::EQUALITY_TOLERANCE {
                    1.0
                } else {
                    0.0
                })
            }
        }
    }

    /// Copy this tree into `f`'s arena, returning the root handle.
    pub fn into_arena(&self, f: &NodeFactory) -> NodeId {
        match self {
            OwnedNode::Number(n) => f.num(*n),
            OwnedNode::Variable(name) => f.var(name.as_ref()),

            OwnedNode::Sin(a) => {
                let a = a.into_arena(f);
                f.sin(a)
            }
            OwnedNode::Cos(a) => {
                let a = a.into_arena(f);
                f.cos(a)
            }
            OwnedNode::Tan(a) => {
                let a = a.into_arena(f);
                f.tan(a)
            }
            OwnedNode::Ln(a) => {
                let a = a.into_arena(f);
                f.ln(a)
            }

            OwnedNode::Add(l, r) => {
                let (l, r) = (l.into_arena(f), r.into_arena(f));
                f.add(l, r)
            }
            OwnedNode::Sub(l, r) => {
                let (l, r) = (l.into_arena(f), r.into_arena(f));
                f.sub(l, r)
            }
            OwnedNode::Mul(l, r) => {
                let (l, r) = (l.into_arena(f), r.into_arena(f));
                f.mul(l, r)
            }
            OwnedNode::Div(l, r) => {
                let (l, r) = (l.into_arena(f), r.into_arena(f));
                f.div(l, r)
            }
            OwnedNode::Pow(b, e) => {
                let (b, e) = (b.into_arena(f), e.into_arena(f));
                f.pow(b, e)
            }
            OwnedNode::Log { base, operand } => {
                let (base, operand) = (base.into_arena(f), operand.into_arena(f));
                f.log(base, operand)
            }

            OwnedNode::Function {
                name,
                arity,
                args,
                callback,
            } => {
                let args = args.iter().map(|a| a.into_arena(f)).collect();
                f.func_rebuilt(name.clone(), *arity, args, callback.clone())
            }

            OwnedNode::Equality(l, r) => {
                let (l, r) = (l.into_arena(f), r.into_arena(f));
                f.eq(l, r)
            }
        }
    }
}

impl fmt::Display for OwnedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OwnedNode::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            OwnedNode::Variable(name) => f.write_str(name),
            OwnedNode::Sin(a) => write!(f, "sin({})", a),
            OwnedNode::Cos(a) => write!(f, "cos({})", a),
            OwnedNode::Tan(a) => write!(f, "tan({})", a),
            OwnedNode::Ln(a) => write!(f, "ln({})", a),
            OwnedNode::Add(l, r) => write!(f, "({} + {})", l, r),
            OwnedNode::Sub(l, r) => write!(f, "({} - {})", l, r),
            OwnedNode::Mul(l, r) => write!(f, "({} * {})", l, r),
            OwnedNode::Div(l, r) => write!(f, "({} / {})", l, r),
            OwnedNode::Pow(b, e) => write!(f, "({} ^ {})", b, e),
            OwnedNode::Log { base, operand } => write!(f, "log({}, {})", base, operand),
            OwnedNode::Function { name, args, .. } => {
                let rendered: Vec<String> = args.iter().map(|a| a.to_string()).collect();
                write!(f, "{}({})", name, rendered.join(", "))
            }
            OwnedNode::Equality(l, r) => write!(f, "({} == {})", l, r),
        }
    }
}
