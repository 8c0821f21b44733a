//! Sparse polynomial extraction.

use rustc_hash::FxHashMap;

use crate::arena::NodeArena;
use crate::display::render;
use crate::error::EngineError;
use crate::eval::evaluate;
use crate::node::{Env, Node, NodeId};

/// A univariate polynomial as a sparse degree-to-coefficient map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polynomial {
    terms: FxHashMap<u32, f64>,
}

impl Polynomial {
    pub fn constant(value: f64) -> Self {
        Polynomial::default().plus_term(0, value)
    }

    pub fn term(degree: u32, coefficient: f64) -> Self {
        Polynomial::default().plus_term(degree, coefficient)
    }

    fn plus_term(mut self, degree: u32, coefficient: f64) -> Self {
        if coefficient != 0.0 {
            *self.terms.entry(degree).or_insert(0.0) += coefficient;
        }
        self
    }

    pub fn add(&self, other: &Polynomial) -> Polynomial {
        let mut out = self.clone();
        for (&degree, &coefficient) in &other.terms {
            *out.terms.entry(degree).or_insert(0.0) += coefficient;
        }
        out
    }

    pub fn sub(&self, other: &Polynomial) -> Polynomial {
        let mut out = self.clone();
        for (&degree, &coefficient) in &other.terms {
            *out.terms.entry(degree).or_insert(0.0) -= coefficient;
        }
        out
    }

    pub fn mul(&self, other: &Polynomial) -> Polynomial {
        let mut out = Polynomial::default();
        for (&d1, &c1) in &self.terms {
            for (&d2, &c2) in &other.terms {
                *out.terms.entry(d1 + d2).or_insert(0.0) += c1 * c2;
            }
        }
        out
    }

    pub fn scale(&self, factor: f64) -> Polynomial {
        let mut out = Polynomial::default();
        for (&degree, &coefficient) in &self.terms {
            out.terms.insert(degree, coefficient * factor);
        }
        out
    }

    /// Highest degree with a non-zero coefficient; zero for an empty map.
    pub fn degree(&self) -> u32 {
        self.terms
            .iter()
            .filter(|(_, &c)| c != 0.0)
            .map(|(&d, _)| d)
            .max()
            .unwrap_or(0)
    }

    /// Dense coefficient vector in ascending degree order,
    /// `[c0, c1, ..., c_degree]`.
    pub fn coefficients(&self) -> Vec<f64> {
        let mut out = vec![0.0; self.degree() as usize + 1];
        for (&degree, &coefficient) in &self.terms {
            if coefficient != 0.0 {
                out[degree as usize] = coefficient;
            }
        }
        out
    }
}

/// Extract the tree rooted at `id` as a polynomial in `var`.
///
/// Strict about what counts as a constant: a subtree mentioning any variable
/// other than `var` is a [`EngineError::NonConstantTerm`], not a silent zero.
/// Transcendentals, general powers and divisions by the unknown are
/// unsupported.
pub fn extract_polynomial(
    arena: &NodeArena,
    id: NodeId,
    var: &str,
) -> Result<Polynomial, EngineError> {
    if !contains_var(arena, id, var) {
        return Ok(Polynomial::constant(fold_constant(arena, id)?));
    }
    match arena.node(id) {
        Node::Variable(name) if name.as_ref() == var => Ok(Polynomial::term(1, 1.0)),

        Node::Add(l, r) => Ok(extract_polynomial(arena, l, var)?
            .add(&extract_polynomial(arena, r, var)?)),
        Node::Sub(l, r) => Ok(extract_polynomial(arena, l, var)?
            .sub(&extract_polynomial(arena, r, var)?)),
        Node::Mul(l, r) => Ok(extract_polynomial(arena, l, var)?
            .mul(&extract_polynomial(arena, r, var)?)),

        Node::Div(l, r) => {
            if contains_var(arena, r, var) {
                return Err(EngineError::unsupported(format!(
                    "division by an expression in {}: {}",
                    var,
                    render(arena, id)
                )));
            }
            let denominator = fold_constant(arena, r)?;
            if denominator == 0.0 {
                return Err(EngineError::DivisionByZero {
                    expr: render(arena, id),
                });
            }
            Ok(extract_polynomial(arena, l, var)?.scale(1.0 / denominator))
        }

        Node::Pow(base, exponent) => {
            if contains_var(arena, exponent, var) {
                return Err(EngineError::unsupported(format!(
                    "exponent depends on {}: {}",
                    var,
                    render(arena, id)
                )));
            }
            let e = fold_constant(arena, exponent)?;
            if e < 0.0 || e.fract() != 0.0 {
                return Err(EngineError::unsupported(format!(
                    "non-natural exponent {} in {}",
                    e,
                    render(arena, id)
                )));
            }
            let base = extract_polynomial(arena, base, var)?;
            let mut out = Polynomial::constant(1.0);
            for _ in 0..e as u32 {
                out = out.mul(&base);
            }
            Ok(out)
        }

        // Anything else wrapping the unknown is outside polynomial territory.
        _ => Err(EngineError::unsupported(format!(
            "not polynomial in {}: {}",
            var,
            render(arena, id)
        ))),
    }
}

/// Fold a subtree known to be free of the unknown down to a number.
///
/// Any variable at all makes the subtree non-constant (variables must never
/// leak into coefficients by reading as zero).
fn fold_constant(arena: &NodeArena, id: NodeId) -> Result<f64, EngineError> {
    if contains_any_var(arena, id) {
        return Err(EngineError::NonConstantTerm {
            expr: render(arena, id),
        });
    }
    evaluate(arena, id, &Env::default())
}

fn contains_var(arena: &NodeArena, id: NodeId, var: &str) -> bool {
    any_var(arena, id, &mut |name| name == var)
}

fn contains_any_var(arena: &NodeArena, id: NodeId) -> bool {
    any_var(arena, id, &mut |_| true)
}

fn any_var(arena: &NodeArena, id: NodeId, pred: &mut impl FnMut(&str) -> bool) -> bool {
    match arena.node(id) {
        Node::Number(_) => false,
        Node::Variable(name) => pred(name.as_ref()),
        Node::Sin(a) | Node::Cos(a) | Node::Tan(a) | Node::Ln(a) => any_var(arena, a, pred),
        Node::Add(l, r)
        | Node::Sub(l, r)
        | Node::Mul(l, r)
        | Node::Div(l, r)
        | Node::Pow(l, r)
        | Node::Log {
            base: l,
            operand: r,
        }
        | Node::Equality(l, r) => any_var(arena, l, pred) || any_var(arena, r, pred),
        Node::Function { args, .. } => args.iter().any(|&a| any_var(arena, a, pred)),
    }
}
