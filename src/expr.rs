//! Ergonomic expression handles with operator overloading.
//!
//! An [`Expr`] couples a node handle with the factory that built it, so
//! expressions compose with ordinary Rust operators:
//!
//! ```
//! use symtree::{Expr, NodeArena, NodeFactory};
//!
//! let arena = NodeArena::new();
//! let f = NodeFactory::canonicalizing(&arena);
//! let x = Expr::var(&f, "x");
//! let parabola = x * x + 2.0 * x + 1.0;
//! assert_eq!(parabola.to_string(), "(((x * x) + (2 * x)) + 1)");
//! ```

use std::fmt;
use std::ops;

use crate::derivative::derivative;
use crate::display::render;
use crate::error::EngineError;
use crate::eval::evaluate;
use crate::factory::NodeFactory;
use crate::node::{Env, NodeId};
use crate::simplify::simplify;
use crate::solver::solve_equation;
use crate::subst::substitute;
use crate::trace::Trace;

/// A node handle bound to its factory. Cheap to copy.
#[derive(Clone, Copy)]
pub struct Expr<'a> {
    id: NodeId,
    factory: &'a NodeFactory<'a>,
}

impl<'a> Expr<'a> {
    /// Wrap an existing handle.
    pub fn new(factory: &'a NodeFactory<'a>, id: NodeId) -> Self {
        Expr { id, factory }
    }

    pub fn num(factory: &'a NodeFactory<'a>, value: f64) -> Self {
        Expr::new(factory, factory.num(value))
    }

    pub fn var(factory: &'a NodeFactory<'a>, name: &str) -> Self {
        Expr::new(factory, factory.var(name))
    }

    pub fn id(self) -> NodeId {
        self.id
    }

    fn wrap(self, id: NodeId) -> Self {
        Expr::new(self.factory, id)
    }

    pub fn pow(self, exponent: Expr<'a>) -> Self {
        self.wrap(self.factory.pow(self.id, exponent.id))
    }

    pub fn powf(self, exponent: f64) -> Self {
        self.wrap(self.factory.pow(self.id, self.factory.num(exponent)))
    }

    pub fn sin(self) -> Self {
        self.wrap(self.factory.sin(self.id))
    }

    pub fn cos(self) -> Self {
        self.wrap(self.factory.cos(self.id))
    }

    pub fn tan(self) -> Self {
        self.wrap(self.factory.tan(self.id))
    }

    pub fn ln(self) -> Self {
        self.wrap(self.factory.ln(self.id))
    }

    /// `log` of this expression in the given base.
    pub fn log(self, base: Expr<'a>) -> Self {
        self.wrap(self.factory.log(base.id, self.id))
    }

    /// The equation `self == rhs`.
    pub fn equals(self, rhs: Expr<'a>) -> Self {
        self.wrap(self.factory.eq(self.id, rhs.id))
    }

    pub fn evaluate(self, env: &Env) -> Result<f64, EngineError> {
        evaluate(self.factory.arena(), self.id, env)
    }

    pub fn simplified(self) -> Result<Self, EngineError> {
        Ok(self.wrap(simplify(self.factory, self.id)?))
    }

    pub fn derivative(self, var: &str) -> Result<Self, EngineError> {
        Ok(self.wrap(derivative(self.factory, self.id, var)?))
    }

    pub fn substitute(self, var: &str, replacement: Expr<'a>) -> Self {
        self.wrap(substitute(self.factory, self.id, var, replacement.id))
    }

    /// Solve this equation for `var`. See
    /// [`solve_equation`](crate::solver::solve_equation).
    pub fn solve_for(self, var: &str, trace: Option<&Trace>) -> Result<Vec<f64>, EngineError> {
        solve_equation(self.factory, self.id, var, trace)
    }
}

impl fmt::Display for Expr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self.factory.arena(), self.id))
    }
}

impl fmt::Debug for Expr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expr({})", self)
    }
}

impl<'a> ops::Add for Expr<'a> {
    type Output = Expr<'a>;
    fn add(self, rhs: Expr<'a>) -> Expr<'a> {
        self.wrap(self.factory.add(self.id, rhs.id))
    }
}

impl<'a> ops::Sub for Expr<'a> {
    type Output = Expr<'a>;
    fn sub(self, rhs: Expr<'a>) -> Expr<'a> {
        self.wrap(self.factory.sub(self.id, rhs.id))
    }
}

impl<'a> ops::Mul for Expr<'a> {
    type Output = Expr<'a>;
    fn mul(self, rhs: Expr<'a>) -> Expr<'a> {
        self.wrap(self.factory.mul(self.id, rhs.id))
    }
}

impl<'a> ops::Div for Expr<'a> {
    type Output = Expr<'a>;
    fn div(self, rhs: Expr<'a>) -> Expr<'a> {
        self.wrap(self.factory.div(self.id, rhs.id))
    }
}

impl<'a> ops::Add<f64> for Expr<'a> {
    type Output = Expr<'a>;
    fn add(self, rhs: f64) -> Expr<'a> {
        self.wrap(self.factory.add(self.id, self.factory.num(rhs)))
    }
}

impl<'a> ops::Sub<f64> for Expr<'a> {
    type Output = Expr<'a>;
    fn sub(self, rhs: f64) -> Expr<'a> {
        self.wrap(self.factory.sub(self.id, self.factory.num(rhs)))
    }
}

impl<'a> ops::Mul<f64> for Expr<'a> {
    type Output = Expr<'a>;
    fn mul(self, rhs: f64) -> Expr<'a> {
        self.wrap(self.factory.mul(self.id, self.factory.num(rhs)))
    }
}

impl<'a> ops::Div<f64> for Expr<'a> {
    type Output = Expr<'a>;
    fn div(self, rhs: f64) -> Expr<'a> {
        self.wrap(self.factory.div(self.id, self.factory.num(rhs)))
    }
}

impl<'a> ops::Add<Expr<'a>> for f64 {
    type Output = Expr<'a>;
    fn add(self, rhs: Expr<'a>) -> Expr<'a> {
        rhs.wrap(rhs.factory.add(rhs.factory.num(self), rhs.id))
    }
}

impl<'a> ops::Sub<Expr<'a>> for f64 {
    type Output = Expr<'a>;
    fn sub(self, rhs: Expr<'a>) -> Expr<'a> {
        rhs.wrap(rhs.factory.sub(rhs.factory.num(self), rhs.id))
    }
}

impl<'a> ops::Mul<Expr<'a>> for f64 {
    type Output = Expr<'a>;
    fn mul(self, rhs: Expr<'a>) -> Expr<'a> {
        rhs.wrap(rhs.factory.mul(rhs.factory.num(self), rhs.id))
    }
}

impl<'a> ops::Div<Expr<'a>> for f64 {
    type Output = Expr<'a>;
    fn div(self, rhs: Expr<'a>) -> Expr<'a> {
        rhs.wrap(rhs.factory.div(rhs.factory.num(self), rhs.id))
    }
}

impl<'a> ops::Neg for Expr<'a> {
    type Output = Expr<'a>;
    fn neg(self) -> Expr<'a> {
        self.wrap(self.factory.mul(self.factory.num(-1.0), self.id))
    }
}
