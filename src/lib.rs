//! symtree: a symbolic expression engine.
//!
//! Expression trees live in a [`NodeArena`] and are addressed by [`NodeId`]
//! handles; a [`NodeFactory`] builds nodes and can canonicalize structurally
//! identical subtrees into one. On top of the tree sit the classic symbolic
//! operations (evaluation, simplification, differentiation, substitution), a
//! rule-driven [`Rewriter`] with common-subexpression elimination, and an
//! equation [`solver`] that tries a linear fast path before falling back to
//! polynomial root finding.
//!
//! The [`Expr`] wrapper adds operator overloading for ergonomic tree
//! construction, and [`OwnedNode`] offers a self-contained boxed tree for
//! callers that do not want to manage an arena.

pub mod arena;
pub mod builder;
pub mod compare;
pub mod derivative;
pub mod display;
pub mod error;
pub mod eval;
pub mod expr;
pub mod factory;
pub mod node;
pub mod owned;
pub mod rewrite;
pub mod simplify;
pub mod solver;
pub mod subst;
pub mod trace;

#[cfg(test)]
mod tests;

pub use arena::NodeArena;
pub use builder::{build_from_postfix, Token, TokenKind};
pub use compare::nodes_equal;
pub use derivative::derivative;
pub use display::{render, NodeDisplay};
pub use error::EngineError;
pub use eval::{evaluate, EQUALITY_TOLERANCE};
pub use expr::Expr;
pub use factory::NodeFactory;
pub use node::{Env, FunctionCallback, Node, NodeId};
pub use owned::OwnedNode;
pub use rewrite::{default_rules, CseRewriter, RewriteRule, Rewriter};
pub use simplify::simplify;
pub use solver::{
    extract_linear_coeffs, extract_polynomial, find_real_roots, solve_equation, solve_linear,
    LinearSolve, Polynomial,
};
pub use subst::{deep_clone, substitute};
pub use trace::{Trace, TraceStep};
