//! Expression tree nodes.
//!
//! A `Node` is one vertex of an expression tree. Children are `NodeId`
//! handles into the [`NodeArena`](crate::arena::NodeArena) that owns every
//! node; nothing here owns anything. Nodes are immutable once constructed:
//! every transformation builds new nodes through a
//! [`NodeFactory`](crate::factory::NodeFactory) instead of mutating in place.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

/// Evaluation environment: variable name to value.
///
/// Variables absent from the environment evaluate to `0.0`, never an error.
/// This is a legacy convention and deliberately preserved.
pub type Env = FxHashMap<String, f64>;

/// Host-supplied pure function body for [`Node::Function`].
///
/// The engine calls it with exactly the declared number of arguments, in
/// left-to-right argument order, and never retains state across calls.
#[derive(Clone)]
pub struct FunctionCallback(Arc<dyn Fn(&[f64]) -> f64>);

impl FunctionCallback {
    pub fn new(f: impl Fn(&[f64]) -> f64 + 'static) -> Self {
        FunctionCallback(Arc::new(f))
    }

    pub fn call(&self, args: &[f64]) -> f64 {
        (self.0)(args)
    }
}

impl fmt::Debug for FunctionCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FunctionCallback")
    }
}

/// Handle to a node stored in a `NodeArena`.
///
/// Plain index; only meaningful together with the arena that produced it.
/// Handles stay valid for the whole arena lifetime; no node is ever
/// individually freed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// The closed set of expression node kinds.
///
/// Every operation over trees (`evaluate`, `render`, `simplify`, ...) is an
/// exhaustive match over this enum, so adding a kind is a compile-checked
/// exercise.
#[derive(Clone, Debug)]
pub enum Node {
    /// Constant number.
    Number(f64),
    /// Named variable, resolved against an [`Env`] during evaluation.
    Variable(Arc<str>),

    // Unary kinds.
    Sin(NodeId),
    Cos(NodeId),
    Tan(NodeId),
    /// Natural logarithm.
    Ln(NodeId),

    // Binary kinds.
    Add(NodeId, NodeId),
    Sub(NodeId, NodeId),
    Mul(NodeId, NodeId),
    Div(NodeId, NodeId),
    /// `base ^ exponent`.
    Pow(NodeId, NodeId),
    /// Logarithm with an explicit base: `log(base, operand)`.
    Log { base: NodeId, operand: NodeId },

    /// Host-supplied n-ary function. The argument count is validated against
    /// `arity` at construction and again at every evaluation.
    Function {
        name: Arc<str>,
        arity: usize,
        args: Vec<NodeId>,
        callback: FunctionCallback,
    },

    /// The equation `lhs == rhs`.
    Equality(NodeId, NodeId),
}

impl Node {
    /// The numeric value if this node is a `Number` leaf.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Node::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The variable name if this node is a `Variable` leaf.
    pub fn as_variable(&self) -> Option<&str> {
        match self {
            Node::Variable(name) => Some(name.as_ref()),
            _ => None,
        }
    }

    pub fn is_number(&self, value: f64) -> bool {
        matches!(self, Node::Number(n) if *n == value)
    }
}
