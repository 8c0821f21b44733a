//! Node construction.
//!
//! `NodeFactory` is the only construction surface the tree algorithms touch.
//! It wraps one arena and, optionally, a canonicalization cache that interns
//! nodes by a structural key, so structurally identical subexpressions built
//! through the same factory collapse to one shared node.

use std::cell::RefCell;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::arena::NodeArena;
use crate::error::EngineError;
use crate::node::{FunctionCallback, Node, NodeId};

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
enum UnaryTag {
    Sin,
    Cos,
    Tan,
    Ln,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
enum BinaryTag {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Log,
}

/// Structural interning key: operator tag plus already-interned child ids.
///
/// Function nodes are never interned (their callbacks are opaque), and
/// Equality nodes are equation roots, not shared subtrees.
#[derive(Clone, PartialEq, Eq, Hash)]
enum NodeKey {
    Num(u64),
    Var(Arc<str>),
    Unary(UnaryTag, NodeId),
    Binary(BinaryTag, NodeId, NodeId),
}

pub struct NodeFactory<'a> {
    arena: &'a NodeArena,
    cache: Option<RefCell<FxHashMap<NodeKey, NodeId>>>,
}

impl<'a> NodeFactory<'a> {
    /// Factory that allocates a fresh node on every call.
    pub fn new(arena: &'a NodeArena) -> Self {
        NodeFactory { arena, cache: None }
    }

    /// Factory that collapses structurally identical subtrees to one node.
    pub fn canonicalizing(arena: &'a NodeArena) -> Self {
        NodeFactory {
            arena,
            cache: Some(RefCell::new(FxHashMap::default())),
        }
    }

    pub fn arena(&self) -> &'a NodeArena {
        self.arena
    }

    /// Snapshot of the node behind `id` (see [`NodeArena::node`]).
    pub fn node(&self, id: NodeId) -> Node {
        self.arena.node(id)
    }

    fn intern(&self, key: NodeKey, node: Node) -> NodeId {
        match &self.cache {
            Some(cache) => {
                if let Some(&hit) = cache.borrow().get(&key) {
                    return hit;
                }
                let id = self.arena.alloc(node);
                cache.borrow_mut().insert(key, id);
                id
            }
            None => self.arena.alloc(node),
        }
    }

    pub fn num(&self, value: f64) -> NodeId {
        self.intern(NodeKey::Num(value.to_bits()), Node::Number(value))
    }

    pub fn var(&self, name: &str) -> NodeId {
        let name: Arc<str> = Arc::from(name);
        self.intern(NodeKey::Var(name.clone()), Node::Variable(name))
    }

    pub fn add(&self, left: NodeId, right: NodeId) -> NodeId {
        self.intern(
            NodeKey::Binary(BinaryTag::Add, left, right),
            Node::Add(left, right),
        )
    }

    pub fn sub(&self, left: NodeId, right: NodeId) -> NodeId {
        self.intern(
            NodeKey::Binary(BinaryTag::Sub, left, right),
            Node::Sub(left, right),
        )
    }

    pub fn mul(&self, left: NodeId, right: NodeId) -> NodeId {
        self.intern(
            NodeKey::Binary(BinaryTag::Mul, left, right),
            Node::Mul(left, right),
        )
    }

    pub fn div(&self, left: NodeId, right: NodeId) -> NodeId {
        self.intern(
            NodeKey::Binary(BinaryTag::Div, left, right),
            Node::Div(left, right),
        )
    }

    pub fn pow(&self, base: NodeId, exponent: NodeId) -> NodeId {
        self.intern(
            NodeKey::Binary(BinaryTag::Pow, base, exponent),
            Node::Pow(base, exponent),
        )
    }

    pub fn sin(&self, operand: NodeId) -> NodeId {
        self.intern(NodeKey::Unary(UnaryTag::Sin, operand), Node::Sin(operand))
    }

    pub fn cos(&self, operand: NodeId) -> NodeId {
        self.intern(NodeKey::Unary(UnaryTag::Cos, operand), Node::Cos(operand))
    }

    pub fn tan(&self, operand: NodeId) -> NodeId {
        self.intern(NodeKey::Unary(UnaryTag::Tan, operand), Node::Tan(operand))
    }

    pub fn ln(&self, operand: NodeId) -> NodeId {
        self.intern(NodeKey::Unary(UnaryTag::Ln, operand), Node::Ln(operand))
    }

    pub fn log(&self, base: NodeId, operand: NodeId) -> NodeId {
        self.intern(
            NodeKey::Binary(BinaryTag::Log, base, operand),
            Node::Log { base, operand },
        )
    }

    pub fn eq(&self, left: NodeId, right: NodeId) -> NodeId {
        self.arena.alloc(Node::Equality(left, right))
    }

    /// Build a function node, validating the argument count against the
    /// declared arity. The count cannot change after construction, but
    /// evaluation re-checks it as a hard invariant guard.
    pub fn func(
        &self,
        name: &str,
        arity: usize,
        args: Vec<NodeId>,
        callback: FunctionCallback,
    ) -> Result<NodeId, EngineError> {
        if args.len() != arity {
            return Err(EngineError::ArityMismatch {
                name: name.to_string(),
                expected: arity,
                got: args.len(),
            });
        }
        Ok(self.arena.alloc(Node::Function {
            name: Arc::from(name),
            arity,
            args,
            callback,
        }))
    }

    /// Rebuild a function node whose argument list was mapped one-to-one,
    /// so the arity invariant is preserved by construction.
    pub(crate) fn func_rebuilt(
        &self,
        name: Arc<str>,
        arity: usize,
        args: Vec<NodeId>,
        callback: FunctionCallback,
    ) -> NodeId {
        debug_assert_eq!(args.len(), arity);
        self.arena.alloc(Node::Function {
            name,
            arity,
            args,
            callback,
        })
    }
}
