//! Common-subexpression elimination.

use std::cell::RefCell;

use rustc_hash::FxHashMap;

use crate::display::render;
use crate::factory::NodeFactory;
use crate::node::{Node, NodeId};

/// Rewrites a tree so structurally identical subtrees share one node.
///
/// Keyed by the rendered form of each subtree, so two occurrences of
/// `(x + 1)` collapse to the same handle regardless of how they were built.
/// The memo persists across calls; one `CseRewriter` can deduplicate a whole
/// batch of trees against each other.
///
/// Function and Equality nodes are rebuilt but never memoized, mirroring the
/// factory's interning policy.
#[derive(Default)]
pub struct CseRewriter {
    cache: RefCell<FxHashMap<String, NodeId>>,
}

impl CseRewriter {
    pub fn new() -> Self {
        CseRewriter::default()
    }

    pub fn rewrite(&self, f: &NodeFactory, id: NodeId) -> NodeId {
        match f.node(id) {
            Node::Number(n) => self.memoized(f, id, |f| f.num(n)),
            Node::Variable(name) => self.memoized(f, id, |f| f.var(name.as_ref())),

            Node::Sin(a) => {
                let a = self.rewrite(f, a);
                self.memoized(f, id, |f| f.sin(a))
            }
            Node::Cos(a) => {
                let a = self.rewrite(f, a);
                self.memoized(f, id, |f| f.cos(a))
            }
            Node::Tan(a) => {
                let a = self.rewrite(f, a);
                self.memoized(f, id, |f| f.tan(a))
            }
            Node::Ln(a) => {
                let a = self.rewrite(f, a);
                self.memoized(f, id, |f| f.ln(a))
            }

            Node::Add(l, r) => {
                let (l, r) = (self.rewrite(f, l), self.rewrite(f, r));
                self.memoized(f, id, |f| f.add(l, r))
            }
            Node::Sub(l, r) => {
                let (l, r) = (self.rewrite(f, l), self.rewrite(f, r));
                self.memoized(f, id, |f| f.sub(l, r))
            }
            Node::Mul(l, r) => {
                let (l, r) = (self.rewrite(f, l), self.rewrite(f, r));
                self.memoized(f, id, |f| f.mul(l, r))
            }
            Node::Div(l, r) => {
                let (l, r) = (self.rewrite(f, l), self.rewrite(f, r));
                self.memoized(f, id, |f| f.div(l, r))
            }
            Node::Pow(b, e) => {
                let (b, e) = (self.rewrite(f, b), self.rewrite(f, e));
                self.memoized(f, id, |f| f.pow(b, e))
            }
            Node::Log { base, operand } => {
                let (base, operand) = (self.rewrite(f, base), self.rewrite(f, operand));
                self.memoized(f, id, |f| f.log(base, operand))
            }

            Node::Function {
                name,
                arity,
                args,
                callback,
            } => {
                let args = args.iter().map(|&a| self.rewrite(f, a)).collect();
                f.func_rebuilt(name, arity, args, callback)
            }

            Node::Equality(l, r) => {
                let (l, r) = (self.rewrite(f, l), self.rewrite(f, r));
                f.eq(l, r)
            }
        }
    }

    fn memoized(
        &self,
        f: &NodeFactory,
        original: NodeId,
        build: impl FnOnce(&NodeFactory) -> NodeId,
    ) -> NodeId {
        let key = render(f.arena(), original);
        if let Some(&hit) = self.cache.borrow().get(&key) {
            return hit;
        }
        let id = build(f);
        self.cache.borrow_mut().insert(key, id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::NodeArena;

    #[test]
    fn duplicate_subtrees_collapse_to_one_handle() {
        let arena = NodeArena::new();
        let f = NodeFactory::new(&arena);

        let left = f.add(f.var("x"), f.num(1.0));
        let right = f.add(f.var("x"), f.num(1.0));
        let expr = f.mul(left, right);

        let cse = CseRewriter::new();
        let out = cse.rewrite(&f, expr);
        match f.node(out) {
            Node::Mul(l, r) => assert_eq!(l, r),
            other => panic!("expected a product, got {:?}", other),
        }
    }

    #[test]
    fn memo_persists_across_trees() {
        let arena = NodeArena::new();
        let f = NodeFactory::new(&arena);
        let cse = CseRewriter::new();

        let a = cse.rewrite(&f, f.sin(f.var("t")));
        let b = cse.rewrite(&f, f.sin(f.var("t")));
        assert_eq!(a, b);
    }
}
