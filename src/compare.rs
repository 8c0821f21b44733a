//! Structural comparison of expression trees.

use crate::arena::NodeArena;
use crate::node::{Node, NodeId};

/// Structural equality of two trees in the same arena.
///
/// Addition, multiplication and log compare commutatively: `a + b` equals
/// `b + a`. Function nodes compare by name and arguments; the callback is
/// opaque and ignored. Shared (canonicalized) subtrees short-circuit on id.
pub fn nodes_equal(arena: &NodeArena, a: NodeId, b: NodeId) -> bool {
    if a == b {
        return true;
    }
    match (arena.node(a), arena.node(b)) {
        (Node::Number(x), Node::Number(y)) => x == y,
        (Node::Variable(x), Node::Variable(y)) => x == y,

        (Node::Sin(x), Node::Sin(y))
        | (Node::Cos(x), Node::Cos(y))
        | (Node::Tan(x), Node::Tan(y))
        | (Node::Ln(x), Node::Ln(y)) => nodes_equal(arena, x, y),

        // Commutative kinds.
        (Node::Add(l1, r1), Node::Add(l2, r2)) | (Node::Mul(l1, r1), Node::Mul(l2, r2)) => {
            (nodes_equal(arena, l1, l2) && nodes_equal(arena, r1, r2))
                || (nodes_equal(arena, l1, r2) && nodes_equal(arena, r1, l2))
        }
        (
            Node::Log {
                base: b1,
                operand: o1,
            },
            Node::Log {
                base: b2,
                operand: o2,
            },
        ) => {
            (nodes_equal(arena, b1, b2) && nodes_equal(arena, o1, o2))
                || (nodes_equal(arena, b1, o2) && nodes_equal(arena, o1, b2))
        }

        // Ordered kinds.
        (Node::Sub(l1, r1), Node::Sub(l2, r2))
        | (Node::Div(l1, r1), Node::Div(l2, r2))
        | (Node::Pow(l1, r1), Node::Pow(l2, r2))
        | (Node::Equality(l1, r1), Node::Equality(l2, r2)) => {
            nodes_equal(arena, l1, l2) && nodes_equal(arena, r1, r2)
        }

        (
            Node::Function {
                name: n1, args: a1, ..
            },
            Node::Function {
                name: n2, args: a2, ..
            },
        ) => {
            n1 == n2
                && a1.len() == a2.len()
                && a1
                    .iter()
                    .zip(a2.iter())
                    .all(|(&x, &y)| nodes_equal(arena, x, y))
        }

        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::NodeFactory;

    #[test]
    fn addition_is_commutative() {
        let arena = NodeArena::new();
        let f = NodeFactory::new(&arena);
        let a = f.sin(f.var("x"));
        let b = f.num(2.0);
        assert!(nodes_equal(&arena, f.add(a, b), f.add(b, a)));
        assert!(nodes_equal(&arena, f.mul(a, b), f.mul(b, a)));
    }

    #[test]
    fn subtraction_is_not() {
        let arena = NodeArena::new();
        let f = NodeFactory::new(&arena);
        let a = f.var("x");
        let b = f.num(2.0);
        assert!(!nodes_equal(&arena, f.sub(a, b), f.sub(b, a)));
        assert!(!nodes_equal(&arena, f.pow(a, b), f.pow(b, a)));
    }
}
