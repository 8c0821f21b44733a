//! Substitution and deep cloning.

use crate::factory::NodeFactory;
use crate::node::{Node, NodeId};

/// Replace every occurrence of the variable `var` with a copy of
/// `replacement`, returning the root of the rebuilt tree.
///
/// Subtrees that do not contain `var` are returned as-is; arena handles make
/// sharing free. Each matched occurrence gets its own deep clone of the
/// replacement so later rewrites of one site never leak into another.
pub fn substitute(f: &NodeFactory, id: NodeId, var: &str, replacement: NodeId) -> NodeId {
    match f.node(id) {
        Node::Number(_) => id,
        Node::Variable(name) => {
            if name.as_ref() == var {
                deep_clone(f, replacement)
            } else {
                id
            }
        }

        Node::Sin(a) => f.sin(substitute(f, a, var, replacement)),
        Node::Cos(a) => f.cos(substitute(f, a, var, replacement)),
        Node::Tan(a) => f.tan(substitute(f, a, var, replacement)),
        Node::Ln(a) => f.ln(substitute(f, a, var, replacement)),

        Node::Add(l, r) => f.add(
            substitute(f, l, var, replacement),
            substitute(f, r, var, replacement),
        ),
        Node::Sub(l, r) => f.sub(
            substitute(f, l, var, replacement),
            substitute(f, r, var, replacement),
        ),
        Node::Mul(l, r) => f.mul(
            substitute(f, l, var, replacement),
            substitute(f, r, var, replacement),
        ),
        Node::Div(l, r) => f.div(
            substitute(f, l, var, replacement),
            substitute(f, r, var, replacement),
        ),
        Node::Pow(b, e) => f.pow(
            substitute(f, b, var, replacement),
            substitute(f, e, var, replacement),
        ),
        Node::Log { base, operand } => f.log(
            substitute(f, base, var, replacement),
            substitute(f, operand, var, replacement),
        ),

        Node::Function {
            name,
            arity,
            args,
            callback,
        } => {
            let rebuilt = args
                .iter()
                .map(|&a| substitute(f, a, var, replacement))
                .collect();
            f.func_rebuilt(name, arity, rebuilt, callback)
        }

        Node::Equality(l, r) => f.eq(
            substitute(f, l, var, replacement),
            substitute(f, r, var, replacement),
        ),
    }
}

/// Structurally copy the tree rooted at `id` through the factory.
///
/// With a canonicalizing factory the copy may intern back onto the original
/// handles; with a plain factory it produces fresh nodes throughout.
pub fn deep_clone(f: &NodeFactory, id: NodeId) -> NodeId {
    match f.node(id) {
        Node::Number(n) => f.num(n),
        Node::Variable(name) => f.var(name.as_ref()),

        Node::Sin(a) => f.sin(deep_clone(f, a)),
        Node::Cos(a) => f.cos(deep_clone(f, a)),
        Node::Tan(a) => f.tan(deep_clone(f, a)),
        Node::Ln(a) => f.ln(deep_clone(f, a)),

        Node::Add(l, r) => f.add(deep_clone(f, l), deep_clone(f, r)),
        Node::Sub(l, r) => f.sub(deep_clone(f, l), deep_clone(f, r)),
        Node::Mul(l, r) => f.mul(deep_clone(f, l), deep_clone(f, r)),
        Node::Div(l, r) => f.div(deep_clone(f, l), deep_clone(f, r)),
        Node::Pow(b, e) => f.pow(deep_clone(f, b), deep_clone(f, e)),
        Node::Log { base, operand } => f.log(deep_clone(f, base), deep_clone(f, operand)),

        Node::Function {
            name,
            arity,
            args,
            callback,
        } => {
            let cloned = args.iter().map(|&a| deep_clone(f, a)).collect();
            f.func_rebuilt(name, arity, cloned, callback)
        }

        Node::Equality(l, r) => f.eq(deep_clone(f, l), deep_clone(f, r)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::NodeArena;
    use crate::compare::nodes_equal;
    use crate::display::render;

    #[test]
    fn substitution_replaces_every_occurrence() {
        let arena = NodeArena::new();
        let f = NodeFactory::new(&arena);
        let expr = f.add(f.var("x"), f.mul(f.num(2.0), f.var("x")));
        let replacement = f.add(f.var("y"), f.num(1.0));
        let out = substitute(&f, expr, "x", replacement);
        assert_eq!(render(&arena, out), "((y + 1) + (2 * (y + 1)))");
    }

    #[test]
    fn other_variables_are_untouched() {
        let arena = NodeArena::new();
        let f = NodeFactory::new(&arena);
        let expr = f.sub(f.var("a"), f.var("b"));
        let out = substitute(&f, expr, "z", f.num(7.0));
        assert!(nodes_equal(&arena, expr, out));
    }

    #[test]
    fn deep_clone_is_structurally_equal() {
        let arena = NodeArena::new();
        let f = NodeFactory::new(&arena);
        let expr = f.pow(f.sin(f.var("x")), f.num(2.0));
        let copy = deep_clone(&f, expr);
        assert!(nodes_equal(&arena, expr, copy));
    }
}
