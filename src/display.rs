//! String rendering of expression trees.
//!
//! Binary operators render fully parenthesized (`"(a + b)"`), unary and
//! function kinds render as prefix calls (`"sin(a)"`, `"log(b, x)"`). The
//! rendered form doubles as the key for common-subexpression elimination and
//! for the rewriter's progress check, so it must be deterministic.

use std::fmt;

use crate::arena::NodeArena;
use crate::node::{Node, NodeId};

/// Adapter so a node can be used with `format!` and friends.
pub struct NodeDisplay<'a> {
    arena: &'a NodeArena,
    id: NodeId,
}

impl<'a> NodeDisplay<'a> {
    pub fn new(arena: &'a NodeArena, id: NodeId) -> Self {
        NodeDisplay { arena, id }
    }
}

impl fmt::Display for NodeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self.arena, self.id))
    }
}

/// Render the tree rooted at `id`.
pub fn render(arena: &NodeArena, id: NodeId) -> String {
    match arena.node(id) {
        Node::Number(n) => format_number(n),
        Node::Variable(name) => name.to_string(),
        Node::Sin(a) => format!("sin({})", render(arena, a)),
        Node::Cos(a) => format!("cos({})", render(arena, a)),
        Node::Tan(a) => format!("tan({})", render(arena, a)),
        Node::Ln(a) => format!("ln({})", render(arena, a)),
        Node::Add(l, r) => format!("({} + {})", render(arena, l), render(arena, r)),
        Node::Sub(l, r) => format!("({} - {})", render(arena, l), render(arena, r)),
        Node::Mul(l, r) => format!("({} * {})", render(arena, l), render(arena, r)),
        Node::Div(l, r) => format!("({} / {})", render(arena, l), render(arena, r)),
        Node::Pow(b, e) => format!("({} ^ {})", render(arena, b), render(arena, e)),
        Node::Log { base, operand } => {
            format!("log({}, {})", render(arena, base), render(arena, operand))
        }
        Node::Function { name, args, .. } => {
            let rendered: Vec<String> = args.iter().map(|&a| render(arena, a)).collect();
            format!("{}({})", name, rendered.join(", "))
        }
        Node::Equality(l, r) => format!("({} == {})", render(arena, l), render(arena, r)),
    }
}

/// Display as an integer when there is no fractional part, so constant
/// folding yields "3" rather than "3.0".
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
