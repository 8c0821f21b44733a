//! The standard algebraic rewrite rules.

use crate::compare::nodes_equal;
use crate::factory::NodeFactory;
use crate::node::{Node, NodeId};

use super::RewriteRule;

fn as_add(f: &NodeFactory, id: NodeId) -> Option<(NodeId, NodeId)> {
    match f.node(id) {
        Node::Add(l, r) => Some((l, r)),
        _ => None,
    }
}

fn as_sub(f: &NodeFactory, id: NodeId) -> Option<(NodeId, NodeId)> {
    match f.node(id) {
        Node::Sub(l, r) => Some((l, r)),
        _ => None,
    }
}

fn as_mul(f: &NodeFactory, id: NodeId) -> Option<(NodeId, NodeId)> {
    match f.node(id) {
        Node::Mul(l, r) => Some((l, r)),
        _ => None,
    }
}

fn as_div(f: &NodeFactory, id: NodeId) -> Option<(NodeId, NodeId)> {
    match f.node(id) {
        Node::Div(l, r) => Some((l, r)),
        _ => None,
    }
}

fn as_pow(f: &NodeFactory, id: NodeId) -> Option<(NodeId, NodeId)> {
    match f.node(id) {
        Node::Pow(b, e) => Some((b, e)),
        _ => None,
    }
}

fn as_ln(f: &NodeFactory, id: NodeId) -> Option<NodeId> {
    match f.node(id) {
        Node::Ln(a) => Some(a),
        _ => None,
    }
}

fn as_log(f: &NodeFactory, id: NodeId) -> Option<(NodeId, NodeId)> {
    match f.node(id) {
        Node::Log { base, operand } => Some((base, operand)),
        _ => None,
    }
}

fn is_two(f: &NodeFactory, id: NodeId) -> bool {
    f.node(id).is_number(2.0)
}

/// `sin(x)^2 + cos(x)^2 => 1`, in either summand order.
pub struct PythagoreanRule;

impl PythagoreanRule {
    fn squared_trig(f: &NodeFactory, id: NodeId) -> Option<(bool, NodeId)> {
        let (base, exponent) = as_pow(f, id)?;
        if !is_two(f, exponent) {
            return None;
        }
        match f.node(base) {
            Node::Sin(a) => Some((true, a)),
            Node::Cos(a) => Some((false, a)),
            _ => None,
        }
    }
}

impl RewriteRule for PythagoreanRule {
    fn name(&self) -> &str {
        "pythagorean identity"
    }

    fn matches(&self, f: &NodeFactory, id: NodeId) -> bool {
        self.apply(f, id).is_some()
    }

    fn apply(&self, f: &NodeFactory, id: NodeId) -> Option<NodeId> {
        let (l, r) = as_add(f, id)?;
        let (l_is_sin, l_arg) = Self::squared_trig(f, l)?;
        let (r_is_sin, r_arg) = Self::squared_trig(f, r)?;
        if l_is_sin != r_is_sin && nodes_equal(f.arena(), l_arg, r_arg) {
            Some(f.num(1.0))
        } else {
            None
        }
    }
}

/// `a^m * a^n => a^(m + n)`.
pub struct ExpProductRule;

impl RewriteRule for ExpProductRule {
    fn name(&self) -> &str {
        "exponent product"
    }

    fn matches(&self, f: &NodeFactory, id: NodeId) -> bool {
        self.apply(f, id).is_some()
    }

    fn apply(&self, f: &NodeFactory, id: NodeId) -> Option<NodeId> {
        let (l, r) = as_mul(f, id)?;
        let (b1, e1) = as_pow(f, l)?;
        let (b2, e2) = as_pow(f, r)?;
        if nodes_equal(f.arena(), b1, b2) {
            Some(f.pow(b1, f.add(e1, e2)))
        } else {
            None
        }
    }
}

/// `a^m / a^n => a^(m - n)`.
pub struct ExpDivisionRule;

impl RewriteRule for ExpDivisionRule {
    fn name(&self) -> &str {
        "exponent quotient"
    }

    fn matches(&self, f: &NodeFactory, id: NodeId) -> bool {
        self.apply(f, id).is_some()
    }

    fn apply(&self, f: &NodeFactory, id: NodeId) -> Option<NodeId> {
        let (l, r) = as_div(f, id)?;
        let (b1, e1) = as_pow(f, l)?;
        let (b2, e2) = as_pow(f, r)?;
        if nodes_equal(f.arena(), b1, b2) {
            Some(f.pow(b1, f.sub(e1, e2)))
        } else {
            None
        }
    }
}

/// `(a^m)^n => a^(m * n)`.
pub struct ExpPowerRule;

impl RewriteRule for ExpPowerRule {
    fn name(&self) -> &str {
        "nested exponent"
    }

    fn matches(&self, f: &NodeFactory, id: NodeId) -> bool {
        self.apply(f, id).is_some()
    }

    fn apply(&self, f: &NodeFactory, id: NodeId) -> Option<NodeId> {
        let (outer_base, n) = as_pow(f, id)?;
        let (a, m) = as_pow(f, outer_base)?;
        Some(f.pow(a, f.mul(m, n)))
    }
}

/// `a^-n => 1 / a^n` for a constant negative exponent.
pub struct NegativeExpRule;

impl RewriteRule for NegativeExpRule {
    fn name(&self) -> &str {
        "negative exponent"
    }

    fn matches(&self, f: &NodeFactory, id: NodeId) -> bool {
        self.apply(f, id).is_some()
    }

    fn apply(&self, f: &NodeFactory, id: NodeId) -> Option<NodeId> {
        let (base, exponent) = as_pow(f, id)?;
        let n = f.node(exponent).as_number()?;
        if n < 0.0 {
            Some(f.div(f.num(1.0), f.pow(base, f.num(-n))))
        } else {
            None
        }
    }
}

/// `ln(a) + ln(b) => ln(a * b)`.
pub struct LnAdditionRule;

impl RewriteRule for LnAdditionRule {
    fn name(&self) -> &str {
        "ln of a product"
    }

    fn matches(&self, f: &NodeFactory, id: NodeId) -> bool {
        self.apply(f, id).is_some()
    }

    fn apply(&self, f: &NodeFactory, id: NodeId) -> Option<NodeId> {
        let (l, r) = as_add(f, id)?;
        let a = as_ln(f, l)?;
        let b = as_ln(f, r)?;
        Some(f.ln(f.mul(a, b)))
    }
}

/// `ln(a) - ln(b) => ln(a / b)`.
pub struct LnDifferenceRule;

impl RewriteRule for LnDifferenceRule {
    fn name(&self) -> &str {
        "ln of a quotient"
    }

    fn matches(&self, f: &NodeFactory, id: NodeId) -> bool {
        self.apply(f, id).is_some()
    }

    fn apply(&self, f: &NodeFactory, id: NodeId) -> Option<NodeId> {
        let (l, r) = as_sub(f, id)?;
        let a = as_ln(f, l)?;
        let b = as_ln(f, r)?;
        Some(f.ln(f.div(a, b)))
    }
}

/// `ln(a^b) => b * ln(a)`.
pub struct LnPowerRule;

impl RewriteRule for LnPowerRule {
    fn name(&self) -> &str {
        "ln of a power"
    }

    fn matches(&self, f: &NodeFactory, id: NodeId) -> bool {
        self.apply(f, id).is_some()
    }

    fn apply(&self, f: &NodeFactory, id: NodeId) -> Option<NodeId> {
        let a = as_ln(f, id)?;
        let (base, exponent) = as_pow(f, a)?;
        Some(f.mul(exponent, f.ln(base)))
    }
}

/// `log(b, x) + log(b, y) => log(b, x * y)`. Declines when the bases differ.
pub struct LogAdditionRule;

impl RewriteRule for LogAdditionRule {
    fn name(&self) -> &str {
        "log of a product"
    }

    fn matches(&self, f: &NodeFactory, id: NodeId) -> bool {
        self.apply(f, id).is_some()
    }

    fn apply(&self, f: &NodeFactory, id: NodeId) -> Option<NodeId> {
        let (l, r) = as_add(f, id)?;
        let (b1, x) = as_log(f, l)?;
        let (b2, y) = as_log(f, r)?;
        if nodes_equal(f.arena(), b1, b2) {
            Some(f.log(b1, f.mul(x, y)))
        } else {
            None
        }
    }
}

/// `log(b, x) - log(b, y) => log(b, x / y)`. Declines when the bases differ.
pub struct LogDifferenceRule;

impl RewriteRule for LogDifferenceRule {
    fn name(&self) -> &str {
        "log of a quotient"
    }

    fn matches(&self, f: &NodeFactory, id: NodeId) -> bool {
        self.apply(f, id).is_some()
    }

    fn apply(&self, f: &NodeFactory, id: NodeId) -> Option<NodeId> {
        let (l, r) = as_sub(f, id)?;
        let (b1, x) = as_log(f, l)?;
        let (b2, y) = as_log(f, r)?;
        if nodes_equal(f.arena(), b1, b2) {
            Some(f.log(b1, f.div(x, y)))
        } else {
            None
        }
    }
}

/// `a*x + a*y => a * (x + y)`, matching on the left factor of each product.
pub struct FactorizationRule;

impl RewriteRule for FactorizationRule {
    fn name(&self) -> &str {
        "common factor"
    }

    fn matches(&self, f: &NodeFactory, id: NodeId) -> bool {
        self.apply(f, id).is_some()
    }

    fn apply(&self, f: &NodeFactory, id: NodeId) -> Option<NodeId> {
        let (l, r) = as_add(f, id)?;
        let (a1, x) = as_mul(f, l)?;
        let (a2, y) = as_mul(f, r)?;
        if nodes_equal(f.arena(), a1, a2) {
            Some(f.mul(a1, f.add(x, y)))
        } else {
            None
        }
    }
}

/// Folds `Number + Number` at the root.
pub struct AdditionConstantFoldingRule;

impl RewriteRule for AdditionConstantFoldingRule {
    fn name(&self) -> &str {
        "fold constant sum"
    }

    fn matches(&self, f: &NodeFactory, id: NodeId) -> bool {
        self.apply(f, id).is_some()
    }

    fn apply(&self, f: &NodeFactory, id: NodeId) -> Option<NodeId> {
        let (l, r) = as_add(f, id)?;
        let a = f.node(l).as_number()?;
        let b = f.node(r).as_number()?;
        Some(f.num(a + b))
    }
}

/// Folds `Number * Number` at the root.
pub struct MultiplicationConstantFoldingRule;

impl RewriteRule for MultiplicationConstantFoldingRule {
    fn name(&self) -> &str {
        "fold constant product"
    }

    fn matches(&self, f: &NodeFactory, id: NodeId) -> bool {
        self.apply(f, id).is_some()
    }

    fn apply(&self, f: &NodeFactory, id: NodeId) -> Option<NodeId> {
        let (l, r) = as_mul(f, id)?;
        let a = f.node(l).as_number()?;
        let b = f.node(r).as_number()?;
        Some(f.num(a * b))
    }
}

/// The standard rule set in its standard order. Specific identities come
/// before the general folds so they get first crack at the tree.
pub fn default_rules() -> Vec<Box<dyn RewriteRule>> {
    vec![
        Box::new(PythagoreanRule),
        Box::new(ExpProductRule),
        Box::new(ExpDivisionRule),
        Box::new(ExpPowerRule),
        Box::new(NegativeExpRule),
        Box::new(LnAdditionRule),
        Box::new(LnDifferenceRule),
        Box::new(LnPowerRule),
        Box::new(LogAdditionRule),
        Box::new(LogDifferenceRule),
        Box::new(FactorizationRule),
        Box::new(AdditionConstantFoldingRule),
        Box::new(MultiplicationConstantFoldingRule),
    ]
}
