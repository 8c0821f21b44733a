//! Rule-driven rewriting.
//!
//! A [`Rewriter`] holds an ordered list of [`RewriteRule`]s and applies them
//! at the root of the tree until a fixpoint: whenever a rule produces a tree
//! that renders differently, the result is adopted and the scan restarts from
//! the first rule. Rule order therefore matters and is part of the contract;
//! [`default_rules`] gives the standard ordering.

mod cse;
mod rules;

pub use cse::CseRewriter;
pub use rules::{
    default_rules, AdditionConstantFoldingRule, ExpDivisionRule, ExpPowerRule, ExpProductRule,
    FactorizationRule, LnAdditionRule, LnDifferenceRule, LnPowerRule, LogAdditionRule,
    LogDifferenceRule, MultiplicationConstantFoldingRule, NegativeExpRule, PythagoreanRule,
};

use crate::display::render;
use crate::factory::NodeFactory;
use crate::node::NodeId;
use crate::subst::deep_clone;
use crate::trace::Trace;

/// One named algebraic rewrite, applied at the root of a tree.
pub trait RewriteRule {
    fn name(&self) -> &str;

    /// Cheap structural test; `apply` is only called when this returns true.
    fn matches(&self, f: &NodeFactory, id: NodeId) -> bool;

    /// Build the rewritten tree, or `None` when the match turns out not to
    /// hold under closer inspection (for instance mismatched log bases).
    fn apply(&self, f: &NodeFactory, id: NodeId) -> Option<NodeId>;
}

pub struct Rewriter {
    rules: Vec<Box<dyn RewriteRule>>,
}

impl Rewriter {
    /// Rewriter with the standard rule set.
    pub fn new() -> Self {
        Rewriter {
            rules: rules::default_rules(),
        }
    }

    pub fn with_rules(rules: Vec<Box<dyn RewriteRule>>) -> Self {
        Rewriter { rules }
    }

    pub fn add_rule(&mut self, rule: Box<dyn RewriteRule>) {
        self.rules.push(rule);
    }

    /// Rewrite to fixpoint. The input tree is never mutated; the returned
    /// root is a fresh tree even when no rule fired.
    pub fn rewrite(&self, f: &NodeFactory, id: NodeId, trace: Option<&Trace>) -> NodeId {
        let mut current = deep_clone(f, id);
        let mut rendered = render(f.arena(), current);

        'scan: loop {
            for rule in &self.rules {
                if !rule.matches(f, current) {
                    continue;
                }
                if let Some(next) = rule.apply(f, current) {
                    let next_rendered = render(f.arena(), next);
                    if next_rendered != rendered {
                        if let Some(trace) = trace {
                            trace.record(rule.name(), rendered.clone(), next_rendered.clone());
                        }
                        current = next;
                        rendered = next_rendered;
                        continue 'scan;
                    }
                }
            }
            break;
        }
        current
    }
}

impl Default for Rewriter {
    fn default() -> Self {
        Rewriter::new()
    }
}
