//! Rewrite and solver tracing.
//!
//! A `Trace` collects the steps a transformation pass took, so callers can
//! show their work. Additionally, setting the `SYMTREE_TRACE` environment
//! variable to `1` or `true` echoes every recorded step to stderr; the flag
//! is read once per process.

use std::cell::RefCell;
use std::sync::OnceLock;

/// One recorded transformation step.
#[derive(Clone, Debug, PartialEq)]
pub struct TraceStep {
    /// Which rule or stage produced the step.
    pub description: String,
    /// Rendered form before the step.
    pub before: String,
    /// Rendered form after the step.
    pub after: String,
}

/// An append-only log of transformation steps.
#[derive(Default)]
pub struct Trace {
    steps: RefCell<Vec<TraceStep>>,
}

impl Trace {
    pub fn new() -> Self {
        Trace::default()
    }

    pub fn record(&self, description: impl Into<String>, before: String, after: String) {
        let step = TraceStep {
            description: description.into(),
            before,
            after,
        };
        if trace_enabled() {
            eprintln!("[symtree] {}: {} => {}", step.description, step.before, step.after);
        }
        self.steps.borrow_mut().push(step);
    }

    pub fn steps(&self) -> Vec<TraceStep> {
        self.steps.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.steps.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.steps.borrow_mut().clear();
    }
}

static TRACE_ENABLED: OnceLock<bool> = OnceLock::new();

fn trace_enabled() -> bool {
    *TRACE_ENABLED.get_or_init(|| {
        std::env::var("SYMTREE_TRACE")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    })
}
