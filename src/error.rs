use std::fmt;

/// Errors raised by evaluation, simplification and solving.
///
/// Nothing in the engine retries or swallows one of these: a domain or arity
/// error is fatal to the operation in progress and propagates to the caller.
/// "Unsolvable linearly" is deliberately *not* an error; see
/// [`LinearSolve`](crate::solver::LinearSolve).
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Division by zero during evaluation or constant folding.
    DivisionByZero { expr: String },

    /// `ln` of a non-positive operand.
    LnDomain { operand: f64 },

    /// `log` with base <= 0, base == 1, or a non-positive operand.
    LogDomain { base: f64, operand: f64 },

    /// Zero raised to a non-positive exponent.
    ZeroPower { exponent: f64 },

    /// A function node was given the wrong number of arguments. Checked at
    /// construction and again at every evaluation.
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    /// `solve_for` was called on something that is not an equation.
    NotAnEquation,

    /// Polynomial extraction met a subtree containing a free variable other
    /// than the solve variable.
    NonConstantTerm { expr: String },

    UnsupportedOperation(String),

    /// The postfix token stream did not describe a single expression.
    MalformedPostfix(String),
}

impl EngineError {
    pub fn unsupported(msg: impl Into<String>) -> Self {
        EngineError::UnsupportedOperation(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        EngineError::MalformedPostfix(msg.into())
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::DivisionByZero { expr } => {
                write!(f, "Division by zero in {}", expr)
            }
            EngineError::LnDomain { operand } => {
                write!(f, "Math error: ln of non-positive number {}", operand)
            }
            EngineError::LogDomain { base, operand } => {
                write!(
                    f,
                    "Math error: log with invalid base ({}) or operand ({})",
                    base, operand
                )
            }
            EngineError::ZeroPower { exponent } => {
                write!(
                    f,
                    "Math error: 0 raised to a non-positive exponent ({})",
                    exponent
                )
            }
            EngineError::ArityMismatch {
                name,
                expected,
                got,
            } => {
                write!(
                    f,
                    "Function {} expects {} arguments, but got {}",
                    name, expected, got
                )
            }
            EngineError::NotAnEquation => write!(f, "Expression is not an equation"),
            EngineError::NonConstantTerm { expr } => {
                write!(
                    f,
                    "Cannot treat {} as a constant: it contains a different free variable",
                    expr
                )
            }
            EngineError::UnsupportedOperation(msg) => {
                write!(f, "Unsupported operation: {}", msg)
            }
            EngineError::MalformedPostfix(msg) => {
                write!(f, "Malformed postfix expression: {}", msg)
            }
        }
    }
}

impl std::error::Error for EngineError {}
