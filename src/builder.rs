//! Building trees from postfix token streams.

use crate::error::EngineError;
use crate::factory::NodeFactory;
use crate::node::NodeId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    Variable,
    Operator,
}

/// One token of a postfix expression.
#[derive(Clone, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub value: f64,
}

impl Token {
    pub fn number(value: f64) -> Self {
        Token {
            kind: TokenKind::Number,
            text: String::new(),
            value,
        }
    }

    pub fn variable(name: &str) -> Self {
        Token {
            kind: TokenKind::Variable,
            text: name.to_string(),
            value: 0.0,
        }
    }

    /// Operator token; `symbol` is one of `+ - * / ^ ==`.
    pub fn operator(symbol: &str) -> Self {
        Token {
            kind: TokenKind::Operator,
            text: symbol.to_string(),
            value: 0.0,
        }
    }
}

/// Build a tree from `tokens` in postfix (reverse Polish) order.
///
/// Operands push onto a stack; each operator pops its right operand, then its
/// left, and pushes the combined node. A stream that leaves the stack with
/// anything other than exactly one node is malformed.
pub fn build_from_postfix(f: &NodeFactory, tokens: &[Token]) -> Result<NodeId, EngineError> {
    let mut stack: Vec<NodeId> = Vec::new();

    for token in tokens {
        match token.kind {
            TokenKind::Number => stack.push(f.num(token.value)),
            TokenKind::Variable => stack.push(f.var(&token.text)),
            TokenKind::Operator => {
                let right = stack
                    .pop()
                    .ok_or_else(|| EngineError::malformed(format!("operator {} lacks a right operand", token.text)))?;
                let left = stack
                    .pop()
                    .ok_or_else(|| EngineError::malformed(format!("operator {} lacks a left operand", token.text)))?;
                let node = match token.text.as_str() {
                    "+" => f.add(left, right),
                    "-" => f.sub(left, right),
                    "*" => f.mul(left, right),
                    "/" => f.div(left, right),
                    "^" => f.pow(left, right),
                    "==" => f.eq(left, right),
                    other => {
                        return Err(EngineError::malformed(format!(
                            "unknown operator {}",
                            other
                        )))
                    }
                };
                stack.push(node);
            }
        }
    }

    match (stack.pop(), stack.is_empty()) {
        (Some(root), true) => Ok(root),
        (Some(_), false) => Err(EngineError::malformed(
            "leftover operands after the final token",
        )),
        (None, _) => Err(EngineError::malformed("empty token stream")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::NodeArena;
    use crate::display::render;

    #[test]
    fn builds_in_postfix_order() {
        let arena = NodeArena::new();
        let f = NodeFactory::new(&arena);
        // x 2 * 5 + => ((x * 2) + 5)
        let tokens = [
            Token::variable("x"),
            Token::number(2.0),
            Token::operator("*"),
            Token::number(5.0),
            Token::operator("+"),
        ];
        let root = build_from_postfix(&f, &tokens).unwrap();
        assert_eq!(render(&arena, root), "((x * 2) + 5)");
    }

    #[test]
    fn subtraction_pops_right_then_left() {
        let arena = NodeArena::new();
        let f = NodeFactory::new(&arena);
        let tokens = [
            Token::number(10.0),
            Token::number(4.0),
            Token::operator("-"),
        ];
        let root = build_from_postfix(&f, &tokens).unwrap();
        assert_eq!(render(&arena, root), "(10 - 4)");
    }

    #[test]
    fn malformed_streams_are_rejected() {
        let arena = NodeArena::new();
        let f = NodeFactory::new(&arena);

        assert!(build_from_postfix(&f, &[]).is_err());
        assert!(build_from_postfix(&f, &[Token::operator("+")]).is_err());
        assert!(build_from_postfix(&f, &[Token::number(1.0), Token::number(2.0)]).is_err());
        assert!(build_from_postfix(
            &f,
            &[Token::number(1.0), Token::number(2.0), Token::operator("%")]
        )
        .is_err());
    }
}
