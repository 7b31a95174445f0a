//! Infix to postfix conversion.
//!
//! A shunting-yard variant extended for variable-arity function calls: each
//! open call tracks whether any argument was supplied, commas flush pending
//! operators and stay in the queue as argument separators, and the paren
//! closing a call enqueues an argument marker followed by the function
//! token itself. Power and the unary signs share a precedence tier and
//! chain right-to-left, which is what makes `-2**2` negate the power while
//! `2**-2` negates the exponent.

use crate::ast::{Fixity, Token, TokenKind};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Unmatched `)`, or an unclosed `(`/function call at end of input.
    UnbalancedParentheses,
    /// Comma outside an open argument list, or at the wrong nesting depth.
    MisplacedComma,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnbalancedParentheses => write!(f, "parentheses are not balanced"),
            ParseError::MisplacedComma => {
                write!(f, "comma outside of a function argument list")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Convert a unary-resolved token sequence into a postfix queue.
pub fn postfix_queue(tokens: Vec<Token>) -> Result<Vec<Token>, ParseError> {
    let mut queue: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();
    // one flag per open call: did it get at least one argument?
    let mut have_args: Vec<bool> = Vec::new();

    let mut input = tokens.into_iter().peekable();
    while let Some(token) = input.next() {
        match token.kind {
            kind if kind.fixity() == Fixity::Literal => queue.push(token),

            TokenKind::Func => {
                // peek past the call: an immediate `)` means no arguments
                have_args.push(input.peek().is_none_or(|next| next.kind != TokenKind::RParen));
                stack.push(token);
            }

            _ if stack.is_empty() => stack.push(token),

            TokenKind::Comma => {
                loop {
                    match stack.pop() {
                        None => return Err(ParseError::MisplacedComma),
                        Some(top) if top.kind == TokenKind::Func => {
                            stack.push(top);
                            break;
                        }
                        Some(top) if top.kind == TokenKind::LParen => {
                            return Err(ParseError::MisplacedComma);
                        }
                        Some(top) => queue.push(top),
                    }
                }
                queue.push(token);
            }

            TokenKind::LParen => stack.push(token),

            TokenKind::RParen => loop {
                match stack.pop() {
                    None => return Err(ParseError::UnbalancedParentheses),
                    Some(top) if top.kind == TokenKind::LParen => break,
                    Some(top) if top.kind == TokenKind::Func => {
                        // this paren is the FUNC_RPAREN variant: it closes
                        // the call and is spent here, never enqueued
                        let supplied = have_args.pop().unwrap_or(false);
                        queue.push(Token::args_marker(token.position, supplied));
                        queue.push(top);
                        break;
                    }
                    Some(top) => queue.push(top),
                }
            },

            TokenKind::UPlus | TokenKind::UMinus
                if stack.last().is_some_and(|top| top.kind == TokenKind::Power) =>
            {
                // power binds tighter than a unary sign on its left and
                // looser than one on its right
                stack.push(token);
            }

            kind if stack
                .last()
                .is_some_and(|top| kind.precedence() == top.kind.precedence())
                && matches!(kind.fixity(), Fixity::InfixRight | Fixity::Prefix) =>
            {
                // equal precedence chains right-to-left for power and signs
                stack.push(token);
            }

            kind if stack
                .last()
                .is_some_and(|top| kind.precedence() <= top.kind.precedence()) =>
            {
                while let Some(top) = stack.pop() {
                    if kind.precedence() <= top.kind.precedence() {
                        queue.push(top);
                    } else {
                        stack.push(top);
                        break;
                    }
                }
                stack.push(token);
            }

            _ => stack.push(token),
        }
    }

    while let Some(top) = stack.pop() {
        if matches!(top.kind, TokenKind::LParen | TokenKind::Func) {
            return Err(ParseError::UnbalancedParentheses);
        }
        queue.push(top);
    }

    Ok(queue)
}
