//! # rpcalc — infix math expression evaluation
//!
//! Evaluates infix mathematical expressions through a fixed pipeline:
//!
//! 1. [`normalizer::normalize`] — alphabet filtering and implicit `*`
//! 2. [`lexer::tokenize`] — ordered first-match-wins lexical rules
//! 3. [`lexer::mark_unary`] — `+`/`-` sign reclassification
//! 4. [`postfix::postfix_queue`] — shunting-yard with variadic calls
//! 5. [`evaluator::eval_postfix`] — stack evaluation of the postfix queue
//!
//! Constants and functions are looked up through the
//! [`resolver::AttributeResolver`] capability; [`modules::default_registry`]
//! provides the stock `math` and `builtins` namespaces.
//!
//! ```
//! use rpcalc::{calc, Value};
//!
//! assert_eq!(calc("2 + 2*2", &[], false).unwrap(), Value::Integer(6));
//! assert_eq!(calc("-2**2", &[], false).unwrap(), Value::Integer(-4));
//! ```

pub mod ast;
pub mod evaluator;
pub mod lexer;
pub mod modules;
pub mod normalizer;
pub mod postfix;
pub mod resolver;
pub mod value;

pub use ast::{Fixity, Token, TokenKind};
pub use evaluator::{EvalError, eval_postfix};
pub use lexer::{TokenizeError, mark_unary, tokenize};
pub use modules::default_registry;
pub use normalizer::normalize;
pub use postfix::{ParseError, postfix_queue};
pub use resolver::{AttributeResolver, Binding, Namespace, Registry, ResolveError, Scope};
pub use value::Value;

use std::fmt;

/// Namespaces every evaluation searches after any user-supplied ones.
pub const DEFAULT_NAMESPACES: [&str; 2] = ["math", "builtins"];

/// Any failure of the evaluation pipeline.
#[derive(Debug)]
pub enum CalcError {
    /// Tokenizer error
    Tokenize(TokenizeError),
    /// Postfix builder error
    Parse(ParseError),
    /// Evaluation or name-resolution error
    Eval(EvalError),
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::Tokenize(e) => write!(f, "tokenize error: {e}"),
            CalcError::Parse(e) => write!(f, "parse error: {e}"),
            CalcError::Eval(e) => write!(f, "evaluation error: {e}"),
        }
    }
}

impl std::error::Error for CalcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CalcError::Tokenize(e) => Some(e),
            CalcError::Parse(e) => Some(e),
            CalcError::Eval(e) => Some(e),
        }
    }
}

impl From<TokenizeError> for CalcError {
    fn from(e: TokenizeError) -> Self {
        CalcError::Tokenize(e)
    }
}

impl From<ParseError> for CalcError {
    fn from(e: ParseError) -> Self {
        CalcError::Parse(e)
    }
}

impl From<EvalError> for CalcError {
    fn from(e: EvalError) -> Self {
        CalcError::Eval(e)
    }
}

/// Evaluate an expression against an explicit resolver.
///
/// With `verbose` set, the normalized expression, the unary-resolved token
/// sequence, and the postfix queue are printed ahead of evaluation.
pub fn evaluate(
    expr: &str,
    resolver: &dyn AttributeResolver,
    verbose: bool,
) -> Result<Value, CalcError> {
    let normalized = normalize(expr);
    if verbose {
        println!("EXPR:\t {normalized}");
    }
    let mut tokens = tokenize(&normalized)?;
    mark_unary(&mut tokens);
    if verbose {
        println!("TOKENS:\t {}", join_tokens(&tokens));
    }
    let queue = postfix_queue(tokens)?;
    if verbose {
        println!("RPN:\t {}", join_tokens(&queue));
    }
    Ok(eval_postfix(queue, resolver)?)
}

/// Evaluate an expression against the default registry, searching the given
/// namespaces ahead of [`DEFAULT_NAMESPACES`].
pub fn calc(expr: &str, namespaces: &[&str], verbose: bool) -> Result<Value, CalcError> {
    let registry = default_registry();
    let names: Vec<&str> = namespaces
        .iter()
        .copied()
        .chain(DEFAULT_NAMESPACES)
        .collect();
    let scope = registry.scope(&names).map_err(EvalError::from)?;
    evaluate(expr, &scope, verbose)
}

fn join_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("  ")
}
