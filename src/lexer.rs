use crate::ast::{Token, TokenKind};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Ordered lexical rules. At each position the first pattern that matches
/// wins; declaration order is load-bearing (`**` ahead of `*`, `//` ahead
/// of `/`, `<=` ahead of `<`, numeric literals ahead of identifiers).
static RULES: Lazy<Vec<(TokenKind, Regex)>> = Lazy::new(|| {
    [
        (TokenKind::Float, r"^\d*\.\d+"),
        (TokenKind::Complex, r"^\d+[jJ]"),
        (TokenKind::Integer, r"^\d+"),
        (TokenKind::LParen, r"^\("),
        (TokenKind::RParen, r"^\)"),
        (TokenKind::Plus, r"^\+"),
        (TokenKind::Minus, r"^-"),
        (TokenKind::Power, r"^(\^|\*\*)"),
        (TokenKind::Times, r"^\*"),
        (TokenKind::FloorDiv, r"^//"),
        (TokenKind::Divide, r"^/"),
        (TokenKind::Comma, r"^,"),
        (TokenKind::Modulo, r"^%"),
        (TokenKind::Eq, r"^=="),
        (TokenKind::Le, r"^<="),
        (TokenKind::Lt, r"^<"),
        (TokenKind::Ge, r"^>="),
        (TokenKind::Gt, r"^>"),
        (TokenKind::Ne, r"^!="),
        (TokenKind::Func, r"^[A-Za-z_][A-Za-z0-9_.]*\("),
        (TokenKind::Const, r"^[A-Za-z_][A-Za-z0-9_.]*"),
    ]
    .into_iter()
    .map(|(kind, pattern)| (kind, Regex::new(pattern).unwrap()))
    .collect()
});

/// Failure to cut the expression into tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    /// No lexical rule matches the remaining input.
    NoRuleMatch { position: usize, found: String },
    /// Two numeric literals with nothing between them.
    AdjacentLiterals { position: usize },
}

impl fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizeError::NoRuleMatch { position, found } => {
                write!(f, "no token rule matches '{found}' at position {position}")
            }
            TokenizeError::AdjacentLiterals { position } => {
                write!(
                    f,
                    "adjacent numeric literals at position {position} (missing operator?)"
                )
            }
        }
    }
}

impl std::error::Error for TokenizeError {}

/// Scan the normalized expression left to right into typed tokens.
pub fn tokenize(expr: &str) -> Result<Vec<Token>, TokenizeError> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut rest = expr;
    let mut offset = 0;

    'scan: while !rest.is_empty() {
        let trimmed = rest.trim_start();
        offset += rest.len() - trimmed.len();
        rest = trimmed;
        if rest.is_empty() {
            break;
        }

        for (kind, rule) in RULES.iter() {
            let Some(found) = rule.find(rest) else {
                continue;
            };
            // `\d+[jJ]` stands in for a trailing lookahead the regex crate
            // does not have: the suffix must not run into an identifier
            // character, otherwise `123jx` is an integer and a name.
            if *kind == TokenKind::Complex
                && rest[found.end()..]
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_alphanumeric() || c == '_')
            {
                continue;
            }
            if kind.is_numeric_literal()
                && tokens.last().is_some_and(|prev| prev.kind.is_numeric_literal())
            {
                return Err(TokenizeError::AdjacentLiterals { position: offset });
            }
            tokens.push(Token::new(tokens.len(), *kind, found.as_str()));
            offset += found.end();
            rest = &rest[found.end()..];
            continue 'scan;
        }

        return Err(TokenizeError::NoRuleMatch {
            position: offset,
            found: rest.chars().take(8).collect(),
        });
    }

    Ok(tokens)
}

/// Reclassify `+`/`-` tokens as unary signs when nothing to their left
/// produces a value. A sign resolved earlier in the pass is itself not a
/// value producer, so chains like `--1` resolve to two unary minuses.
pub fn mark_unary(tokens: &mut [Token]) {
    for i in 0..tokens.len() {
        let sign = match tokens[i].kind {
            TokenKind::Plus => TokenKind::UPlus,
            TokenKind::Minus => TokenKind::UMinus,
            _ => continue,
        };
        if i == 0 || !tokens[i - 1].kind.produces_value() {
            tokens[i].kind = sign;
        }
    }
}

#[test]
fn rule_order_keeps_power_whole() {
    let kinds: Vec<TokenKind> = tokenize("2**3^4")
        .unwrap()
        .iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Integer,
            TokenKind::Power,
            TokenKind::Integer,
            TokenKind::Power,
            TokenKind::Integer,
        ]
    );
}

#[test]
fn whitespace_is_dropped() {
    let tokens = tokenize("  1 +  2 ").unwrap();
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[2].position, 2);
}
