//! Tokens of the expression language.
//!
//! A [`Token`] pairs a [`TokenKind`] with the matched source text and its
//! ordinal position in the token sequence. Kinds carry the static metadata
//! the postfix builder and evaluator dispatch on: a numeric precedence level
//! and a [`Fixity`] class.

use std::fmt;

/// How a token combines with its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixity {
    /// Produces a value by itself: numeric literal or named constant.
    Literal,
    /// Unary prefix operator.
    Prefix,
    /// Binary operator grouping left-to-right.
    InfixLeft,
    /// Binary operator grouping right-to-left.
    InfixRight,
    /// Parenthesis.
    Grouping,
    /// Argument separator.
    Separator,
    /// Function-call plumbing: the call itself and its argument marker.
    Call,
}

/// The closed set of token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Floating-point literal
    ///
    /// # Examples
    /// ```text
    /// 3.14
    /// .5
    /// ```
    Float,

    /// Imaginary literal: a digit run with a `j`/`J` suffix
    ///
    /// # Examples
    /// ```text
    /// 2j
    /// 10J
    /// ```
    Complex,

    /// Integer literal
    Integer,

    /// Grouping parenthesis `(`
    LParen,

    /// Closing parenthesis `)`
    RParen,

    /// The closing parenthesis of a function call; the postfix builder
    /// spends it when it closes the call, so it never reaches the queue
    FuncRParen,

    /// Binary `+`
    Plus,

    /// Binary `-`
    Minus,

    /// Unary `+`, reclassified from [`TokenKind::Plus`]
    UPlus,

    /// Unary `-`, reclassified from [`TokenKind::Minus`]
    UMinus,

    /// Multiplication `*`
    Times,

    /// True division `/` (the result is never an integer)
    Divide,

    /// Floor division `//`
    FloorDiv,

    /// Remainder `%`, sign following the divisor
    Modulo,

    /// Exponentiation, spelled `**` or `^`; groups right-to-left
    Power,

    /// Argument separator inside a function call
    Comma,

    /// Equality `==`
    Eq,

    /// Inequality `!=`
    Ne,

    /// Less than `<`
    Lt,

    /// Less than or equal `<=`
    Le,

    /// Greater than `>`
    Gt,

    /// Greater than or equal `>=`
    Ge,

    /// Function call: an identifier immediately followed by `(`, which is
    /// part of the lexeme
    ///
    /// # Examples
    /// ```text
    /// sin(
    /// math.log10(
    /// ```
    Func,

    /// Bare identifier resolved as a constant
    Const,

    /// Internal marker emitted ahead of a function token, carrying whether
    /// the call supplied at least one argument
    Args(bool),
}

impl TokenKind {
    /// Binding strength; low binds loosest.
    pub fn precedence(&self) -> u8 {
        use TokenKind::*;
        match self {
            LParen | RParen => 0,
            Func | FuncRParen | Args(_) => 1,
            Eq | Ne => 2,
            Lt | Le | Gt | Ge => 3,
            Plus | Minus => 4,
            Times | Divide | FloorDiv | Modulo => 5,
            // Power and the unary signs share a tier; associativity is
            // what separates them in the postfix builder
            Power | UPlus | UMinus => 6,
            Comma => 7,
            Float | Complex | Integer => 8,
            Const => 9,
        }
    }

    pub fn fixity(&self) -> Fixity {
        use TokenKind::*;
        match self {
            Float | Complex | Integer | Const => Fixity::Literal,
            UPlus | UMinus => Fixity::Prefix,
            Plus | Minus | Times | Divide | FloorDiv | Modulo => Fixity::InfixLeft,
            Eq | Ne | Lt | Le | Gt | Ge => Fixity::InfixLeft,
            Power => Fixity::InfixRight,
            LParen | RParen | FuncRParen => Fixity::Grouping,
            Comma => Fixity::Separator,
            Func | Args(_) => Fixity::Call,
        }
    }

    /// A numeric literal kind (float, complex, or integer).
    pub fn is_numeric_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::Float | TokenKind::Complex | TokenKind::Integer
        )
    }

    /// Whether a token of this kind leaves a value to the left of whatever
    /// follows it. A `+`/`-` after anything else is a sign, not an operator.
    pub fn produces_value(&self) -> bool {
        matches!(
            self,
            TokenKind::Float
                | TokenKind::Integer
                | TokenKind::Complex
                | TokenKind::Const
                | TokenKind::RParen
                | TokenKind::FuncRParen
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TokenKind::*;
        let name = match self {
            Float => "FLOAT",
            Complex => "COMPLEX",
            Integer => "INTEGER",
            LParen => "LPAREN",
            RParen => "RPAREN",
            FuncRParen => "FUNC_RPAREN",
            Plus => "PLUS",
            Minus => "MINUS",
            UPlus => "UPLUS",
            UMinus => "UMINUS",
            Times => "TIMES",
            Divide => "DIVIDE",
            FloorDiv => "FLOORDIV",
            Modulo => "MODULO",
            Power => "POWER",
            Comma => "COMMA",
            Eq => "EQ",
            Ne => "NE",
            Lt => "LT",
            Le => "LE",
            Gt => "GT",
            Ge => "GE",
            Func => "FUNC",
            Const => "CONST",
            Args(_) => "ARGS",
        };
        f.write_str(name)
    }
}

/// A single token of the expression.
///
/// Created once by the tokenizer; the `kind` may change at most once
/// afterwards (unary reclassification, or the function-closing paren
/// variant), and nothing mutates a token once it enters the postfix queue.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Ordinal index in the token sequence (0-based, contiguous).
    pub position: usize,
    pub kind: TokenKind,
    /// The matched source text. Function lexemes keep their trailing `(`.
    pub lexeme: String,
}

impl Token {
    pub fn new(position: usize, kind: TokenKind, lexeme: impl Into<String>) -> Self {
        Token {
            position,
            kind,
            lexeme: lexeme.into(),
        }
    }

    /// Synthesize the has-arguments marker the postfix builder enqueues
    /// ahead of a function token.
    pub(crate) fn args_marker(position: usize, has_args: bool) -> Self {
        Token {
            position,
            kind: TokenKind::Args(has_args),
            lexeme: String::new(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Args(has_args) => write!(f, "{}:{}", has_args, self.kind),
            _ => write!(f, "{}:{}", self.lexeme, self.kind),
        }
    }
}
