//! Postfix (reverse Polish) evaluation.
//!
//! A single left-to-right pass over the postfix queue drives an operand
//! stack. Function calls use the marker protocol set up by the postfix
//! builder: a comma token pushes a separator sentinel, the argument marker
//! pushes its has-arguments flag, and the function token itself pops the
//! flag, collects operands back to the call boundary, and invokes the
//! resolved binding.

use crate::ast::{Fixity, Token, TokenKind};
use crate::resolver::{AttributeResolver, Binding, ResolveError};
use crate::value::{Promoted, Value, promote};
use num_complex::Complex64;
use num_traits::Zero;
use std::fmt;

/// Errors raised while executing the postfix queue.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Name lookup failed in every configured namespace.
    Resolve(ResolveError),

    /// A resolved callable could not be invoked, with the cause.
    Function { name: String, reason: String },

    /// `/`, `//`, `%`, or a negative power of zero with a zero operand.
    DivisionByZero,

    /// Stack underflow, leftover operands, or an operator failure.
    Computation(String),

    /// The postfix queue was empty.
    EmptyExpression,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::Resolve(e) => write!(f, "{e}"),
            EvalError::Function { name, reason } => {
                write!(f, "function '{name}' failed: {reason}")
            }
            EvalError::DivisionByZero => write!(f, "division by zero"),
            EvalError::Computation(reason) => write!(f, "computation error: {reason}"),
            EvalError::EmptyExpression => write!(f, "empty expression"),
        }
    }
}

impl std::error::Error for EvalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EvalError::Resolve(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ResolveError> for EvalError {
    fn from(e: ResolveError) -> Self {
        EvalError::Resolve(e)
    }
}

/// One entry of the operand stack. The call protocol needs two markers that
/// no expression value can be mistaken for.
#[derive(Debug, Clone, Copy, PartialEq)]
enum StackSlot {
    Value(Value),
    /// The has-arguments flag of an argument marker token.
    Args(bool),
    /// The boundary a comma leaves between two arguments.
    Separator,
}

/// Execute the postfix queue, producing the single remaining value.
pub fn eval_postfix(
    queue: Vec<Token>,
    resolver: &dyn AttributeResolver,
) -> Result<Value, EvalError> {
    if queue.is_empty() {
        return Err(EvalError::EmptyExpression);
    }

    let mut stack: Vec<StackSlot> = Vec::new();
    for token in queue {
        match token.kind {
            TokenKind::Integer => {
                let value = match token.lexeme.parse::<i64>() {
                    Ok(n) => Value::Integer(n),
                    // wider than i64: carry on in floating point
                    Err(_) => Value::Float(parse_float(&token.lexeme)?),
                };
                stack.push(StackSlot::Value(value));
            }

            TokenKind::Float => {
                stack.push(StackSlot::Value(Value::Float(parse_float(&token.lexeme)?)));
            }

            TokenKind::Complex => {
                let imag = parse_float(token.lexeme.trim_end_matches(['j', 'J']))?;
                stack.push(StackSlot::Value(Value::Complex(Complex64::new(0.0, imag))));
            }

            TokenKind::Const => match resolver.resolve(&token.lexeme)? {
                Binding::Constant(value) => stack.push(StackSlot::Value(*value)),
                Binding::Function(_) => {
                    return Err(EvalError::Computation(format!(
                        "'{}' is a function, not a value",
                        token.lexeme
                    )));
                }
            },

            TokenKind::Comma => stack.push(StackSlot::Separator),

            TokenKind::Args(has_args) => stack.push(StackSlot::Args(has_args)),

            TokenKind::Func => {
                let Some(StackSlot::Args(has_args)) = stack.pop() else {
                    return Err(EvalError::Computation(
                        "function call without an argument marker".into(),
                    ));
                };
                let mut args = Vec::new();
                if has_args {
                    args.push(pop_value(&mut stack)?);
                    while matches!(stack.last(), Some(StackSlot::Separator)) {
                        stack.pop();
                        args.push(pop_value(&mut stack)?);
                    }
                    // operands came off the stack right-to-left
                    args.reverse();
                }
                let name = token.lexeme.strip_suffix('(').unwrap_or(&token.lexeme);
                let value = match resolver.resolve(name)? {
                    Binding::Function(call) => call(&args).map_err(|reason| EvalError::Function {
                        name: name.to_string(),
                        reason,
                    })?,
                    Binding::Constant(_) => {
                        return Err(EvalError::Function {
                            name: name.to_string(),
                            reason: "not callable".into(),
                        });
                    }
                };
                stack.push(StackSlot::Value(value));
            }

            kind if kind.fixity() == Fixity::Prefix => {
                let operand = pop_value(&mut stack)?;
                stack.push(StackSlot::Value(apply_unary(kind, operand)));
            }

            kind if matches!(kind.fixity(), Fixity::InfixLeft | Fixity::InfixRight) => {
                let rhs = pop_value(&mut stack)?;
                let lhs = pop_value(&mut stack)?;
                stack.push(StackSlot::Value(apply_binary(kind, lhs, rhs)?));
            }

            kind => {
                return Err(EvalError::Computation(format!(
                    "unexpected {kind} in postfix queue"
                )));
            }
        }
    }

    let result = match stack.pop() {
        Some(StackSlot::Value(value)) => value,
        _ => return Err(EvalError::Computation("no result left on the stack".into())),
    };
    if !stack.is_empty() {
        return Err(EvalError::Computation(
            "operands left over after evaluation".into(),
        ));
    }
    Ok(result)
}

fn pop_value(stack: &mut Vec<StackSlot>) -> Result<Value, EvalError> {
    match stack.pop() {
        Some(StackSlot::Value(value)) => Ok(value),
        _ => Err(EvalError::Computation("operand stack underflow".into())),
    }
}

fn parse_float(lexeme: &str) -> Result<f64, EvalError> {
    lexeme
        .parse::<f64>()
        .map_err(|_| EvalError::Computation(format!("malformed numeric literal '{lexeme}'")))
}

fn apply_unary(kind: TokenKind, operand: Value) -> Value {
    match kind {
        TokenKind::UPlus => operand,
        _ => match operand {
            Value::Integer(n) => n
                .checked_neg()
                .map(Value::Integer)
                .unwrap_or(Value::Float(-(n as f64))),
            Value::Float(x) => Value::Float(-x),
            Value::Complex(c) => Value::Complex(-c),
            Value::Boolean(b) => Value::Integer(-i64::from(b)),
        },
    }
}

fn apply_binary(kind: TokenKind, lhs: Value, rhs: Value) -> Result<Value, EvalError> {
    match kind {
        TokenKind::Plus => Ok(arith(lhs, rhs, i64::checked_add, |a, b| a + b, |a, b| a + b)),
        TokenKind::Minus => Ok(arith(lhs, rhs, i64::checked_sub, |a, b| a - b, |a, b| a - b)),
        TokenKind::Times => Ok(arith(lhs, rhs, i64::checked_mul, |a, b| a * b, |a, b| a * b)),

        TokenKind::Divide => {
            if rhs.is_zero() {
                return Err(EvalError::DivisionByZero);
            }
            Ok(match promote(lhs, rhs) {
                // true division never yields an integer
                Promoted::Integers(a, b) => Value::Float(a as f64 / b as f64),
                Promoted::Floats(a, b) => Value::Float(a / b),
                Promoted::Complexes(a, b) => Value::Complex(a / b),
            })
        }

        TokenKind::FloorDiv => {
            if rhs.is_zero() {
                return Err(EvalError::DivisionByZero);
            }
            match promote(lhs, rhs) {
                Promoted::Integers(a, b) => Ok(match floor_div(a, b) {
                    Some(q) => Value::Integer(q),
                    None => Value::Float((a as f64 / b as f64).floor()),
                }),
                Promoted::Floats(a, b) => Ok(Value::Float((a / b).floor())),
                Promoted::Complexes(..) => Err(EvalError::Computation(
                    "can't take floor of complex number".into(),
                )),
            }
        }

        TokenKind::Modulo => {
            if rhs.is_zero() {
                return Err(EvalError::DivisionByZero);
            }
            match promote(lhs, rhs) {
                Promoted::Integers(a, b) => Ok(match floor_mod(a, b) {
                    Some(r) => Value::Integer(r),
                    None => Value::Float(floored_fmod(a as f64, b as f64)),
                }),
                Promoted::Floats(a, b) => Ok(Value::Float(floored_fmod(a, b))),
                Promoted::Complexes(..) => {
                    Err(EvalError::Computation("can't mod complex numbers".into()))
                }
            }
        }

        TokenKind::Power => pow_values(lhs, rhs),

        TokenKind::Eq => Ok(Value::Boolean(values_equal(lhs, rhs))),
        TokenKind::Ne => Ok(Value::Boolean(!values_equal(lhs, rhs))),
        TokenKind::Lt | TokenKind::Le | TokenKind::Gt | TokenKind::Ge => {
            compare(kind, lhs, rhs).map(Value::Boolean)
        }

        kind => Err(EvalError::Computation(format!(
            "{kind} is not a binary operator"
        ))),
    }
}

/// Apply one arithmetic operator across the promoted pair. Integer results
/// that do not fit in an i64 fall back to floating point.
fn arith(
    lhs: Value,
    rhs: Value,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
    complex_op: fn(Complex64, Complex64) -> Complex64,
) -> Value {
    match promote(lhs, rhs) {
        Promoted::Integers(a, b) => match int_op(a, b) {
            Some(n) => Value::Integer(n),
            None => Value::Float(float_op(a as f64, b as f64)),
        },
        Promoted::Floats(a, b) => Value::Float(float_op(a, b)),
        Promoted::Complexes(a, b) => Value::Complex(complex_op(a, b)),
    }
}

/// Exponentiation across the tower. Also the backing for the `pow` builtin.
pub(crate) fn pow_values(lhs: Value, rhs: Value) -> Result<Value, EvalError> {
    match promote(lhs, rhs) {
        Promoted::Integers(a, b) => {
            if b >= 0 {
                Ok(
                    match u32::try_from(b).ok().and_then(|e| a.checked_pow(e)) {
                        Some(n) => Value::Integer(n),
                        None => Value::Float((a as f64).powf(b as f64)),
                    },
                )
            } else if a == 0 {
                Err(EvalError::DivisionByZero)
            } else {
                Ok(Value::Float((a as f64).powf(b as f64)))
            }
        }
        Promoted::Floats(a, b) => {
            if a == 0.0 && b < 0.0 {
                Err(EvalError::DivisionByZero)
            } else if a < 0.0 && b.fract() != 0.0 {
                // a negative base under a fractional exponent lands in the
                // complex plane
                Ok(Value::Complex(
                    Complex64::new(a, 0.0).powc(Complex64::new(b, 0.0)),
                ))
            } else {
                Ok(Value::Float(a.powf(b)))
            }
        }
        Promoted::Complexes(a, b) => {
            if a.is_zero() {
                return if b.is_zero() {
                    Ok(Value::Complex(Complex64::new(1.0, 0.0)))
                } else if b.im == 0.0 && b.re > 0.0 {
                    Ok(Value::Complex(Complex64::zero()))
                } else {
                    Err(EvalError::DivisionByZero)
                };
            }
            Ok(Value::Complex(a.powc(b)))
        }
    }
}

/// Floored integer quotient, sign following the divisor. `None` when the
/// quotient overflows.
fn floor_div(a: i64, b: i64) -> Option<i64> {
    let q = a.checked_div(b)?;
    let r = a % b;
    Some(if r != 0 && (r < 0) != (b < 0) { q - 1 } else { q })
}

/// Floored remainder, sign following the divisor.
fn floor_mod(a: i64, b: i64) -> Option<i64> {
    let r = a.checked_rem(b)?;
    Some(if r != 0 && (r < 0) != (b < 0) { r + b } else { r })
}

fn floored_fmod(a: f64, b: f64) -> f64 {
    a - b * (a / b).floor()
}

fn values_equal(lhs: Value, rhs: Value) -> bool {
    match promote(lhs, rhs) {
        Promoted::Integers(a, b) => a == b,
        Promoted::Floats(a, b) => a == b,
        Promoted::Complexes(a, b) => a == b,
    }
}

fn compare(kind: TokenKind, lhs: Value, rhs: Value) -> Result<bool, EvalError> {
    match promote(lhs, rhs) {
        Promoted::Integers(a, b) => Ok(match kind {
            TokenKind::Lt => a < b,
            TokenKind::Le => a <= b,
            TokenKind::Gt => a > b,
            _ => a >= b,
        }),
        Promoted::Floats(a, b) => Ok(match kind {
            TokenKind::Lt => a < b,
            TokenKind::Le => a <= b,
            TokenKind::Gt => a > b,
            _ => a >= b,
        }),
        Promoted::Complexes(..) => Err(EvalError::Computation(
            "complex numbers have no ordering".into(),
        )),
    }
}
