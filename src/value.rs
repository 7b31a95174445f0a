use num_complex::Complex64;
use num_traits::Zero;
use std::fmt;

/// A calculator value.
///
/// The numeric tower is explicit rather than coerced: every operation
/// promotes its operands by the same table before applying the operator.
///
/// # Promotion
///
/// - `Boolean` promotes to `Integer` 0/1 before arithmetic
/// - `Integer` promotes to `Float` when mixed with a `Float`
/// - any `Complex` operand promotes the whole operation to `Complex`
///
/// # Examples
///
/// ```
/// use rpcalc::Value;
///
/// assert_eq!(Value::Integer(42).to_string(), "42");
/// assert_eq!(Value::Float(1.0).to_string(), "1.0");
/// assert_eq!(Value::Boolean(true).as_float(), Some(1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// Machine integer
    Integer(i64),

    /// Double-precision float
    Float(f64),

    /// Complex number (literals use the `j` suffix: `2j`)
    Complex(Complex64),

    /// Boolean, produced by the comparison operators
    Boolean(bool),
}

impl Value {
    /// Human-readable type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Complex(_) => "complex",
            Value::Boolean(_) => "boolean",
        }
    }

    /// Zero in any representation; division by such a value fails.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Integer(n) => *n == 0,
            Value::Float(x) => *x == 0.0,
            Value::Complex(c) => c.is_zero(),
            Value::Boolean(b) => !b,
        }
    }

    pub fn is_truthy(&self) -> bool {
        !self.is_zero()
    }

    /// The value as a float, unless it is complex.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(x) => Some(*x),
            Value::Complex(_) => None,
            Value::Boolean(b) => Some(i64::from(*b) as f64),
        }
    }

    /// The value lifted into the complex plane.
    pub fn as_complex(&self) -> Complex64 {
        match self {
            Value::Integer(n) => Complex64::new(*n as f64, 0.0),
            Value::Float(x) => Complex64::new(*x, 0.0),
            Value::Complex(c) => *c,
            Value::Boolean(b) => Complex64::new(i64::from(*b) as f64, 0.0),
        }
    }
}

/// An operand pair after promotion.
pub(crate) enum Promoted {
    Integers(i64, i64),
    Floats(f64, f64),
    Complexes(Complex64, Complex64),
}

/// Promote two operands to their common representation.
pub(crate) fn promote(lhs: Value, rhs: Value) -> Promoted {
    match (lhs, rhs) {
        (Value::Complex(_), _) | (_, Value::Complex(_)) => {
            Promoted::Complexes(lhs.as_complex(), rhs.as_complex())
        }
        (Value::Float(_), _) | (_, Value::Float(_)) => {
            Promoted::Floats(to_f64(lhs), to_f64(rhs))
        }
        _ => Promoted::Integers(to_i64(lhs), to_i64(rhs)),
    }
}

fn to_f64(value: Value) -> f64 {
    match value {
        Value::Integer(n) => n as f64,
        Value::Float(x) => x,
        Value::Complex(c) => c.re,
        Value::Boolean(b) => i64::from(b) as f64,
    }
}

fn to_i64(value: Value) -> i64 {
    match value {
        Value::Integer(n) => n,
        Value::Boolean(b) => i64::from(b),
        Value::Float(x) => x as i64,
        Value::Complex(c) => c.re as i64,
    }
}

fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    // keep the trailing .0 so a float result reads as a float
    if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 {
        write!(f, "{x:.1}")
    } else {
        write!(f, "{x}")
    }
}

fn complex_part(x: f64) -> String {
    if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 {
        format!("{}", x as i64)
    } else {
        format!("{x}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float(x) => write_float(f, *x),
            Value::Complex(c) if c.re == 0.0 => write!(f, "{}j", complex_part(c.im)),
            Value::Complex(c) if c.im < 0.0 => {
                write!(f, "({}-{}j)", complex_part(c.re), complex_part(-c.im))
            }
            Value::Complex(c) => write!(f, "({}+{}j)", complex_part(c.re), complex_part(c.im)),
            Value::Boolean(b) => write!(f, "{b}"),
        }
    }
}

#[test]
fn display_keeps_numeric_types_apart() {
    assert_eq!(Value::Integer(6).to_string(), "6");
    assert_eq!(Value::Float(6.0).to_string(), "6.0");
    assert_eq!(Value::Float(0.01).to_string(), "0.01");
    assert_eq!(Value::Complex(Complex64::new(0.0, 2.0)).to_string(), "2j");
    assert_eq!(Value::Complex(Complex64::new(3.0, -2.0)).to_string(), "(3-2j)");
}
