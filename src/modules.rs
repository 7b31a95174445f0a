//! The default `math` and `builtins` namespaces.
//!
//! Functions validate their own arity and operand types and report failures
//! as strings; the evaluator attaches the function name and surfaces them
//! as function errors.

use crate::evaluator::pow_values;
use crate::resolver::{Namespace, Registry};
use crate::value::Value;

/// A registry holding the two namespaces every evaluation searches by
/// default: `math` and `builtins`.
pub fn default_registry() -> Registry {
    let mut registry = Registry::new();
    registry.register(math_namespace());
    registry.register(builtins_namespace());
    registry
}

pub fn math_namespace() -> Namespace {
    Namespace::new("math")
        .constant("pi", Value::Float(std::f64::consts::PI))
        .constant("e", Value::Float(std::f64::consts::E))
        .constant("tau", Value::Float(std::f64::consts::TAU))
        .constant("inf", Value::Float(f64::INFINITY))
        .constant("nan", Value::Float(f64::NAN))
        .function("sin", |args| unary_float("sin", args, f64::sin))
        .function("cos", |args| unary_float("cos", args, f64::cos))
        .function("tan", |args| unary_float("tan", args, f64::tan))
        .function("asin", |args| unary_float("asin", args, f64::asin))
        .function("acos", |args| unary_float("acos", args, f64::acos))
        .function("atan", |args| unary_float("atan", args, f64::atan))
        .function("sinh", |args| unary_float("sinh", args, f64::sinh))
        .function("cosh", |args| unary_float("cosh", args, f64::cosh))
        .function("tanh", |args| unary_float("tanh", args, f64::tanh))
        .function("sqrt", |args| unary_float("sqrt", args, f64::sqrt))
        .function("exp", |args| unary_float("exp", args, f64::exp))
        .function("log", log)
        .function("log10", |args| unary_float("log10", args, f64::log10))
        .function("log2", |args| unary_float("log2", args, f64::log2))
        .function("fabs", |args| unary_float("fabs", args, f64::abs))
        .function("degrees", |args| unary_float("degrees", args, f64::to_degrees))
        .function("radians", |args| unary_float("radians", args, f64::to_radians))
        .function("floor", |args| int_valued("floor", args, f64::floor))
        .function("ceil", |args| int_valued("ceil", args, f64::ceil))
        .function("trunc", |args| int_valued("trunc", args, f64::trunc))
        .function("atan2", |args| binary_float("atan2", args, f64::atan2))
        .function("hypot", |args| binary_float("hypot", args, f64::hypot))
        .function("fmod", |args| binary_float("fmod", args, |a, b| a % b))
        .function("pow", |args| binary_float("pow", args, f64::powf))
        .function("factorial", factorial)
}

pub fn builtins_namespace() -> Namespace {
    Namespace::new("builtins")
        .constant("True", Value::Boolean(true))
        .constant("False", Value::Boolean(false))
        .function("abs", abs)
        .function("min", |args| extremum("min", args, false))
        .function("max", |args| extremum("max", args, true))
        .function("round", round)
        .function("pow", |args| {
            expect_args("pow", args, 2)?;
            pow_values(args[0], args[1]).map_err(|e| e.to_string())
        })
        .function("int", to_int)
        .function("float", to_float)
        .function("bool", to_bool)
}

fn expect_args(name: &str, args: &[Value], expected: usize) -> Result<(), String> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(format!(
            "{name}() takes exactly {expected} argument{} ({} given)",
            if expected == 1 { "" } else { "s" },
            args.len()
        ))
    }
}

fn float_arg(name: &str, value: &Value) -> Result<f64, String> {
    value
        .as_float()
        .ok_or_else(|| format!("{name}() argument must be a real number, not {}", value.type_name()))
}

fn unary_float(name: &str, args: &[Value], op: fn(f64) -> f64) -> Result<Value, String> {
    expect_args(name, args, 1)?;
    let x = float_arg(name, &args[0])?;
    let y = op(x);
    if y.is_nan() && !x.is_nan() {
        return Err("math domain error".into());
    }
    if y.is_infinite() && x.is_finite() {
        return Err("math range error".into());
    }
    Ok(Value::Float(y))
}

fn binary_float(name: &str, args: &[Value], op: fn(f64, f64) -> f64) -> Result<Value, String> {
    expect_args(name, args, 2)?;
    let a = float_arg(name, &args[0])?;
    let b = float_arg(name, &args[1])?;
    let y = op(a, b);
    if y.is_nan() && !a.is_nan() && !b.is_nan() {
        return Err("math domain error".into());
    }
    if y.is_infinite() && a.is_finite() && b.is_finite() {
        return Err("math range error".into());
    }
    Ok(Value::Float(y))
}

/// Rounds through the float and back to an integer (floor, ceil, trunc).
fn int_valued(name: &str, args: &[Value], op: fn(f64) -> f64) -> Result<Value, String> {
    expect_args(name, args, 1)?;
    let x = float_arg(name, &args[0])?;
    if !x.is_finite() {
        return Err(format!("cannot convert float {x} to integer"));
    }
    Ok(Value::Integer(op(x) as i64))
}

/// Natural logarithm, or logarithm in an explicit base.
fn log(args: &[Value]) -> Result<Value, String> {
    match args {
        [_] => unary_float("log", args, f64::ln),
        [x, base] => {
            let x = float_arg("log", x)?;
            let base = float_arg("log", base)?;
            let y = x.log(base);
            if y.is_nan() {
                return Err("math domain error".into());
            }
            Ok(Value::Float(y))
        }
        _ => Err(format!(
            "log() takes one or two arguments ({} given)",
            args.len()
        )),
    }
}

fn factorial(args: &[Value]) -> Result<Value, String> {
    expect_args("factorial", args, 1)?;
    let n = match args[0] {
        Value::Integer(n) => n,
        Value::Boolean(b) => i64::from(b),
        _ => return Err("factorial() only accepts integral values".into()),
    };
    if n < 0 {
        return Err("factorial() not defined for negative values".into());
    }
    (1..=n)
        .try_fold(1i64, |acc, k| acc.checked_mul(k))
        .map(Value::Integer)
        .ok_or_else(|| "factorial() result does not fit in an integer".into())
}

fn abs(args: &[Value]) -> Result<Value, String> {
    expect_args("abs", args, 1)?;
    Ok(match args[0] {
        Value::Integer(n) => n
            .checked_abs()
            .map(Value::Integer)
            .unwrap_or(Value::Float((n as f64).abs())),
        Value::Float(x) => Value::Float(x.abs()),
        Value::Complex(c) => Value::Float(c.norm()),
        Value::Boolean(b) => Value::Integer(i64::from(b)),
    })
}

/// Smallest or largest of the arguments, preserving the winner's type.
fn extremum(name: &str, args: &[Value], want_max: bool) -> Result<Value, String> {
    if args.is_empty() {
        return Err(format!("{name} expected at least 1 argument, got 0"));
    }
    let mut best = args[0];
    let mut best_key = float_arg(name, &best)?;
    for &candidate in &args[1..] {
        let key = float_arg(name, &candidate)?;
        if (want_max && key > best_key) || (!want_max && key < best_key) {
            best = candidate;
            best_key = key;
        }
    }
    Ok(best)
}

fn round(args: &[Value]) -> Result<Value, String> {
    match args {
        [value] => Ok(match *value {
            Value::Integer(n) => Value::Integer(n),
            Value::Boolean(b) => Value::Integer(i64::from(b)),
            Value::Float(x) if x.is_finite() => {
                // ties round to even
                Value::Integer(x.round_ties_even() as i64)
            }
            Value::Float(x) => return Err(format!("cannot convert float {x} to integer")),
            Value::Complex(_) => return Err("round() does not accept complex numbers".into()),
        }),
        [value, digits] => {
            let x = float_arg("round", value)?;
            let Value::Integer(ndigits) = *digits else {
                return Err("round() second argument must be an integer".into());
            };
            let factor = 10f64.powi(ndigits as i32);
            Ok(Value::Float((x * factor).round_ties_even() / factor))
        }
        _ => Err(format!(
            "round() takes one or two arguments ({} given)",
            args.len()
        )),
    }
}

fn to_int(args: &[Value]) -> Result<Value, String> {
    expect_args("int", args, 1)?;
    match args[0] {
        Value::Integer(n) => Ok(Value::Integer(n)),
        Value::Boolean(b) => Ok(Value::Integer(i64::from(b))),
        Value::Float(x) if x.is_finite() => Ok(Value::Integer(x.trunc() as i64)),
        Value::Float(x) => Err(format!("cannot convert float {x} to integer")),
        Value::Complex(_) => Err("can't convert complex to int".into()),
    }
}

fn to_float(args: &[Value]) -> Result<Value, String> {
    expect_args("float", args, 1)?;
    args[0]
        .as_float()
        .map(Value::Float)
        .ok_or_else(|| "can't convert complex to float".into())
}

fn to_bool(args: &[Value]) -> Result<Value, String> {
    expect_args("bool", args, 1)?;
    Ok(Value::Boolean(args[0].is_truthy()))
}
