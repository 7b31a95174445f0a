//! Expression normalization ahead of tokenization.

use once_cell::sync::Lazy;
use regex::Regex;

static UNSUPPORTED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w +\-*/^%><=,.!()]").unwrap());
static DIGITS_BEFORE_PAREN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([ +\-*/^%><=,(]\d+)\(").unwrap());
static LEADING_DIGITS_BEFORE_PAREN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([\d.]+)\(").unwrap());
// the imaginary suffix is excluded so `2j` stays a single literal
static DIGIT_BEFORE_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d)([a-ik-zA-IK-Z_])").unwrap());
static TRAILING_COMMA: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*\)").unwrap());

/// Restrict the expression to the supported alphabet and rewrite the forms
/// the tokenizer cannot take as written: implicit multiplication ahead of a
/// parenthesis (`2(3)` becomes `2*(3)`) or a name (`2pi` becomes `2*pi`),
/// and a trailing comma before `)` (`f(1,)` becomes `f(1)`).
///
/// Unsupported characters are dropped silently; each rewrite is one scan of
/// the whole string, and normalizing already-normalized text is a no-op.
pub fn normalize(expr: &str) -> String {
    let expr = UNSUPPORTED.replace_all(expr, "");
    let expr = DIGITS_BEFORE_PAREN.replace_all(&expr, "${1}*(");
    let expr = LEADING_DIGITS_BEFORE_PAREN.replace_all(&expr, "${1}*(");
    let expr = DIGIT_BEFORE_NAME.replace_all(&expr, "${1}*${2}");
    let expr = TRAILING_COMMA.replace_all(&expr, ")");
    expr.into_owned()
}

#[test]
fn inserts_implicit_multiplication() {
    assert_eq!(normalize("2(1+1)"), "2*(1+1)");
    assert_eq!(normalize("1*34(1+1)"), "1*34*(1+1)");
    assert_eq!(normalize("2pi"), "2*pi");
    assert_eq!(normalize("2j"), "2j");
}

#[test]
fn drops_unsupported_characters() {
    assert_eq!(normalize("2~1"), "21");
    assert_eq!(normalize("sin(1, )"), "sin(1)");
}
