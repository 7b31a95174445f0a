// tests/integration_tests.rs

use rpcalc::{
    CalcError, EvalError, Namespace, ResolveError, Value, calc, default_registry, evaluate,
};

fn answer(args: &[Value]) -> Result<Value, String> {
    if args.is_empty() {
        Ok(Value::Integer(42))
    } else {
        Err(format!("answer() takes no arguments ({} given)", args.len()))
    }
}

fn double(args: &[Value]) -> Result<Value, String> {
    match args {
        [Value::Integer(n)] => Ok(Value::Integer(n * 2)),
        _ => Err("double() takes exactly one integer".into()),
    }
}

// ============================================================================
// Namespace registration and ordering
// ============================================================================

#[test]
fn test_registered_namespace() {
    let mut registry = default_registry();
    registry.register(
        Namespace::new("demo")
            .constant("c", Value::Float(299_792_458.0))
            .function("answer", answer)
            .function("double", double),
    );
    let scope = registry.scope(&["demo", "math", "builtins"]).unwrap();

    assert_eq!(evaluate("double(21)", &scope, false).unwrap(), Value::Integer(42));
    assert_eq!(evaluate("c/2", &scope, false).unwrap(), Value::Float(149_896_229.0));
}

#[test]
fn test_zero_argument_call() {
    let mut registry = default_registry();
    registry.register(Namespace::new("demo").function("answer", answer));
    let scope = registry.scope(&["demo", "math", "builtins"]).unwrap();

    assert_eq!(evaluate("answer()", &scope, false).unwrap(), Value::Integer(42));
    // whitespace inside the empty call is fine
    assert_eq!(evaluate("answer( )", &scope, false).unwrap(), Value::Integer(42));
    assert!(matches!(
        evaluate("answer(1)", &scope, false),
        Err(CalcError::Eval(EvalError::Function { .. }))
    ));
}

#[test]
fn test_namespace_order_shadows() {
    let mut registry = default_registry();
    registry.register(Namespace::new("demo").constant("pi", Value::Float(3.0)));

    // searched ahead of math, so the bare name hits demo first
    let scope = registry.scope(&["demo", "math", "builtins"]).unwrap();
    assert_eq!(evaluate("pi", &scope, false).unwrap(), Value::Float(3.0));
    // the dotted form still reaches the shadowed binding
    assert_eq!(
        evaluate("math.pi", &scope, false).unwrap(),
        Value::Float(std::f64::consts::PI)
    );
}

#[test]
fn test_dotted_resolution() {
    assert_eq!(
        calc("math.pi", &[], false).unwrap(),
        Value::Float(std::f64::consts::PI)
    );
    assert_eq!(calc("builtins.abs(0-1)", &[], false).unwrap(), Value::Integer(1));
    match calc("math.sin(math.pi/2)", &[], false).unwrap() {
        Value::Float(x) => assert!((x - 1.0).abs() < 1e-9),
        other => panic!("expected float, got {other:?}"),
    }
}

#[test]
fn test_unknown_namespace() {
    assert!(matches!(
        calc("1+1", &["nosuch"], false),
        Err(CalcError::Eval(EvalError::Resolve(
            ResolveError::UnknownNamespace(_)
        )))
    ));
}

// ============================================================================
// Agreement with reference arithmetic
// ============================================================================

#[test]
fn test_agreement_with_reference_evaluator() {
    let cases: Vec<(&str, f64)> = vec![
        ("2+2 *2", 6.0),
        ("1+2*3**4", 163.0),
        ("1+2*2", 5.0),
        ("1+(2+3*2)*3", 25.0),
        ("10*(2+1)", 30.0),
        ("10(2+1)", 30.0),
        ("100/3**2", 100.0 / 9.0),
        ("2^(2^2)", 16.0),
        ("-13", -13.0),
        ("-.1", -0.1),
        ("1.0/3.0", 1.0 / 3.0),
        (".1 * 2.0**56.0", 0.1 * 2.0f64.powf(56.0)),
        ("e**34", std::f64::consts::E.powf(34.0)),
        (
            "(2.0**(pi/pi+e/e+2.0**0.0))**(1.0/3.0)",
            8.0f64.powf(1.0 / 3.0),
        ),
        ("10*e**0*log10(.4* -5/ -0.1-10) - -abs(-53/10) + -5", 10.3),
    ];
    for (expr, expected) in cases {
        let got = match calc(expr, &[], false).unwrap() {
            Value::Integer(n) => n as f64,
            Value::Float(x) => x,
            other => panic!("expected a number for '{expr}', got {other:?}"),
        };
        assert!(
            (got - expected).abs() <= 1e-9 * expected.abs().max(1.0),
            "'{expr}' evaluated to {got}, expected {expected}"
        );
    }
}

// ============================================================================
// Error corpus
// ============================================================================

#[test]
fn test_error_corpus() {
    use rpcalc::lexer::TokenizeError;
    use rpcalc::postfix::ParseError;

    assert!(matches!(
        calc("(((", &[], false),
        Err(CalcError::Parse(ParseError::UnbalancedParentheses))
    ));
    assert!(matches!(
        calc("1 + 2(3 * 4))", &[], false),
        Err(CalcError::Parse(ParseError::UnbalancedParentheses))
    ));
    assert!(matches!(
        calc("1 2", &[], false),
        Err(CalcError::Tokenize(TokenizeError::AdjacentLiterals { .. }))
    ));
    assert!(matches!(
        calc("5/0", &[], false),
        Err(CalcError::Eval(EvalError::DivisionByZero))
    ));
    assert!(matches!(
        calc("", &[], false),
        Err(CalcError::Eval(EvalError::EmptyExpression))
    ));
}

// ============================================================================
// Display
// ============================================================================

#[test]
fn test_result_formatting() {
    assert_eq!(calc("2+2*2", &[], false).unwrap().to_string(), "6");
    assert_eq!(calc("10**-2", &[], false).unwrap().to_string(), "0.01");
    assert_eq!(calc("4/2", &[], false).unwrap().to_string(), "2.0");
    assert_eq!(calc("10 == 10.0", &[], false).unwrap().to_string(), "true");
    assert_eq!(calc("2j+3", &[], false).unwrap().to_string(), "(3+2j)");
}
