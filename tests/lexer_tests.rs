// tests/lexer_tests.rs

use rpcalc::ast::TokenKind;
use rpcalc::lexer::{TokenizeError, mark_unary, tokenize};
use rpcalc::normalizer::normalize;

fn kinds_of(expr: &str) -> Vec<TokenKind> {
    tokenize(expr)
        .expect("expression tokenizes")
        .iter()
        .map(|t| t.kind)
        .collect()
}

// ============================================================================
// Normalization
// ============================================================================

#[test]
fn test_implicit_multiplication_before_paren() {
    let cases = vec![
        ("2(1+1)", "2*(1+1)"),
        ("1*34(1+1)", "1*34*(1+1)"),
        ("10(2+1)", "10*(2+1)"),
        (".3(2)", ".3*(2)"),
        ("(2(2))", "(2*(2))"),
    ];
    for (input, expected) in cases {
        assert_eq!(normalize(input), expected, "failed for input: {input}");
    }
}

#[test]
fn test_implicit_multiplication_before_name() {
    assert_eq!(normalize("2pi"), "2*pi");
    assert_eq!(normalize("3e"), "3*e");
    // the imaginary suffix stays attached to its digits
    assert_eq!(normalize("2j"), "2j");
    assert_eq!(normalize("sin(2j)"), "sin(2j)");
}

#[test]
fn test_unsupported_characters_dropped() {
    assert_eq!(normalize("2~1"), "21");
    assert_eq!(normalize("1 + #2"), "1 + 2");
}

#[test]
fn test_trailing_comma_removed() {
    assert_eq!(normalize("sin(1, )"), "sin(1)");
    assert_eq!(normalize("f(1,)"), "f(1)");
    assert_eq!(normalize("f( )"), "f( )");
}

#[test]
fn test_normalize_is_idempotent() {
    let cases = vec!["2(1+1)", "10(2+1)", "2pi", "f(1,)", "1*4+3.3/(3 + .3)"];
    for input in cases {
        let once = normalize(input);
        assert_eq!(normalize(&once), once, "failed for input: {input}");
    }
}

#[test]
fn test_normalized_text_tokenizes() {
    // the normalizer's job is that the tokenizer never sees two adjacent
    // numeric literals for well-formed input
    for input in ["10(2+1)", "2pi", ".3(2)", "1*34(1+1)"] {
        tokenize(&normalize(input)).expect("normalized expression tokenizes");
    }
}

// ============================================================================
// Tokenization
// ============================================================================

#[test]
fn test_token_kind_sequence() {
    use TokenKind::*;
    assert_eq!(
        kinds_of("1 + 2*3^sin(pi/2)"),
        vec![Integer, Plus, Integer, Times, Integer, Power, Func, Const, Divide, Integer, RParen]
    );
}

#[test]
fn test_func_lexeme_keeps_trailing_paren() {
    let tokens = tokenize("sin(0)").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Func);
    assert_eq!(tokens[0].lexeme, "sin(");
}

#[test]
fn test_dotted_names() {
    let tokens = tokenize("math.pi").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Const);
    assert_eq!(tokens[0].lexeme, "math.pi");

    let tokens = tokenize("math.sin(1)").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Func);
    assert_eq!(tokens[0].lexeme, "math.sin(");
}

#[test]
fn test_complex_literals() {
    use TokenKind::*;
    assert_eq!(kinds_of("2j"), vec![Complex]);
    assert_eq!(kinds_of("10J"), vec![Complex]);
    // a suffix running into an identifier is not a complex literal
    assert_eq!(kinds_of("2jx"), vec![Integer, Const]);
    assert_eq!(kinds_of("123j4"), vec![Integer, Const]);
    // the fractional part wins first, leaving a bare name
    assert_eq!(kinds_of("2.5j"), vec![Float, Const]);
}

#[test]
fn test_operator_spellings() {
    use TokenKind::*;
    assert_eq!(kinds_of("2**3"), vec![Integer, Power, Integer]);
    assert_eq!(kinds_of("2^3"), vec![Integer, Power, Integer]);
    assert_eq!(kinds_of("7//2"), vec![Integer, FloorDiv, Integer]);
    assert_eq!(kinds_of("1<=2"), vec![Integer, Le, Integer]);
    assert_eq!(kinds_of("1!=2"), vec![Integer, Ne, Integer]);
}

#[test]
fn test_positions_are_contiguous() {
    let tokens = tokenize("1 + 2 * 3").unwrap();
    for (i, token) in tokens.iter().enumerate() {
        assert_eq!(token.position, i);
    }
}

#[test]
fn test_adjacent_literals_rejected() {
    assert!(matches!(
        tokenize("1 2"),
        Err(TokenizeError::AdjacentLiterals { .. })
    ));
    assert!(matches!(
        tokenize("1.2.3"),
        Err(TokenizeError::AdjacentLiterals { .. })
    ));
}

#[test]
fn test_no_rule_match() {
    assert!(matches!(
        tokenize("1 = 2"),
        Err(TokenizeError::NoRuleMatch { .. })
    ));
    assert!(matches!(
        tokenize("5 > = 6"),
        Err(TokenizeError::NoRuleMatch { .. })
    ));
    assert!(matches!(
        tokenize("2."),
        Err(TokenizeError::NoRuleMatch { .. })
    ));
}

// ============================================================================
// Unary resolution
// ============================================================================

#[test]
fn test_unary_replacement() {
    let mut tokens = tokenize("-1-2*(+3)**-4").unwrap();
    mark_unary(&mut tokens);
    assert_eq!(tokens[0].kind, TokenKind::UMinus);
    assert_eq!(tokens[2].kind, TokenKind::Minus);
    assert_eq!(tokens[6].kind, TokenKind::UPlus);
    assert_eq!(tokens[10].kind, TokenKind::UMinus);
}

#[test]
fn test_unary_chain() {
    let mut tokens = tokenize("--1").unwrap();
    mark_unary(&mut tokens);
    assert_eq!(tokens[0].kind, TokenKind::UMinus);
    // the first sign is no value producer, so the second stays unary
    assert_eq!(tokens[1].kind, TokenKind::UMinus);
}

#[test]
fn test_minus_after_closing_paren_is_binary() {
    let mut tokens = tokenize("(1)-2").unwrap();
    mark_unary(&mut tokens);
    assert_eq!(tokens[3].kind, TokenKind::Minus);

    let mut tokens = tokenize("sin(1)-2").unwrap();
    mark_unary(&mut tokens);
    assert_eq!(tokens[3].kind, TokenKind::Minus);
}

#[test]
fn test_minus_after_constant_is_binary() {
    let mut tokens = tokenize("pi-1").unwrap();
    mark_unary(&mut tokens);
    assert_eq!(tokens[1].kind, TokenKind::Minus);
}
