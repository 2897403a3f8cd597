//! Integration tests for pattern compilation

use pretty_assertions::assert_eq;
use sigpat::ast::{FormalPattern, ParamsPattern};
use sigpat::{compile, PatternError};

#[test]
fn test_compile_is_deterministic() {
    let first = compile("!com.foo.Bar||void com.foo..*.find*(.., java.lang.String...)")
        .expect("valid pattern");
    let second = compile("!com.foo.Bar||void com.foo..*.find*(.., java.lang.String...)")
        .expect("valid pattern");
    assert_eq!(first, second);
}

#[test]
fn test_bare_star_return_is_not_explicit() {
    let pattern = compile("* foo()").expect("valid pattern");
    assert!(!pattern.return_is_explicit());
    assert!(pattern.owner().is_none());

    let pattern = compile("void foo()").expect("valid pattern");
    assert!(pattern.return_is_explicit());
}

#[test]
fn test_qualified_name_splits_at_last_separator() {
    let pattern = compile("* com.foo.Bar.baz()").expect("valid pattern");
    assert!(pattern.owner().is_some());
    assert_eq!(pattern.name().to_string(), "baz");

    let pattern = compile("* baz()").expect("valid pattern");
    assert!(pattern.owner().is_none());
    assert_eq!(pattern.name().to_string(), "baz");
}

#[test]
fn test_params_variants() {
    let exact = compile("* m(int, long)").expect("valid pattern");
    assert!(matches!(exact.params(), ParamsPattern::Exact(list) if list.len() == 2));

    let empty = compile("* m()").expect("valid pattern");
    assert!(matches!(empty.params(), ParamsPattern::Exact(list) if list.is_empty()));

    let open = compile("* m(..)").expect("valid pattern");
    assert!(matches!(open.params(), ParamsPattern::DotDotPrefixed(list) if list.is_empty()));

    let trailing = compile("* m(.., java.lang.String)").expect("valid pattern");
    assert!(matches!(trailing.params(), ParamsPattern::DotDotPrefixed(list) if list.len() == 1));

    let solo = compile("* m(java.lang.String...)").expect("valid pattern");
    assert!(matches!(
        solo.params(),
        ParamsPattern::SoloVarargs(FormalPattern { varargs: true, .. })
    ));

    let mixed = compile("* m(int, java.lang.String...)").expect("valid pattern");
    match mixed.params() {
        ParamsPattern::Exact(list) => {
            assert_eq!(list.len(), 2);
            assert!(!list[0].varargs);
            assert!(list[1].varargs);
        }
        other => panic!("expected exact list, got {other:?}"),
    }
}

#[test]
fn test_second_dotdot_is_semantic_error() {
    match compile("* foo(.., ..)") {
        Err(PatternError::Semantic { .. }) => {}
        other => panic!("expected semantic error, got {other:?}"),
    }
}

#[test]
fn test_dotdot_not_first_is_semantic_error() {
    match compile("* foo(int, .., long)") {
        Err(PatternError::Semantic { position, .. }) => {
            // the offending `..` sits after "* foo(int, "
            assert_eq!(position, 11);
        }
        other => panic!("expected semantic error, got {other:?}"),
    }
    assert!(matches!(
        compile("* foo(int, ..)"),
        Err(PatternError::Semantic { .. })
    ));
}

#[test]
fn test_varargs_marker_must_be_final() {
    match compile("* foo(java.lang.String..., int)") {
        Err(PatternError::Semantic { reason, .. }) => {
            assert!(reason.contains("varargs"));
        }
        other => panic!("expected semantic error, got {other:?}"),
    }
}

#[test]
fn test_unmatched_parentheses_are_syntax_errors() {
    assert!(matches!(compile("* foo("), Err(PatternError::Syntax { .. })));
    assert!(matches!(compile("* foo)"), Err(PatternError::Syntax { .. })));
}

#[test]
fn test_missing_return_type_is_syntax_error() {
    // The grammar requires a leading type pattern before the name
    match compile("foo()") {
        Err(PatternError::Syntax { position, .. }) => assert_eq!(position, 3),
        other => panic!("expected syntax error, got {other:?}"),
    }
}

#[test]
fn test_trailing_tokens_are_syntax_errors() {
    match compile("* foo() bar") {
        Err(PatternError::Syntax { expected, .. }) => {
            assert_eq!(expected, "end of pattern");
        }
        other => panic!("expected syntax error, got {other:?}"),
    }
}

#[test]
fn test_whitespace_inside_name_is_syntax_error() {
    assert!(matches!(compile("* fo o()"), Err(PatternError::Syntax { .. })));
}

#[test]
fn test_empty_parameter_group_is_syntax_error() {
    assert!(matches!(compile("* foo(int,)"), Err(PatternError::Syntax { .. })));
    assert!(matches!(compile("* foo(int, )"), Err(PatternError::Syntax { .. })));
}

#[test]
fn test_generics_are_unsupported() {
    match compile("java.util.List<java.lang.String> get()") {
        Err(PatternError::Unsupported { construct, .. }) => assert_eq!(construct, "<"),
        other => panic!("expected unsupported error, got {other:?}"),
    }
}

#[test]
fn test_pointcut_keywords_are_unsupported() {
    match compile("* cflow(..)") {
        Err(PatternError::Unsupported { construct, position }) => {
            assert_eq!(construct, "cflow");
            assert_eq!(position, 2);
        }
        other => panic!("expected unsupported error, got {other:?}"),
    }
    assert!(matches!(
        compile("declare parents()"),
        Err(PatternError::Unsupported { .. })
    ));
}

#[test]
fn test_stray_operator_is_syntax_error_with_position() {
    match compile("* foo(int & long)") {
        Err(PatternError::Syntax { position, .. }) => assert_eq!(position, 10),
        other => panic!("expected syntax error, got {other:?}"),
    }
}

#[test]
fn test_boolean_precedence_shape() {
    // `!` binds tighter than `&&`, `&&` tighter than `||`; the textual
    // rendering of the compiled expression preserves the grouping
    let pattern = compile("!a&&b||c m()").expect("valid pattern");
    assert_eq!(pattern.return_type().to_string(), "!a&&b||c");

    let negated_only_left = compile("!a&&b m()").expect("valid pattern");
    assert_ne!(
        negated_only_left.return_type(),
        compile("!b&&a m()").expect("valid pattern").return_type()
    );
}

#[test]
fn test_double_negation_is_rejected() {
    assert!(matches!(compile("!!a m()"), Err(PatternError::Syntax { .. })));
}

#[test]
fn test_array_dims_in_type_positions() {
    assert!(compile("int[] m()").is_ok());
    assert!(compile("* m(java.lang.String[][])").is_ok());
    assert!(matches!(compile("* m(int[)"), Err(PatternError::Syntax { .. })));
}

#[test]
fn test_owner_keeps_trailing_gap() {
    // `com.foo..baz` selects a method `baz` on any type below `com.foo`
    let pattern = compile("* com.foo..baz()").expect("valid pattern");
    assert!(pattern.owner().is_some());
    assert_eq!(pattern.name().to_string(), "baz");
}
