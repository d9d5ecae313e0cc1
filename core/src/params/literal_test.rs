use super::*;
use crate::values::Value;
use pretty_assertions::assert_eq;

#[test]
fn test_parse_flat_list() {
    assert_eq!(parse_vector("[1, 2, 3]").unwrap(), vec![1.0, 2.0, 3.0]);
    assert_eq!(parse_vector("  [ -1.5 ,+2, .5, 1e3, 2E-1, ] ").unwrap(), vec![
        -1.5, 2.0, 0.5, 1000.0, 0.2
    ]);
    assert_eq!(parse_vector("[]").unwrap(), Vec::<f64>::new());
    assert_eq!(parse_vector("(4, 5)").unwrap(), vec![4.0, 5.0]);
}

#[test]
fn test_parse_value_ranks() {
    assert_eq!(parse_value("7").unwrap(), Value::Scalar(7.0));
    assert_eq!(parse_value("[7]").unwrap(), Value::Vector(vec![7.0]));
    assert_eq!(
        parse_value("[[1, 2], [3, 4]]").unwrap(),
        Value::Matrix(vec![vec![1.0, 2.0], vec![3.0, 4.0]])
    );
}

#[test]
fn test_parse_value_rejects_ragged_rows() {
    let err = parse_value("[[1, 2], [3]]").unwrap_err();
    assert!(matches!(err.kind, LiteralErrorKind::TypeMismatch { .. }));
    assert_eq!(err.span, Span(9..12));
}

#[test]
fn test_parse_value_rejects_rank_three() {
    let err = parse_value("[[[1]]]").unwrap_err();
    assert!(matches!(err.kind, LiteralErrorKind::TypeMismatch { .. }));
}

#[test]
fn test_parse_value_rejects_mixed_items() {
    assert!(parse_value("[1, [2]]").is_err());
    assert!(parse_value("[[1], 2]").is_err());
}

#[test]
fn test_parse_shape_forms() {
    assert_eq!(parse_shape("(2, 3)").unwrap().as_slice(), &[2, 3]);
    assert_eq!(parse_shape("[4]").unwrap().as_slice(), &[4]);
    assert_eq!(parse_shape("(5,)").unwrap().as_slice(), &[5]);
    assert_eq!(parse_shape("6").unwrap().as_slice(), &[6]);
    assert_eq!(parse_shape("(2.0, 0)").unwrap().as_slice(), &[2, 0]);
    assert!(parse_shape("()").unwrap().is_empty());
}

#[test]
fn test_parse_shape_rejects_non_integers() {
    for input in ["(2.5, 3)", "(-1, 3)", "((2), 3)", "(1e400,)"] {
        let err = parse_shape(input).unwrap_err();
        assert!(
            matches!(err.kind, LiteralErrorKind::TypeMismatch { .. }),
            "{} gave {:?}",
            input,
            err.kind
        );
    }
}

#[test]
fn test_rejects_code() {
    for input in [
        "not json",
        "[1, 2",
        "1 + 2",
        "[x for x in range(3)]",
        "__import__('os')",
        "[1, 2] [3]",
        "",
        "[,]",
    ] {
        let err = parse_literal(input).unwrap_err();
        assert!(
            matches!(err.kind, LiteralErrorKind::UnexpectedToken { .. }),
            "{:?} gave {:?}",
            input,
            err.kind
        );
    }
}

#[test]
fn test_unexpected_token_message() {
    let err = parse_literal("[1, x]").unwrap_err();
    assert_eq!(err.span.start(), 4);
    let message = err.to_string();
    assert!(message.starts_with("Expected number"), "{}", message);
    assert!(message.ends_with("found 'x'"), "{}", message);
    assert_eq!(err.code(), "L001");
}

#[test]
fn test_depth_limit() {
    let deep = format!("{}1{}", "[".repeat(40), "]".repeat(40));
    let err = parse_literal(&deep).unwrap_err();
    assert_eq!(
        err.kind,
        LiteralErrorKind::MaxDepthExceeded {
            max_depth: MAX_LITERAL_DEPTH
        }
    );
    assert_eq!(err.span.start(), MAX_LITERAL_DEPTH);

    let ok = format!("{}1{}", "[".repeat(3), "]".repeat(3));
    assert!(parse_literal(&ok).is_ok());
}

#[test]
fn test_literal_spans() {
    let literal = parse_literal("[1, [22]]").unwrap();
    let Literal::Sequence { items, span } = literal else {
        panic!("expected a sequence");
    };
    assert_eq!(span, Span(0..9));
    assert_eq!(items[0].span(), &Span(1..2));
    assert_eq!(items[1].span(), &Span(4..8));
}

#[test]
fn test_array_literal_fallback() {
    crate::test_utils::init_test_logging();
    assert_eq!(parse_array_literal("[4, 5]"), vec![4.0, 5.0]);
    assert_eq!(parse_array_literal("not json"), vec![1.0, 2.0, 3.0]);
    assert_eq!(parse_array_literal("[[1, 2]]"), vec![1.0, 2.0, 3.0]);
    assert_eq!(parse_array_value("oops"), Value::Vector(vec![1.0, 2.0, 3.0]));
}

#[test]
fn test_shape_literal_fallback() {
    assert_eq!(parse_shape_literal("(2, 3)").as_slice(), &[2, 3]);
    assert_eq!(parse_shape_literal("(2, 'a')").as_slice(), &[3]);
    assert_eq!(parse_shape_literal("(1.5, 2)").as_slice(), &[3]);
}

#[test]
fn test_scalar_parameters() {
    assert_eq!(parse_float_or(Some("2.5"), 0.0), 2.5);
    assert_eq!(parse_float_or(Some(" -3 "), 0.0), -3.0);
    assert_eq!(parse_float_or(Some("abc"), 10.0), 10.0);
    assert_eq!(parse_float_or(Some("inf"), 10.0), 10.0);
    assert_eq!(parse_float_or(None, 10.0), 10.0);

    assert_eq!(parse_count_or(Some("5"), 50), 5);
    assert_eq!(parse_count_or(Some("5.9"), 50), 5);
    assert_eq!(parse_count_or(Some("-2"), 50), -2);
    assert_eq!(parse_count_or(Some("five"), 50), 50);
    assert_eq!(parse_count_or(None, 50), 50);
}

#[test]
fn test_params_blank_values_are_absent() {
    let params = Params::new().with("shape", "  ").with("dtype", " int32 ");
    assert_eq!(params.get("shape"), None);
    assert_eq!(params.get("dtype"), Some("int32"));
    assert_eq!(params.raw("dtype"), Some(" int32 "));
    assert_eq!(params.get("missing"), None);
}

#[test]
fn test_params_cache_key_is_canonical() {
    let a = Params::new().with("stop", "10").with("start", "0");
    let b: Params = [("start", "0"), ("stop", "10")].into_iter().collect();
    assert_eq!(a.cache_key(), b.cache_key());
    assert_eq!(a.cache_key(), r#"{"start":"0","stop":"10"}"#);
    assert_eq!(Params::new().cache_key(), "{}");
}

#[test]
fn test_params_deserialize_leniently() {
    let json = r#"{"start": 0, "stop": "10", "axis": null, "data": [1, 2], "flag": true}"#;
    let params: Params = serde_json::from_str(json).unwrap();
    assert_eq!(params.get("start"), Some("0"));
    assert_eq!(params.get("stop"), Some("10"));
    assert_eq!(params.get("axis"), None);
    assert_eq!(params.raw("axis"), None);
    assert_eq!(params.get("data"), Some("[1,2]"));
    assert_eq!(params.get("flag"), Some("true"));
}

#[test]
fn test_params_deserialize_null_as_empty() {
    let params: Params = serde_json::from_str("null").unwrap();
    assert!(params.is_empty());
    assert!(serde_json::from_str::<Params>("[1, 2]").is_err());
}
