#![allow(dead_code)]

use numflow::{EvalResult, Evaluator, EvaluatorOptions, Value};
use once_cell::sync::Lazy;
use pretty_assertions::assert_eq;

/// One evaluator per test binary, so cases also exercise the shared cache.
pub static EVALUATOR: Lazy<Evaluator> = Lazy::new(|| Evaluator::new(EvaluatorOptions::default()));

pub struct Expected {
    pub data: Value,
    pub shape: &'static [usize],
    pub preview: &'static str,
}

pub fn check_success(name: &str, result: &EvalResult, expected: Expected) {
    let array = match result {
        EvalResult::Success(array) => array,
        EvalResult::Failure(err) => panic!("{name} failed: {err}"),
    };
    assert_eq!(array.data, expected.data, "data of {name}");
    assert_eq!(array.shape.as_slice(), expected.shape, "shape of {name}");
    assert_eq!(array.ndim, expected.shape.len().min(2), "ndim of {name}");
    assert_eq!(array.size, expected.data.size(), "size of {name}");
    assert_eq!(array.preview, expected.preview, "preview of {name}");
}

pub fn check_failure(name: &str, result: &EvalResult, message: &str) {
    match result {
        EvalResult::Success(array) => panic!("{name} unexpectedly succeeded: {array:?}"),
        EvalResult::Failure(err) => assert_eq!(err.to_string(), message, "error of {name}"),
    }
}

/// Evaluate one operation and compare the full record.
///
/// ```ignore
/// test_case!(
///     zeros_default,
///     op: "np.zeros",
///     params: {},
///     data: Value::filled(3, 3, 0.0),
///     shape: [3, 3],
///     preview: "...",
/// );
/// ```
macro_rules! test_case {
    (
        $name:ident,
        op: $op:expr,
        params: { $($key:literal: $value:expr),* $(,)? },
        data: $data:expr,
        shape: [$($dim:expr),* $(,)?],
        preview: $preview:expr $(,)?
    ) => {
        #[test]
        fn $name() {
            let params = numflow::Params::new()$(.with($key, $value))*;
            let result = $crate::cases::EVALUATOR.evaluate($op, &params);
            $crate::cases::check_success(
                $op,
                &result,
                $crate::cases::Expected {
                    data: $data,
                    shape: &[$($dim),*],
                    preview: $preview,
                },
            );
        }
    };
    (
        $name:ident,
        op: $op:expr,
        params: { $($key:literal: $value:expr),* $(,)? },
        error: $message:expr $(,)?
    ) => {
        #[test]
        fn $name() {
            let params = numflow::Params::new()$(.with($key, $value))*;
            let result = $crate::cases::EVALUATOR.evaluate($op, &params);
            $crate::cases::check_failure($op, &result, $message);
        }
    };
}

pub struct LiteralCase {
    pub name: &'static str,
    pub input: &'static str,
    /// Accepted value, or the error code it is rejected with.
    pub expected: Result<Value, &'static str>,
}

pub static LITERAL_CASES: Lazy<Vec<LiteralCase>> = Lazy::new(|| {
    vec![
        LiteralCase {
            name: "scalar",
            input: "2.5",
            expected: Ok(Value::Scalar(2.5)),
        },
        LiteralCase {
            name: "signed_exponent",
            input: "-1e-2",
            expected: Ok(Value::Scalar(-0.01)),
        },
        LiteralCase {
            name: "flat_list",
            input: "[1, 2, 3]",
            expected: Ok(Value::Vector(vec![1.0, 2.0, 3.0])),
        },
        LiteralCase {
            name: "tuple_with_trailing_comma",
            input: "(4, 5,)",
            expected: Ok(Value::Vector(vec![4.0, 5.0])),
        },
        LiteralCase {
            name: "empty_list",
            input: "[]",
            expected: Ok(Value::Vector(vec![])),
        },
        LiteralCase {
            name: "matrix",
            input: "[[1, 2], [3, 4]]",
            expected: Ok(Value::Matrix(vec![vec![1.0, 2.0], vec![3.0, 4.0]])),
        },
        LiteralCase {
            name: "whitespace",
            input: "  [ 1 ,\n 2 ]  ",
            expected: Ok(Value::Vector(vec![1.0, 2.0])),
        },
        LiteralCase {
            name: "unclosed",
            input: "[1, 2",
            expected: Err("L001"),
        },
        LiteralCase {
            name: "code_injection",
            input: "__import__('os')",
            expected: Err("L001"),
        },
        LiteralCase {
            name: "json_string",
            input: "[\"1\"]",
            expected: Err("L001"),
        },
        LiteralCase {
            name: "too_deep",
            input: "[[[[[[[[[[[[[[[[[[[[[[[[[[[[[[[[[1]]]]]]]]]]]]]]]]]]]]]]]]]]]]]]]]]",
            expected: Err("L003"),
        },
        LiteralCase {
            name: "ragged",
            input: "[[1, 2], [3]]",
            expected: Err("L004"),
        },
        LiteralCase {
            name: "rank_three",
            input: "[[[1]]]",
            expected: Err("L004"),
        },
    ]
});
