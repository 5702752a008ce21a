use novis_derive::novis_error;
use std::borrow::Cow;

#[novis_error]
pub enum SampleError {
    #[error("Parse error{}: {source}", format_context(.context))]
    Parse { source: std::num::ParseIntError, context: Option<Cow<'static, str>> },

    #[error("Missing field {field}")]
    Missing { field: &'static str },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn parse(raw: &str) -> Result<u64, SampleError> {
    Ok(raw.parse::<u64>()?)
}

#[test]
fn novis_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/novis_error_pass.rs");
}

#[test]
fn source_errors_convert_with_question_mark() {
    let err = parse("ten").expect_err("non-numeric input must fail");
    assert!(matches!(err, SampleError::Parse { context: None, .. }));
    assert!(err.to_string().starts_with("Parse error: "));
}

#[test]
fn context_is_attached_to_source_results() {
    let err = "x".parse::<u64>().context("reading api.timeout_ms").expect_err("must fail");
    assert!(err.to_string().starts_with("Parse error (reading api.timeout_ms): "));
}

#[test]
fn context_is_attached_to_own_results() {
    let res: Result<(), SampleError> = Err("boom".into());
    let err = res.context("resolving dashboard config").expect_err("must fail");
    assert_eq!(err.to_string(), "Internal error (resolving dashboard config): boom");
}

#[test]
fn variants_without_context_are_left_untouched() {
    let res: Result<(), SampleError> = Err(SampleError::Missing { field: "auth.api_key" });
    let err = res.context("ignored").expect_err("must fail");
    assert_eq!(err.to_string(), "Missing field auth.api_key");
}

#[test]
fn internal_accepts_owned_strings() {
    let err = SampleError::from(format!("bad {}", "state"));
    assert!(matches!(err, SampleError::Internal { ref message, .. } if message == "bad state"));
}
