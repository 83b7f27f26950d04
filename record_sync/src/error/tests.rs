//! Unit tests for error context and rendering.

use rstest::rstest;

use super::{CoerceError, Role, SyncError};

fn out_of_range() -> CoerceError {
    CoerceError::OutOfRange {
        from: "i64",
        to: "u8",
    }
}

#[rstest]
fn innermost_strips_context() {
    let err = out_of_range().at_element(3).in_field("scores");
    assert_eq!(err.innermost(), &out_of_range());
    assert_eq!(err.path(), "scores.3");
}

#[rstest]
fn path_is_empty_without_context() {
    assert_eq!(out_of_range().path(), "");
    assert_eq!(out_of_range().innermost(), &out_of_range());
}

#[rstest]
#[case(Role::Source, "source is not a record: found `u8`")]
#[case(Role::Destination, "destination is not a record: found `u8`")]
fn not_a_record_names_the_role(#[case] role: Role, #[case] expected: &str) {
    let err = SyncError::NotARecord { role, found: "u8" };
    assert_eq!(err.to_string(), expected);
}

#[rstest]
fn field_error_reports_types_and_cause() {
    let err = SyncError::field("age", "i64", "u8", out_of_range());
    assert_eq!(
        err.to_string(),
        "failed to copy field 'age' from `i64` to `u8`: value of `i64` does not fit in `u8`"
    );
    assert_eq!(err.coerce_error(), Some(&out_of_range()));
    assert!(std::error::Error::source(&err).is_some());
}
