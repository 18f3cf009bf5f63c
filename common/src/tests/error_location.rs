use crate::ErrorLocation;
use std::panic::Location;

/// **VALUE**: Verifies that `ErrorLocation::from()` captures file, line, and column.
///
/// **WHY THIS MATTERS**: Every OSM error variant carries an `ErrorLocation`. If capture
/// breaks, failed fetches can no longer be traced back to the call that issued them.
#[test]
fn given_location_caller_when_error_location_created_then_captures_file_line_column() {
    // GIVEN/WHEN: Capturing the current caller location
    let expected_line = line!() + 1;
    let location = ErrorLocation::from(Location::caller());

    // THEN: Should capture file, line, and column
    assert!(location.file.contains("error_location.rs"));
    assert_eq!(location.line, expected_line);
    assert!(location.column > 0);
}

/// **VALUE**: Verifies the bracketed `[file:line:column]` display format.
///
/// **BUG THIS CATCHES**: Would catch if the Display impl drops a component or changes
/// separators, which would make every error message in the workspace inconsistent.
#[test]
fn given_error_location_when_formatted_then_produces_bracketed_format() {
    // GIVEN: A fixed location
    let location = ErrorLocation {
        file: "src/osm_client/mod.rs",
        line: 42,
        column: 7,
    };

    // WHEN: Formatting as string
    let formatted = location.to_string();

    // THEN: Should produce "[file:line:column]"
    assert_eq!(formatted, "[src/osm_client/mod.rs:42:7]");
}

/// **VALUE**: Verifies `ErrorLocation::caller()` honors `#[track_caller]` propagation.
///
/// **BUG THIS CATCHES**: Would catch if `#[track_caller]` is removed from `caller()`,
/// which would make every error report the same line inside `error_location.rs`.
#[test]
fn given_multiple_call_sites_when_capturing_caller_then_each_has_unique_line() {
    // GIVEN: A helper that forwards the caller location
    #[track_caller]
    fn capture() -> ErrorLocation {
        ErrorLocation::caller()
    }

    // WHEN: Capturing from two consecutive lines
    let first = capture();
    let second = capture();

    // THEN: Same file, sequential lines
    assert_eq!(first.file, second.file);
    assert_eq!(first.line + 1, second.line);
    assert!(first.file.contains("tests"));
}
