use crate::HttpStatusCode;

#[test]
fn given_osm_status_constants_when_compared_then_match_raw_codes() {
    assert_eq!(HttpStatusCode::BAD_REQUEST, HttpStatusCode::from(400));
    assert_eq!(HttpStatusCode::NOT_FOUND, HttpStatusCode::from(404));
    assert_eq!(HttpStatusCode::BANDWIDTH_LIMIT_EXCEEDED, HttpStatusCode(509));
}

/// **VALUE**: Verifies the status range predicates used to decide between success
/// parsing and error classification.
///
/// **BUG THIS CATCHES**: An off-by-one in `is_success` would send 300-range redirects
/// or 199 informational codes down the parse path.
#[test]
fn given_status_codes_when_checking_ranges_then_classifies_correctly() {
    assert!(HttpStatusCode(200).is_success());
    assert!(HttpStatusCode(299).is_success());
    assert!(!HttpStatusCode(300).is_success());

    assert!(!HttpStatusCode(400).is_success());
    assert!(!HttpStatusCode(509).is_success());
}

#[test]
fn given_status_code_when_displayed_then_prints_number() {
    assert_eq!(HttpStatusCode(509).to_string(), "509");
}
