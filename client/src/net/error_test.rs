use super::*;

// =============================================================================
// is_transient
// =============================================================================

#[test]
fn network_failures_are_transient() {
    assert!(ApiError::Network("connection refused".to_owned()).is_transient());
}

#[test]
fn server_5xx_and_throttling_are_transient() {
    for status in [408, 429, 500, 502, 503, 599] {
        let err = ApiError::Server { status, message: None };
        assert!(err.is_transient(), "status {status} should be transient");
    }
}

#[test]
fn client_errors_are_not_transient() {
    assert!(!ApiError::Unauthorized.is_transient());
    assert!(!ApiError::Server { status: 400, message: None }.is_transient());
    assert!(!ApiError::Server { status: 404, message: None }.is_transient());
    assert!(!ApiError::Decode("eof".to_owned()).is_transient());
}

// =============================================================================
// user_message
// =============================================================================

#[test]
fn user_message_prefers_server_message() {
    let err = ApiError::Server { status: 422, message: Some("Date already booked".to_owned()) };
    assert_eq!(err.user_message("fallback"), "Date already booked");
}

#[test]
fn user_message_uses_network_notice() {
    let err = ApiError::Network("timed out".to_owned());
    assert_eq!(err.user_message("fallback"), NETWORK_MESSAGE);
}

#[test]
fn user_message_falls_back() {
    assert_eq!(ApiError::Unauthorized.user_message("fallback"), "fallback");
    assert_eq!(ApiError::Server { status: 500, message: None }.user_message("fallback"), "fallback");
}

#[test]
fn status_reports_response_codes() {
    assert_eq!(ApiError::Unauthorized.status(), Some(401));
    assert_eq!(ApiError::Server { status: 503, message: None }.status(), Some(503));
    assert_eq!(ApiError::Network(String::new()).status(), None);
}

// =============================================================================
// extract_message
// =============================================================================

#[test]
fn extract_message_reads_message_field() {
    assert_eq!(extract_message(r#"{"message":"Booking not found"}"#), Some("Booking not found".to_owned()));
}

#[test]
fn extract_message_reads_error_field() {
    assert_eq!(extract_message(r#"{"error":"Invalid file type"}"#), Some("Invalid file type".to_owned()));
}

#[test]
fn extract_message_ignores_blank_and_non_json() {
    assert_eq!(extract_message(r#"{"message":"  "}"#), None);
    assert_eq!(extract_message("<html>Bad Gateway</html>"), None);
    assert_eq!(extract_message(""), None);
}
