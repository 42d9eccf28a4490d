use postgrest_client::prelude::*;

#[test]
fn api_error_display_carries_status_and_message() {
    let err = AppError::Api {
        status: StatusCode::NOT_FOUND,
        error: ApiError::from_text("no such table"),
    };
    let text = err.to_string();
    assert!(text.starts_with("api error (404 Not Found)"));
    assert!(text.contains("no such table"));
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
}

#[test]
fn plain_variants_display() {
    assert_eq!(
        AppError::MissingToken.to_string(),
        "missing token in authentication response"
    );
    assert_eq!(AppError::AuthenticationAborted.to_string(), "authentication aborted");
    assert_eq!(AppError::LoaderDropped.to_string(), "loader task dropped");
    assert_eq!(
        AppError::InvalidHeader("bad name".into()).to_string(),
        "invalid header: bad name"
    );
    assert_eq!(AppError::MissingToken.status(), None);
}

#[test]
fn json_errors_convert() {
    let parse_err = serde_json::from_str::<Value>("{").unwrap_err();
    let err: AppError = parse_err.into();
    assert!(matches!(err, AppError::Json(_)));
    assert!(err.to_string().starts_with("json error: "));
}

#[test]
fn invalid_header_display() {
    let err = AppError::InvalidHeader("X-Tenant: failed to parse header value".into());
    assert_eq!(
        err.to_string(),
        "invalid header: X-Tenant: failed to parse header value"
    );
}

#[test]
fn duplicate_keeps_api_errors_intact() {
    let original = AppError::Api {
        status: StatusCode::UNAUTHORIZED,
        error: ApiError::from_body(r#"{"code":"28P01","message":"bad password","hint":null}"#),
    };
    let copy = original.duplicate();
    assert_eq!(copy.status(), Some(StatusCode::UNAUTHORIZED));
    assert_eq!(copy.api_error(), original.api_error());
    assert_eq!(copy.api_error().and_then(ApiError::message_str), Some("bad password"));
}

#[test]
fn duplicate_flattens_uncloneable_sources() {
    let original: AppError = serde_json::from_str::<Value>("nope").unwrap_err().into();
    match original.duplicate() {
        AppError::AuthenticationFailed(message) => assert!(message.starts_with("json error: ")),
        other => panic!("unexpected {other:?}"),
    }
    assert!(matches!(AppError::MissingToken.duplicate(), AppError::MissingToken));
}

#[test]
fn envelope_for_plain_text() {
    let error = ApiError::from_body("<html>bad gateway</html>");
    assert_eq!(error.code, json!(0));
    assert_eq!(error.hint, None);
    assert_eq!(
        error.raw,
        json!({"hint": null, "details": null, "code": 0, "message": "<html>bad gateway</html>"})
    );
}

#[test]
fn json_body_is_kept_raw() {
    let error = ApiError::from_body(r#"{"code":"23505","message":"duplicate key","details":"Key (id)=(1)"}"#);
    assert_eq!(error.code, json!("23505"));
    assert_eq!(error.details, Some(json!("Key (id)=(1)")));
    assert_eq!(error.raw["message"], json!("duplicate key"));
}
