use crate::common::{LOGIN_URL, MockTransport, PREFIX, client_with, login_ok, test_config};
use postgrest_client::prelude::*;

#[tokio::test]
async fn request_applies_prefix_and_global_headers() {
    let transport = Arc::new(MockTransport::new(login_ok("t")));
    let config = test_config()
        .global_header("Accept-Profile", "api")
        .global_header("Prefer", "count=exact");
    let client = PostgrestClient::with_transport(config, transport.clone());

    client
        .model("projects")
        .get_page(None, 1, &CallOptions::new(), &Headers::new())
        .await
        .expect("page");

    let sent = &transport.requests()[0];
    assert_eq!(sent.url, format!("{PREFIX}/projects"));
    assert_eq!(sent.headers.get("Accept-Profile"), Some("api"));
    // resource defaults sit above global headers
    assert_eq!(sent.headers.get("Prefer"), Some("count=none"));
    assert!(!sent.headers.contains("Authorization"));
}

#[tokio::test]
async fn get_data_goes_to_query() {
    let transport = Arc::new(MockTransport::new(login_ok("t")));
    let client = client_with(transport.clone());

    client
        .model("projects")
        .get_row(Some(json!({"id": "eq.9"})), &CallOptions::new(), &Headers::new())
        .await
        .expect("row");

    let sent = &transport.requests()[0];
    assert_eq!(sent.url, format!("{PREFIX}/projects?id=eq.9"));
    assert!(sent.body.is_none());
    assert_eq!(sent.headers.get("Range"), Some("0-0"));
}

#[tokio::test]
async fn request_with_token_sends_bearer() {
    let transport = Arc::new(MockTransport::new(login_ok("abc")));
    let client = client_with(transport.clone());

    client
        .model("projects")
        .post_with_token(json!({"name": "p"}), &CallOptions::new(), &Headers::new())
        .await
        .expect("post");

    let sent = transport.requests_to(&format!("{PREFIX}/projects"));
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].headers.get("Authorization"), Some("Bearer abc"));
    assert_eq!(sent[0].headers.get("Prefer"), Some("return=representation"));
    assert_eq!(client.token().as_deref(), Some("abc"));
}

#[tokio::test]
async fn failed_login_falls_back_to_anonymous_request() {
    let transport = Arc::new(MockTransport::new(|request| {
        if request.url == LOGIN_URL {
            RawResponse::new(StatusCode::INTERNAL_SERVER_ERROR, "login backend down")
        } else {
            RawResponse::new(StatusCode::OK, r#"[{"id":1}]"#)
        }
    }));
    let client = client_with(transport.clone());

    let response = client
        .model("public_items")
        .get_page_with_token(None, 1, &CallOptions::new(), &Headers::new())
        .await
        .expect("anonymous read still answers");

    assert_eq!(response.body, json!([{"id": 1}]));
    let sent = transport.requests_to(&format!("{PREFIX}/public_items"));
    assert_eq!(sent.len(), 1);
    assert!(!sent[0].headers.contains("Authorization"));
}

#[tokio::test]
async fn fallback_surfaces_server_rejection_of_anonymous_request() {
    let transport = Arc::new(MockTransport::new(|request| {
        if request.url == LOGIN_URL {
            RawResponse::new(StatusCode::UNAUTHORIZED, r#"{"message":"bad credentials"}"#)
        } else {
            RawResponse::new(
                StatusCode::UNAUTHORIZED,
                r#"{"code":"42501","message":"permission denied for table secrets","hint":null,"details":null}"#,
            )
        }
    }));
    let client = client_with(transport);

    let err = client
        .model("secrets")
        .get_page_with_token(None, 1, &CallOptions::new(), &Headers::new())
        .await
        .expect_err("server rejects anonymous read");
    assert_eq!(err.api_error().map(|e| e.code.clone()), Some(json!("42501")));
}

#[tokio::test]
async fn strict_fallback_returns_login_error() {
    let transport = Arc::new(MockTransport::new(|request| {
        if request.url == LOGIN_URL {
            RawResponse::new(StatusCode::UNAUTHORIZED, r#"{"message":"bad credentials"}"#)
        } else {
            RawResponse::new(StatusCode::OK, "[]")
        }
    }));
    let config = test_config().auth_fallback(AuthFallback::Fail);
    let client = PostgrestClient::with_transport(config, transport.clone());

    let err = client
        .model("secrets")
        .get_row_with_token(None, &CallOptions::new(), &Headers::new())
        .await
        .expect_err("login error surfaces");
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn non_json_error_body_becomes_envelope() {
    let transport = Arc::new(MockTransport::new(|_| {
        RawResponse::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    }));
    let client = client_with(transport);

    let err = client
        .model("projects")
        .delete_request(&json!({"id": "eq.1"}), &CallOptions::new(), &Headers::new())
        .await
        .expect_err("server error");

    let api_error = err.api_error().expect("api error");
    assert_eq!(api_error.hint, None);
    assert_eq!(api_error.details, None);
    assert_eq!(api_error.code, json!(0));
    assert_eq!(api_error.message, json!("Internal Server Error"));
}

#[tokio::test]
async fn options_request_and_patch_query() {
    let transport = Arc::new(MockTransport::new(login_ok("t")));
    let client = client_with(transport.clone());
    let model = client.model("projects");

    model.options(&CallOptions::new()).await.expect("options");
    model
        .patch_with_token(
            &json!({"id": "eq.4"}),
            json!({"done": true}),
            &CallOptions::new(),
            &Headers::new(),
        )
        .await
        .expect("patch");

    let sent = transport.requests();
    assert_eq!(sent[0].method, Method::OPTIONS);
    assert_eq!(sent[0].url, format!("{PREFIX}/projects"));
    let patch = sent.last().expect("patch sent");
    assert_eq!(patch.method, Method::PATCH);
    assert_eq!(patch.url, format!("{PREFIX}/projects?id=eq.4"));
    assert_eq!(patch.body, Some(json!({"done": true})));
    assert_eq!(patch.headers.get("Authorization"), Some("Bearer t"));
}

#[tokio::test]
async fn clients_do_not_share_tokens() {
    let first = client_with(Arc::new(MockTransport::new(login_ok("one"))));
    let second = client_with(Arc::new(MockTransport::new(login_ok("two"))));

    first.authenticate().await.expect("first");
    assert_eq!(first.token().as_deref(), Some("one"));
    assert!(second.token().is_none());
}
