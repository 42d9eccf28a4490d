use crate::common::create_test_client;
use assert_json_diff::assert_json_include;
use mockito::{Matcher, Server};
use postgrest_client::prelude::*;

#[tokio::test]
async fn test_page_read_sends_range_and_reads_total() {
    let mut server = Server::new_async().await;
    let users = server
        .mock("GET", "/users")
        .match_query(Matcher::UrlEncoded("name".into(), "ilike.*ana*".into()))
        .match_header("range-unit", "items")
        .match_header("range", "10-19")
        .match_header("prefer", "count=exact")
        .with_status(206)
        .with_header("content-type", "application/json")
        .with_header("content-range", "10-11/12")
        .with_body(r#"[{"id":11,"name":"ana"},{"id":12,"name":"anabel"}]"#)
        .create_async()
        .await;

    let client = create_test_client(&server);
    let response = client
        .model("users")
        .get_page(
            Some(json!({"name": "ilike.*ana*"})),
            2,
            &CallOptions::new(),
            &Headers::from([("Prefer", "count=exact")]),
        )
        .await
        .expect("page");

    assert_eq!(response.rows().len(), 2);
    assert_eq!(response.content_range().and_then(|r| r.total), Some(12));
    assert_json_include!(actual: response.body, expected: json!([{"id": 11}, {"id": 12}]));
    users.assert_async().await;
}

#[tokio::test]
async fn test_writes_ask_for_representation() {
    let mut server = Server::new_async().await;
    let created = server
        .mock("POST", "/tasks")
        .match_header("prefer", "return=representation")
        .match_body(Matcher::Json(json!({"title": "write docs"})))
        .with_status(201)
        .with_body(r#"[{"id":5,"title":"write docs","done":false}]"#)
        .create_async()
        .await;
    let updated = server
        .mock("PATCH", "/tasks")
        .match_query(Matcher::UrlEncoded("id".into(), "eq.5".into()))
        .match_body(Matcher::Json(json!({"done": true})))
        .with_status(200)
        .with_body(r#"[{"id":5,"title":"write docs","done":true}]"#)
        .create_async()
        .await;
    let deleted = server
        .mock("DELETE", "/tasks")
        .match_query(Matcher::UrlEncoded("id".into(), "eq.5".into()))
        .with_status(204)
        .create_async()
        .await;

    let client = create_test_client(&server);
    let tasks = client.model("tasks");
    let filter = json!({"id": "eq.5"});

    let response = tasks
        .post(json!({"title": "write docs"}), &CallOptions::new(), &Headers::new())
        .await
        .expect("create");
    assert_eq!(response.status, StatusCode::CREATED);

    let response = tasks
        .patch(&filter, json!({"done": true}), &CallOptions::new(), &Headers::new())
        .await
        .expect("update");
    assert_json_include!(actual: response.body, expected: json!([{"done": true}]));

    let response = tasks
        .delete_request(&filter, &CallOptions::new(), &Headers::new())
        .await
        .expect("delete");
    assert_eq!(response.body, Value::Null);

    created.assert_async().await;
    updated.assert_async().await;
    deleted.assert_async().await;
}

#[tokio::test]
async fn test_plain_text_failure_becomes_envelope() {
    let mut server = Server::new_async().await;
    let _broken = server
        .mock("GET", "/reports")
        .match_query(Matcher::Any)
        .with_status(502)
        .with_header("content-type", "text/html")
        .with_body("<h1>Bad Gateway</h1>")
        .create_async()
        .await;

    let client = create_test_client(&server);
    let err = client
        .request(RequestOptions::get("/reports"))
        .await
        .expect_err("gateway error");

    assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
    let body = err.api_error().expect("api error");
    assert_eq!(
        body.raw,
        json!({"hint": null, "details": null, "code": 0, "message": "<h1>Bad Gateway</h1>"})
    );
}

#[tokio::test]
async fn test_server_error_body_is_passed_through() {
    let mut server = Server::new_async().await;
    let _conflict = server
        .mock("POST", "/users")
        .with_status(409)
        .with_header("content-type", "application/json")
        .with_body(r#"{"code":"23505","message":"duplicate key value","details":"Key (email)","hint":null}"#)
        .create_async()
        .await;

    let client = create_test_client(&server);
    let err = client
        .model("users")
        .post(json!({"email": "a@b.c"}), &CallOptions::new(), &Headers::new())
        .await
        .expect_err("conflict");

    let body = err.api_error().expect("api error");
    assert_eq!(body.code, json!("23505"));
    assert_eq!(body.message_str(), Some("duplicate key value"));
}

#[tokio::test]
async fn test_loader_runs_against_server() {
    let mut server = Server::new_async().await;
    let stats = server
        .mock("GET", "/stats")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"open":3}"#)
        .create_async()
        .await;

    let client = create_test_client(&server);
    let loader = client.loader(RequestOptions::get("/stats"));
    let pending = loader.load();
    assert!(loader.is_busy());

    let response = pending.await.expect("stats");
    assert_eq!(response.body, json!({"open": 3}));
    assert!(!loader.is_busy());
    stats.assert_async().await;
}

#[test]
fn test_options_request_outside_async_test() {
    tokio_test::block_on(async {
        let mut server = Server::new_async().await;
        let options = server
            .mock("OPTIONS", "/users")
            .with_status(200)
            .with_header("allow", "GET,POST,PATCH,DELETE")
            .create_async()
            .await;

        let client = create_test_client(&server);
        let response = client
            .model("users")
            .options(&CallOptions::new())
            .await
            .expect("options");

        assert_eq!(response.headers.get("allow"), Some("GET,POST,PATCH,DELETE"));
        options.assert_async().await;
    });
}

#[tokio::test]
async fn test_null_filter_is_sent_as_bare_key_on_reads_and_writes() {
    let mut server = Server::new_async().await;
    let read = server
        .mock("GET", "/users")
        .match_query(Matcher::Regex("^deleted_at&role=eq.admin$".into()))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;
    let write = server
        .mock("PATCH", "/users")
        .match_query(Matcher::Regex("^deleted_at&role=eq.admin$".into()))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let client = create_test_client(&server);
    let users = client.model("users");
    let filters = json!({"deleted_at": null, "role": "eq.admin"});

    users
        .get_page(Some(filters.clone()), 1, &CallOptions::new(), &Headers::new())
        .await
        .expect("read");
    users
        .patch(&filters, json!({"active": false}), &CallOptions::new(), &Headers::new())
        .await
        .expect("write");

    read.assert_async().await;
    write.assert_async().await;
}

#[tokio::test]
async fn test_repeated_response_headers_are_joined() {
    let mut server = Server::new_async().await;
    let _vary = server
        .mock("GET", "/users")
        .with_status(200)
        .with_header("vary", "Accept")
        .with_header("vary", "Prefer")
        .with_body("[]")
        .create_async()
        .await;

    let client = create_test_client(&server);
    let response = client
        .request(RequestOptions::get("/users"))
        .await
        .expect("users");

    assert_eq!(response.headers.get("Vary"), Some("Accept, Prefer"));
}
