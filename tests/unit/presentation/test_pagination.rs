use crate::common::{MockTransport, client_with};
use postgrest_client::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

fn rows(from: usize, count: usize) -> String {
    let items: Vec<Value> = (from..from + count).map(|id| json!({"id": id})).collect();
    Value::Array(items).to_string()
}

#[tokio::test]
async fn accumulates_pages_until_a_short_one() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = calls.clone();
    let transport = Arc::new(MockTransport::new(move |_| {
        match seen.fetch_add(1, Ordering::SeqCst) {
            0 => RawResponse::new(StatusCode::PARTIAL_CONTENT, rows(0, 2))
                .with_header("Content-Range", "0-1/3"),
            _ => RawResponse::new(StatusCode::PARTIAL_CONTENT, rows(2, 1))
                .with_header("Content-Range", "2-2/3"),
        }
    }));
    let client = client_with(transport.clone());
    let model = client.model("tasks");
    model.set_page_size(2);

    let mut vm = PaginationVm::new(model, Some("id.asc"), false);
    let first = vm.first_page(json!({"done": "is.false"})).await.expect("first page");
    assert_eq!(first.len(), 2);
    assert_eq!(vm.total(), Some(3));
    assert!(!vm.is_last_page());

    let all = vm.next_page().await.expect("second page");
    assert_eq!(all.len(), 3);
    assert!(vm.is_last_page());
    assert_eq!(vm.page(), 2);

    let sent = transport.requests();
    assert_eq!(sent[0].headers.get("Prefer"), Some("count=exact"));
    assert_eq!(sent[0].headers.get("Range"), Some("0-1"));
    assert_eq!(sent[1].headers.get("Range"), Some("2-3"));
    assert!(sent[1].background);
    assert_eq!(sent[1].url, "http://db.test/tasks?done=is.false&order=id.asc");
}

#[tokio::test]
async fn first_page_resets_collection() {
    let transport = Arc::new(MockTransport::new(|_| {
        RawResponse::new(StatusCode::OK, rows(0, 1))
    }));
    let client = client_with(transport);
    let mut vm = PaginationVm::new(client.model("tasks"), None, false);

    vm.first_page(json!({})).await.expect("page");
    vm.first_page(json!({})).await.expect("page again");
    assert_eq!(vm.collection().len(), 1);
    assert_eq!(vm.total(), None);
}

#[tokio::test]
async fn failed_next_page_keeps_counter() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = calls.clone();
    let transport = Arc::new(MockTransport::new(move |_| {
        if seen.fetch_add(1, Ordering::SeqCst) == 0 {
            RawResponse::new(StatusCode::OK, rows(0, 10))
        } else {
            RawResponse::new(StatusCode::SERVICE_UNAVAILABLE, "maintenance")
        }
    }));
    let client = client_with(transport);
    let mut vm = PaginationVm::new(client.model("tasks"), None, false);

    vm.first_page(json!({})).await.expect("first page");
    vm.next_page().await.expect_err("second page fails");
    assert_eq!(vm.page(), 1);
    assert_eq!(vm.collection().len(), 10);
}

#[test]
fn filters_feed_pagination_parameters() {
    let mut filters = FiltersVm::new([("title", FilterOperator::Ilike)]);
    filters.set("title", "weekly report");
    assert_eq!(filters.parameters(), json!({"title": "ilike.*weekly*report*"}));
}
