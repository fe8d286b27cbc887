use axum::http::StatusCode;
use serde_json::{Value, json};

use canned::CatalogEntry;

use crate::helpers::{fixture_root, test_server, write_fixture};

// ── catalog page ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_serve_catalog_page_for_mock_api_path() {
    let root = fixture_root();
    write_fixture(root.path(), "users.GET.response.200.js", r#"{"id": 1}"#);
    let server = test_server(root.path());

    let resp = server.get("/mock-api/").await;

    assert_eq!(resp.status_code(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "text/html; charset=utf-8"
    );
    assert!(resp.text().contains("Mock API Catalog"));
}

#[tokio::test]
async fn should_serve_catalog_page_regardless_of_method_and_query() {
    let root = fixture_root();
    let server = test_server(root.path());

    let resp = server
        .post("/mock-api/index.html")
        .add_query_param("_status", "500")
        .await;

    assert_eq!(resp.status_code(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "text/html; charset=utf-8"
    );
}

#[tokio::test]
async fn should_load_catalog_data_from_the_url_the_page_fetches() {
    let root = fixture_root();
    write_fixture(root.path(), "users.GET.response.200.js", r#"{"id": 1}"#);
    let server = test_server(root.path());

    // Pull the fetch URL out of the served page so a regression in the
    // asset breaks this test, then resolve it the way a browser would
    // against /mock-api/.
    let page = server.get("/mock-api/").await.text();
    let start = page.find("fetch('").expect("page should fetch its data") + "fetch('".len();
    let end = page[start..].find('\'').unwrap() + start;
    let fetch_url = format!("/mock-api/{}", &page[start..end]);

    let resp = server.get(&fetch_url).await;

    assert_eq!(resp.status_code(), StatusCode::OK, "catalog page data fetch must succeed");
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/json; charset=utf-8"
    );
    let entries = resp.json::<Vec<Value>>();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["url"], "/users.GET.response.200.js");
}

// ── generated all fixture ────────────────────────────────────────────────────

#[tokio::test]
async fn should_serve_generated_all_fixture_as_ordinary_lookup() {
    let root = fixture_root();
    write_fixture(root.path(), "users.GET.response.200.js", r#"{"id": 1}"#);
    write_fixture(root.path(), "api/posts.GET.response.js", r#"[1, 2]"#);
    let server = test_server(root.path());

    // Contains both "mock-api" and "all": not the catalog page, a normal
    // fixture lookup against the generated aggregate.
    let resp = server.get("/mock-api/all").await;

    assert_eq!(resp.status_code(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/json; charset=utf-8"
    );
    let entries: Vec<CatalogEntry> = serde_json::from_str(&resp.text()).unwrap();
    assert_eq!(
        entries,
        vec![
            CatalogEntry {
                url: "/api/posts.GET.response.js".to_owned(),
                res: json!([1, 2]),
            },
            CatalogEntry {
                url: "/users.GET.response.200.js".to_owned(),
                res: json!({"id": 1}),
            },
        ]
    );
}

#[tokio::test]
async fn should_rebuild_catalog_on_each_construction() {
    let root = fixture_root();
    write_fixture(root.path(), "users.GET.response.200.js", r#"{"id": 1}"#);
    drop(test_server(root.path()));

    // A new fixture appears; only a new construction picks it up.
    write_fixture(root.path(), "posts.GET.response.200.js", r#"{"id": 2}"#);
    let server = test_server(root.path());

    let resp = server.get("/mock-api/all").await;
    let entries: Vec<Value> = serde_json::from_str(&resp.text()).unwrap();
    assert_eq!(entries.len(), 2);
}
