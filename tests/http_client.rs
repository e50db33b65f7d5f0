// tests/http_client.rs
//! The HTTP repository against a mock Notion API.

use notion_tree::{
    ApiKey, AppError, ChildBlockKind, NodeKind, NotionHttpClient, NotionId, ParentRef,
    QuietReporter, TraversalOptions, TreeBuilder, WorkspaceRepository,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::{
    matchers::{body_partial_json, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

const PAGE_ID: &str = "216cd412-8533-8087-a989-cf37889137c3";
const DATABASE_ID: &str = "a02dd81a-36b6-4c1b-9c74-bb5c7c2e8ea2";
const CHILD_PAGE_ID: &str = "516cd412-8533-8087-a989-cf37889137c6";
const PARAGRAPH_ID: &str = "c02fc1d3-db8b-45c5-a222-27595b15aea7";

fn client(server: &MockServer) -> NotionHttpClient {
    let key = ApiKey::new("secret_abcdefghijklmnopqrstuvwxyz").unwrap();
    NotionHttpClient::with_base_url(&key, format!("{}/v1", server.uri())).unwrap()
}

fn text_run(content: &str) -> Value {
    json!({
        "type": "text",
        "text": {"content": content, "link": null},
        "plain_text": content,
        "href": null,
        "annotations": {
            "bold": false, "italic": false, "strikethrough": false,
            "underline": false, "code": false, "color": "default"
        }
    })
}

fn page(id: &str, title: &str, parent: Value) -> Value {
    json!({
        "object": "page",
        "id": id,
        "created_time": "2023-01-01T00:00:00.000Z",
        "last_edited_time": "2023-01-01T00:00:00.000Z",
        "created_by": {"object": "user", "id": "user-id"},
        "last_edited_by": {"object": "user", "id": "user-id"},
        "parent": parent,
        "archived": false,
        "in_trash": false,
        "url": format!("https://www.notion.so/{}", id.replace('-', "")),
        "properties": {
            "title": {"id": "title", "type": "title", "title": [text_run(title)]}
        }
    })
}

fn database(id: &str, title: &str) -> Value {
    json!({
        "object": "database",
        "id": id,
        "created_time": "2023-01-01T00:00:00.000Z",
        "last_edited_time": "2023-01-01T00:00:00.000Z",
        "created_by": {"object": "user", "id": "user-id"},
        "last_edited_by": {"object": "user", "id": "user-id"},
        "title": [text_run(title)],
        "description": [],
        "icon": null,
        "cover": null,
        "properties": {
            "Name": {"id": "title", "name": "Name", "type": "title", "title": {}}
        },
        "parent": {"type": "workspace", "workspace": true},
        "url": format!("https://www.notion.so/{}", id.replace('-', "")),
        "archived": false,
        "in_trash": false,
        "is_inline": false
    })
}

fn child_page_block(id: &str, parent_page: &str, title: &str) -> Value {
    json!({
        "object": "block",
        "id": id,
        "parent": {"type": "page_id", "page_id": parent_page},
        "created_time": "2025-06-20T00:00:00.000Z",
        "last_edited_time": "2025-06-20T00:00:00.000Z",
        "created_by": {"object": "user", "id": "user-id"},
        "last_edited_by": {"object": "user", "id": "user-id"},
        "has_children": false,
        "archived": false,
        "type": "child_page",
        "child_page": {"title": title}
    })
}

fn listing(results: Vec<Value>, next_cursor: Option<&str>) -> Value {
    json!({
        "object": "list",
        "results": results,
        "next_cursor": next_cursor,
        "has_more": next_cursor.is_some()
    })
}

fn workspace_parent() -> Value {
    json!({"type": "workspace", "workspace": true})
}

#[tokio::test]
async fn root_pages_come_from_filtered_search() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/search"))
        .and(header("Notion-Version", "2022-06-28"))
        .and(body_partial_json(
            json!({"filter": {"property": "object", "value": "page"}, "page_size": 100}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(
            vec![
                page(PAGE_ID, "Notes", workspace_parent()),
                page(
                    CHILD_PAGE_ID,
                    "Nested",
                    json!({"type": "page_id", "page_id": PAGE_ID}),
                ),
            ],
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let items = client(&server).list_root_pages().await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title, "Notes");
    assert_eq!(items[0].kind, NodeKind::Page);
    assert_eq!(items[0].parent, ParentRef::Workspace);
    assert_eq!(
        items[1].parent,
        ParentRef::Page(NotionId::parse(PAGE_ID).unwrap())
    );
}

#[tokio::test]
async fn database_rows_come_from_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/v1/databases/{}/query", DATABASE_ID)))
        .and(body_partial_json(json!({"page_size": 100})))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(
            vec![page(
                CHILD_PAGE_ID,
                "Row A",
                json!({"type": "database_id", "database_id": DATABASE_ID}),
            )],
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let rows = client(&server)
        .list_database_rows(&NotionId::parse(DATABASE_ID).unwrap())
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "Row A");
}

#[tokio::test]
async fn rows_with_unmodelled_properties_stay_in_the_listing() {
    let server = MockServer::start().await;
    let mut odd_row = page(
        CHILD_PAGE_ID,
        "Offsite",
        json!({"type": "database_id", "database_id": DATABASE_ID}),
    );
    odd_row["properties"]["Where"] = json!({"id": "pl", "type": "place", "place": null});
    if let Some(fields) = odd_row.as_object_mut() {
        fields.remove("in_trash");
    }
    Mock::given(method("POST"))
        .and(path(format!("/v1/databases/{}/query", DATABASE_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(vec![odd_row], None)))
        .mount(&server)
        .await;

    let rows = client(&server)
        .list_database_rows(&NotionId::parse(DATABASE_ID).unwrap())
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "Offsite");
    assert_eq!(
        rows[0].parent,
        ParentRef::Database(NotionId::parse(DATABASE_ID).unwrap())
    );
}

#[tokio::test]
async fn block_children_pass_the_cursor() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/blocks/{}/children", PAGE_ID)))
        .and(query_param("page_size", "100"))
        .and(query_param("start_cursor", "cursor-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(
            vec![
                json!({
                    "object": "block",
                    "id": PARAGRAPH_ID,
                    "type": "some_future_block",
                    "some_future_block": {}
                }),
                child_page_block(CHILD_PAGE_ID, PAGE_ID, "Meeting Notes"),
            ],
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let listing = client(&server)
        .list_page_children(
            &NotionId::parse(PAGE_ID).unwrap(),
            Some("cursor-2".to_string()),
        )
        .await
        .unwrap();

    assert!(!listing.has_more);
    let kinds: Vec<ChildBlockKind> = listing.items.iter().map(|b| b.kind.clone()).collect();
    assert_eq!(kinds, vec![ChildBlockKind::Other, ChildBlockKind::ChildPage]);
    assert_eq!(listing.items[1].title, "Meeting Notes");
}

#[tokio::test]
async fn object_urls_come_from_retrieve() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/databases/{}", DATABASE_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(database(DATABASE_ID, "Tasks")))
        .mount(&server)
        .await;

    let url = client(&server)
        .fetch_database_url(&NotionId::parse(DATABASE_ID).unwrap())
        .await
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://www.notion.so/a02dd81a36b64c1b9c74bb5c7c2e8ea2"
    );
}

#[tokio::test]
async fn rate_limited_requests_are_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/pages/{}", PAGE_ID)))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "0")
                .set_body_json(json!({
                    "object": "error", "status": 429,
                    "code": "rate_limited", "message": "Slow down."
                })),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/pages/{}", PAGE_ID)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page(PAGE_ID, "Notes", workspace_parent())),
        )
        .expect(1)
        .mount(&server)
        .await;

    let url = client(&server)
        .fetch_page_url(&NotionId::parse(PAGE_ID).unwrap())
        .await
        .unwrap();
    assert!(url.as_str().ends_with("216cd41285338087a989cf37889137c3"));
}

#[tokio::test]
async fn persistent_rate_limit_gives_up() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/pages/{}", PAGE_ID)))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "0")
                .set_body_json(json!({
                    "object": "error", "status": 429,
                    "code": "rate_limited", "message": "Slow down."
                })),
        )
        .expect(3)
        .mount(&server)
        .await;

    let error = client(&server)
        .fetch_page_url(&NotionId::parse(PAGE_ID).unwrap())
        .await
        .unwrap_err();
    assert!(error.is_rate_limited());
}

#[tokio::test]
async fn rejected_token_fails_the_traversal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "object": "error", "status": 401,
            "code": "unauthorized", "message": "API token is invalid."
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    let result = TreeBuilder::new(&client, TraversalOptions::default())
        .build(&mut QuietReporter)
        .await;

    match result {
        Err(error @ AppError::RootDiscoveryFailed { .. }) => assert!(error.is_unauthorized()),
        other => panic!("expected RootDiscoveryFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn workspace_walk_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/search"))
        .and(body_partial_json(json!({"filter": {"value": "page"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(
            vec![page(PAGE_ID, "Notes", workspace_parent())],
            None,
        )))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/search"))
        .and(body_partial_json(json!({"filter": {"value": "database"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(
            vec![database(DATABASE_ID, "Tasks")],
            None,
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/blocks/{}/children", PAGE_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(
            vec![child_page_block(CHILD_PAGE_ID, PAGE_ID, "Meeting Notes")],
            None,
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/blocks/{}/children", CHILD_PAGE_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(vec![], None)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/v1/databases/{}/query", DATABASE_ID)))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "object": "error", "status": 404,
            "code": "object_not_found", "message": "Could not find database."
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    let outcome = TreeBuilder::new(&client, TraversalOptions::default())
        .build(&mut QuietReporter)
        .await
        .unwrap();

    let titles: Vec<&str> = outcome.roots.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["Notes", "Tasks"]);
    assert_eq!(outcome.roots[0].children.len(), 1);
    assert_eq!(outcome.roots[0].children[0].title, "Meeting Notes");
    assert!(outcome.roots[1].children.is_empty());
    assert_eq!(outcome.warnings.len(), 1);
}
