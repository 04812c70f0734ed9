//! FirestoreStore against a local server speaking the REST wire format

use std::net::SocketAddr;

use axum::Router;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use linkfolio_core::{DocumentStore, LoadOutcome, ProfileLoader, ProfilePage, StoreError};
use linkfolio_firestore::{FirestoreConfig, FirestoreStore};
use serde_json::{Value, json};

const ROOT: &str = "/v1/projects/demo/databases/(default)/documents";

fn link(user: &str, id: &str, name: &str, target: &str, enabled: bool) -> Value {
    json!({
        "name": format!("projects/demo/databases/(default)/documents/users/{user}/links/{id}"),
        "fields": {
            "name": {"stringValue": name},
            "link": {"stringValue": target},
            "isEnabled": {"booleanValue": enabled}
        }
    })
}

fn query_param<'a>(uri: &'a Uri, key: &str) -> Option<&'a str> {
    uri.query()?
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

async fn firestore(uri: Uri) -> Response {
    if query_param(&uri, "key") != Some("test-key") {
        return StatusCode::FORBIDDEN.into_response();
    }
    let Some(path) = uri.path().strip_prefix(ROOT) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match path {
        "/users/alice" => axum::Json(json!({
            "name": "projects/demo/databases/(default)/documents/users/alice",
            "fields": {
                "name": {"stringValue": "Alice Smith"},
                "title": {"stringValue": "Engineer"}
            }
        }))
        .into_response(),
        "/users/alice/links" => {
            let body = match query_param(&uri, "pageToken") {
                None => json!({
                    "documents": [
                        link("alice", "1", "GitHub", "github.com/a", true),
                        link("alice", "2", "Phone", "+1555", true)
                    ],
                    "nextPageToken": "page2"
                }),
                Some("page2") => json!({
                    "documents": [link("alice", "3", "Email", "a@x.io", false)]
                }),
                Some(_) => return StatusCode::BAD_REQUEST.into_response(),
            };
            axum::Json(body).into_response()
        }
        // Second page disappears between requests.
        "/users/gap/links" => match query_param(&uri, "pageToken") {
            None => axum::Json(json!({
                "documents": [link("gap", "1", "GitHub", "github.com/g", true)],
                "nextPageToken": "gone"
            }))
            .into_response(),
            Some(_) => StatusCode::NOT_FOUND.into_response(),
        },
        // Missing parent: an empty list body.
        "/users/bob/links" => axum::Json(json!({})).into_response(),
        "/users/broken" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        "/users/a%2Fb" => axum::Json(json!({
            "name": "projects/demo/databases/(default)/documents/users/a%2Fb",
            "fields": {"name": {"stringValue": "Slash"}}
        }))
        .into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn spawn_server() -> SocketAddr {
    let app = Router::new().fallback(firestore);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn store_with_key(key: &str) -> FirestoreStore {
    let addr = spawn_server().await;
    let config = FirestoreConfig::new("demo")
        .with_base_url(format!("http://{addr}/v1"))
        .with_api_key(key)
        .with_page_size(2);
    FirestoreStore::new(config).unwrap()
}

#[tokio::test]
async fn test_get_document_decodes_fields() {
    let store = store_with_key("test-key").await;

    let doc = store.get_document("users", "alice").await.unwrap().unwrap();
    assert_eq!(doc.id, "alice");
    assert_eq!(doc.str_field("name"), Some("Alice Smith"));
    assert_eq!(doc.str_field("title"), Some("Engineer"));
}

#[tokio::test]
async fn test_missing_document_is_none() {
    let store = store_with_key("test-key").await;
    assert!(store.get_document("users", "nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_follows_page_tokens() {
    let store = store_with_key("test-key").await;

    let links = store.list_children("users", "alice", "links").await.unwrap();
    let ids: Vec<_> = links.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3"]);
    assert_eq!(links[2].bool_field("isEnabled"), Some(false));
}

#[tokio::test]
async fn test_empty_and_missing_lists() {
    let store = store_with_key("test-key").await;
    assert!(store.list_children("users", "bob", "links").await.unwrap().is_empty());
    assert!(store.list_children("users", "nobody", "links").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_later_page_is_an_error() {
    let store = store_with_key("test-key").await;

    let err = store.list_children("users", "gap", "links").await.unwrap_err();
    match err {
        StoreError::Status { status, path } => {
            assert_eq!(status, 404);
            assert!(path.ends_with("/users/gap/links"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_maps_to_status() {
    let store = store_with_key("test-key").await;

    let err = store.get_document("users", "broken").await.unwrap_err();
    match err {
        StoreError::Status { status, path } => {
            assert_eq!(status, 500);
            assert!(path.ends_with("/users/broken"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_wrong_key_is_not_logged_in_error() {
    let store = store_with_key("leaky").await;

    let err = store.get_document("users", "alice").await.unwrap_err();
    assert!(matches!(err, StoreError::Status { status: 403, .. }));
    assert!(!err.to_string().contains("leaky"));
}

#[tokio::test]
async fn test_identifier_is_encoded_as_one_segment() {
    let store = store_with_key("test-key").await;
    let doc = store.get_document("users", "a/b").await.unwrap().unwrap();
    assert_eq!(doc.str_field("name"), Some("Slash"));
}

#[tokio::test]
async fn test_loader_over_firestore() {
    let store = store_with_key("test-key").await;
    let loader = ProfileLoader::new(std::sync::Arc::new(store));

    let LoadOutcome::Found(loaded) = loader.load_outcome("alice").await else {
        panic!("alice should load");
    };
    assert_eq!(loaded.profile.name, "Alice Smith");
    assert_eq!(loaded.links.len(), 3);

    let page = ProfilePage::from(loaded);
    assert_eq!(page.rows.len(), 2);
    assert_eq!(page.rows[0].href, "https://github.com/a");

    assert!(matches!(loader.load_outcome("broken").await, LoadOutcome::NotFound));
}
