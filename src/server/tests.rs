use super::*;
use crate::model::Note;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

fn test_app() -> (Router, NoteStore) {
    let db = Database::open_in_memory().unwrap();
    (router(db.clone()), NoteStore::new(db))
}

fn seed(notes: &NoteStore, n: usize) {
    for i in 1..=n {
        notes.create(&Note::new(format!("note {}", i), "body")).unwrap();
    }
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&value).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

fn ids(notes: &Value) -> Vec<i64> {
    notes
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_i64().unwrap())
        .collect()
}

// ========== Listing ==========

#[tokio::test]
async fn test_list_notes_second_page() {
    let (app, notes) = test_app();
    seed(&notes, 25);

    let (status, body) = get(&app, "/notes?page=2&pageSize=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["notes"]), (11..=20).collect::<Vec<_>>());
    assert_eq!(body["totalPages"], 3);
    assert_eq!(body["currentPage"], 2);
    assert_eq!(body["pageSize"], 10);
    assert_eq!(body["totalCount"], 25);
    assert_eq!(body["lastId"], 11);
}

#[tokio::test]
async fn test_list_notes_clamps_past_last_page() {
    let (app, notes) = test_app();
    seed(&notes, 25);

    let (status, body) = get(&app, "/notes?page=99&pageSize=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currentPage"], 3);
    assert_eq!(body["lastId"], 21);
    assert_eq!(ids(&body["notes"]), (21..=25).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_list_notes_defaults() {
    let (app, notes) = test_app();
    seed(&notes, 12);

    for uri in ["/notes", "/notes?page=abc&pageSize=xyz"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(body["currentPage"], 1);
        assert_eq!(body["pageSize"], 10);
        assert_eq!(body["lastId"], 0);
        assert_eq!(body["notes"].as_array().unwrap().len(), 10);
    }
}

#[tokio::test]
async fn test_list_notes_repeated_param_uses_defaults() {
    let (app, notes) = test_app();
    seed(&notes, 25);

    let (status, body) = get(&app, "/notes?page=2&page=3&pageSize=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currentPage"], 1);
    assert_eq!(body["pageSize"], 10);
    assert_eq!(body["lastId"], 0);
    assert_eq!(ids(&body["notes"]), (1..=10).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_list_notes_rejects_zero_page_size() {
    let (app, notes) = test_app();
    seed(&notes, 3);

    let (status, body) = get(&app, "/notes?pageSize=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("pageSize"));
}

#[tokio::test]
async fn test_list_notes_empty_table() {
    let (app, _) = test_app();

    let (status, body) = get(&app, "/notes?page=3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notes"], json!([]));
    assert_eq!(body["totalPages"], 0);
    assert_eq!(body["currentPage"], 0);
    assert_eq!(body["totalCount"], 0);
}

#[tokio::test]
async fn test_list_notes_after_deletes() {
    let (app, notes) = test_app();
    seed(&notes, 10);
    for id in [2, 3, 7] {
        notes.delete(id).unwrap();
    }

    let (_, first) = get(&app, "/notes?page=1&pageSize=4").await;
    let (_, second) = get(&app, "/notes?page=2&pageSize=4").await;
    assert_eq!(ids(&first["notes"]), vec![1, 4, 5, 6]);
    assert_eq!(ids(&second["notes"]), vec![8, 9, 10]);
    assert_eq!(second["lastId"], 8);
    assert_eq!(second["totalCount"], 7);
}

// ========== Note CRUD ==========

#[tokio::test]
async fn test_create_note_returns_stored_row() {
    let (app, _) = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/notes",
        Some(json!({"id": 77, "title": "Groceries", "content": "eggs"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["title"], "Groceries");
    assert_eq!(body["content"], "eggs");
    assert!(body["created"].is_string());
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let (app, _) = test_app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/notes")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_invalid_id_format() {
    let (app, _) = test_app();

    for (method, uri) in [
        (Method::GET, "/notes/abc"),
        (Method::DELETE, "/notes/1.5"),
        (Method::GET, "/notes/x/tags"),
    ] {
        let (status, body) = send(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"], "Invalid ID format");
    }
}

#[tokio::test]
async fn test_missing_note_is_server_error() {
    let (app, _) = test_app();

    let (status, body) = get(&app, "/notes/999").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Note 999 not found");
}

#[tokio::test]
async fn test_update_then_delete_note() {
    let (app, notes) = test_app();
    seed(&notes, 1);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/notes/1",
        Some(json!({"title": "renamed", "content": "new"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Note updated successfully");

    let (_, note) = get(&app, "/notes/1").await;
    assert_eq!(note["title"], "renamed");

    let (status, body) = send(&app, Method::DELETE, "/notes/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Note deleted successfully");

    let (status, _) = get(&app, "/notes/1").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_writes_to_missing_id_still_succeed() {
    let (app, _) = test_app();

    let (status, _) = send(&app, Method::PUT, "/notes/42", Some(json!({"title": "x"}))).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::DELETE, "/notes/42", None).await;
    assert_eq!(status, StatusCode::OK);
}

// ========== Other entities ==========

#[tokio::test]
async fn test_tag_crud() {
    let (app, _) = test_app();

    let (status, tag) = send(&app, Method::POST, "/tags", Some(json!({"tagName": "rust"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tag["tagName"], "rust");
    assert_eq!(tag["status"], "active");

    let (_, body) = send(
        &app,
        Method::PUT,
        "/tags/1",
        Some(json!({"tagName": "rust", "status": "deleted"})),
    )
    .await;
    assert_eq!(body["message"], "Tag updated successfully");

    let (_, all) = get(&app, "/tags").await;
    assert_eq!(all.as_array().unwrap().len(), 1);
    assert_eq!(all[0]["status"], "deleted");

    let (_, body) = send(&app, Method::DELETE, "/tags/1", None).await;
    assert_eq!(body["message"], "Tag deleted successfully");
    let (_, all) = get(&app, "/tags").await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn test_unknown_status_rejected() {
    let (app, _) = test_app();

    let (status, _) = send(
        &app,
        Method::POST,
        "/tags",
        Some(json!({"tagName": "x", "status": "archived"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_default_note_type_present() {
    let (app, _) = test_app();

    let (status, body) = get(&app, "/note-types/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["typeName"], "default");
}

#[tokio::test]
async fn test_user_password_never_returned() {
    let (app, _) = test_app();

    let (status, user) = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({"username": "ada", "email": "ada@example.com", "password": "hunter2"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["username"], "ada");
    assert!(user.get("password").is_none());
}

#[tokio::test]
async fn test_note_versions() {
    let (app, notes) = test_app();
    seed(&notes, 2);

    for (note_id, title) in [(1, "v1"), (2, "other"), (1, "v2")] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/versioned-notes",
            Some(json!({"title": title, "content": "", "noteId": note_id, "noteTypeId": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, versions) = get(&app, "/notes/1/versions").await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<_> = versions
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["v1", "v2"]);
}

// ========== Links ==========

#[tokio::test]
async fn test_note_tag_links() {
    let (app, notes) = test_app();
    seed(&notes, 2);
    send(&app, Method::POST, "/tags", Some(json!({"tagName": "work"}))).await;

    let (status, link) = send(&app, Method::POST, "/notes/2/tags/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(link, json!({"noteId": 2, "tagId": 1}));

    let (status, _) = send(&app, Method::POST, "/notes/2/tags/1", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (_, tags) = get(&app, "/notes/2/tags").await;
    assert_eq!(tags[0]["tagName"], "work");
    let (_, tagged) = get(&app, "/tags/1/notes").await;
    assert_eq!(ids(&tagged), vec![2]);

    let (status, body) = send(&app, Method::DELETE, "/notes/2/tags/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Tag removed from note");
    let (_, tags) = get(&app, "/notes/2/tags").await;
    assert_eq!(tags, json!([]));
}

#[tokio::test]
async fn test_note_attachment_links() {
    let (app, notes) = test_app();
    seed(&notes, 1);
    send(
        &app,
        Method::POST,
        "/attachments",
        Some(json!({"title": "scan", "fileLink": "/files/scan.pdf"})),
    )
    .await;

    let (status, _) = send(&app, Method::POST, "/notes/1/attachments/1", None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, attachments) = get(&app, "/notes/1/attachments").await;
    assert_eq!(attachments[0]["fileLink"], "/files/scan.pdf");
    let (_, attached) = get(&app, "/attachments/1/notes").await;
    assert_eq!(ids(&attached), vec![1]);
}

#[tokio::test]
async fn test_user_note_links() {
    let (app, notes) = test_app();
    seed(&notes, 3);
    send(
        &app,
        Method::POST,
        "/users",
        Some(json!({"username": "bo", "email": "bo@example.com", "password": "pw"})),
    )
    .await;

    let (status, link) = send(&app, Method::POST, "/users/1/notes/3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(link["userId"], 1);
    assert_eq!(link["noteId"], 3);
    assert!(link["createdAt"].is_string());

    let (_, owned) = get(&app, "/users/1/notes").await;
    assert_eq!(ids(&owned), vec![3]);
    let (_, owners) = get(&app, "/notes/3/users").await;
    assert_eq!(owners[0]["username"], "bo");
    assert!(owners[0].get("password").is_none());

    let (_, body) = send(&app, Method::DELETE, "/users/1/notes/3", None).await;
    assert_eq!(body["message"], "Note removed from user");
}

// ========== CORS ==========

#[tokio::test]
async fn test_cors_preflight() {
    let db = Database::open_in_memory().unwrap();
    let app = app(db, &["http://localhost:5173".to_string()]).unwrap();

    let preflight = |origin: &'static str| {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/notes")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
            .body(Body::empty())
            .unwrap()
    };

    let response = app.clone().oneshot(preflight("http://localhost:5173")).await.unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:5173"
    );
    let methods = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned();
    assert!(methods.contains("PUT") && methods.contains("PATCH"));

    let response = app.oneshot(preflight("http://evil.example")).await.unwrap();
    assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[test]
fn test_cors_layer_rejects_invalid_origin() {
    assert!(cors_layer(&["bad\norigin".to_string()]).is_err());
    assert!(cors_layer(&["*".to_string()]).is_ok());
}
