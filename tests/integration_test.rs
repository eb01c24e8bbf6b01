use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use tower::util::ServiceExt;

use noted::db::NoteStore;
use noted::{app, AppState};

// In-memory store plus the full router, static files served from ./static
async fn setup_app() -> (Router, NoteStore) {
    let store = NoteStore::connect("sqlite::memory:", 1)
        .await
        .expect("Failed to connect to test database");
    let state = AppState::new(store.clone()).expect("Failed to build templates");
    (app(state, "static"), store)
}

struct TestResponse {
    status: StatusCode,
    location: Option<String>,
    body: String,
}

// Sends a request, with an optional form-encoded body
async fn request(app: &Router, method: Method, uri: &str, form: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match form {
        Some(form) => {
            builder = builder.header(
                header::CONTENT_TYPE,
                mime::APPLICATION_WWW_FORM_URLENCODED.as_ref(),
            );
            Body::from(form.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    TestResponse {
        status,
        location,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}

#[tokio::test]
async fn test_list_empty() {
    let (app, _store) = setup_app().await;

    let resp = request(&app, Method::GET, "/", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("No notes yet."));

    let resp = request(&app, Method::GET, "/notes", None).await;
    assert_eq!(resp.status, StatusCode::OK);
}

#[tokio::test]
async fn test_create_form() {
    let (app, _store) = setup_app().await;

    let resp = request(&app, Method::GET, "/note/create", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("<form"));
}

#[tokio::test]
async fn test_create_note_redirects_to_list() {
    let (app, store) = setup_app().await;

    let resp = request(
        &app,
        Method::POST,
        "/note/create",
        Some("title=Shopping&content=milk+and+eggs"),
    )
    .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/"));

    let notes = store.list_all().await.unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "Shopping");
    assert_eq!(notes[0].content, "milk and eggs");

    let resp = request(&app, Method::GET, "/", None).await;
    assert!(resp.body.contains("Shopping"));
    assert!(resp.body.contains("milk and eggs"));
}

#[tokio::test]
async fn test_create_rejects_empty_fields() {
    let (app, store) = setup_app().await;

    for form in ["title=&content=body", "title=x&content=", "title=only", ""] {
        let resp = request(&app, Method::POST, "/note/create", Some(form)).await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST, "form {form:?}");
        assert_eq!(resp.body, "Note title and content cannot be empty");
    }
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_edit_form_prefilled() {
    let (app, store) = setup_app().await;
    let note = store.insert("Draft", "first version").await.unwrap();

    let resp = request(&app, Method::GET, &format!("/note/edit/{}", note.id), None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(r#"value="Draft""#));
    assert!(resp.body.contains("first version"));
}

#[tokio::test]
async fn test_edit_unknown_id_is_404() {
    let (app, _store) = setup_app().await;

    let resp = request(&app, Method::GET, "/note/edit/99999", None).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);

    let resp = request(&app, Method::POST, "/note/edit/99999", Some("title=a&content=b")).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edit_bad_id_is_400() {
    let (app, _store) = setup_app().await;

    let resp = request(&app, Method::GET, "/note/edit/abc", None).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body, "Invalid note ID");
}

#[tokio::test]
async fn test_update_note() {
    let (app, store) = setup_app().await;
    let note = store.insert("Draft", "first version").await.unwrap();

    let resp = request(
        &app,
        Method::POST,
        &format!("/note/edit/{}", note.id),
        Some("title=Draft&content=second+version"),
    )
    .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/"));

    let updated = store.get_by_id(note.id).await.unwrap();
    assert_eq!(updated.content, "second version");
    assert_eq!(updated.created_at, note.created_at);
}

#[tokio::test]
async fn test_update_rejects_empty_fields() {
    let (app, store) = setup_app().await;
    let note = store.insert("Draft", "keep me").await.unwrap();

    let resp = request(
        &app,
        Method::POST,
        &format!("/note/edit/{}", note.id),
        Some("title=Draft&content="),
    )
    .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(store.get_by_id(note.id).await.unwrap().content, "keep me");
}

#[tokio::test]
async fn test_delete_note() {
    let (app, store) = setup_app().await;
    let keep = store.insert("keep", "1").await.unwrap();
    let gone = store.insert("gone", "2").await.unwrap();

    let resp = request(&app, Method::POST, &format!("/note/delete/{}", gone.id), None).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/"));

    let notes = store.list_all().await.unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].id, keep.id);

    // unknown ids are silently ignored
    let resp = request(&app, Method::POST, "/note/delete/424242", None).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_delete_bad_id_is_400() {
    let (app, _store) = setup_app().await;

    let resp = request(&app, Method::POST, "/note/delete/not-a-number", None).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_wrong_method_is_405() {
    let (app, _store) = setup_app().await;

    let resp = request(&app, Method::GET, "/note/delete/1", None).await;
    assert_eq!(resp.status, StatusCode::METHOD_NOT_ALLOWED);

    let resp = request(&app, Method::DELETE, "/", None).await;
    assert_eq!(resp.status, StatusCode::METHOD_NOT_ALLOWED);

    let resp = request(&app, Method::PUT, "/note/create", Some("title=a&content=b")).await;
    assert_eq!(resp.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_store_failure_is_500_without_detail() {
    let (app, store) = setup_app().await;
    store.close().await;

    let resp = request(&app, Method::GET, "/", None).await;
    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.body, "Failed to access notes!");
}

#[tokio::test]
async fn test_static_files() {
    let (app, _store) = setup_app().await;

    let resp = request(&app, Method::GET, "/static/style.css", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("font-family"));

    let resp = request(&app, Method::GET, "/static/missing.css", None).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}
