// src/lib.rs
use std::path::Path;
use std::sync::Arc;

use axum::extract::{Form, Path as UrlPath, State};
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod render;

use db::NoteStore;
use error::AppError;
use models::NoteForm;
use render::{Renderer, View};

// --- Shared state handed to every handler ---
#[derive(Clone, Debug)]
pub struct AppState {
    pub store: NoteStore,
    pub renderer: Arc<Renderer>,
}

impl AppState {
    pub fn new(store: NoteStore) -> Result<Self, AppError> {
        Ok(AppState {
            store,
            renderer: Arc::new(Renderer::new()?),
        })
    }
}

/// Builds the router. Methods not listed for a path get a 405.
pub fn app(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(list_notes))
        .route("/notes", get(list_notes))
        .route("/note/create", get(new_note_form).post(create_note))
        .route("/note/edit/:id", get(edit_note_form).post(update_note))
        .route("/note/delete/:id", post(delete_note))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// --- Helpers ---

fn parse_note_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::Validation("Invalid note ID".to_string()))
}

fn validate_form(form: &NoteForm) -> Result<(), AppError> {
    form.validate().map_err(|msg| {
        tracing::debug!("rejected note form: {msg}");
        AppError::Validation(msg.to_string())
    })
}

// --- Handlers ---

async fn list_notes(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let notes = state.store.list_all().await?;
    state.renderer.render(View::List(&notes))
}

async fn new_note_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    state.renderer.render(View::Create)
}

#[tracing::instrument(skip_all)]
async fn create_note(
    State(state): State<AppState>,
    Form(form): Form<NoteForm>,
) -> Result<Redirect, AppError> {
    validate_form(&form)?;
    let note = state.store.insert(&form.title, &form.content).await?;
    tracing::info!(id = note.id, "note created");
    Ok(Redirect::to("/"))
}

async fn edit_note_form(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_note_id(&id)?;
    let note = state.store.get_by_id(id).await?;
    state.renderer.render(View::Edit(&note))
}

#[tracing::instrument(skip_all)]
async fn update_note(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
    Form(form): Form<NoteForm>,
) -> Result<Redirect, AppError> {
    let id = parse_note_id(&id)?;
    validate_form(&form)?;
    state.store.update(id, &form.title, &form.content).await?;
    tracing::info!(id, "note updated");
    Ok(Redirect::to("/"))
}

#[tracing::instrument(skip_all)]
async fn delete_note(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
) -> Result<Redirect, AppError> {
    let id = parse_note_id(&id)?;
    state.store.delete_by_id(id).await?;
    tracing::info!(id, "note deleted");
    Ok(Redirect::to("/"))
}
