// src/db.rs
use std::str::FromStr;

use chrono::Utc;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::AppError;
use crate::models::Note;

// --- Schema ---
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

const NOTE_COLUMNS: &str = "id, title, content, created_at";

/// Handle to the notes database.
///
/// Built once at startup and cloned into every request handler. Cloning is
/// cheap: all clones share one connection pool, and SQLite's own locking is
/// the only coordination between concurrent requests.
#[derive(Clone, Debug)]
pub struct NoteStore {
    pool: SqlitePool,
}

impl NoteStore {
    /// Opens (creating if needed) the database at `database_url` and runs the
    /// schema migrations.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        tracing::info!(database_url, max_connections, "connecting to note database");
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let store = NoteStore { pool };
        store.initialize().await?;
        Ok(store)
    }

    /// Ensures the notes table exists. Safe to run on every start.
    pub async fn initialize(&self) -> Result<(), AppError> {
        MIGRATOR.run(&self.pool).await?;
        tracing::debug!("note schema up to date");
        Ok(())
    }

    // --- Notes CRUD ---

    pub async fn list_all(&self) -> Result<Vec<Note>, AppError> {
        let notes = sqlx::query_as::<_, Note>(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(notes)
    }

    pub async fn insert(&self, title: &str, content: &str) -> Result<Note, AppError> {
        let note = sqlx::query_as::<_, Note>(&format!(
            "INSERT INTO notes (title, content, created_at) VALUES (?1, ?2, ?3) RETURNING {NOTE_COLUMNS}"
        ))
        .bind(title)
        .bind(content)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = note.id, "note created");
        Ok(note)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Note, AppError> {
        sqlx::query_as::<_, Note>(&format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound(id))
    }

    /// Overwrites title and content. `id` and `created_at` are left alone.
    pub async fn update(&self, id: i64, title: &str, content: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE notes SET title = ?1, content = ?2 WHERE id = ?3")
            .bind(title)
            .bind(content)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(id));
        }
        tracing::debug!(id, "note updated");
        Ok(())
    }

    /// Removes the note if present. Deleting an unknown id is not an error.
    pub async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM notes WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::debug!(id, deleted = result.rows_affected(), "note delete");
        Ok(())
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notes")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
