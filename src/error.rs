use axum::response::{IntoResponse, Response};
use http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed request input. Nothing was written.
    #[error("{0}")]
    Validation(String),

    #[error("note {0} not found")]
    NotFound(i64),

    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("template error: {0}")]
    Render(#[from] minijinja::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store(_) | AppError::Migrate(_) | AppError::Render(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// Internal detail goes to the log, the client only gets a fixed message.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::Validation(msg) => msg.clone(),
            AppError::NotFound(_) => "Note not found!".to_string(),
            AppError::Store(_) | AppError::Migrate(_) => {
                tracing::error!(error = %self, "note store failure");
                "Failed to access notes!".to_string()
            }
            AppError::Render(_) => {
                tracing::error!(error = ?self, "template rendering failure");
                "Failed to render template!".to_string()
            }
        };
        (status, body).into_response()
    }
}
