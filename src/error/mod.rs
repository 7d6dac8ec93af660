use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageGuardError {
    #[error("Minification error: {0}")]
    Minification(String),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PageGuardError>;
