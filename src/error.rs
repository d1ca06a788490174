use thiserror::Error;

pub type Result<T> = std::result::Result<T, BoardError>;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Template has no root element: {0}")]
    EmptyTemplate(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Node is no longer part of the document")]
    NodeDetached,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
