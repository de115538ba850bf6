use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SiteError {
    #[error("{0}")]
    PageNotFound(String),
    #[error("failed to render {template}: {message}")]
    Render { template: String, message: String },
}

impl SiteError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::PageNotFound(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::PageNotFound(_) => ErrorCode::NotFound,
            Self::Render { .. } => ErrorCode::Internal,
        }
    }
}
