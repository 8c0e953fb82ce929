// Error types for query handling and for the HTTP surface.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Message shown when the backend reports a failure without saying why.
pub const GENERIC_FAILURE: &str = "查询失败，请重试";

/// Failure to get a usable response out of the backend at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("网络响应不正常 (HTTP {0})")]
    Status(u16),
    #[error("{0}")]
    Request(String),
    #[error("响应解析失败: {0}")]
    Decode(String),
}

// reqwest's own message is only a summary; the cause chain says what went wrong
fn with_causes(error: reqwest::Error) -> String {
    format!("{:#}", anyhow::Error::from(error))
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            TransportError::Decode(with_causes(error))
        } else if let Some(status) = error.status() {
            TransportError::Status(status.as_u16())
        } else {
            TransportError::Request(with_causes(error))
        }
    }
}

/// Everything that can end a query without results.
///
/// The `Display` output is the text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Query text was empty after trimming. Never reaches the network.
    #[error("请输入查询内容")]
    EmptyQuery,
    /// Backend answered with `success: false`.
    #[error("{0}")]
    Application(String),
    #[error("网络错误: {0}。请确保后端服务已启动并正确配置。")]
    Transport(#[from] TransportError),
}

impl QueryError {
    // Empty backend messages fall back to the generic one
    pub fn application(message: Option<String>) -> Self {
        match message {
            Some(m) if !m.trim().is_empty() => QueryError::Application(m),
            _ => QueryError::Application(GENERIC_FAILURE.to_string()),
        }
    }
}

/// Failure to hand an action to the UI event loop.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error("UI event loop has shut down")]
    Closed,
}

// Error type for HTTP handlers
#[derive(Debug)]
pub enum AppError {
    InternalServerError(anyhow::Error),
    Unavailable(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::InternalServerError(error)
    }
}

impl From<askama::Error> for AppError {
    fn from(error: askama::Error) -> Self {
        AppError::InternalServerError(anyhow::Error::new(error).context("Failed to render template"))
    }
}

impl From<DispatchError> for AppError {
    fn from(error: DispatchError) -> Self {
        match error {
            DispatchError::Closed => AppError::Unavailable(DispatchError::Closed.to_string()),
            DispatchError::Query(e) => AppError::InternalServerError(anyhow::Error::new(e)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(e) => {
                tracing::error!("Internal server error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
            AppError::Unavailable(message) => {
                tracing::error!("Service unavailable: {}", message);
                (StatusCode::SERVICE_UNAVAILABLE, message)
            }
        };
        (status, error_message).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
