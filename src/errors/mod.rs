use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid match: {0}")]
    InvalidMatch(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// The store could not be reached or the transaction failed and was
    /// rolled back. Safe for the caller to retry.
    #[error("Storage unavailable: {0:#}")]
    StorageUnavailable(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn invalid_match<T: Into<String>>(msg: T) -> Self {
        ServiceError::InvalidMatch(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ServiceError::NotFound(msg.into())
    }

    pub fn invalid_query<T: Into<String>>(msg: T) -> Self {
        ServiceError::InvalidQuery(msg.into())
    }

    pub fn is_client_error(&self) -> bool {
        !matches!(self, ServiceError::StorageUnavailable(_))
    }

    /// Text sent to the client. Storage details stay in the server log.
    fn public_message(&self) -> String {
        match self {
            ServiceError::StorageUnavailable(_) => {
                "Storage unavailable, please retry later".to_string()
            }
            other => other.to_string(),
        }
    }
}

// A body that does not decode into two integer ids is a malformed match
impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        ServiceError::InvalidMatch(rejection.body_text())
    }
}

impl From<QueryRejection> for ServiceError {
    fn from(rejection: QueryRejection) -> Self {
        ServiceError::InvalidQuery(rejection.body_text())
    }
}

impl From<PathRejection> for ServiceError {
    fn from(rejection: PathRejection) -> Self {
        ServiceError::InvalidQuery(rejection.body_text())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::InvalidMatch(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::InvalidQuery(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::StorageUnavailable(e) => {
                log::error!("Storage failure: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if self.is_client_error() {
            log::debug!("Rejected request: {}", self);
        }

        let body = Json(json!({
            "error": self.public_message(),
            "status": status.as_u16()
        }));
        (status, body).into_response()
    }
}
