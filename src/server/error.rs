use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use chrono::Local;
use thiserror::Error;

use super::store::StoreError;
use crate::ErrorBody;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Malformed multipart body or missing `file` part.
    #[error("{0}")]
    BadUpload(String),
}

impl ApiError {
    fn title(&self) -> &'static str {
        match self.status_code() {
            StatusCode::NOT_FOUND => "File Not Found",
            StatusCode::PAYLOAD_TOO_LARGE => "File Too Large",
            StatusCode::BAD_REQUEST => "File Upload Error",
            _ => "Internal Server Error",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::TooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Store(StoreError::Empty | StoreError::InvalidName(_))
            | ApiError::BadUpload(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(StoreError::Io(_) | StoreError::Index(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        log::error!("{}: {}", self.title(), self);
        // Internal details stay in the log.
        let message = if status.is_server_error() {
            "An unexpected error occurred".to_string()
        } else {
            self.to_string()
        };
        HttpResponse::build(status).json(ErrorBody {
            timestamp: Local::now().naive_local().to_string(),
            status: status.as_u16(),
            error: self.title().to_string(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_store_errors_to_statuses() {
        let cases = [
            (ApiError::from(StoreError::NotFound(3)), 404, "File Not Found"),
            (ApiError::from(StoreError::Empty), 400, "File Upload Error"),
            (
                ApiError::from(StoreError::TooLarge {
                    limit: "10 MB".into(),
                }),
                413,
                "File Too Large",
            ),
            (ApiError::BadUpload("no file".into()), 400, "File Upload Error"),
            (
                ApiError::from(StoreError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))),
                500,
                "Internal Server Error",
            ),
        ];
        for (error, status, title) in cases {
            assert_eq!(error.status_code().as_u16(), status);
            assert_eq!(error.title(), title);
        }
    }
}
