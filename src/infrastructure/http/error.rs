//! HTTP Error Handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::PlaybackError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errno: i32,
    pub error: String,
    pub data: Option<()>,
}

impl ErrorResponse {
    pub fn new(errno: i32, error: impl Into<String>) -> Self {
        Self {
            errno,
            error: error.into(),
            data: None,
        }
    }
}

/// 错误码定义
pub mod errno {
    pub const BAD_REQUEST: i32 = 400;
    pub const NOT_FOUND: i32 = 404;
    pub const INTERNAL_ERROR: i32 = 500;
    pub const SERVICE_UNAVAILABLE: i32 = 503;
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn errno(&self) -> i32 {
        match self {
            ApiError::NotFound(_) => errno::NOT_FOUND,
            ApiError::BadRequest(_) => errno::BAD_REQUEST,
            ApiError::Internal(_) => errno::INTERNAL_ERROR,
            ApiError::ServiceUnavailable(_) => errno::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let errno = self.errno();
        let msg = match self {
            ApiError::NotFound(msg) => {
                tracing::warn!(errno = errno, error = %msg, "Resource not found");
                msg
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!(errno = errno, error = %msg, "Bad request");
                msg
            }
            ApiError::Internal(msg) => {
                tracing::error!(errno = errno, error = %msg, "Internal server error");
                msg
            }
            ApiError::ServiceUnavailable(msg) => {
                tracing::error!(errno = errno, error = %msg, "Service unavailable");
                msg
            }
        };

        // 业务错误统一以 200 返回，错误码放在 errno 中
        (StatusCode::OK, Json(ErrorResponse::new(errno, msg))).into_response()
    }
}

impl From<PlaybackError> for ApiError {
    fn from(e: PlaybackError) -> Self {
        match e {
            PlaybackError::NotFound(name) => ApiError::NotFound(format!("Clip not found: {}", name)),
            e @ PlaybackError::Connection { .. } => ApiError::ServiceUnavailable(e.to_string()),
            e @ PlaybackError::Streaming { .. } => ApiError::Internal(e.to_string()),
            e @ PlaybackError::Aborted(_) => ApiError::Internal(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::VoiceError;
    use crate::testing::target;

    #[test]
    fn test_playback_error_mapping() {
        let not_found: ApiError = PlaybackError::not_found("horn").into();
        assert_eq!(not_found.errno(), errno::NOT_FOUND);

        let connection: ApiError = PlaybackError::Connection {
            target: target(),
            source: VoiceError::Unreachable("down".to_string()),
        }
        .into();
        assert_eq!(connection.errno(), errno::SERVICE_UNAVAILABLE);

        let streaming: ApiError = PlaybackError::Streaming {
            frame_index: 3,
            source: VoiceError::Closed,
        }
        .into();
        assert_eq!(streaming.errno(), errno::INTERNAL_ERROR);
    }
}
