//! Defines the JSON body sent for an internal server error.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// The generic error body sent when something goes wrong on the server.
///
/// The message is deliberately vague, details belong in the server logs.
#[derive(Debug, Serialize)]
pub struct InternalServerError<'a> {
    pub error: &'a str,
}

impl Default for InternalServerError<'_> {
    fn default() -> Self {
        Self {
            error: "Internal server error",
        }
    }
}

impl IntoResponse for InternalServerError<'_> {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::InternalServerError;

    #[tokio::test]
    async fn renders_custom_message_as_json() {
        let response = InternalServerError {
            error: "Failed to initialize database",
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], br#"{"error":"Failed to initialize database"}"#);
    }
}
