// src/error.rs

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};

use crate::document::{ErrorDocument, ErrorObject, MEDIA_TYPE};

/// Conditions the shim knows how to reformat as JSONAPI error documents.
///
/// Anything without a `From` conversion into this type never enters the shim
/// and is handled by axum as usual.
#[derive(Debug, thiserror::Error)]
pub enum JsonApiError {
    // === Bare HTTP statuses ===
    #[error("{0}")]
    Status(StatusCode),
    #[error("{0}: {1}")]
    Detailed(StatusCode, String),

    // === Token validation (always answered with 401) ===
    #[error("JWT rejected: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // === Framework rejections ===
    #[error("Invalid JSON body: {0}")]
    JsonRejection(#[from] JsonRejection),
    #[error("Invalid path parameter: {0}")]
    PathRejection(#[from] PathRejection),
    #[error("Invalid query string: {0}")]
    QueryRejection(#[from] QueryRejection),

    // === Caller-supplied error objects ===
    #[error("{title}")]
    Custom {
        status: StatusCode,
        title: String,
        detail: Option<String>,
        meta: Option<Map<String, Value>>,
    },
}

impl JsonApiError {
    /// Formats the error as the status code to preserve plus the JSONAPI
    /// error object for the body. Never fails.
    fn to_wire(&self) -> (StatusCode, ErrorObject) {
        match self {
            Self::Status(status) => (*status, ErrorObject::from_status(*status)),
            Self::Detailed(status, detail) => (
                *status,
                ErrorObject::from_status(*status).with_detail(detail.clone()),
            ),
            Self::Jwt(err) => {
                let mut meta = Map::new();
                meta.insert("JWT error".to_string(), Value::String(err.to_string()));
                (
                    StatusCode::UNAUTHORIZED,
                    ErrorObject::from_status(StatusCode::UNAUTHORIZED).with_meta(meta),
                )
            }
            Self::JsonRejection(rejection) => (
                rejection.status(),
                ErrorObject::from_status(rejection.status()).with_detail(rejection.body_text()),
            ),
            Self::PathRejection(rejection) => (
                rejection.status(),
                ErrorObject::from_status(rejection.status()).with_detail(rejection.body_text()),
            ),
            Self::QueryRejection(rejection) => (
                rejection.status(),
                ErrorObject::from_status(rejection.status()).with_detail(rejection.body_text()),
            ),
            Self::Custom {
                status,
                title,
                detail,
                meta,
            } => (
                *status,
                ErrorObject {
                    status: status.as_u16().to_string(),
                    title: title.clone(),
                    detail: detail.clone(),
                    meta: meta.clone(),
                },
            ),
        }
    }

    // === Constructor helpers ===

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::Detailed(StatusCode::BAD_REQUEST, detail.into())
    }

    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::Detailed(StatusCode::UNAUTHORIZED, detail.into())
    }

    pub fn forbidden(detail: impl Into<String>) -> Self {
        Self::Detailed(StatusCode::FORBIDDEN, detail.into())
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::Detailed(StatusCode::NOT_FOUND, detail.into())
    }

    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::Detailed(StatusCode::CONFLICT, detail.into())
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Detailed(StatusCode::INTERNAL_SERVER_ERROR, detail.into())
    }

    pub fn custom(status: StatusCode, title: impl Into<String>) -> Self {
        Self::Custom {
            status,
            title: title.into(),
            detail: None,
            meta: None,
        }
    }

    /// Attaches `meta` entries to the error object, keeping any the error
    /// already carries (JWT errors, for instance).
    pub fn with_meta(self, meta: Map<String, Value>) -> Self {
        let (status, wire) = self.to_wire();
        let mut merged = wire.meta.unwrap_or_default();
        merged.extend(meta);
        Self::Custom {
            status,
            title: wire.title,
            detail: wire.detail,
            meta: Some(merged),
        }
    }

    /// The HTTP status code this error answers with.
    pub fn status_code(&self) -> StatusCode {
        self.to_wire().0
    }
}

impl From<StatusCode> for JsonApiError {
    fn from(status: StatusCode) -> Self {
        Self::Status(status)
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let (status, mut error) = self.to_wire();

        if status.is_server_error() {
            // Internal detail goes to the log, not to the client.
            if let Some(detail) = error.detail.take() {
                tracing::error!(%status, detail, "request failed");
            } else {
                tracing::error!(%status, title = %error.title, "request failed");
            }
        } else if matches!(self, Self::Jwt(_)) {
            tracing::warn!(%status, error = %self, "JWT rejected");
        }

        (
            status,
            [(header::CONTENT_TYPE, MEDIA_TYPE)],
            Json(ErrorDocument::new(error)),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{DecodingKey, Validation};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Claims {
        #[allow(dead_code)]
        sub: String,
    }

    fn jwt_error() -> jsonwebtoken::errors::Error {
        jsonwebtoken::decode::<Claims>(
            "definitely.not.a-token",
            &DecodingKey::from_secret(b"test_secret"),
            &Validation::default(),
        )
        .expect_err("garbage token must not decode")
    }

    #[test]
    fn bare_status_maps_to_itself() {
        let err = JsonApiError::from(StatusCode::NOT_IMPLEMENTED);
        assert_eq!(err.status_code(), StatusCode::NOT_IMPLEMENTED);
    }

    #[test]
    fn not_found_maps_to_404_status() {
        assert_eq!(
            JsonApiError::not_found("no such record").status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn internal_maps_to_500_status() {
        assert_eq!(
            JsonApiError::internal("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn jwt_error_always_maps_to_401() {
        let err = JsonApiError::from(jwt_error());
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn jwt_error_carries_library_message_in_meta() {
        let err = JsonApiError::from(jwt_error());
        let (_, wire) = err.to_wire();
        let meta = wire.meta.expect("JWT errors carry meta");
        let message = meta["JWT error"].as_str().expect("message is a string");
        assert!(!message.is_empty());
    }

    #[test]
    fn detailed_error_keeps_detail_on_the_wire() {
        let (status, wire) = JsonApiError::not_found("no such record").to_wire();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(wire.title, "Not Found");
        assert_eq!(wire.detail.as_deref(), Some("no such record"));
    }

    #[test]
    fn with_meta_merges_into_existing_entries() {
        let mut extra = Map::new();
        extra.insert("request".to_string(), Value::String("abc".to_string()));
        let err = JsonApiError::from(jwt_error()).with_meta(extra);

        let (status, wire) = err.to_wire();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let meta = wire.meta.expect("meta survives the merge");
        assert!(meta.contains_key("JWT error"));
        assert_eq!(meta["request"], "abc");
    }

    #[test]
    fn into_response_preserves_status_and_media_type() {
        let response = JsonApiError::custom(StatusCode::IM_A_TEAPOT, "Teapot").into_response();
        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            MEDIA_TYPE
        );
    }

    #[test]
    fn into_response_keeps_500_but_withholds_detail() {
        let (_, wire) = JsonApiError::internal("db password wrong").to_wire();
        assert!(wire.detail.is_some());

        let response = JsonApiError::internal("db password wrong").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
