use axum::{
    Json,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::document::{Document, MEDIA_TYPE};
use crate::error::JsonApiError;

/// Handler response pairing a status code with a JSONAPI document.
///
/// 2xx/3xx statuses serialize the success document; 4xx/5xx statuses abort
/// into the error-document shape built from the status, carrying any `meta`
/// object from the document along. Either way the status code is preserved
/// and the body goes out as `application/vnd.api+json`.
pub struct JsonApiResponse {
    status: StatusCode,
    document: Document,
    headers: Option<HeaderMap>,
}

impl JsonApiResponse {
    /// Creates a response with a status code and a document.
    pub fn new(status: StatusCode, document: Document) -> Self {
        Self {
            status,
            document,
            headers: None,
        }
    }

    /// Adds extra headers to the response.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }

    // === Constructors for common status codes ===

    /// 200 OK with a document.
    pub fn ok(document: Document) -> Self {
        Self::new(StatusCode::OK, document)
    }

    /// 201 Created with a document.
    pub fn created(document: Document) -> Self {
        Self::new(StatusCode::CREATED, document)
    }

    /// 204 No Content; no body at all.
    pub fn no_content() -> Self {
        Self::new(StatusCode::NO_CONTENT, Document::new())
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for JsonApiResponse {
    fn into_response(self) -> Response {
        let mut response = if self.status.is_client_error() || self.status.is_server_error() {
            // Caller-supplied meta rides along into the error object; the
            // error-object meta member must be a mapping, so anything else
            // is dropped.
            let error = match self.document.meta {
                Some(Value::Object(meta)) => JsonApiError::Status(self.status).with_meta(meta),
                _ => JsonApiError::Status(self.status),
            };
            error.into_response()
        } else if self.status == StatusCode::NO_CONTENT {
            self.status.into_response()
        } else {
            (
                self.status,
                [(header::CONTENT_TYPE, MEDIA_TYPE)],
                Json(self.document),
            )
                .into_response()
        };

        if let Some(headers) = self.headers {
            response.headers_mut().extend(headers);
        }

        response
    }
}
