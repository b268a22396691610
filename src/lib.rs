//! Very basic JSONAPI.org compliance for axum services, enabling easy
//! construction of APIs that return JSON.
//!
//! Errors raised by the following libraries are reformatted as JSONAPI error
//! documents while keeping the correct HTTP status codes:
//!
//! - `jsonwebtoken` (JWT validation; always answered with 401, the library
//!   message lands in the error object's `meta`)
//! - axum's own extractor rejections (JSON body, path, query)
//!
//! Handlers return `Result<JsonApiResponse, JsonApiError>` and use `?` on
//! anything convertible; everything else passes through to axum untouched.
//!
//! ```
//! use axum::http::StatusCode;
//! use axum_jsonapi_trivial::{Document, JsonApiError, JsonApiResponse};
//! use serde_json::json;
//!
//! async fn hello_world() -> Result<JsonApiResponse, JsonApiError> {
//!     Ok(JsonApiResponse::ok(
//!         Document::new().meta(json!("Hello, world!")),
//!     ))
//! }
//!
//! async fn not_done_yet() -> Result<JsonApiResponse, JsonApiError> {
//!     Err(StatusCode::NOT_IMPLEMENTED.into())
//! }
//! ```

mod document;
mod error;
mod resource;
mod response;

pub use document::{
    Document, ErrorDocument, ErrorObject, JSONAPI_VERSION, MEDIA_TYPE, Resource, Version,
};
pub use error::JsonApiError;
pub use resource::JsonApiResource;
pub use response::JsonApiResponse;
