//! OpenAPI schema definitions and shared response shapes.
//!
//! Domain types stay framework-agnostic and do not derive `ToSchema`; the
//! mirrors here carry the documentation instead.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::UserSummary;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// No signed-in session.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Signed in identity is not on the allow-list.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested record does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    #[schema(example = "Validation error")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    trace_id: Option<String>,
    /// Itemised field errors: `{"errors": [{"field", "code", "message"}]}`.
    details: Option<serde_json::Value>,
}

/// Creator attribution embedded in every record.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedByResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "Kari Nordmann")]
    pub name: Option<String>,
    #[schema(example = "kari@example.com")]
    pub email: String,
}

impl From<UserSummary> for CreatedByResponse {
    fn from(value: UserSummary) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            email: value.email.into(),
        }
    }
}

/// Acknowledgement returned by delete endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedResponse {
    #[schema(example = true)]
    pub success: bool,
}

impl DeletedResponse {
    pub const fn ok() -> Self {
        Self { success: true }
    }
}
