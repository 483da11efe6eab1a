use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
        }
    }
}

impl<I> ApiResponse<Vec<I>> {
    /// Successful list response with `meta.total` set to the number of items
    pub fn list(items: Vec<I>) -> Self {
        let total = items.len() as i64;
        Self::success(Some(items), None, Some(Meta { total }))
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Stable classification of a failed request. Clients branch on this rather
/// than on the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Path identifier is not a well-formed UUID
    InvalidId,
    /// A date boundary is not `YYYY-MM-DD`
    InvalidDate,
    /// A required query parameter is absent or empty
    MissingParameter,
    /// Request body could not be parsed
    InvalidPayload,
    /// Request body parsed but failed field validation
    Validation,
    /// Well-formed identifier with no matching record
    NotFound,
    /// The storage backend rejected or failed the statement
    Storage,
    Internal,
}

/// Body returned for every error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub kind: ErrorKind,
    /// Human-readable message
    pub error: String,
    /// Field-level details, present for validation failures
    pub errors: Option<Vec<String>>,
}

impl ErrorResponse {
    pub fn new(kind: ErrorKind, error: impl Into<String>, errors: Option<Vec<String>>) -> Self {
        Self {
            success: false,
            kind,
            error: error.into(),
            errors,
        }
    }
}
