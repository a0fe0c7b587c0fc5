//! Response envelope
//!
//! Every JSON body has the shape `{success, message?, data?, errors?, pagination?}`.
//! Handlers build the success form; [`catcher::EnvelopeCatcher`](crate::catcher) renders
//! the error form from whatever `StatusError` a handler returned.

use salvo::{http::StatusError, oapi::ToSchema};
use serde::{Deserialize, Serialize};
use storefront_app::domain::pagination::Page;
use thiserror::Error;
use uuid::Uuid;

/// Successful response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct Envelope<T: ToSchema + 'static> {
    /// Always `true`
    pub success: bool,

    /// Human readable outcome, for mutations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Response payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Page figures, for paginated listings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationResponse>,
}

impl<T: ToSchema + 'static> Envelope<T> {
    pub(crate) fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            pagination: None,
        }
    }

    #[must_use]
    pub(crate) fn message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    #[must_use]
    pub(crate) fn pagination(mut self, pagination: PaginationResponse) -> Self {
        self.pagination = Some(pagination);
        self
    }
}

/// Page navigation figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaginationResponse {
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
    pub total_items: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> From<&Page<T>> for PaginationResponse {
    fn from(page: &Page<T>) -> Self {
        Self {
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
            total_items: page.total_items,
            has_next: page.has_next,
            has_prev: page.has_prev,
        }
    }
}

/// Identifies the record a delete removed.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeletedResponse {
    pub uuid: Uuid,
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ErrorEnvelope {
    /// Always `false`
    pub success: bool,

    /// What went wrong
    pub message: String,

    /// Individual validation failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,

    /// Internal detail, outside production only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<String>,
}

/// Validation failures carried as the cause of a `400`.
#[derive(Debug, Error)]
#[error("validation failed: {}", .0.join(", "))]
pub(crate) struct ValidationErrors(pub Vec<String>);

/// A `400` listing each failed rule.
pub(crate) fn validation_failed(errors: Vec<String>) -> StatusError {
    StatusError::bad_request()
        .brief("Validation failed")
        .cause(ValidationErrors(errors))
}
