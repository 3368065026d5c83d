use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use super::domain::{EntityId, RecordKind};
use super::validation::FieldErrors;

/// Every rejection the taxonomy can produce. None of them are fatal: the caller keeps its
/// draft and can correct or retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaxonomyError {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    #[error("{kind} {id} not found")]
    NotFound { kind: RecordKind, id: EntityId },
    #[error("{kind} {id} does not exist")]
    ReferentialViolation { kind: RecordKind, id: EntityId },
    #[error("{kind} {id} is still referenced by at least one {referenced_by}")]
    InUse {
        kind: RecordKind,
        id: EntityId,
        referenced_by: RecordKind,
    },
    #[error("no draft is open")]
    NoActiveDraft,
}

impl TaxonomyError {
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            TaxonomyError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl IntoResponse for TaxonomyError {
    fn into_response(self) -> Response {
        match self {
            TaxonomyError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "errors": errors })),
            )
                .into_response(),
            other => {
                let status = match other {
                    TaxonomyError::NotFound { .. } | TaxonomyError::ReferentialViolation { .. } => {
                        StatusCode::NOT_FOUND
                    }
                    TaxonomyError::InUse { .. } => StatusCode::CONFLICT,
                    TaxonomyError::NoActiveDraft | TaxonomyError::Validation(_) => {
                        StatusCode::BAD_REQUEST
                    }
                };
                (status, Json(json!({ "error": other.to_string() }))).into_response()
            }
        }
    }
}
