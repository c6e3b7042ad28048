//! Client error taxonomy
//!
//! Four failure classes reach the user: the request never made it
//! (network), the backend answered non-2xx (its `message` field is
//! surfaced verbatim), the input failed client-side validation, or the
//! action conflicts with current state (e.g. transitioning a terminal
//! order). Nothing here is fatal and nothing is retried automatically.

use thiserror::Error;

use crate::domain::aggregates::order::OrderError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("{0}")]
    StateConflict(#[from] OrderError),
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut parts: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{field} is invalid"))
                })
            })
            .collect();
        parts.sort();
        ApiError::Validation(parts.join("; "))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
