use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Outcome of validating user input: a boolean plus a field -> message map.
///
/// Validation never fails the calling operation by itself; callers inspect the
/// report (or convert it with [`ValidationReport::into_result`]) and decide.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: BTreeMap<String, String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: BTreeMap::new(),
        }
    }

    /// Record a failure for a field. The first message per field wins.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.is_valid = false;
        self.errors.entry(field.into()).or_insert_with(|| message.into());
    }

    /// Fold `validator` derive output into the report. `prefix` scopes nested
    /// structures, e.g. line errors become `products-1.rate`.
    pub fn merge_validator_errors(&mut self, prefix: Option<&str>, errors: &ValidationErrors) {
        for (field, kind) in errors.errors() {
            let key = match prefix {
                Some(p) => format!("{p}.{field}"),
                None => field.to_string(),
            };
            match kind {
                ValidationErrorsKind::Field(failures) => {
                    if let Some(failure) = failures.first() {
                        let message = failure
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| failure.code.to_string());
                        self.add(key, message);
                    }
                }
                ValidationErrorsKind::Struct(nested) => {
                    self.merge_validator_errors(Some(&key), nested);
                }
                ValidationErrorsKind::List(items) => {
                    for (index, nested) in items {
                        let scoped = format!("{}-{}", key, index + 1);
                        self.merge_validator_errors(Some(&scoped), nested);
                    }
                }
            }
        }
    }

    pub fn into_result(self) -> Result<(), AppError> {
        if self.is_valid {
            Ok(())
        } else {
            Err(AppError::Validation(self))
        }
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&ValidationErrors> for ValidationReport {
    fn from(errors: &ValidationErrors) -> Self {
        let mut report = Self::new();
        report.merge_validator_errors(None, errors);
        report
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed")]
    Validation(ValidationReport),

    #[error("Bad request: {0}")]
    BadRequest(anyhow::Error),

    #[error("Not found: {0}")]
    NotFound(anyhow::Error),

    #[error("Store error: {0}")]
    StoreError(anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::StoreError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            details: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            errors: Option<BTreeMap<String, String>>,
        }

        let (status, error_message, details, errors) = match self {
            AppError::Validation(report) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation failed".to_string(),
                None,
                Some(report.errors),
            ),
            AppError::BadRequest(err) => (StatusCode::BAD_REQUEST, err.to_string(), None, None),
            AppError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string(), None, None),
            AppError::StoreError(err) => (
                StatusCode::BAD_GATEWAY,
                "Store error".to_string(),
                Some(err.to_string()),
                None,
            ),
            AppError::ConfigError(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Configuration error".to_string(),
                Some(err.to_string()),
                None,
            ),
            AppError::InternalError(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
                Some(err.to_string()),
                None,
            ),
        };

        (
            status,
            Json(ErrorResponse {
                error: error_message,
                details,
                errors,
            }),
        )
            .into_response()
    }
}
