use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Submission field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    HelpType,
    ProjectDetails,
}

impl Field {
    /// Field name as it appears in the inbound JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::HelpType => "helpType",
            Field::ProjectDetails => "projectDetails",
        }
    }

    /// User-facing message returned for a violation of this field's rule.
    pub fn message(&self) -> &'static str {
        match self {
            Field::Name => "Please provide your name (max 120 characters).",
            Field::Email => "Please provide a valid email address.",
            Field::HelpType => "Select what you need help with.",
            Field::ProjectDetails => "Project details are too long (max 2000 characters).",
        }
    }
}

/// Every way a contact submission can fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Supabase URL or service key is not configured.
    Configuration,
    /// Request body is not valid JSON.
    MalformedRequest,
    /// First field rule that the submission violates.
    Validation(Field),
    /// Supabase reports that the destination table does not exist.
    SchemaMissing {
        /// Name of the missing table.
        table: String,
        /// Raw response body from Supabase.
        detail: String,
    },
    /// Any other failed insert, including transport errors.
    Upstream {
        /// Raw response body (or transport error) from Supabase.
        detail: String,
    },
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MalformedRequest | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Configuration
            | AppError::SchemaMissing { .. }
            | AppError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the `error` key of the response body.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Configuration => "Server is missing Supabase configuration.".to_string(),
            AppError::MalformedRequest => "Invalid JSON payload.".to_string(),
            AppError::Validation(field) => field.message().to_string(),
            AppError::SchemaMissing { table, .. } => format!(
                "Supabase table '{}' is missing. Create the table or update the API route to point to the correct destination.",
                table
            ),
            AppError::Upstream { .. } => {
                "Unable to save your message. Please try again later.".to_string()
            }
        }
    }

    /// JSON body sent back to the caller.
    pub fn body(&self) -> serde_json::Value {
        match self {
            AppError::SchemaMissing { detail, .. } | AppError::Upstream { detail } => json!({
                "error": self.public_message(),
                "detail": detail,
            }),
            _ => json!({
                "error": self.public_message(),
            }),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Configuration => write!(f, "Configuration error: Supabase is not configured"),
            AppError::MalformedRequest => write!(f, "Malformed request: invalid JSON payload"),
            AppError::Validation(field) => write!(f, "Validation error on '{}'", field.as_str()),
            AppError::SchemaMissing { table, detail } => {
                write!(f, "Supabase table '{}' is missing: {}", table, detail)
            }
            AppError::Upstream { detail } => write!(f, "Supabase insert failed: {}", detail),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Maps each variant to its status code and JSON body, logging server-side failures.
    fn into_response(self) -> Response {
        match &self {
            AppError::Configuration | AppError::SchemaMissing { .. } | AppError::Upstream { .. } => {
                tracing::error!("{}", self);
            }
            AppError::MalformedRequest | AppError::Validation(_) => {
                tracing::debug!("Rejected submission: {}", self);
            }
        }

        (self.status_code(), Json(self.body())).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Upstream {
            detail: err.to_string(),
        }
    }
}
