use serde::Serialize;
use serde_json::Value;

use crate::errors::AppError;

/// Closed set of topics a visitor can ask for help with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HelpType {
    Marketing,
    Consulting,
    Research,
    Other,
}

impl HelpType {
    pub const ALL: [HelpType; 4] = [
        HelpType::Marketing,
        HelpType::Consulting,
        HelpType::Research,
        HelpType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HelpType::Marketing => "marketing",
            HelpType::Consulting => "consulting",
            HelpType::Research => "research",
            HelpType::Other => "other",
        }
    }

    /// Exact match against the lowercase names. Callers normalize first.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|help| help.as_str() == value)
    }
}

/// Contact form body as received, before any normalization.
///
/// Every key is optional. Keys holding something other than a string are treated
/// as absent, as is every key when the body is not a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub help_type: Option<String>,
    pub project_details: Option<String>,
    pub language: Option<String>,
}

impl ContactPayload {
    /// Parses a raw request body.
    pub fn from_json(raw: &[u8]) -> Result<Self, AppError> {
        let value: Value = serde_json::from_slice(raw).map_err(|e| {
            tracing::debug!("Invalid JSON payload: {}", e);
            AppError::MalformedRequest
        })?;

        Ok(Self::from_value(&value))
    }

    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);

        Self {
            name: text("name"),
            email: text("email"),
            help_type: text("helpType"),
            project_details: text("projectDetails"),
            language: text("language"),
        }
    }
}

/// A submission that passed every field rule.
///
/// Only [`crate::validation::validate_submission`] builds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) help_type: HelpType,
    pub(crate) project_details: String,
    pub(crate) language: Option<String>,
}

impl ContactSubmission {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn help_type(&self) -> HelpType {
        self.help_type
    }

    pub fn project_details(&self) -> &str {
        &self.project_details
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

/// Row inserted into the Supabase `leads` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadRecord {
    name: String,
    email: String,
    help_topic: HelpType,
    message: Option<String>,
    source: String,
}

impl LeadRecord {
    pub fn help_topic(&self) -> HelpType {
        self.help_topic
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl From<ContactSubmission> for LeadRecord {
    fn from(submission: ContactSubmission) -> Self {
        let source = match submission.language.as_deref() {
            Some(language) if !language.is_empty() => format!("website-{}", language),
            _ => "website".to_string(),
        };
        let message = if submission.project_details.is_empty() {
            None
        } else {
            Some(submission.project_details)
        };

        Self {
            name: submission.name,
            email: submission.email,
            help_topic: submission.help_type,
            message,
            source,
        }
    }
}

/// Body returned once the lead is stored.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}
