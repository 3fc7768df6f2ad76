use crate::config::Config;
use crate::errors::AppError;
use crate::models::{ContactPayload, LeadRecord, SuccessResponse};
use crate::supabase_client::SupabaseClient;
use crate::validation::validate_submission;
use axum::{body::Body, extract::State, http::StatusCode, Json};
use serde_json::json;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Supabase client, absent when the URL or service key is not configured.
    pub supabase: Option<SupabaseClient>,
}

impl AppState {
    /// Builds the state, creating the Supabase client when credentials are present.
    pub fn new(config: Config) -> Self {
        let supabase = config.supabase_credentials().and_then(|(url, key)| {
            match SupabaseClient::new(url, key, config.supabase_timeout) {
                Ok(client) => {
                    tracing::info!("✓ Supabase client initialized: {}", client.endpoint());
                    Some(client)
                }
                Err(e) => {
                    tracing::error!("Failed to initialize Supabase client: {}", e);
                    None
                }
            }
        });

        Self { config, supabase }
    }
}

/// Health check endpoint.
///
/// Also reports whether the Supabase destination is configured, so a deploy
/// with missing secrets shows up without sending a test submission.
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<serde_json::Value>) {
    let supabase = if state.supabase.is_some() {
        "configured"
    } else {
        "missing"
    };

    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "contact-intake-api",
            "version": env!("CARGO_PKG_VERSION"),
            "supabase": supabase
        })),
    )
}

/// POST /api/contact
///
/// Flow:
/// 1. Reject immediately when Supabase is not configured.
/// 2. Read and parse the JSON body.
/// 3. Normalize and validate (first violation wins).
/// 4. Map to a lead row and insert it with a single request.
///
/// Every outcome is a JSON body with status 200, 400 or 500.
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    body: Body,
) -> Result<Json<SuccessResponse>, AppError> {
    let span = tracing::info_span!("contact_submission", request_id = %Uuid::new_v4());

    process_submission(&state, body).instrument(span).await
}

async fn process_submission(
    state: &AppState,
    body: Body,
) -> Result<Json<SuccessResponse>, AppError> {
    tracing::info!("Received contact submission");

    // Checked before the body is read so a misconfigured deploy never touches input
    let supabase = state.supabase.as_ref().ok_or(AppError::Configuration)?;

    let raw = axum::body::to_bytes(body, state.config.max_body_bytes)
        .await
        .map_err(|e| {
            tracing::warn!("Failed to read request body: {}", e);
            AppError::MalformedRequest
        })?;

    let payload = ContactPayload::from_json(&raw)?;
    let submission = validate_submission(payload)
        .inspect_err(|e| tracing::info!("Submission rejected: {}", e))?;

    let lead = LeadRecord::from(submission);
    tracing::info!(
        "Validated lead: help_topic={}, source={}, has_message={}",
        lead.help_topic().as_str(),
        lead.source(),
        lead.message().is_some()
    );

    supabase.insert_lead(&lead).await?;

    tracing::info!("✅ Contact submission stored");
    Ok(Json(SuccessResponse { success: true }))
}
