use crate::errors::AppError;
use crate::models::LeadRecord;
use std::time::Duration;

/// Table that receives website leads.
pub const LEADS_TABLE: &str = "leads";

/// Text PostgREST puts in its error body when the target table is unknown.
const TABLE_NOT_FOUND_MARKER: &str = "Could not find the table";

/// Client for inserting rows through the Supabase REST interface.
#[derive(Clone)]
pub struct SupabaseClient {
    client: reqwest::Client,
    base_url: String,
    service_role_key: String,
    table: String,
}

impl SupabaseClient {
    /// Creates a new `SupabaseClient` writing to the `leads` table.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the Supabase project. A trailing `/` is ignored.
    /// * `service_role_key` - Service role key, sent as both `apikey` and bearer token.
    /// * `timeout` - Optional request deadline. `None` keeps the client default (no deadline).
    pub fn new(
        base_url: &str,
        service_role_key: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            service_role_key: service_role_key.to_string(),
            table: LEADS_TABLE.to_string(),
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Full row-insertion URL, e.g. `https://xyz.supabase.co/rest/v1/leads`.
    pub fn endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    /// Inserts one lead row.
    ///
    /// Issues exactly one request and never retries. Non-success responses are
    /// classified with [`classify_failure`]; transport failures become
    /// [`AppError::Upstream`].
    pub async fn insert_lead(&self, lead: &LeadRecord) -> Result<(), AppError> {
        let url = self.endpoint();
        tracing::info!("Inserting lead into Supabase table '{}'", self.table);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("apikey", self.service_role_key.as_str())
            .header("Authorization", format!("Bearer {}", self.service_role_key))
            .header("Prefer", "return=representation")
            .json(lead)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Supabase request failed: {}", e);
                AppError::from(e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!("Supabase returned {}: {}", status, error_text);
            return Err(classify_failure(&self.table, error_text));
        }

        tracing::info!("✓ Lead stored in Supabase ({})", response.status());
        Ok(())
    }
}

/// Turns the body of a failed insert into the matching error.
///
/// A body naming both the "table not found" condition and `table` means the
/// schema was never created; anything else is a generic upstream failure.
pub fn classify_failure(table: &str, detail: String) -> AppError {
    if detail.contains(TABLE_NOT_FOUND_MARKER) && detail.contains(table) {
        AppError::SchemaMissing {
            table: table.to_string(),
            detail,
        }
    } else {
        AppError::Upstream { detail }
    }
}
