use std::time::Duration;

/// Port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 3000;

/// Largest request body accepted by the contact endpoint when `MAX_BODY_BYTES` is not set.
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Base URL of the Supabase project (`None` disables the contact endpoint).
    pub supabase_url: Option<String>,
    /// Service role key used for row inserts (`None` disables the contact endpoint).
    pub supabase_service_role_key: Option<String>,
    /// Optional deadline for the outbound insert. No deadline when unset.
    pub supabase_timeout: Option<Duration>,
    pub max_body_bytes: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Missing Supabase settings are not an error: the server still starts and the
    /// contact endpoint reports the misconfiguration on every request.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let config = Self {
            port: non_empty("PORT")
                .map(|port| {
                    port.trim()
                        .parse::<u16>()
                        .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))
                })
                .transpose()?
                .unwrap_or(DEFAULT_PORT),
            // The public URL is only consulted when SUPABASE_URL is unset; a blank value disables Supabase
            supabase_url: lookup("SUPABASE_URL")
                .or_else(|| lookup("NEXT_PUBLIC_SUPABASE_URL"))
                .filter(|value| !value.trim().is_empty())
                .map(|raw| -> anyhow::Result<String> {
                    let base = raw.trim().to_string();
                    let parsed = url::Url::parse(&base)
                        .map_err(|e| anyhow::anyhow!("SUPABASE_URL is not a valid URL: {}", e))?;
                    if parsed.scheme() != "http" && parsed.scheme() != "https" {
                        anyhow::bail!("SUPABASE_URL must start with http:// or https://");
                    }
                    Ok(base)
                })
                .transpose()?,
            supabase_service_role_key: non_empty("SUPABASE_SERVICE_ROLE_KEY")
                .map(|key| key.trim().to_string()),
            supabase_timeout: non_empty("SUPABASE_TIMEOUT_SECS")
                .map(|secs| {
                    secs.trim().parse::<u64>().map(Duration::from_secs).map_err(|_| {
                        anyhow::anyhow!("SUPABASE_TIMEOUT_SECS must be a whole number of seconds")
                    })
                })
                .transpose()?,
            max_body_bytes: non_empty("MAX_BODY_BYTES")
                .map(|bytes| {
                    bytes
                        .trim()
                        .parse::<usize>()
                        .map_err(|_| anyhow::anyhow!("MAX_BODY_BYTES must be a positive number"))
                })
                .transpose()?
                .unwrap_or(DEFAULT_MAX_BODY_BYTES),
        };

        tracing::debug!("Server Port: {}", config.port);
        match config.supabase_credentials() {
            Some((url, _)) => tracing::debug!("Supabase URL: {}", url),
            None => tracing::warn!(
                "SUPABASE_URL or SUPABASE_SERVICE_ROLE_KEY not set; contact submissions will be rejected"
            ),
        }

        Ok(config)
    }

    /// Base URL and service key, only when both are present.
    pub fn supabase_credentials(&self) -> Option<(&str, &str)> {
        match (&self.supabase_url, &self.supabase_service_role_key) {
            (Some(url), Some(key)) => Some((url.as_str(), key.as_str())),
            _ => None,
        }
    }
}
