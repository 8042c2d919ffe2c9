/// Server configuration loaded from environment variables.
///
/// Everything except the backend coordinates has a default suitable for
/// local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Base URL of the hosted backend project.
    pub backend_url: String,
    /// Public (anon) API key of the hosted backend project.
    pub backend_anon_key: String,
    /// Attempts made to find a new user's profile role (default: `3`).
    pub role_lookup_max_attempts: u32,
    /// Editing sessions unused this long are evicted (default: `3600`).
    pub session_idle_timeout_secs: u64,
    /// How often idle sessions are swept (default: `60`).
    pub session_sweep_interval_secs: u64,
    /// Request body cap in MiB, sized for media uploads (default: `512`).
    pub max_upload_mb: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                       | Default                 |
    /// |-------------------------------|-------------------------|
    /// | `BACKEND_URL`                 | required                |
    /// | `BACKEND_ANON_KEY`            | required                |
    /// | `HOST`                        | `0.0.0.0`               |
    /// | `PORT`                        | `3000`                  |
    /// | `CORS_ORIGINS`                | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`        | `30`                    |
    /// | `ROLE_LOOKUP_MAX_ATTEMPTS`    | `3`                     |
    /// | `SESSION_IDLE_TIMEOUT_SECS`   | `3600`                  |
    /// | `SESSION_SWEEP_INTERVAL_SECS` | `60`                    |
    /// | `MAX_UPLOAD_MB`               | `512`                   |
    pub fn from_env() -> Self {
        let backend_url = std::env::var("BACKEND_URL").expect("BACKEND_URL must be set");
        let backend_anon_key =
            std::env::var("BACKEND_ANON_KEY").expect("BACKEND_ANON_KEY must be set");

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let role_lookup_max_attempts: u32 = std::env::var("ROLE_LOOKUP_MAX_ATTEMPTS")
            .unwrap_or_else(|_| "3".into())
            .parse()
            .expect("ROLE_LOOKUP_MAX_ATTEMPTS must be a valid u32");

        let session_idle_timeout_secs: u64 = std::env::var("SESSION_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "3600".into())
            .parse()
            .expect("SESSION_IDLE_TIMEOUT_SECS must be a valid u64");

        let session_sweep_interval_secs: u64 = std::env::var("SESSION_SWEEP_INTERVAL_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("SESSION_SWEEP_INTERVAL_SECS must be a valid u64");

        let max_upload_mb: usize = std::env::var("MAX_UPLOAD_MB")
            .unwrap_or_else(|_| "512".into())
            .parse()
            .expect("MAX_UPLOAD_MB must be a valid usize");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            backend_url,
            backend_anon_key,
            role_lookup_max_attempts,
            session_idle_timeout_secs,
            session_sweep_interval_secs,
            max_upload_mb,
        }
    }

    /// Request body cap in bytes.
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_blank_entries_dropped() {
        assert_eq!(
            parse_origins(" http://a.test ,,http://b.test"),
            ["http://a.test", "http://b.test"]
        );
    }
}
