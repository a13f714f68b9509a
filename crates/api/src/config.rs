use chrono_tz::Tz;

/// Default business timezone when `TIME_ZONE` is not set.
const DEFAULT_TIME_ZONE: &str = "America/Sao_Paulo";

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
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
    /// Business timezone: calendar days, quota weeks and report wall-clock
    /// times are all resolved in this zone, never in UTC.
    pub time_zone: Tz,
    /// Shared secret for the administrator capability. `None` leaves every
    /// admin endpoint locked.
    pub admin_token: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `TIME_ZONE`            | `America/Sao_Paulo`        |
    /// | `ADMIN_TOKEN`          | unset (admin locked)       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let time_zone: Tz = std::env::var("TIME_ZONE")
            .unwrap_or_else(|_| DEFAULT_TIME_ZONE.into())
            .parse()
            .expect("TIME_ZONE must be an IANA timezone name");

        let admin_token = std::env::var("ADMIN_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            time_zone,
            admin_token,
        }
    }
}
