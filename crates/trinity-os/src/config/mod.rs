use secrecy::SecretString;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

pub const DEFAULT_FDC_BASE_URL: &str = "https://api.nal.usda.gov";
pub const DEFAULT_RECENT_WINDOW: usize = 7;
pub const DEFAULT_LOOKBACK_DAYS: i64 = 7;
pub const MAX_LOOKBACK_DAYS: i64 = 3650;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub nutrition: NutritionConfig,
    pub wellness: WellnessConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let api_key = env::var("FDC_API_KEY").unwrap_or_else(|_| "DEMO_KEY".to_string());
        let base_url =
            env::var("FDC_BASE_URL").unwrap_or_else(|_| DEFAULT_FDC_BASE_URL.to_string());

        let recent_window = match env::var("WELLNESS_WINDOW") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|value| *value > 0)
                .ok_or(ConfigError::InvalidWindow)?,
            Err(_) => DEFAULT_RECENT_WINDOW,
        };
        let lookback_days = match env::var("WELLNESS_LOOKBACK_DAYS") {
            Ok(raw) => raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|value| (1..=MAX_LOOKBACK_DAYS).contains(value))
                .ok_or(ConfigError::InvalidLookback)?,
            Err(_) => DEFAULT_LOOKBACK_DAYS,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            nutrition: NutritionConfig {
                api_key: SecretString::new(api_key.into()),
                base_url,
            },
            wellness: WellnessConfig {
                recent_window,
                lookback_days,
            },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// FoodData Central credentials and endpoint.
#[derive(Debug, Clone)]
pub struct NutritionConfig {
    pub api_key: SecretString,
    pub base_url: String,
}

/// Window sizes used when selecting records for scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WellnessConfig {
    /// Number of most recent records averaged for sleep and mood.
    pub recent_window: usize,
    /// Length of the trailing exercise window and the prior-period cutoff.
    pub lookback_days: i64,
}

impl Default for WellnessConfig {
    fn default() -> Self {
        Self {
            recent_window: DEFAULT_RECENT_WINDOW,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidWindow,
    InvalidLookback,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidWindow => {
                write!(f, "WELLNESS_WINDOW must be a positive integer")
            }
            ConfigError::InvalidLookback => {
                write!(
                    f,
                    "WELLNESS_LOOKBACK_DAYS must be between 1 and {MAX_LOOKBACK_DAYS}"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidWindow
            | ConfigError::InvalidLookback => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "FDC_API_KEY",
            "FDC_BASE_URL",
            "WELLNESS_WINDOW",
            "WELLNESS_LOOKBACK_DAYS",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.nutrition.api_key.expose_secret(), "DEMO_KEY");
        assert_eq!(config.nutrition.base_url, DEFAULT_FDC_BASE_URL);
        assert_eq!(config.wellness, WellnessConfig::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn rejects_zero_window() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("WELLNESS_WINDOW", "0");
        let result = AppConfig::load();
        reset_env();
        assert!(matches!(result, Err(ConfigError::InvalidWindow)));
    }

    #[test]
    fn rejects_lookback_beyond_cap() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("WELLNESS_LOOKBACK_DAYS", "200000000");
        let oversized = AppConfig::load();
        env::set_var("WELLNESS_LOOKBACK_DAYS", "3650");
        let at_cap = AppConfig::load();
        reset_env();
        assert!(matches!(oversized, Err(ConfigError::InvalidLookback)));
        assert_eq!(
            at_cap.expect("cap is accepted").wellness.lookback_days,
            MAX_LOOKBACK_DAYS
        );
    }

    #[test]
    fn reads_nutrition_and_window_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("FDC_API_KEY", "abc123");
        env::set_var("FDC_BASE_URL", "http://localhost:9999");
        env::set_var("WELLNESS_WINDOW", "14");
        env::set_var("WELLNESS_LOOKBACK_DAYS", "14");
        let config = AppConfig::load().expect("config loads");
        reset_env();
        assert_eq!(config.nutrition.api_key.expose_secret(), "abc123");
        assert_eq!(config.nutrition.base_url, "http://localhost:9999");
        assert_eq!(config.wellness.recent_window, 14);
        assert_eq!(config.wellness.lookback_days, 14);
    }
}
