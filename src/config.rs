//! Configuration module
//!
//! Settings load from a TOML file (`EASYDOCK_CONFIG` env var or
//! `easydock.toml` in the working directory); missing file or fields fall
//! back to defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub payments: PaymentsConfig,
    pub loyalty: LoyaltyConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Bounded wait for entity locks, in milliseconds
    pub lock_wait_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            lock_wait_ms: 5_000,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn lock_wait(&self) -> Duration {
        Duration::from_millis(self.lock_wait_ms)
    }
}

/// Payment configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaymentsConfig {
    /// Simulated card gateway decline probability, 0.0..=1.0
    pub gateway_decline_probability: f64,
    /// Platform cut on new facility listings, in basis points
    pub default_revenue_share_bps: u32,
}

impl Default for PaymentsConfig {
    fn default() -> Self {
        Self {
            gateway_decline_probability: 0.10,
            default_revenue_share_bps: 1_500,
        }
    }
}

/// Loyalty configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoyaltyConfig {
    /// Milli-points per major unit when no program is active
    pub fallback_points_per_unit_milli: i64,
}

impl Default for LoyaltyConfig {
    fn default() -> Self {
        Self {
            fallback_points_per_unit_milli: 100,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter (overridden by RUST_LOG)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, String> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        toml::from_str(&raw).map_err(|e| format!("cannot parse {}: {}", path.display(), e))
    }
}

/// Default config file location
pub fn default_config_path() -> PathBuf {
    PathBuf::from("easydock.toml")
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.address(), "0.0.0.0:8080");
        assert_eq!(cfg.payments.gateway_decline_probability, 0.10);
        assert_eq!(cfg.payments.default_revenue_share_bps, 1_500);
        assert_eq!(cfg.loyalty.fallback_points_per_unit_milli, 100);
        assert_eq!(cfg.server.lock_wait(), Duration::from_secs(5));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            port = 9999

            [payments]
            gateway_decline_probability = 0.0
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9999);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.payments.gateway_decline_probability, 0.0);
        assert_eq!(cfg.payments.default_revenue_share_bps, 1_500);
    }
}
