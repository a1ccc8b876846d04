//! Configuration
//!
//! Every setting can come from a flag or the environment; a `.env` file is loaded first when
//! present.

use std::{ffi::OsString, path::PathBuf, time::Duration};

use clap::{Args, Parser, ValueEnum};
use rusty_money::iso::{self, Currency};
use thiserror::Error;

use crate::domain::payments::PaymentDelays;

/// Order service used during development.
pub const DEVELOPMENT_API_URL: &str = "http://localhost:5000";

/// Order service used in production.
pub const PRODUCTION_API_URL: &str = "https://api.voltcart.energy";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    #[error(transparent)]
    Parse(#[from] clap::Error),
}

/// Deployment environment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

/// Order service settings.
#[derive(Debug, Clone, Args)]
pub struct ApiConfig {
    /// Deployment environment; picks the default API host
    #[arg(long = "env", env = "VOLTCART_ENV", value_enum, default_value_t)]
    pub environment: Environment,

    /// Order service base URL, overriding the environment default
    #[arg(long, env = "VOLTCART_API_URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "VOLTCART_API_TIMEOUT_SECONDS", default_value_t = 10)]
    pub api_timeout_seconds: u64,
}

impl ApiConfig {
    /// Base URL of the order service.
    #[must_use]
    pub fn base_url(&self) -> &str {
        match (&self.api_url, self.environment) {
            (Some(url), _) => url,
            (None, Environment::Development) => DEVELOPMENT_API_URL,
            (None, Environment::Production) => PRODUCTION_API_URL,
        }
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_seconds)
    }
}

/// Storefront settings.
#[derive(Debug, Clone, Args)]
pub struct StoreConfig {
    /// ISO currency code prices are quoted in
    #[arg(long, env = "VOLTCART_CURRENCY", default_value = "USD")]
    pub currency: String,

    /// Directory holding the persisted cart
    #[arg(long, env = "VOLTCART_DATA_DIR", default_value = ".voltcart")]
    pub data_dir: PathBuf,
}

impl StoreConfig {
    /// Resolve the configured currency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownCurrency`] for codes missing from the ISO table.
    pub fn currency(&self) -> Result<&'static Currency, ConfigError> {
        iso::find(self.currency.trim())
            .ok_or_else(|| ConfigError::UnknownCurrency(self.currency.clone()))
    }
}

/// Simulated payment timings.
#[derive(Debug, Clone, Args)]
pub struct PaymentConfig {
    /// Simulated processing time for a payment confirmation
    #[arg(long, env = "VOLTCART_PAYMENT_DELAY_MS", default_value_t = 2_000)]
    pub payment_delay_ms: u64,

    /// How long the success state is shown before checkout moves on
    #[arg(long, env = "VOLTCART_SUCCESS_DISPLAY_MS", default_value_t = 1_500)]
    pub success_display_ms: u64,

    /// Simulated delay when placing the order from review
    #[arg(long, env = "VOLTCART_PLACE_ORDER_DELAY_MS", default_value_t = 1_500)]
    pub place_order_delay_ms: u64,
}

impl PaymentConfig {
    #[must_use]
    pub fn delays(&self) -> PaymentDelays {
        PaymentDelays {
            processing: Duration::from_millis(self.payment_delay_ms),
            success_display: Duration::from_millis(self.success_display_ms),
            place_order: Duration::from_millis(self.place_order_delay_ms),
        }
    }
}

/// Log output format.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    #[default]
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Full application configuration.
#[derive(Debug, Clone, Args)]
pub struct AppConfig {
    #[command(flatten)]
    pub api: ApiConfig,

    #[command(flatten)]
    pub store: StoreConfig,

    #[command(flatten)]
    pub payments: PaymentConfig,

    #[command(flatten)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Parser)]
#[command(name = "voltcart", about = "Voltcart settings", long_about = None)]
struct Standalone {
    #[command(flatten)]
    config: AppConfig,
}

impl AppConfig {
    /// Parse configuration from command-line style arguments, falling back to the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if an argument or environment value can't be parsed.
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Ok(Standalone::try_parse_from(args)?.config)
    }
}
