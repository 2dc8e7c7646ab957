use rust_decimal::Decimal;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    registry::Registry,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter, Layer,
};

use crate::config::ApplicationSettings;

/// Subscriber settings. `RUST_LOG` wins over `level` when set.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
    pub source_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            source_location: false,
        }
    }
}

impl From<&ApplicationSettings> for LogConfig {
    fn from(settings: &ApplicationSettings) -> Self {
        Self {
            level: settings.log_level.clone(),
            format: LogFormat::from(settings.log_format.as_str()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
    Compact,
}

impl From<&str> for LogFormat {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            "compact" => LogFormat::Compact,
            _ => LogFormat::Pretty,
        }
    }
}

fn fmt_layer(config: &LogConfig) -> Box<dyn Layer<Registry> + Send + Sync> {
    let base = fmt::layer()
        .with_file(config.source_location)
        .with_line_number(config.source_location);

    match config.format {
        // Request spans close with their timing in the JSON output.
        LogFormat::Json => base.json().with_span_events(FmtSpan::CLOSE).boxed(),
        LogFormat::Compact => base.compact().boxed(),
        LogFormat::Pretty => base.pretty().boxed(),
    }
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn try_init_logging(config: &LogConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    tracing_subscriber::registry()
        .with(fmt_layer(config))
        .with(filter)
        .try_init()?;

    tracing::info!(level = %config.level, format = ?config.format, "Logging initialized");
    Ok(())
}

/// Installs the global subscriber, keeping an existing one if present.
pub fn init_logging(config: &LogConfig) {
    if let Err(e) = try_init_logging(config) {
        tracing::warn!("Logging already initialized: {}", e);
    }
}

/// Amounts are logged by order of magnitude only.
pub fn mask_amount(amount: &Decimal) -> String {
    let abs = amount.abs();
    if abs >= Decimal::from(1_000_000) {
        "***M+".to_string()
    } else if abs >= Decimal::from(1_000) {
        "***K+".to_string()
    } else {
        "***".to_string()
    }
}
