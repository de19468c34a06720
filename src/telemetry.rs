//! Logging setup

use crate::config::LoggingConfig;
use crate::core::error::{AdminError, ConfigError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a console `tracing` subscriber
///
/// `RUST_LOG` takes precedence over `config.filter`. Returns `Ok(false)` when
/// a global subscriber was already installed (by an earlier call or by the
/// host application).
pub fn init_tracing(config: &LoggingConfig) -> Result<bool, AdminError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter).map_err(|e| ConfigError::InvalidValue {
            field: "logging.filter".to_string(),
            value: config.filter.clone(),
            message: e.to_string(),
        })?,
    };

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!("Tracing initialized");
    }
    Ok(installed)
}
