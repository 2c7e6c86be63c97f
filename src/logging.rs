//! Tracing setup
//!
//! The UI draws on stdout, so logs only go to a file when one is configured.

use crate::{Config, SimError};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Returns false when logging is disabled.
pub fn init(config: &Config) -> crate::Result<bool> {
    let Some(path) = &config.log_file else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| SimError::LogFile {
            path: path.clone(),
            source,
        })?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(config.level().unwrap_or(LevelFilter::INFO).into()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {}", e))?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn disabled_without_log_file() {
        assert!(!init(&Config::default()).unwrap());
    }

    #[test]
    fn unwritable_path_is_reported() {
        let config = Config {
            log_file: Some(PathBuf::from("/nonexistent-dir/k8s-sim/sim.log")),
            ..Config::default()
        };
        let err = init(&config).unwrap_err();
        assert!(matches!(err.downcast_ref::<SimError>(), Some(SimError::LogFile { .. })));
    }
}
