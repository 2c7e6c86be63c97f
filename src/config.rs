//! Command-line configuration

use crate::SimError;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::level_filters::LevelFilter;

/// Interactive kubectl simulator: fix the CrashLoopBackOff in auth-service
#[derive(Debug, Clone, Parser)]
#[command(name = "k8s-troubleshooter", version, about)]
pub struct Config {
    /// How often the UI polls for input and advances timers, in milliseconds
    #[arg(long, default_value_t = 100)]
    pub tick_ms: u64,

    /// Append tracing output to this file (the terminal is owned by the UI)
    #[arg(long, env = "K8S_SIM_LOG")]
    pub log_file: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Start with the hint panel open
    #[arg(long)]
    pub show_hint: bool,
}

impl Config {
    pub fn validate(&self) -> Result<(), SimError> {
        if self.tick_ms == 0 {
            return Err(SimError::InvalidConfig("--tick-ms must be greater than 0".to_string()));
        }
        self.level()?;
        Ok(())
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn level(&self) -> Result<LevelFilter, SimError> {
        self.log_level
            .parse::<LevelFilter>()
            .map_err(|_| SimError::InvalidConfig(format!("unknown log level: {}", self.log_level)))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            log_file: None,
            log_level: "info".to_string(),
            show_hint: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::try_parse_from(["k8s-troubleshooter"]).unwrap();
        assert_eq!(config.tick_ms, 100);
        assert!(!config.show_hint);
        assert!(config.validate().is_ok());
        assert_eq!(config.tick_rate(), Duration::from_millis(100));
    }

    #[test]
    fn parses_flags() {
        let config = Config::try_parse_from([
            "k8s-troubleshooter",
            "--tick-ms",
            "50",
            "--log-level",
            "debug",
            "--log-file",
            "/tmp/sim.log",
            "--show-hint",
        ])
        .unwrap();
        assert_eq!(config.tick_ms, 50);
        assert_eq!(config.level().unwrap(), LevelFilter::DEBUG);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/sim.log")));
        assert!(config.show_hint);
    }

    #[test]
    fn rejects_zero_tick() {
        let config = Config {
            tick_ms: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_unknown_level() {
        let config = Config {
            log_level: "chatty".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));
    }
}
