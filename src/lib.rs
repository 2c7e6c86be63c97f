//! Kubernetes Troubleshooting Simulator
//!
//! An interactive `kubectl` look-alike that teaches one scenario: the
//! `auth-service` deployment is stuck in CrashLoopBackOff because its
//! `DB_PASSWORD` environment variable is never sourced from `db-secret`.
//!
//! # Architecture
//!
//! - `data` - The fabricated cluster: pods, deployments, secrets
//! - `game` - Command parsing, the interpreter, scheduled rollout steps,
//!   line buffering and scenario progress
//! - `tui` - Terminal user interface with ratatui
//! - `config` / `logging` - Command-line flags and tracing setup

pub mod config;
pub mod data;
pub mod game;
pub mod logging;
pub mod tui;

pub use config::Config;
pub use data::*;
pub use game::{Response, Session};

use std::path::PathBuf;

/// Simulator version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for the simulator
pub type Result<T> = anyhow::Result<T>;

/// Errors raised while setting up or driving the simulator
#[derive(thiserror::Error, Debug)]
pub enum SimError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Scenario step {0} is outside 1..=5")]
    InvalidStep(u8),

    #[error("Failed to open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures reported to the player as a single terminal line.
///
/// The `Display` output is exactly what gets printed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Error: unknown command \"{0}\"")]
    UnknownCommand(String),

    #[error("Error: pod \"{0}\" not found")]
    PodNotFound(String),

    #[error("Error: deployment \"{0}\" not found")]
    DeploymentNotFound(String),
}
