//! Data structures for the simulated cluster
//!
//! Defines pods, deployments, secrets and the aggregate cluster state.

pub mod cluster;
pub mod deployment;
pub mod pod;
pub mod secret;

pub use cluster::*;
pub use deployment::*;
pub use pod::*;
pub use secret::*;

use serde::{Deserialize, Serialize};

/// Lifecycle phase shown in the STATUS column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PodPhase {
    Running,
    CrashLoopBackOff,
}

impl PodPhase {
    pub fn is_failure(&self) -> bool {
        matches!(self, PodPhase::CrashLoopBackOff)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            PodPhase::Running => "✔",
            PodPhase::CrashLoopBackOff => "✖",
        }
    }
}

impl std::fmt::Display for PodPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // `pad` so width specifiers like `{:<20}` apply
        match self {
            PodPhase::Running => f.pad("Running"),
            PodPhase::CrashLoopBackOff => f.pad("CrashLoopBackOff"),
        }
    }
}
