//! Pod definitions

use super::PodPhase;
use serde::{Deserialize, Serialize};

/// A simulated pod.
///
/// `age`, `ip` and `node` are display strings and never change after seeding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pod {
    pub name: String,
    pub status: PodPhase,
    pub ready: bool,
    pub restarts: u32,
    pub age: String,
    pub ip: String,
    pub node: String,
    /// Recorded container output, only kept for pods with failure history
    pub logs: Option<Vec<String>>,
}

impl Pod {
    pub fn running(name: &str, ip: &str) -> Self {
        Self {
            name: name.to_string(),
            status: PodPhase::Running,
            ready: true,
            restarts: 0,
            age: "10m".to_string(),
            ip: ip.to_string(),
            node: "node-1".to_string(),
            logs: None,
        }
    }

    pub fn crash_looping(name: &str, ip: &str, restarts: u32, logs: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            status: PodPhase::CrashLoopBackOff,
            ready: false,
            restarts,
            age: "10m".to_string(),
            ip: ip.to_string(),
            node: "node-1".to_string(),
            logs: Some(logs.iter().map(|l| l.to_string()).collect()),
        }
    }

    /// The `app` label, taken from the first dash-separated name segment
    pub fn app_label(&self) -> &str {
        self.name.split('-').next().unwrap_or(&self.name)
    }

    pub fn ready_column(&self) -> &'static str {
        if self.ready {
            "1/1"
        } else {
            "0/1"
        }
    }

    pub fn container_port(&self) -> &'static str {
        if self.name.contains("postgresql") {
            "5432/TCP"
        } else {
            "8080/TCP"
        }
    }

    pub fn logs(&self) -> &[String] {
        self.logs.as_deref().unwrap_or(&[])
    }

    /// Bring the pod back up after its container restarted with a fixed config
    pub(crate) fn recover(&mut self) {
        self.status = PodPhase::Running;
        self.ready = true;
        self.restarts += 1;
    }
}
