//! Core simulator logic: the session that owns the cluster, runs commands
//! and plays back the scripted rollout

pub mod command;
pub mod input;
pub mod interpreter;
pub mod scenario;
pub mod scheduler;

pub use command::Command;
pub use input::LineBuffer;
pub use scenario::ScenarioProgress;
pub use scheduler::{DeferredAction, Scheduler};

use crate::data::ClusterState;
use std::time::Duration;
use tracing::{debug, info};

/// What a command produced for the terminal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub lines: Vec<String>,
    /// Wipe the terminal before printing
    pub clear_screen: bool,
}

impl Response {
    pub fn lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            clear_screen: false,
        }
    }

    pub fn clear() -> Self {
        Self {
            lines: Vec::new(),
            clear_screen: true,
        }
    }

    pub fn error(err: crate::CommandError) -> Self {
        Self::lines(vec![err.to_string()])
    }
}

/// Counters shown in the header
#[derive(Debug, Clone, Default)]
pub struct SessionStats {
    pub commands_run: u32,
}

/// One play-through of the scenario.
///
/// Holds the only mutable handle to the cluster; every change goes through
/// a command or a scheduled step run by this session.
#[derive(Debug)]
pub struct Session {
    cluster: ClusterState,
    progress: ScenarioProgress,
    scheduler: Scheduler,
    stats: SessionStats,
}

impl Session {
    /// Start the scenario from its broken seed state
    pub fn new() -> Self {
        Self::with_cluster(ClusterState::scenario())
    }

    pub fn with_cluster(cluster: ClusterState) -> Self {
        Self {
            cluster,
            progress: ScenarioProgress::default(),
            scheduler: Scheduler::new(),
            stats: SessionStats::default(),
        }
    }

    pub fn cluster(&self) -> &ClusterState {
        &self.cluster
    }

    pub fn progress(&self) -> ScenarioProgress {
        self.progress
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Virtual time since the session started
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn has_pending_work(&self) -> bool {
        self.scheduler.pending() > 0
    }

    /// Run one completed input line. Blank lines are ignored.
    pub fn execute(&mut self, line: &str) -> Response {
        if line.trim().is_empty() {
            return Response::default();
        }

        self.stats.commands_run += 1;
        let command = Command::parse(line);
        info!(?command, mutating = command.is_mutating(), count = self.stats.commands_run, "executing command");
        self.run(command)
    }

    /// Advance the virtual clock and return output from every scripted step
    /// that came due, in order.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<String> {
        let until = self.scheduler.now() + elapsed;
        let mut lines = Vec::new();

        while let Some(task) = self.scheduler.pop_due(until) {
            debug!(action = ?task.action, "running scheduled step");
            lines.extend(self.run_deferred(task.action));
        }

        self.scheduler.settle(until);
        lines
    }

    /// Cancel every pending step. Nothing fires after this.
    pub fn shutdown(&mut self) {
        let dropped = self.scheduler.cancel_all();
        info!(dropped, "session shut down");
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
