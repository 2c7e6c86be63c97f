//! The CrashLoopBackOff scenario: progress tracking and fixed copy

use crate::SimError;
use serde::{Deserialize, Serialize};

pub const TITLE: &str = "K8s Troubleshooting Simulator";

pub const WELCOME: [&str; 4] = [
    "Welcome to Kubernetes Troubleshooting Simulator!",
    "Scenario: Fix the CrashLoopBackOff in auth-service",
    "",
    "Type \"help\" for available commands.",
];

pub const HINT: &str = "Check the logs of the auth-service pod to see why it's failing. \
You might need to configure environment variables in the deployment.";

/// How far through the scenario the player is, 1 through 5.
///
/// The step only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScenarioProgress {
    step: u8,
}

impl ScenarioProgress {
    pub const FIRST: u8 = 1;
    pub const LAST: u8 = 5;
    /// Reached once the deployment picks up the secret
    pub const REMEDIATED: u8 = 4;

    pub fn new(step: u8) -> Result<Self, SimError> {
        if !(Self::FIRST..=Self::LAST).contains(&step) {
            return Err(SimError::InvalidStep(step));
        }
        Ok(Self { step })
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    /// Move to `step` if it is ahead of the current one.
    /// Returns whether the step changed.
    pub fn advance_to(&mut self, step: u8) -> Result<bool, SimError> {
        let target = Self::new(step)?;
        if target.step <= self.step {
            return Ok(false);
        }
        self.step = target.step;
        Ok(true)
    }

    /// Share of the progress bar to fill, 0.0..=1.0
    pub fn ratio(&self) -> f64 {
        f64::from(self.step) / f64::from(Self::LAST)
    }
}

impl Default for ScenarioProgress {
    fn default() -> Self {
        Self { step: Self::FIRST }
    }
}

impl std::fmt::Display for ScenarioProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Step {}/{}", self.step, Self::LAST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_step_one() {
        let progress = ScenarioProgress::default();
        assert_eq!(progress.step(), 1);
        assert_eq!(progress.to_string(), "Step 1/5");
        assert!((progress.ratio() - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn never_moves_backwards() {
        let mut progress = ScenarioProgress::default();
        assert!(progress.advance_to(ScenarioProgress::REMEDIATED).unwrap());
        assert!(!progress.advance_to(2).unwrap());
        assert!(!progress.advance_to(4).unwrap());
        assert_eq!(progress.step(), 4);
    }

    #[test]
    fn rejects_out_of_range_steps() {
        assert!(matches!(ScenarioProgress::new(0), Err(SimError::InvalidStep(0))));
        assert!(matches!(ScenarioProgress::new(6), Err(SimError::InvalidStep(6))));

        let mut progress = ScenarioProgress::default();
        assert!(progress.advance_to(9).is_err());
        assert_eq!(progress.step(), 1);
    }
}
