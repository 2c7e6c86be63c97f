//! The fabricated cluster the scenario runs against

use super::{Deployment, EnvVar, Pod, Secret};
use crate::CommandError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The broken service and the only deployment in the scenario
pub const AUTH_SERVICE: &str = "auth-service";

/// Secret holding the database credentials
pub const DB_SECRET: &str = "db-secret";

/// Key (and env var name) the auth service needs
pub const DB_PASSWORD: &str = "DB_PASSWORD";

const AUTH_SERVICE_LOGS: [&str; 5] = [
    "[2025-03-20 10:15:32] Starting auth service...",
    "[2025-03-20 10:15:32] Checking configuration...",
    "[2025-03-20 10:15:32] ERROR: Environment variable DB_PASSWORD not set",
    "[2025-03-20 10:15:32] Failed to initialize database connection",
    "[2025-03-20 10:15:32] Service startup failed",
];

/// Aggregate root for every simulated resource.
///
/// Reads are public; the only write path is [`ClusterState::apply_remediation`],
/// which is reserved for the session that owns this state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterState {
    pods: Vec<Pod>,
    secrets: BTreeMap<String, Secret>,
    deployments: BTreeMap<String, Deployment>,
}

impl ClusterState {
    pub fn new(pods: Vec<Pod>, secrets: Vec<Secret>, deployments: Vec<Deployment>) -> Self {
        Self {
            pods,
            secrets: secrets.into_iter().map(|s| (s.name.clone(), s)).collect(),
            deployments: deployments.into_iter().map(|d| (d.name.clone(), d)).collect(),
        }
    }

    /// The "before" snapshot: auth-service crash-looping with no env bindings
    pub fn scenario() -> Self {
        Self::new(
            vec![
                Pod::running("frontend-6d5bc7b947-x8v2n", "10.244.0.12"),
                Pod::crash_looping("auth-service-5f7d9c8b6d-j4k2h", "10.244.0.13", 5, &AUTH_SERVICE_LOGS),
                Pod::running("postgresql-0", "10.244.0.14"),
            ],
            vec![Secret::new(DB_SECRET)],
            vec![Deployment::new(AUTH_SERVICE, 1)],
        )
    }

    /// Pods in model order
    pub fn pods(&self) -> &[Pod] {
        &self.pods
    }

    /// First pod (in model order) whose name starts with `prefix`.
    ///
    /// An empty prefix never matches.
    pub fn find_pod(&self, prefix: &str) -> Option<&Pod> {
        if prefix.is_empty() {
            return None;
        }
        self.pods.iter().find(|p| p.name.starts_with(prefix))
    }

    pub fn deployment(&self, name: &str) -> Option<&Deployment> {
        self.deployments.get(name)
    }

    pub fn deployments(&self) -> impl Iterator<Item = &Deployment> {
        self.deployments.values()
    }

    pub fn secret(&self, name: &str) -> Option<&Secret> {
        self.secrets.get(name)
    }

    /// Whether the deployment already sources `DB_PASSWORD` from `db-secret`
    pub fn is_remediated(&self, deployment: &str) -> bool {
        self.deployment(deployment)
            .map(|d| d.references_secret(DB_SECRET, DB_PASSWORD))
            .unwrap_or(false)
    }

    /// Wire the secret into the deployment and restart its pods.
    ///
    /// Returns `Ok(false)` without touching anything when the binding is
    /// already in place, so restart counts only move once.
    pub(crate) fn apply_remediation(&mut self, name: &str) -> Result<bool, CommandError> {
        let deployment = self
            .deployments
            .get_mut(name)
            .ok_or_else(|| CommandError::DeploymentNotFound(name.to_string()))?;

        if deployment.references_secret(DB_SECRET, DB_PASSWORD) {
            return Ok(false);
        }

        deployment.env.push(EnvVar::from_secret(DB_PASSWORD, DB_SECRET, DB_PASSWORD));
        deployment.available_replicas = deployment.replicas;

        for pod in self.pods.iter_mut().filter(|p| p.name.starts_with(name)) {
            pod.recover();
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PodPhase;

    #[test]
    fn scenario_seed_matches_fault() {
        let cluster = ClusterState::scenario();
        assert_eq!(cluster.pods().len(), 3);

        let auth = cluster.find_pod("auth").unwrap();
        assert_eq!(auth.status, PodPhase::CrashLoopBackOff);
        assert!(!auth.ready);
        assert_eq!(auth.restarts, 5);
        assert_eq!(auth.logs().len(), 5);

        let deployment = cluster.deployment(AUTH_SERVICE).unwrap();
        assert!(deployment.env.is_empty());
        assert_eq!(deployment.available_replicas, 0);

        let secret = cluster.secret(DB_SECRET).unwrap();
        assert!(secret.data.is_empty());
        assert!(!secret.data.contains_key(DB_PASSWORD));
    }

    #[test]
    fn find_pod_uses_prefix_in_model_order() {
        let cluster = ClusterState::scenario();
        assert_eq!(cluster.find_pod("f").unwrap().name, "frontend-6d5bc7b947-x8v2n");
        assert_eq!(cluster.find_pod("postgresql-0").unwrap().name, "postgresql-0");
        assert!(cluster.find_pod("redis").is_none());
        assert!(cluster.find_pod("").is_none());
    }

    #[test]
    fn remediation_restarts_only_matching_pods() {
        let mut cluster = ClusterState::scenario();
        assert!(cluster.apply_remediation(AUTH_SERVICE).unwrap());

        let auth = cluster.find_pod(AUTH_SERVICE).unwrap();
        assert_eq!(auth.status, PodPhase::Running);
        assert!(auth.ready);
        assert_eq!(auth.restarts, 6);

        let frontend = cluster.find_pod("frontend").unwrap();
        assert_eq!(frontend.restarts, 0);

        assert!(cluster.is_remediated(AUTH_SERVICE));
        assert!(cluster.deployment(AUTH_SERVICE).unwrap().is_available());
    }

    #[test]
    fn remediation_is_applied_once() {
        let mut cluster = ClusterState::scenario();
        assert!(cluster.apply_remediation(AUTH_SERVICE).unwrap());
        let after_first = cluster.clone();

        assert!(!cluster.apply_remediation(AUTH_SERVICE).unwrap());
        assert_eq!(cluster, after_first);
        assert_eq!(cluster.deployment(AUTH_SERVICE).unwrap().env.len(), 1);
    }

    #[test]
    fn remediation_of_unknown_deployment_changes_nothing() {
        let mut cluster = ClusterState::scenario();
        let before = cluster.clone();

        let err = cluster.apply_remediation("billing").unwrap_err();
        assert_eq!(err, CommandError::DeploymentNotFound("billing".to_string()));
        assert_eq!(cluster, before);
    }

    #[test]
    fn remediated_cluster_survives_json_round_trip() {
        let mut cluster = ClusterState::scenario();
        cluster.apply_remediation(AUTH_SERVICE).unwrap();

        let json = serde_json::to_string(&cluster).unwrap();
        assert!(json.contains("SecretKeyRef"));

        let restored: ClusterState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cluster);
        assert!(restored.is_remediated(AUTH_SERVICE));
    }
}
