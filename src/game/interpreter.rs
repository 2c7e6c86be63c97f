//! Command execution and kubectl-style output formatting

use super::command::Command;
use super::scenario::ScenarioProgress;
use super::scheduler::{DeferredAction, ROLLOUT_FINISH_DELAY, ROLLOUT_START_DELAY};
use super::{Response, Session};
use crate::data::{Pod, DB_PASSWORD, DB_SECRET};
use crate::CommandError;
use tracing::{info, warn};

pub const HELP: [&str; 7] = [
    "Available commands:",
    "  kubectl get pods           - List all pods",
    "  kubectl describe pod NAME  - Show details of a pod",
    "  kubectl logs NAME         - Show logs of a pod",
    "  kubectl edit deployment NAME - Edit a deployment",
    "  clear                     - Clear the terminal",
    "  help                      - Show this help message",
];

pub const POD_TABLE_HEADER: &str =
    "NAME                         READY   STATUS              RESTARTS   AGE";

const CRASH_LOOP_EVENTS: [&str; 4] = [
    "  Type     Reason     Age                From               Message",
    "  ----     ------     ----               ----               -------",
    "  Normal   Scheduled  10m                default-scheduler  Successfully assigned default/auth-service to node-1",
    "  Warning  BackOff    9m (x5 over 10m)   kubelet           Back-off restarting failed container",
];

impl Session {
    pub(super) fn run(&mut self, command: Command) -> Response {
        match command {
            Command::Help => Response::lines(HELP.iter().map(|l| l.to_string()).collect()),
            Command::Clear => Response::clear(),
            Command::GetPods => Response::lines(pod_table(self.cluster.pods())),
            Command::Logs(name) => match self.cluster.find_pod(&name) {
                Some(pod) => Response::lines(pod.logs().to_vec()),
                None => Response::error(CommandError::PodNotFound(name)),
            },
            Command::DescribePod(name) => match self.cluster.find_pod(&name) {
                Some(pod) => Response::lines(describe_pod(pod)),
                None => Response::error(CommandError::PodNotFound(name)),
            },
            Command::EditDeployment(name) => self.edit_deployment(&name),
            Command::Unknown(raw) => Response::error(CommandError::UnknownCommand(raw)),
        }
    }

    fn edit_deployment(&mut self, name: &str) -> Response {
        if self.cluster.deployment(name).is_none() {
            return Response::error(CommandError::DeploymentNotFound(name.to_string()));
        }

        let mut lines = deployment_manifest(name);
        let start = DeferredAction::StartRollout {
            deployment: name.to_string(),
        };

        if self.cluster.is_remediated(name) || self.scheduler.is_pending(&start) {
            info!(deployment = name, "edit with nothing to change");
            lines.push("Edit cancelled, no changes made.".to_string());
            return Response::lines(lines);
        }

        lines.push(String::new());
        lines.push("# Configuration updated. Applying changes...".to_string());
        if !self.scheduler.schedule(ROLLOUT_START_DELAY, start) {
            warn!(deployment = name, "rollout not scheduled, session is shut down");
        }
        Response::lines(lines)
    }

    /// Run a scripted step whose delay has elapsed
    pub(super) fn run_deferred(&mut self, action: DeferredAction) -> Vec<String> {
        match action {
            DeferredAction::StartRollout { deployment } => {
                match self.cluster.apply_remediation(&deployment) {
                    Ok(true) => info!(%deployment, "remediation applied"),
                    Ok(false) => info!(%deployment, "remediation already applied"),
                    Err(err) => {
                        warn!(%deployment, %err, "rollout target vanished");
                        return vec![err.to_string()];
                    }
                }
                if let Err(err) = self.progress.advance_to(ScenarioProgress::REMEDIATED) {
                    warn!(%err, "could not advance scenario");
                }

                let replicas = self.cluster.deployment(&deployment).map(|d| d.replicas).unwrap_or(1);
                let lines = vec![
                    format!("deployment.apps/{} edited", deployment),
                    format!(
                        "Waiting for deployment \"{}\" rollout to finish: 0 of {} updated replicas are available...",
                        deployment, replicas
                    ),
                ];
                self.scheduler
                    .schedule(ROLLOUT_FINISH_DELAY, DeferredAction::FinishRollout { deployment });
                lines
            }
            DeferredAction::FinishRollout { deployment } => {
                info!(%deployment, "rollout finished");
                vec![format!("deployment \"{}\" successfully rolled out", deployment)]
            }
        }
    }
}

/// `kubectl get pods` table, one row per pod in model order
pub fn pod_table(pods: &[Pod]) -> Vec<String> {
    std::iter::once(POD_TABLE_HEADER.to_string())
        .chain(pods.iter().map(|pod| {
            format!(
                "{:<28} {}     {:<20} {}          {}",
                pod.name,
                pod.ready_column(),
                pod.status,
                pod.restarts,
                pod.age
            )
        }))
        .collect()
}

/// `kubectl describe pod` block
pub fn describe_pod(pod: &Pod) -> Vec<String> {
    let app = pod.app_label();
    let mut lines = vec![
        format!("Name:         {}", pod.name),
        "Namespace:    default".to_string(),
        "Priority:     0".to_string(),
        format!("Node:         {}", pod.node),
        format!("Start Time:   {} ago", pod.age),
        format!("Labels:       app={}", app),
        format!("Status:       {}", pod.status),
        format!("IP:           {}", pod.ip),
        "IPs:".to_string(),
        format!("  IP:  {}", pod.ip),
        "Containers:".to_string(),
        format!("  {}:", app),
        "    Container ID:  docker://1234567890abcdef".to_string(),
        format!("    Image:         {}:latest", app),
        "    Image ID:      docker-pullable://registry.k8s.io/pause:3.9".to_string(),
        format!("    Port:          {}", pod.container_port()),
        "    Host Port:     0/TCP".to_string(),
        format!("    State:         {}", pod.status),
        format!("    Ready:         {}", pod.ready),
        format!("    Restart Count: {}", pod.restarts),
        "Events:".to_string(),
    ];

    if pod.status.is_failure() {
        lines.extend(CRASH_LOOP_EVENTS.iter().map(|l| l.to_string()));
    }
    lines
}

/// The manifest shown by `kubectl edit`, with the secret reference added
fn deployment_manifest(name: &str) -> Vec<String> {
    vec![
        "# Please edit the object below. Lines beginning with a \"#\" will be ignored.".to_string(),
        "apiVersion: apps/v1".to_string(),
        "kind: Deployment".to_string(),
        "metadata:".to_string(),
        format!("  name: {}", name),
        "spec:".to_string(),
        "  template:".to_string(),
        "    spec:".to_string(),
        "      containers:".to_string(),
        format!("      - name: {}", name),
        "        env:".to_string(),
        format!("        - name: {}", DB_PASSWORD),
        "          valueFrom:".to_string(),
        "            secretKeyRef:".to_string(),
        format!("              name: {}", DB_SECRET),
        format!("              key: {}", DB_PASSWORD),
    ]
}
