//! Deployment and environment binding definitions

use serde::{Deserialize, Serialize};

/// Where an environment variable gets its value from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnvSource {
    Value(String),
    SecretKeyRef { name: String, key: String },
}

/// One entry in a container's `env:` list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    pub name: String,
    pub source: EnvSource,
}

impl EnvVar {
    pub fn from_secret(name: &str, secret: &str, key: &str) -> Self {
        Self {
            name: name.to_string(),
            source: EnvSource::SecretKeyRef {
                name: secret.to_string(),
                key: key.to_string(),
            },
        }
    }

    pub fn references(&self, secret: &str, key: &str) -> bool {
        matches!(&self.source, EnvSource::SecretKeyRef { name, key: k } if name == secret && k == key)
    }
}

/// A desired-state descriptor for a set of pods
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    pub name: String,
    pub replicas: u32,
    pub available_replicas: u32,
    pub env: Vec<EnvVar>,
}

impl Deployment {
    /// A deployment with no available replicas and no environment
    pub fn new(name: &str, replicas: u32) -> Self {
        Self {
            name: name.to_string(),
            replicas,
            available_replicas: 0,
            env: Vec::new(),
        }
    }

    pub fn references_secret(&self, secret: &str, key: &str) -> bool {
        self.env.iter().any(|var| var.references(secret, key))
    }

    pub fn is_available(&self) -> bool {
        self.available_replicas >= self.replicas
    }
}
