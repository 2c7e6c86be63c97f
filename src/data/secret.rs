//! Secret definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named key/value credential store.
///
/// Deployments reference keys in a secret instead of embedding the values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
    pub name: String,
    pub data: BTreeMap<String, String>,
}

impl Secret {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            data: BTreeMap::new(),
        }
    }
}
