use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A pod as reported by the `pod` GraphQL query.
///
/// `runtime` is only populated while the pod is powered on; the API sends
/// `null` (or omits the field) once the pod is stopped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PodInfo {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub runtime: Option<Runtime>,
}

impl PodInfo {
    pub fn is_running(&self) -> bool {
        self.runtime.is_some()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Runtime {
    #[serde(default)]
    pub uptime_in_seconds: Option<u64>,
    #[serde(default)]
    pub ports: Option<Vec<Port>>,
    #[serde(default)]
    pub gpus: Option<Vec<Gpu>>,
    #[serde(default)]
    pub container: Option<Container>,
}

impl Runtime {
    pub fn ports(&self) -> &[Port] {
        self.ports.as_deref().unwrap_or_default()
    }

    pub fn gpus(&self) -> &[Gpu] {
        self.gpus.as_deref().unwrap_or_default()
    }

    /// First port that maps the container's sshd to a public address.
    pub fn public_ssh_port(&self) -> Option<&Port> {
        self.ports()
            .iter()
            .find(|p| p.private_port == Some(22) && p.is_ip_public == Some(true))
    }
}

impl Port {
    /// Host and port to connect to, once both have been assigned.
    pub fn address(&self) -> Option<(&str, u16)> {
        Some((self.ip.as_deref()?, self.public_port?))
    }
}

/// A port mapping. Every field may come back null for mappings the
/// provider has not finished assigning.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Port {
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub is_ip_public: Option<bool>,
    #[serde(default)]
    pub private_port: Option<u16>,
    #[serde(default)]
    pub public_port: Option<u16>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Gpu {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub gpu_util_percent: Option<f64>,
    #[serde(default)]
    pub memory_util_percent: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    #[serde(default)]
    pub cpu_percent: Option<f64>,
    #[serde(default)]
    pub memory_percent: Option<f64>,
}

/// Decoded response of a `podResume` / `podStop` mutation.
///
/// Only the presence of `errors` is interpreted; `data` is passed through.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MutationResult {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Value>,
}

impl MutationResult {
    /// The raw `errors` payload when the remote rejected the mutation.
    ///
    /// `null`, `[]` and `{}` count as no errors.
    pub fn errors(&self) -> Option<&Value> {
        match self.errors.as_ref()? {
            Value::Null => None,
            Value::Array(items) if items.is_empty() => None,
            Value::Object(map) if map.is_empty() => None,
            other => Some(other),
        }
    }

    pub fn is_success(&self) -> bool {
        self.errors().is_none()
    }
}
