// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Pod lifecycle phases and the status events observed while watching a pod

use k8s_openapi::api::core::v1::Pod;
use std::fmt;
use std::str::FromStr;

/// Coarse lifecycle state of a pod as reported by the API server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PodPhase {
    Pending,
    Running,
    Succeeded,
    Failed,
    Unknown,
}

impl PodPhase {
    /// Phase of a pod object; a missing status counts as `Unknown`
    pub fn of(pod: &Pod) -> Self {
        pod.status
            .as_ref()
            .and_then(|s| s.phase.as_deref())
            .map(PodPhase::from_str_name)
            .unwrap_or(PodPhase::Unknown)
    }

    pub fn from_str_name(s: &str) -> Self {
        match s {
            "Pending" => Self::Pending,
            "Running" => Self::Running,
            "Succeeded" => Self::Succeeded,
            "Failed" => Self::Failed,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Running => "Running",
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
            Self::Unknown => "Unknown",
        }
    }

    /// Only `Succeeded` and `Failed` end a watch
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl FromStr for PodPhase {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_str_name(s))
    }
}

impl fmt::Display for PodPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single status update for a watched pod
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodStatusEvent {
    pub name: String,
    pub phase: PodPhase,
}

impl PodStatusEvent {
    pub fn new(name: impl Into<String>, phase: PodPhase) -> Self {
        Self {
            name: name.into(),
            phase,
        }
    }
}

impl From<&Pod> for PodStatusEvent {
    fn from(pod: &Pod) -> Self {
        Self {
            name: pod.metadata.name.clone().unwrap_or_default(),
            phase: PodPhase::of(pod),
        }
    }
}

/// Identity echoed back by the API server for a created pod
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodIdentity {
    pub namespace: String,
    pub name: String,
    pub resource_version: String,
}

impl PodIdentity {
    /// Build the identity from a create response.
    ///
    /// `fallback_namespace` is used when the response carries no namespace.
    pub fn from_pod(pod: &Pod, fallback_namespace: &str) -> Option<Self> {
        let name = pod.metadata.name.clone().filter(|n| !n.is_empty())?;
        let namespace = pod
            .metadata
            .namespace
            .clone()
            .filter(|ns| !ns.is_empty())
            .unwrap_or_else(|| fallback_namespace.to_string());

        Some(Self {
            namespace,
            name,
            resource_version: pod.metadata.resource_version.clone().unwrap_or_default(),
        })
    }
}

impl fmt::Display for PodIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::core::v1::PodStatus;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    fn pod_with_phase(phase: Option<&str>) -> Pod {
        Pod {
            metadata: ObjectMeta {
                name: Some("task".to_string()),
                namespace: Some("jobs".to_string()),
                resource_version: Some("42".to_string()),
                ..Default::default()
            },
            status: phase.map(|p| PodStatus {
                phase: Some(p.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_phase_parsing() {
        assert_eq!("Running".parse::<PodPhase>().unwrap(), PodPhase::Running);
        assert_eq!(PodPhase::from_str_name("Failed"), PodPhase::Failed);
        assert_eq!(PodPhase::from_str_name("Evicted"), PodPhase::Unknown);
    }

    #[test]
    fn test_terminal_phases() {
        assert!(PodPhase::Succeeded.is_terminal());
        assert!(PodPhase::Failed.is_terminal());
        assert!(!PodPhase::Pending.is_terminal());
        assert!(!PodPhase::Running.is_terminal());
        assert!(!PodPhase::Unknown.is_terminal());
    }

    #[test]
    fn test_phase_of_pod_without_status() {
        assert_eq!(PodPhase::of(&pod_with_phase(None)), PodPhase::Unknown);
        assert_eq!(
            PodPhase::of(&pod_with_phase(Some("Succeeded"))),
            PodPhase::Succeeded
        );
    }

    #[test]
    fn test_identity_from_response() {
        let identity = PodIdentity::from_pod(&pod_with_phase(None), "default").unwrap();
        assert_eq!(identity.namespace, "jobs");
        assert_eq!(identity.name, "task");
        assert_eq!(identity.resource_version, "42");
        assert_eq!(identity.to_string(), "jobs/task");
    }

    #[test]
    fn test_identity_requires_name() {
        let mut pod = pod_with_phase(None);
        pod.metadata.name = None;
        assert!(PodIdentity::from_pod(&pod, "default").is_none());

        let mut pod = pod_with_phase(None);
        pod.metadata.namespace = None;
        let identity = PodIdentity::from_pod(&pod, "fallback").unwrap();
        assert_eq!(identity.namespace, "fallback");
    }
}
