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

#![allow(dead_code)]

use futures::stream::{self, BoxStream};
use futures::StreamExt;
use k8s_openapi::api::core::v1::{Pod, PodStatus, ReplicationController};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kubeclient_example::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreatePod { namespace: Option<String>, name: String },
    WatchPod(PodIdentity),
    DeletePod { namespace: String, name: String },
    ListPods(String),
    CreateRc { namespace: Option<String>, name: String },
    ListRcs(String),
    DeleteRc { namespace: String, name: String },
    UpdateRcImage { name: String, image: String, version: Option<String> },
}

/// In-memory cluster that records every call and replays scripted phases
#[derive(Default)]
pub struct FakeKubeClient {
    pub calls: Mutex<Vec<Call>>,
    pub phases: Vec<PodPhase>,
    pub reject_create: bool,
    pub reject_watch: bool,
    pub reject_delete: bool,
    pub pods: Vec<Pod>,
    pub polled: Arc<AtomicUsize>,
}

impl FakeKubeClient {
    pub fn with_phases(phases: &[PodPhase]) -> Self {
        Self {
            phases: phases.to_vec(),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait::async_trait]
impl KubeClient for FakeKubeClient {
    async fn create_pod(&self, pod: &Pod) -> Result<PodIdentity> {
        let name = pod.metadata.name.clone().unwrap_or_default();
        self.record(Call::CreatePod {
            namespace: pod.metadata.namespace.clone(),
            name: name.clone(),
        });
        if self.reject_create {
            return Err(KubeError::KubeError("pods \"task\" already exists".into()));
        }

        Ok(PodIdentity {
            namespace: pod
                .metadata
                .namespace
                .clone()
                .unwrap_or_else(|| self.default_namespace().to_string()),
            name,
            resource_version: "1001".to_string(),
        })
    }

    async fn watch_pod(&self, identity: &PodIdentity) -> Result<BoxStream<'static, PodStatusEvent>> {
        self.record(Call::WatchPod(identity.clone()));
        if self.reject_watch {
            return Err(KubeError::Watch("connection refused".into()));
        }

        let name = identity.name.clone();
        let polled = self.polled.clone();
        let events: Vec<PodStatusEvent> = self
            .phases
            .iter()
            .map(|phase| PodStatusEvent::new(name.clone(), *phase))
            .collect();
        Ok(stream::iter(events)
            .inspect(move |_| {
                polled.fetch_add(1, Ordering::SeqCst);
            })
            .boxed())
    }

    async fn delete_pod(&self, namespace: &str, name: &str) -> Result<()> {
        self.record(Call::DeletePod {
            namespace: namespace.to_string(),
            name: name.to_string(),
        });
        if self.reject_delete {
            return Err(KubeError::not_found("Pod", name, namespace));
        }
        Ok(())
    }

    async fn list_pods(&self, namespace: &str) -> Result<Vec<Pod>> {
        self.record(Call::ListPods(namespace.to_string()));
        Ok(self.pods.clone())
    }

    async fn create_replication_controller(&self, rc: &ReplicationController) -> Result<()> {
        self.record(Call::CreateRc {
            namespace: rc.metadata.namespace.clone(),
            name: rc.metadata.name.clone().unwrap_or_default(),
        });
        Ok(())
    }

    async fn list_replication_controllers(
        &self,
        namespace: &str,
    ) -> Result<Vec<ReplicationController>> {
        self.record(Call::ListRcs(namespace.to_string()));
        Err(KubeError::KubeError("forbidden".into()))
    }

    async fn delete_replication_controller(&self, namespace: &str, name: &str) -> Result<()> {
        self.record(Call::DeleteRc {
            namespace: namespace.to_string(),
            name: name.to_string(),
        });
        Ok(())
    }

    async fn update_replication_controller_image(
        &self,
        _namespace: &str,
        name: &str,
        image: &str,
        version: Option<&str>,
    ) -> Result<()> {
        self.record(Call::UpdateRcImage {
            name: name.to_string(),
            image: image.to_string(),
            version: version.map(str::to_string),
        });
        Ok(())
    }

    fn default_namespace(&self) -> &str {
        "default"
    }
}

pub const POD_JSON: &str = r#"{
    "apiVersion": "v1",
    "kind": "Pod",
    "metadata": {"name": "task", "namespace": "a"},
    "spec": {
        "restartPolicy": "Never",
        "containers": [{"name": "main", "image": "busybox", "command": ["true"]}]
    }
}"#;

pub const RC_JSON: &str = r#"{
    "apiVersion": "v1",
    "kind": "ReplicationController",
    "metadata": {"name": "web", "namespace": "a"},
    "spec": {"replicas": 2, "selector": {"app": "web"}}
}"#;

pub fn running_pod(name: &str) -> Pod {
    Pod {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        },
        status: Some(PodStatus {
            phase: Some("Running".to_string()),
            pod_ip: Some("10.1.2.3".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
}
