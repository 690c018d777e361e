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

use crate::domain::pod::{PodIdentity, PodStatusEvent};
use crate::shared::error::KubeError;
use crate::infrastructure::kubernetes::watch::resume_status_events;
use futures::stream::BoxStream;
use futures::StreamExt;
use k8s_openapi::api::core::v1::{Pod, ReplicationController};
use kube::api::{DeleteParams, ListParams, PostParams, WatchParams};
use kube::{Api, Client};
use tracing::{debug, info};

/// The narrow surface of the cluster API used by the commands.
///
/// An empty `namespace` argument means the client's default namespace.
#[async_trait::async_trait]
pub trait KubeClient: Send + Sync {
    async fn create_pod(&self, pod: &Pod) -> Result<PodIdentity, KubeError>;

    /// Open a status stream for one pod, starting after `identity.resource_version`.
    async fn watch_pod(
        &self,
        identity: &PodIdentity,
    ) -> Result<BoxStream<'static, PodStatusEvent>, KubeError>;

    async fn delete_pod(&self, namespace: &str, name: &str) -> Result<(), KubeError>;

    async fn list_pods(&self, namespace: &str) -> Result<Vec<Pod>, KubeError>;

    async fn create_replication_controller(
        &self,
        rc: &ReplicationController,
    ) -> Result<(), KubeError>;

    async fn list_replication_controllers(
        &self,
        namespace: &str,
    ) -> Result<Vec<ReplicationController>, KubeError>;

    async fn delete_replication_controller(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<(), KubeError>;

    async fn update_replication_controller_image(
        &self,
        namespace: &str,
        name: &str,
        image: &str,
        version: Option<&str>,
    ) -> Result<(), KubeError>;

    /// Namespace used when a caller passes an empty one
    fn default_namespace(&self) -> &str;
}

pub struct KubeClientImpl {
    client: Client,
}

impl KubeClientImpl {
    pub async fn new() -> Result<Self, KubeError> {
        let client = Client::try_default().await.map_err(|e| {
            KubeError::KubeError(format!("Failed to create Kubernetes client: {}", e))
        })?;

        Ok(Self { client })
    }

    pub async fn new_with_config(
        kubeconfig_path: Option<String>,
        context: Option<String>,
    ) -> Result<Self, KubeError> {
        use kube::config::{KubeConfigOptions, Kubeconfig};

        if kubeconfig_path.is_none() && context.is_none() {
            return Self::new().await;
        }

        let kubeconfig = if let Some(path) = kubeconfig_path {
            Kubeconfig::read_from(path)
                .map_err(|e| KubeError::KubeError(format!("Failed to load kubeconfig: {}", e)))?
        } else {
            Kubeconfig::read()
                .map_err(|e| KubeError::KubeError(format!("Failed to load kubeconfig: {}", e)))?
        };

        let config_options = KubeConfigOptions {
            context,
            cluster: None,
            user: None,
        };

        let config = kube::Config::from_custom_kubeconfig(kubeconfig, &config_options)
            .await
            .map_err(|e| {
                KubeError::KubeError(format!("Failed to create Kubernetes config: {}", e))
            })?;

        let client = Client::try_from(config).map_err(|e| {
            KubeError::KubeError(format!("Failed to create Kubernetes client: {}", e))
        })?;

        Ok(Self { client })
    }

    fn resolve_namespace<'a>(&'a self, namespace: &'a str) -> &'a str {
        if namespace.is_empty() {
            self.client.default_namespace()
        } else {
            namespace
        }
    }

    fn pods(&self, namespace: &str) -> Api<Pod> {
        Api::namespaced(self.client.clone(), self.resolve_namespace(namespace))
    }

    fn replication_controllers(&self, namespace: &str) -> Api<ReplicationController> {
        Api::namespaced(self.client.clone(), self.resolve_namespace(namespace))
    }
}

/// Reference `image` at `version`, or as-is when no version is given
pub fn versioned_image(image: &str, version: Option<&str>) -> String {
    match version.filter(|v| !v.is_empty()) {
        Some(v) => format!("{}:{}", image, v),
        None => image.to_string(),
    }
}

/// Image reference without its tag or digest (`registry:5000/app:1.2` -> `registry:5000/app`)
pub fn image_repository(image: &str) -> &str {
    let image = image.split('@').next().unwrap_or(image);
    match image.rfind(':') {
        Some(idx) if !image[idx..].contains('/') => &image[..idx],
        _ => image,
    }
}

/// Point the template containers running the same image repository as
/// `image` at `image`. Other containers (sidecars) are left untouched.
pub fn set_template_image(rc: &mut ReplicationController, image: &str) -> Result<usize, KubeError> {
    let name = rc.metadata.name.clone().unwrap_or_default();
    let containers = rc
        .spec
        .as_mut()
        .and_then(|spec| spec.template.as_mut())
        .and_then(|template| template.spec.as_mut())
        .map(|pod_spec| &mut pod_spec.containers)
        .filter(|containers| !containers.is_empty())
        .ok_or_else(|| {
            KubeError::InvalidResource(format!(
                "ReplicationController '{}' has no pod template containers",
                name
            ))
        })?;

    let repository = image_repository(image);
    let mut updated = 0;
    for container in containers.iter_mut() {
        let matches = container
            .image
            .as_deref()
            .is_some_and(|current| image_repository(current) == repository);
        if matches {
            container.image = Some(image.to_string());
            updated += 1;
        }
    }

    if updated == 0 {
        return Err(KubeError::InvalidResource(format!(
            "ReplicationController '{}' has no container running image '{}'",
            name, repository
        )));
    }
    Ok(updated)
}

#[async_trait::async_trait]
impl KubeClient for KubeClientImpl {
    async fn create_pod(&self, pod: &Pod) -> Result<PodIdentity, KubeError> {
        let namespace = pod.metadata.namespace.clone().unwrap_or_default();
        let api = self.pods(&namespace);
        debug!(namespace = %self.resolve_namespace(&namespace), "creating pod");

        let created = api.create(&PostParams::default(), pod).await?;
        PodIdentity::from_pod(&created, self.resolve_namespace(&namespace)).ok_or_else(|| {
            KubeError::InvalidResource("Created pod has no name in the response".to_string())
        })
    }

    async fn watch_pod(
        &self,
        identity: &PodIdentity,
    ) -> Result<BoxStream<'static, PodStatusEvent>, KubeError> {
        let api = self.pods(&identity.namespace);
        let wp = WatchParams::default().fields(&format!("metadata.name={}", identity.name));
        let version = if identity.resource_version.is_empty() {
            "0"
        } else {
            identity.resource_version.as_str()
        };

        let events = api
            .watch(&wp, version)
            .await
            .map_err(|e| KubeError::Watch(e.to_string()))?
            .boxed();

        let pod = identity.to_string();
        info!(pod = %pod, resource_version = %version, "watching pod");

        // The server ends every watch after its timeout; reopen from the last
        // seen resource version so the wait itself is unbounded.
        let connect = move |resource_version: String| {
            let api = api.clone();
            let wp = wp.clone();
            async move {
                api.watch(&wp, &resource_version)
                    .await
                    .map(|events| events.boxed())
            }
        };
        let statuses = resume_status_events(events, version.to_string(), pod, connect);

        Ok(statuses.boxed())
    }

    async fn delete_pod(&self, namespace: &str, name: &str) -> Result<(), KubeError> {
        let api = self.pods(namespace);
        api.delete(name, &DeleteParams::default())
            .await
            .map_err(|e| KubeError::from_api(e, "Pod", name, self.resolve_namespace(namespace)))?;
        Ok(())
    }

    async fn list_pods(&self, namespace: &str) -> Result<Vec<Pod>, KubeError> {
        let api = self.pods(namespace);
        let pods = api.list(&ListParams::default()).await?;
        Ok(pods.items)
    }

    async fn create_replication_controller(
        &self,
        rc: &ReplicationController,
    ) -> Result<(), KubeError> {
        let namespace = rc.metadata.namespace.clone().unwrap_or_default();
        let api = self.replication_controllers(&namespace);

        api.create(&PostParams::default(), rc).await?;
        Ok(())
    }

    async fn list_replication_controllers(
        &self,
        namespace: &str,
    ) -> Result<Vec<ReplicationController>, KubeError> {
        let api = self.replication_controllers(namespace);
        let rcs = api.list(&ListParams::default()).await?;
        Ok(rcs.items)
    }

    async fn delete_replication_controller(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<(), KubeError> {
        let api = self.replication_controllers(namespace);
        api.delete(name, &DeleteParams::default())
            .await
            .map_err(|e| {
                KubeError::from_api(
                    e,
                    "ReplicationController",
                    name,
                    self.resolve_namespace(namespace),
                )
            })?;
        Ok(())
    }

    async fn update_replication_controller_image(
        &self,
        namespace: &str,
        name: &str,
        image: &str,
        version: Option<&str>,
    ) -> Result<(), KubeError> {
        let api = self.replication_controllers(namespace);
        let ns = self.resolve_namespace(namespace);

        let mut rc = api
            .get(name)
            .await
            .map_err(|e| KubeError::from_api(e, "ReplicationController", name, ns))?;

        let image = versioned_image(image, version);
        let updated = set_template_image(&mut rc, &image)?;
        debug!(rc = %name, image = %image, containers = updated, "replacing replication controller");

        api.replace(name, &PostParams::default(), &rc).await?;
        Ok(())
    }

    fn default_namespace(&self) -> &str {
        self.client.default_namespace()
    }
}
