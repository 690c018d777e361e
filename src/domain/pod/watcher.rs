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

//! Submits a pod and follows its status until it succeeds or fails

use crate::domain::pod::phase::{PodIdentity, PodPhase, PodStatusEvent};
use crate::infrastructure::kubernetes::client::KubeClient;
use crate::infrastructure::kubernetes::document::{
    assign_namespace, parse_document, read_document, DocumentFormat,
};
use crate::shared::error::KubeError;
use futures::{Stream, StreamExt};
use k8s_openapi::api::core::v1::Pod;
use std::path::Path;
use tracing::{debug, info, warn};

/// How a pod watch ended
#[derive(Debug)]
pub enum WatchOutcome {
    /// The pod reached `Succeeded`
    Succeeded,
    /// The pod reached `Failed` and a delete was issued for it.
    /// `cleanup_error` holds the delete's error, if it had one.
    Failed { cleanup_error: Option<KubeError> },
    /// The status stream ended before any terminal phase
    StreamClosed,
}

impl WatchOutcome {
    /// Line printed for the outcome
    pub fn message(&self) -> &'static str {
        match self {
            Self::Succeeded => "Task pod succeeded.",
            Self::Failed { .. } => "Task pod failed.",
            Self::StreamClosed => "Task pod watch ended without a terminal phase.",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

pub struct PodCreationWatcher<'a> {
    client: &'a dyn KubeClient,
}

impl<'a> PodCreationWatcher<'a> {
    pub fn new(client: &'a dyn KubeClient) -> Self {
        Self { client }
    }

    /// Read a pod document from disk and run [`Self::watch_create`] on it
    pub async fn watch_create_file(
        &self,
        path: impl AsRef<Path>,
        namespace: &str,
    ) -> Result<WatchOutcome, KubeError> {
        let (bytes, format) = read_document(path)?;
        self.watch_create(&bytes, format, namespace).await
    }

    /// Create the pod described by `document` in `namespace` and wait for a
    /// terminal phase. A failed pod is deleted before returning.
    pub async fn watch_create(
        &self,
        document: &[u8],
        format: DocumentFormat,
        namespace: &str,
    ) -> Result<WatchOutcome, KubeError> {
        let mut pod: Pod = parse_document(document, format, "pod")?;
        assign_namespace(&mut pod.metadata, namespace);

        let identity = self
            .client
            .create_pod(&pod)
            .await
            .map_err(|e| KubeError::submission("pod", e))?;
        info!(pod = %identity, resource_version = %identity.resource_version, "pod created");

        let statuses = self.client.watch_pod(&identity).await.map_err(|e| match e {
            e @ KubeError::Watch(_) => e,
            other => KubeError::Watch(other.to_string()),
        })?;

        Ok(self.follow(&identity, statuses).await)
    }

    /// Consume status events one at a time until the pod is terminal or the
    /// stream ends. Events after a terminal phase are never polled.
    pub async fn follow<S>(&self, identity: &PodIdentity, statuses: S) -> WatchOutcome
    where
        S: Stream<Item = PodStatusEvent> + Unpin,
    {
        let mut statuses = statuses;

        let phase = loop {
            let Some(event) = statuses.next().await else {
                info!(pod = %identity, "status stream closed");
                return WatchOutcome::StreamClosed;
            };
            debug!(pod = %identity, phase = %event.phase, "status event");
            if event.phase.is_terminal() {
                break event.phase;
            }
        };

        if phase == PodPhase::Succeeded {
            return WatchOutcome::Succeeded;
        }

        let cleanup_error = self
            .client
            .delete_pod(&identity.namespace, &identity.name)
            .await
            .err();
        if let Some(ref e) = cleanup_error {
            warn!(pod = %identity, "failed to delete failed pod: {}", e);
        }
        WatchOutcome::Failed { cleanup_error }
    }
}
