//! Kubernetes resource commands

use crate::cli::display::{PodInfo, ReplicationControllerInfo, TableRenderer};
use crate::domain::config::{ClientConf, ConnectionSettings};
use crate::domain::pod::{PodCreationWatcher, WatchOutcome};
use crate::domain::resource::{validate_name, ResourceKind, ResourceRef};
use crate::infrastructure::kubernetes::{
    assign_namespace, parse_document, read_document, KubeClient, KubeClientImpl,
};
use crate::shared::error::KubeError;
use clap::Args;
use k8s_openapi::api::core::v1::ReplicationController;
use tracing::{debug, warn};

/// Connection flags shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// If present, the namespace scope for this request
    #[arg(long, short = 'n', global = true)]
    pub namespace: Option<String>,

    /// Path to kubeconfig file
    /// If not specified, uses default kubeconfig resolution (KUBECONFIG env or ~/.kube/config)
    #[arg(long, global = true)]
    pub kubeconfig: Option<String>,

    /// Kubernetes context to use
    #[arg(long, global = true)]
    pub context: Option<String>,

    /// Path to a TOML config file with defaults for the flags above
    /// Falls back to the KUBECLIENT_CONF_FILE environment variable
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<String>,
}

impl ConnectionArgs {
    pub fn settings(&self) -> Result<ConnectionSettings, KubeError> {
        let conf = ClientConf::load(self.config.as_deref())?;
        Ok(ConnectionSettings::resolve(
            &conf,
            self.namespace.clone(),
            self.kubeconfig.clone(),
            self.context.clone(),
        ))
    }

    pub async fn connect(&self) -> anyhow::Result<(KubeClientImpl, String)> {
        let settings = self.settings()?;
        debug!(?settings, "connecting to cluster");

        let client = KubeClientImpl::new_with_config(settings.kubeconfig, settings.context)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to connect to kubernetes: {}", e))?;
        Ok((client, settings.namespace))
    }
}

fn display_namespace<'a>(client: &'a dyn KubeClient, namespace: &'a str) -> &'a str {
    if namespace.is_empty() {
        client.default_namespace()
    } else {
        namespace
    }
}

#[derive(Args, Debug, Clone)]
pub struct CreateCommand {
    /// pod/<file> or rc/<file>, a local JSON (or YAML) document
    pub target: String,
}

impl CreateCommand {
    pub async fn run(&self, client: &dyn KubeClient, namespace: &str) -> anyhow::Result<String> {
        let target: ResourceRef = self.target.parse()?;

        match target.kind {
            ResourceKind::Pod => {
                let outcome = PodCreationWatcher::new(client)
                    .watch_create_file(&target.argument, namespace)
                    .await?;
                if let WatchOutcome::Failed {
                    cleanup_error: Some(ref e),
                } = outcome
                {
                    warn!("Failed to delete task pod: {}", e);
                }
                Ok(outcome.message().to_string())
            }
            ResourceKind::ReplicationController => {
                let (bytes, format) = read_document(&target.argument)?;
                let mut rc: ReplicationController = parse_document(&bytes, format, "rc")?;
                assign_namespace(&mut rc.metadata, namespace);

                client
                    .create_replication_controller(&rc)
                    .await
                    .map_err(|e| KubeError::submission("rc", e))?;
                Ok("Successfully created replication controller".to_string())
            }
        }
    }

    pub async fn execute(&self, client: &dyn KubeClient, namespace: &str) -> anyhow::Result<()> {
        println!("{}", self.run(client, namespace).await?);
        Ok(())
    }
}

#[derive(Args, Debug, Clone)]
pub struct ListCommand {
    /// pods or rcs
    pub kinds: String,
}

impl ListCommand {
    pub async fn run(&self, client: &dyn KubeClient, namespace: &str) -> anyhow::Result<String> {
        let kind = ResourceKind::from_plural(&self.kinds)?;
        let renderer = TableRenderer::new();
        let shown = display_namespace(client, namespace);

        match kind {
            ResourceKind::Pod => {
                let pods = client
                    .list_pods(namespace)
                    .await
                    .map_err(|e| anyhow::anyhow!("Error listing pods: {}", e))?;
                let infos: Vec<PodInfo> = pods.iter().map(PodInfo::from).collect();
                Ok(renderer.render_pods(shown, &infos))
            }
            ResourceKind::ReplicationController => {
                let rcs = client.list_replication_controllers(namespace).await.map_err(|e| {
                    anyhow::anyhow!("Error listing replication controllers: {}", e)
                })?;
                let infos: Vec<ReplicationControllerInfo> =
                    rcs.iter().map(ReplicationControllerInfo::from).collect();
                Ok(renderer.render_replication_controllers(shown, &infos))
            }
        }
    }

    pub async fn execute(&self, client: &dyn KubeClient, namespace: &str) -> anyhow::Result<()> {
        println!("{}", self.run(client, namespace).await?);
        Ok(())
    }
}

#[derive(Args, Debug, Clone)]
pub struct DeleteCommand {
    /// pod/<name> or rc/<name>
    pub target: String,
}

impl DeleteCommand {
    pub async fn run(&self, client: &dyn KubeClient, namespace: &str) -> anyhow::Result<String> {
        let target: ResourceRef = self.target.parse()?;
        validate_name(&target.argument)?;

        match target.kind {
            ResourceKind::Pod => client
                .delete_pod(namespace, &target.argument)
                .await
                .map_err(|e| anyhow::anyhow!("Error deleting pod: {}", e))?,
            ResourceKind::ReplicationController => client
                .delete_replication_controller(namespace, &target.argument)
                .await
                .map_err(|e| anyhow::anyhow!("Error deleting rc: {}", e))?,
        }

        Ok(format!("Deleted {} successfully", target))
    }

    pub async fn execute(&self, client: &dyn KubeClient, namespace: &str) -> anyhow::Result<()> {
        println!("{}", self.run(client, namespace).await?);
        Ok(())
    }
}

#[derive(Args, Debug, Clone)]
pub struct UpdateCommand {
    /// rc/<name>
    pub target: String,

    /// New image; only template containers already running this image
    /// repository are updated
    #[arg(long)]
    pub image: String,

    /// Image tag appended as <image>:<version>
    #[arg(long)]
    pub version: Option<String>,
}

impl UpdateCommand {
    pub async fn run(&self, client: &dyn KubeClient, namespace: &str) -> anyhow::Result<String> {
        let target: ResourceRef = self.target.parse()?;
        if target.kind != ResourceKind::ReplicationController {
            return Err(crate::domain::resource::usage_error().into());
        }
        validate_name(&target.argument)?;

        client
            .update_replication_controller_image(
                namespace,
                &target.argument,
                &self.image,
                self.version.as_deref(),
            )
            .await
            .map_err(|e| anyhow::anyhow!("Error updating rc: {}", e))?;

        Ok(format!("Updated {} successfully", target))
    }

    pub async fn execute(&self, client: &dyn KubeClient, namespace: &str) -> anyhow::Result<()> {
        println!("{}", self.run(client, namespace).await?);
        Ok(())
    }
}
