//! Table rendering for CLI output

use super::{ColorTheme, StatusIcon};
use crate::domain::pod::PodPhase;
use crate::infrastructure::constants::EMPTY_CELL;
use chrono::SecondsFormat;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};
use k8s_openapi::api::core::v1::{Pod, ReplicationController};

/// Pod row for list display
#[derive(Debug, Clone)]
pub struct PodInfo {
    pub name: String,
    pub phase: PodPhase,
    pub ip: Option<String>,
    pub start_time: Option<String>,
}

impl From<&Pod> for PodInfo {
    fn from(pod: &Pod) -> Self {
        let status = pod.status.as_ref();
        Self {
            name: pod.metadata.name.clone().unwrap_or_default(),
            phase: PodPhase::of(pod),
            ip: status.and_then(|s| s.pod_ip.clone()),
            start_time: status
                .and_then(|s| s.start_time.as_ref())
                .map(|t| t.0.to_rfc3339_opts(SecondsFormat::Secs, true)),
        }
    }
}

/// Replication controller row for list display
#[derive(Debug, Clone)]
pub struct ReplicationControllerInfo {
    pub name: String,
    pub desired: i32,
    pub ready: i32,
    /// `key=value` pairs sorted by key
    pub labels: Vec<String>,
}

impl From<&ReplicationController> for ReplicationControllerInfo {
    fn from(rc: &ReplicationController) -> Self {
        let mut labels: Vec<(String, String)> = rc
            .metadata
            .labels
            .clone()
            .unwrap_or_default()
            .into_iter()
            .collect();
        labels.sort();

        Self {
            name: rc.metadata.name.clone().unwrap_or_default(),
            desired: rc.spec.as_ref().and_then(|s| s.replicas).unwrap_or(1),
            ready: rc
                .status
                .as_ref()
                .and_then(|s| s.ready_replicas)
                .unwrap_or(0),
            labels: labels
                .into_iter()
                .map(|(k, v)| format!("{}={}", k.trim(), v.trim()))
                .collect(),
        }
    }
}

/// Table renderer for formatted output
pub struct TableRenderer {
    theme: ColorTheme,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer {
    pub fn new() -> Self {
        Self {
            theme: ColorTheme::default(),
        }
    }

    fn table(headers: &[&str]) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(
                headers
                    .iter()
                    .map(|h| Cell::new(h).set_alignment(CellAlignment::Left))
                    .collect::<Vec<_>>(),
            );
        table
    }

    pub fn render_pods(&self, namespace: &str, pods: &[PodInfo]) -> String {
        if pods.is_empty() {
            return format!("No pods found in namespace '{}'", namespace);
        }

        let mut table = Self::table(&["NAME", "PHASE", "IP", "STARTED"]);
        for pod in pods {
            table.add_row(vec![
                Cell::new(&pod.name),
                Cell::new(format!(
                    "{} {}",
                    StatusIcon::get_phase_icon(pod.phase),
                    pod.phase
                ))
                .fg(self.theme.get_phase_color(pod.phase)),
                Cell::new(pod.ip.as_deref().unwrap_or(EMPTY_CELL)),
                Cell::new(pod.start_time.as_deref().unwrap_or(EMPTY_CELL)),
            ]);
        }

        format!(
            "{}\n{}",
            format!("Pods [{}]", pods.len()).bright_black(),
            table
        )
    }

    pub fn render_replication_controllers(
        &self,
        namespace: &str,
        rcs: &[ReplicationControllerInfo],
    ) -> String {
        if rcs.is_empty() {
            return format!(
                "No replication controllers found in namespace '{}'",
                namespace
            );
        }

        let mut table = Self::table(&["NAME", "REPLICAS", "LABELS"]);
        for rc in rcs {
            table.add_row(vec![
                Cell::new(&rc.name),
                Cell::new(format!("{}/{}", rc.ready, rc.desired))
                    .fg(self.theme.get_replica_color(rc.ready, rc.desired)),
                Cell::new(if rc.labels.is_empty() {
                    EMPTY_CELL.to_string()
                } else {
                    rc.labels.join(", ")
                }),
            ]);
        }

        format!(
            "{}\n{}",
            format!("Replication controllers [{}]", rcs.len()).bright_black(),
            table
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::core::v1::{
        PodStatus, ReplicationControllerSpec, ReplicationControllerStatus,
    };
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
    use std::collections::BTreeMap;

    #[test]
    fn test_render_empty_lists() {
        let renderer = TableRenderer::new();
        assert_eq!(
            renderer.render_pods("jobs", &[]),
            "No pods found in namespace 'jobs'"
        );
        assert_eq!(
            renderer.render_replication_controllers("jobs", &[]),
            "No replication controllers found in namespace 'jobs'"
        );
    }

    #[test]
    fn test_pod_info_from_pod() {
        let start = chrono::DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        let pod = Pod {
            metadata: ObjectMeta {
                name: Some("task".to_string()),
                ..Default::default()
            },
            status: Some(PodStatus {
                phase: Some("Running".to_string()),
                pod_ip: Some("10.0.0.7".to_string()),
                start_time: Some(Time(start)),
                ..Default::default()
            }),
            ..Default::default()
        };

        let info = PodInfo::from(&pod);
        assert_eq!(info.phase, PodPhase::Running);
        assert_eq!(info.start_time.as_deref(), Some("2024-05-01T10:00:00Z"));

        let output = TableRenderer::new().render_pods("default", &[info]);
        assert!(output.contains("task"));
        assert!(output.contains("Running"));
        assert!(output.contains("10.0.0.7"));
    }

    #[test]
    fn test_render_pod_without_status() {
        let info = PodInfo::from(&Pod {
            metadata: ObjectMeta {
                name: Some("fresh".to_string()),
                ..Default::default()
            },
            ..Default::default()
        });
        assert_eq!(info.phase, PodPhase::Unknown);
        assert!(info.ip.is_none());

        let output = TableRenderer::new().render_pods("default", &[info]);
        assert!(output.contains("fresh"));
        assert!(output.contains("Unknown"));
    }

    #[test]
    fn test_rc_info_sorts_labels() {
        let rc = ReplicationController {
            metadata: ObjectMeta {
                name: Some("web".to_string()),
                labels: Some(BTreeMap::from([
                    ("tier".to_string(), "frontend".to_string()),
                    ("app".to_string(), " web ".to_string()),
                ])),
                ..Default::default()
            },
            spec: Some(ReplicationControllerSpec {
                replicas: Some(3),
                ..Default::default()
            }),
            status: Some(ReplicationControllerStatus {
                replicas: 3,
                ready_replicas: Some(2),
                ..Default::default()
            }),
        };

        let info = ReplicationControllerInfo::from(&rc);
        assert_eq!(info.labels, vec!["app=web", "tier=frontend"]);
        assert_eq!((info.ready, info.desired), (2, 3));

        let output = TableRenderer::new().render_replication_controllers("default", &[info]);
        assert!(output.contains("web"));
        assert!(output.contains("2/3"));
        assert!(output.contains("app=web, tier=frontend"));
    }
}
