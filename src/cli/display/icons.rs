//! Status icons for CLI output

use crate::domain::pod::PodPhase;

pub struct StatusIcon;

impl StatusIcon {
    pub const SUCCESS: &'static str = "✓";

    pub const RUNNING: &'static str = "▶";

    pub const ERROR: &'static str = "✗";

    pub const PENDING: &'static str = "⏳";

    pub const UNKNOWN: &'static str = "?";

    pub fn get_phase_icon(phase: PodPhase) -> &'static str {
        match phase {
            PodPhase::Succeeded => Self::SUCCESS,
            PodPhase::Running => Self::RUNNING,
            PodPhase::Failed => Self::ERROR,
            PodPhase::Pending => Self::PENDING,
            PodPhase::Unknown => Self::UNKNOWN,
        }
    }
}
