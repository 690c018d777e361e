//! Color theme for CLI output

use crate::domain::pod::PodPhase;
use comfy_table::Color as TableColor;

/// Color theme for terminal output
#[derive(Debug, Clone)]
pub struct ColorTheme {
    pub success: TableColor,
    pub warning: TableColor,
    pub error: TableColor,
    pub info: TableColor,
    pub muted: TableColor,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            success: TableColor::Green,
            warning: TableColor::Yellow,
            error: TableColor::Red,
            info: TableColor::Cyan,
            muted: TableColor::DarkGrey,
        }
    }
}

impl ColorTheme {
    pub fn get_phase_color(&self, phase: PodPhase) -> TableColor {
        match phase {
            PodPhase::Succeeded => self.success,
            PodPhase::Running => self.info,
            PodPhase::Pending => self.warning,
            PodPhase::Failed => self.error,
            PodPhase::Unknown => self.muted,
        }
    }

    /// Get color based on ready/desired replica counts
    pub fn get_replica_color(&self, ready: i32, desired: i32) -> TableColor {
        if desired == 0 {
            self.muted
        } else if ready >= desired {
            self.success
        } else if ready > 0 {
            self.warning
        } else {
            self.error
        }
    }
}
