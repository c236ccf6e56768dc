//! Color theme for CLI output

use super::ApplyStatus;
use comfy_table::Color as TableColor;

/// Color theme for terminal output
#[derive(Debug, Clone)]
pub struct ColorTheme {
    pub success: TableColor,
    pub error: TableColor,
    pub info: TableColor,
    pub muted: TableColor,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            success: TableColor::Green,
            error: TableColor::Red,
            info: TableColor::Cyan,
            muted: TableColor::DarkGrey,
        }
    }
}

impl ColorTheme {
    pub fn get_apply_color(&self, status: ApplyStatus) -> TableColor {
        match status {
            ApplyStatus::Applied => self.success,
            ApplyStatus::Failed => self.error,
            ApplyStatus::Skipped => self.muted,
        }
    }

    /// Workloads stand out from the objects they depend on
    pub fn get_kind_color(&self, kind: &str) -> TableColor {
        match kind {
            "StatefulSet" => self.info,
            _ => TableColor::Reset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme() {
        let theme = ColorTheme::default();
        assert_eq!(theme.success, TableColor::Green);
        assert_eq!(theme.error, TableColor::Red);
    }

    #[test]
    fn test_get_apply_color() {
        let theme = ColorTheme::default();
        assert_eq!(theme.get_apply_color(ApplyStatus::Applied), TableColor::Green);
        assert_eq!(theme.get_apply_color(ApplyStatus::Failed), TableColor::Red);
        assert_eq!(theme.get_apply_color(ApplyStatus::Skipped), TableColor::DarkGrey);
    }
}
