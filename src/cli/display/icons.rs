//! Status icons for CLI output

/// Outcome of applying one object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyStatus {
    Applied,
    Failed,
    /// Not attempted because an earlier object failed
    Skipped,
}

/// Status icons for different states
pub struct StatusIcon;

impl StatusIcon {
    /// Success icon (object applied)
    pub const SUCCESS: &'static str = "✓";

    /// Error icon (apply rejected)
    pub const ERROR: &'static str = "✗";

    /// Pending icon (not attempted)
    pub const PENDING: &'static str = "⏳";

    pub fn get_apply_icon(status: ApplyStatus) -> &'static str {
        match status {
            ApplyStatus::Applied => Self::SUCCESS,
            ApplyStatus::Failed => Self::ERROR,
            ApplyStatus::Skipped => Self::PENDING,
        }
    }

    pub fn get_status_text(status: ApplyStatus) -> &'static str {
        match status {
            ApplyStatus::Applied => "Applied",
            ApplyStatus::Failed => "Failed",
            ApplyStatus::Skipped => "Skipped",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_apply_icon() {
        assert_eq!(StatusIcon::get_apply_icon(ApplyStatus::Applied), StatusIcon::SUCCESS);
        assert_eq!(StatusIcon::get_apply_icon(ApplyStatus::Failed), StatusIcon::ERROR);
        assert_eq!(StatusIcon::get_apply_icon(ApplyStatus::Skipped), StatusIcon::PENDING);
    }

    #[test]
    fn test_get_status_text() {
        assert_eq!(StatusIcon::get_status_text(ApplyStatus::Applied), "Applied");
        assert_eq!(StatusIcon::get_status_text(ApplyStatus::Skipped), "Skipped");
    }
}
