use std::fmt;

use colored::Colorize;

/// Approval states the backend knows about. Anything else is passed
/// through to the API untouched and rendered uncolored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatus {
    PendingApproval,
    Approved,
}

impl ProjectStatus {
    /// Match a status label as sent by the backend (case-insensitive).
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "pending approval" => Some(ProjectStatus::PendingApproval),
            "approved" => Some(ProjectStatus::Approved),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::PendingApproval => "Pending Approval",
            ProjectStatus::Approved => "Approved",
        }
    }

    /// Get the colored label for terminal output.
    pub fn colored(self) -> String {
        let label = self.label();
        match self {
            ProjectStatus::PendingApproval => label.yellow().to_string(),
            ProjectStatus::Approved => label.green().to_string(),
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label() {
        assert_eq!(
            ProjectStatus::from_label("Pending Approval"),
            Some(ProjectStatus::PendingApproval)
        );
        assert_eq!(
            ProjectStatus::from_label("approved"),
            Some(ProjectStatus::Approved)
        );
        assert_eq!(ProjectStatus::from_label("Closed"), None);
    }
}
