//! Status messages and the session panel.

use std::fmt;

use super::segments::PlanReport;
use crate::session::{PlanSession, SessionState};

/// A one-line success or failure message.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.success { "Success" } else { "Error" };
        writeln!(f, "**{label}**: {}", self.message)
    }
}

/// Whatever a session should currently show: a prompt, a loading line, the
/// error panel, or the full report. Never a report and an error together.
pub struct SessionPanel<'a>(pub &'a PlanSession);

impl fmt::Display for SessionPanel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.state() {
            SessionState::Idle => writeln!(f, "Enter a name and a main goal to generate a plan."),
            SessionState::Loading => writeln!(f, "Generating your plan..."),
            SessionState::Ready(view) => write!(f, "{}", PlanReport::from_view(view)),
            SessionState::Failed(message) => write!(f, "{}", OperationStatus::failure(message.as_str())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_status_display() {
        assert_eq!(
            OperationStatus::success("Plan exported").to_string(),
            "**Success**: Plan exported\n"
        );
        assert_eq!(OperationStatus::failure("Nope").to_string(), "**Error**: Nope\n");
    }
}
