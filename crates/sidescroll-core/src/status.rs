//! Human-readable status shown to whoever started the operation.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ScrollStatus {
    #[default]
    Ready,
    Scrolling { current: u32, total: u32 },
    Completed { scrolled: u32 },
    Stopped { scrolled: u32 },
    Failed { message: String },
}

impl ScrollStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ScrollStatus::Completed { .. } | ScrollStatus::Stopped { .. } | ScrollStatus::Failed { .. }
        )
    }
}

impl fmt::Display for ScrollStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrollStatus::Ready => write!(f, "Ready"),
            ScrollStatus::Scrolling { current, total } => {
                write!(f, "Scrolling... ({}/{})", current, total)
            }
            ScrollStatus::Completed { scrolled } => {
                write!(f, "Scroll completed ({} scrolls)", scrolled)
            }
            ScrollStatus::Stopped { scrolled } => write!(f, "Stopped after {} scrolls", scrolled),
            ScrollStatus::Failed { message } => write!(f, "Error: {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(ScrollStatus::Ready.to_string(), "Ready");
        assert_eq!(
            ScrollStatus::Scrolling { current: 2, total: 5 }.to_string(),
            "Scrolling... (2/5)"
        );
        assert_eq!(
            ScrollStatus::Completed { scrolled: 5 }.to_string(),
            "Scroll completed (5 scrolls)"
        );
        assert_eq!(
            ScrollStatus::Stopped { scrolled: 1 }.to_string(),
            "Stopped after 1 scrolls"
        );
        assert!(ScrollStatus::Failed { message: "boom".to_string() }
            .to_string()
            .contains("boom"));
    }

    #[test]
    fn test_terminal() {
        assert!(!ScrollStatus::Ready.is_terminal());
        assert!(!ScrollStatus::Scrolling { current: 0, total: 1 }.is_terminal());
        assert!(ScrollStatus::Completed { scrolled: 1 }.is_terminal());
        assert!(ScrollStatus::Stopped { scrolled: 0 }.is_terminal());
        assert!(ScrollStatus::Failed { message: String::new() }.is_terminal());
    }

    #[test]
    fn test_serialize_tagged() {
        let value = serde_json::to_value(ScrollStatus::Scrolling { current: 1, total: 3 }).unwrap();
        assert_eq!(value["state"], "scrolling");
        assert_eq!(value["current"], 1);
    }
}
