//! Document lifecycle events

use serde::{Deserialize, Serialize};

/// Something that happened to a document in the vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DocumentEvent {
    /// A new document appeared at `path`
    Created { path: String },
    /// A document moved from `from` to `to`
    Renamed { from: String, to: String },
}

impl DocumentEvent {
    pub fn created(path: impl Into<String>) -> Self {
        Self::Created { path: path.into() }
    }

    pub fn renamed(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::Renamed {
            from: from.into(),
            to: to.into(),
        }
    }

    /// The path the document lives at after the event.
    pub fn path(&self) -> &str {
        match self {
            Self::Created { path } => path,
            Self::Renamed { to, .. } => to,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_after_event() {
        assert_eq!(DocumentEvent::created("a.md").path(), "a.md");
        assert_eq!(DocumentEvent::renamed("a.md", "B/a.md").path(), "B/a.md");
    }

    #[test]
    fn test_serialized_form() {
        let json = serde_json::to_string(&DocumentEvent::renamed("a.md", "b.md")).unwrap();
        assert_eq!(json, r#"{"event":"renamed","from":"a.md","to":"b.md"}"#);
    }
}
