//! Infrastructure errors
//!
//! These abort a rule run. Naming violations are never reported through
//! this type; they go to the failure sink.

use crate::models::Position;

#[derive(Debug, thiserror::Error)]
pub enum LintError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid descriptor {filename}: {source}")]
    InvalidDescriptor {
        filename: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{position}: {kind} is missing required field `{field}`")]
    MissingField {
        position: Position,
        kind: &'static str,
        field: &'static str,
    },

    #[error("{position}: {kind} is not allowed inside {parent}")]
    MisplacedElement {
        position: Position,
        kind: &'static str,
        parent: &'static str,
    },

    #[error("invalid config {path}: {source}")]
    InvalidConfig {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown rule id {0:?}")]
    UnknownRule(String),

    #[error("invalid rule id {0:?}: rule ids are uppercase snake case")]
    InvalidRuleId(String),

    #[error("rule {0:?} is already registered")]
    DuplicateRule(String),
}

impl LintError {
    pub fn missing_field(position: &Position, kind: &'static str, field: &'static str) -> Self {
        LintError::MissingField {
            position: position.clone(),
            kind,
            field,
        }
    }
}
