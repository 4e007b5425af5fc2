use thiserror::Error;

use crate::parse::ParseError;

/// Fatal rule-set load failures. The previously published rule set stays
/// active when a load returns one of these.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("rule set root is not an object")]
    RootNotObject,

    #[error("missing schema version")]
    MissingSchemaVersion,

    #[error("invalid schema version '{version}'; expected major.minor")]
    InvalidSchemaVersion { version: String },

    #[error("missing entries list")]
    MissingEntries,

    #[error("entry at index {index} is not an object")]
    EntryNotObject { index: usize },

    #[error("entry at index {index} has a missing or invalid id")]
    InvalidId { index: usize },

    #[error("duplicate entry id {id}")]
    DuplicateId { id: u32 },

    #[error("entry {id} has no blacklist")]
    MissingBlacklist { id: u32 },

    #[error("entry {id} has a non-string blacklist feature")]
    MalformedBlacklist { id: u32 },

    #[error("entry {id} has an empty blacklist")]
    EmptyBlacklist { id: u32 },

    #[error("entry {id} has a malformed {field} list")]
    MalformedBugList { id: u32, field: &'static str },

    #[error("exception {index} of entry {id} is not an object")]
    ExceptionNotObject { id: u32, index: usize },

    #[error("entry at index {index} has a malformed browser_version: {source}")]
    MalformedBrowserVersion {
        index: usize,
        #[source]
        source: CriterionError,
    },

    #[error("invalid reference browser version: {0}")]
    InvalidBrowserVersion(#[source] ParseError),
}

/// A single criterion that could not be built. Non-fatal: the entry that
/// carries it is kept but can never match.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CriterionError {
    #[error("unknown operator '{0}'")]
    UnknownOperator(String),

    #[error("unknown version style '{0}'")]
    UnknownStyle(String),

    #[error("unknown os type '{0}'")]
    UnknownOsType(String),

    #[error("unknown multi_gpu_style '{0}'")]
    UnknownMultiGpuStyle(String),

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("{field} must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_schema_version_message() {
        let err = LoadError::InvalidSchemaVersion {
            version: "1.x".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid schema version '1.x'; expected major.minor"
        );
    }

    #[test]
    fn entry_not_object_message() {
        let err = LoadError::EntryNotObject { index: 3 };
        assert_eq!(err.to_string(), "entry at index 3 is not an object");
    }

    #[test]
    fn bug_list_message() {
        let err = LoadError::MalformedBugList {
            id: 7,
            field: "cr_bugs",
        };
        assert_eq!(err.to_string(), "entry 7 has a malformed cr_bugs list");
    }

    #[test]
    fn browser_version_message_includes_cause() {
        let err = LoadError::MalformedBrowserVersion {
            index: 0,
            source: CriterionError::UnknownOperator("~".into()),
        };
        assert_eq!(
            err.to_string(),
            "entry at index 0 has a malformed browser_version: unknown operator '~'"
        );
    }

    #[test]
    fn criterion_messages() {
        assert_eq!(
            CriterionError::UnknownOsType("beos".into()).to_string(),
            "unknown os type 'beos'"
        );
        assert_eq!(
            CriterionError::InvalidNumber("fast".into()).to_string(),
            "invalid number 'fast'"
        );
        assert_eq!(
            CriterionError::WrongType {
                field: "vendor_id",
                expected: "a string",
            }
            .to_string(),
            "vendor_id must be a string"
        );
    }
}
