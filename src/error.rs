//! Error types for the applicability runtime and registry

use thiserror::Error;

/// Errors reported by the registry and the evaluator.
///
/// None of these are fatal to a page: the evaluator logs them and keeps the
/// rest of the areas working.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplicabilityError {
    /// An update was requested with a mode other than add/remove/set.
    #[error("invalid update mode '{mode}'")]
    UnknownUpdateMode { mode: String },

    /// An area carries a combine mode other than any/all/none.
    #[error("unknown combine mode '{mode}' on area {area_id}")]
    UnknownCombineMode { area_id: String, mode: String },

    /// An area id was registered twice in the same render pass.
    #[error("area '{area_id}' is already registered")]
    DuplicateArea { area_id: String },

    /// The rules document could not be serialized.
    #[error("failed to encode rules: {message}")]
    RulesEncoding { message: String },

    /// A command-line update triple could not be split into mode, domain and tag.
    #[error("malformed update '{input}', expected MODE:DOMAIN:TAG")]
    MalformedUpdate { input: String },

    /// An area wrapper element name that is not plain ASCII alphanumeric.
    #[error("invalid element name '{element}'")]
    InvalidElementName { element: String },
}

pub type Result<T> = std::result::Result<T, ApplicabilityError>;
