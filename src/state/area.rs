//! Areas: markup regions toggled by the active tag pool

use serde::{Deserialize, Serialize};
use std::fmt;

use super::domain::TagSet;

/// Rule relating an area's tags to the pool of active tags
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CombineMode {
    /// Visible when at least one of the area's tags is active
    #[default]
    Any,
    /// Visible when every one of the area's tags is active
    All,
    /// Visible when none of the area's tags is active
    None,
    /// Anything else found in a rules document; never decides
    Unrecognized(String),
}

impl CombineMode {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Any => "any",
            Self::All => "all",
            Self::None => "none",
            Self::Unrecognized(mode) => mode,
        }
    }

    /// Decide visibility for `tags` against `pool`.
    ///
    /// Returns `None` for an unrecognized mode so the caller can keep the
    /// last known state.
    pub fn decide(&self, tags: &TagSet, pool: &TagSet) -> Option<bool> {
        match self {
            Self::Any => Some(tags.iter().any(|t| pool.contains(t))),
            Self::All => Some(tags.iter().all(|t| pool.contains(t))),
            Self::None => Some(!tags.iter().any(|t| pool.contains(t))),
            Self::Unrecognized(_) => None,
        }
    }
}

impl From<String> for CombineMode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "any" => Self::Any,
            "all" => Self::All,
            "none" => Self::None,
            _ => Self::Unrecognized(value),
        }
    }
}

impl From<&str> for CombineMode {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<CombineMode> for String {
    fn from(mode: CombineMode) -> Self {
        mode.as_str().to_string()
    }
}

impl fmt::Display for CombineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a shown area is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayKind {
    Inline,
    #[default]
    Block,
}

impl DisplayKind {
    /// `span` wrappers are inline, every other element is block level
    pub fn for_element(element: &str) -> Self {
        if element.eq_ignore_ascii_case("span") {
            Self::Inline
        } else {
            Self::Block
        }
    }

    /// CSS `display` value used when the area is shown
    pub fn css_value(self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::Block => "block",
        }
    }
}

/// A registered region of markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub id: String,
    pub applicabilities: TagSet,
    #[serde(default)]
    pub mode: CombineMode,
    #[serde(default)]
    pub display: DisplayKind,
}

impl Area {
    pub fn new(id: &str, applicabilities: TagSet, mode: CombineMode, display: DisplayKind) -> Self {
        Self {
            id: id.to_string(),
            applicabilities,
            mode,
            display,
        }
    }

    pub fn decide(&self, pool: &TagSet) -> Option<bool> {
        self.mode.decide(&self.applicabilities, pool)
    }
}
