//! Text recognition types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Writing system the recognizer is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptProfile {
    /// Latin script.
    Latin,
    /// Devanagari script (Hindi, Marathi, Nepali, ...).
    #[default]
    Devanagari,
    /// Chinese script.
    Chinese,
    /// Japanese script.
    Japanese,
    /// Korean script.
    Korean,
}

impl ScriptProfile {
    /// Returns all profiles.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Latin,
            Self::Devanagari,
            Self::Chinese,
            Self::Japanese,
            Self::Korean,
        ]
    }

    /// Returns the profile as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Latin => "latin",
            Self::Devanagari => "devanagari",
            Self::Chinese => "chinese",
            Self::Japanese => "japanese",
            Self::Korean => "korean",
        }
    }

    /// Parses a profile name (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "latin" => Some(Self::Latin),
            "devanagari" | "hindi" => Some(Self::Devanagari),
            "chinese" | "zh" => Some(Self::Chinese),
            "japanese" | "ja" => Some(Self::Japanese),
            "korean" | "ko" => Some(Self::Korean),
            _ => None,
        }
    }
}

impl fmt::Display for ScriptProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Successful recognition result. The text may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionOutcome {
    /// Recognized text.
    pub text: String,
}

impl RecognitionOutcome {
    /// Returns true if no text was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
