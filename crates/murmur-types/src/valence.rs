//! Discrete sentiment categories.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Bucket a continuous valence score falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValenceCategory {
    StrongPositive,
    Positive,
    Neutral,
    Negative,
    StrongNegative,
}

impl fmt::Display for ValenceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValenceCategory::StrongPositive => write!(f, "STRONG_POSITIVE"),
            ValenceCategory::Positive => write!(f, "POSITIVE"),
            ValenceCategory::Neutral => write!(f, "NEUTRAL"),
            ValenceCategory::Negative => write!(f, "NEGATIVE"),
            ValenceCategory::StrongNegative => write!(f, "STRONG_NEGATIVE"),
        }
    }
}
