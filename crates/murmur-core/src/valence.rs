//! Valence classification.
//!
//! Maps a continuous sentiment score onto a [`ValenceCategory`]. The function
//! is total: anything outside the classifiable domain yields `None`.
//!
//! The extremes are deliberately asymmetric. Scores of `+1` and above are
//! `StrongPositive`, while `-1` and below are unclassified.

use murmur_types::valence::ValenceCategory;

const STRONG_POSITIVE_MIN: f64 = 0.66;
const POSITIVE_MIN: f64 = 0.33;
const NEUTRAL_LOWER: f64 = -0.33;
const NEGATIVE_LOWER: f64 = -0.66;
const STRONG_NEGATIVE_LOWER: f64 = -1.0;

/// Classify a valence score.
///
/// | score | category |
/// |---|---|
/// | `>= 0.66` | StrongPositive |
/// | `[0.33, 0.66)` | Positive |
/// | `(-0.33, 0.33)` | Neutral |
/// | `(-0.66, -0.33]` | Negative |
/// | `(-1, -0.66]` | StrongNegative |
/// | `<= -1`, NaN, infinite | `None` |
pub fn classify_valence(valence: f64) -> Option<ValenceCategory> {
    if !valence.is_finite() {
        return None;
    }

    if valence >= STRONG_POSITIVE_MIN {
        Some(ValenceCategory::StrongPositive)
    } else if valence >= POSITIVE_MIN {
        Some(ValenceCategory::Positive)
    } else if valence > NEUTRAL_LOWER {
        Some(ValenceCategory::Neutral)
    } else if valence > NEGATIVE_LOWER {
        Some(ValenceCategory::Negative)
    } else if valence > STRONG_NEGATIVE_LOWER {
        Some(ValenceCategory::StrongNegative)
    } else {
        None
    }
}

/// Classify an optional score; unscored messages have no category.
pub fn classify_optional(valence: Option<f64>) -> Option<ValenceCategory> {
    valence.and_then(classify_valence)
}

/// Classify untyped input. Only JSON numbers are considered.
pub fn classify_json(value: &serde_json::Value) -> Option<ValenceCategory> {
    value.as_f64().and_then(classify_valence)
}
