//! Scores reported by the model.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A score the model was asked to keep within 0..=100.
///
/// Values are carried exactly as reported (after rounding fractional
/// numbers); nothing clamps them. Use [`Score::is_in_range`] to detect
/// out-of-range output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Score(i64);

impl Score {
    /// The zero score used by fallback results.
    pub const ZERO: Self = Self(0);

    /// Wraps a raw value.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    pub fn value(&self) -> i64 {
        self.0
    }

    /// True when the value lies within the requested 0..=100 band.
    pub fn is_in_range(&self) -> bool {
        (0..=100).contains(&self.0)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient_integer(deserializer).map(Score)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Accepts integers, fractional numbers (rounded) and numeric strings.
pub(crate) fn lenient_integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let float = match LooseNumber::deserialize(deserializer)? {
        LooseNumber::Int(n) => return Ok(n),
        LooseNumber::Float(f) => f,
        LooseNumber::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("expected a number, got '{}'", s)))?,
    };

    if !float.is_finite() {
        return Err(de::Error::custom("number is not finite"));
    }
    Ok(float.round() as i64)
}
