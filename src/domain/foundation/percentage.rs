//! Percentage value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A value between 0 and 100 inclusive.
///
/// Used for caller-supplied inputs such as health-check sliders. Scores that
/// come back from the model are carried as [`crate::domain::content::Score`]
/// instead, since those are not guaranteed to be in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Percentage(u8);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(0);

    /// One hundred percent.
    pub const HUNDRED: Self = Self(100);

    /// Creates a new Percentage, clamping to valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Creates a Percentage, returning error if out of range.
    pub fn try_new(value: i64) -> Result<Self, ValidationError> {
        Self::try_new_named("percentage", value)
    }

    /// Same as [`Percentage::try_new`], reporting `field` in the error.
    pub fn try_new_named(field: &str, value: i64) -> Result<Self, ValidationError> {
        if !(0..=100).contains(&value) {
            return Err(ValidationError::out_of_range(field, 0, 100, value));
        }
        Ok(Self(value as u8))
    }

    /// Computes `part / whole` as a rounded percentage. An empty whole is 0%.
    pub fn ratio(part: usize, whole: usize) -> Self {
        if whole == 0 {
            return Self::ZERO;
        }
        let pct = (part.min(whole) as f64 / whole as f64 * 100.0).round();
        Self(pct as u8)
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<i64> for Percentage {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Percentage> for u8 {
    fn from(p: Percentage) -> Self {
        p.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_new_clamps_to_100() {
        assert_eq!(Percentage::new(101).value(), 100);
        assert_eq!(Percentage::new(255).value(), 100);
    }

    #[test]
    fn percentage_try_new_accepts_bounds() {
        assert!(Percentage::try_new(0).is_ok());
        assert!(Percentage::try_new(100).is_ok());
    }

    #[test]
    fn percentage_try_new_rejects_out_of_range() {
        match Percentage::try_new_named("social", -1) {
            Err(ValidationError::OutOfRange { field, min, max, actual }) => {
                assert_eq!(field, "social");
                assert_eq!(min, 0);
                assert_eq!(max, 100);
                assert_eq!(actual, -1);
            }
            other => panic!("Expected OutOfRange error, got {:?}", other),
        }
        assert!(Percentage::try_new(101).is_err());
    }

    #[test]
    fn ratio_rounds_to_nearest() {
        assert_eq!(Percentage::ratio(1, 3).value(), 33);
        assert_eq!(Percentage::ratio(2, 3).value(), 67);
        assert_eq!(Percentage::ratio(2, 2).value(), 100);
        assert_eq!(Percentage::ratio(0, 0).value(), 0);
    }

    #[test]
    fn percentage_displays_correctly() {
        assert_eq!(format!("{}", Percentage::new(75)), "75%");
        assert_eq!(format!("{}", Percentage::ZERO), "0%");
    }

    #[test]
    fn percentage_deserialization_rejects_out_of_range() {
        let ok: Percentage = serde_json::from_str("80").unwrap();
        assert_eq!(ok.value(), 80);
        assert!(serde_json::from_str::<Percentage>("180").is_err());
    }
}
