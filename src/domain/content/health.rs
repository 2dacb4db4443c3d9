//! Health-check inputs.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Percentage, ValidationError};

/// Environmental, social and governance self-assessment, each 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthMetrics {
    pub e: Percentage,
    pub s: Percentage,
    pub g: Percentage,
}

impl HealthMetrics {
    /// Validates and builds the three pillar scores.
    pub fn new(e: i64, s: i64, g: i64) -> Result<Self, ValidationError> {
        Ok(Self {
            e: Percentage::try_new_named("environmental", e)?,
            s: Percentage::try_new_named("social", s)?,
            g: Percentage::try_new_named("governance", g)?,
        })
    }
}

impl Default for HealthMetrics {
    fn default() -> Self {
        Self {
            e: Percentage::new(60),
            s: Percentage::new(60),
            g: Percentage::new(60),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_values_within_bounds() {
        let metrics = HealthMetrics::new(80, 40, 60).unwrap();
        assert_eq!(metrics.e.value(), 80);
        assert_eq!(metrics.s.value(), 40);
        assert_eq!(metrics.g.value(), 60);
    }

    #[test]
    fn names_the_offending_pillar() {
        let err = HealthMetrics::new(80, 140, 60).unwrap_err();
        assert_eq!(err, ValidationError::out_of_range("social", 0, 100, 140));
    }
}
