//! Completion-rate to heatmap level bucketing

use serde::Serialize;

use crate::types::{HabitgridError, Result};

/// Heatmap intensity level derived from a completion rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub enum IntensityLevel {
    /// Nothing completed (0%)
    None,
    /// Below 25%
    Low,
    /// 25% up to 50%
    Medium,
    /// 50% up to 75%
    High,
    /// 75% and above
    Max,
}

impl IntensityLevel {
    /// All levels from least to most intense
    pub const ALL: [IntensityLevel; 5] = [
        IntensityLevel::None,
        IntensityLevel::Low,
        IntensityLevel::Medium,
        IntensityLevel::High,
        IntensityLevel::Max,
    ];

    /// Bucket a rate, clamping it into 0..=100 first (NaN counts as 0)
    pub fn from_rate(rate: f64) -> Self {
        let rate = clamp_rate(rate);
        if rate == 0.0 {
            Self::None
        } else if rate < 25.0 {
            Self::Low
        } else if rate < 50.0 {
            Self::Medium
        } else if rate < 75.0 {
            Self::High
        } else {
            Self::Max
        }
    }

    /// Bucket a rate, rejecting anything outside 0..=100
    pub fn try_from_rate(rate: f64) -> Result<Self> {
        if !(0.0..=100.0).contains(&rate) {
            return Err(HabitgridError::InvalidRate(rate));
        }
        Ok(Self::from_rate(rate))
    }

    /// Numeric level 0-4
    pub fn level(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Max => 4,
        }
    }

    /// Short legend word ("No", "Low", ... "Very High"); callers append "activity"
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "No",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Max => "Very High",
        }
    }

    /// Smallest rate that maps to this level (`None` is exactly 0)
    pub fn lower_bound(self) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Low => f64::MIN_POSITIVE,
            Self::Medium => 25.0,
            Self::High => 50.0,
            Self::Max => 75.0,
        }
    }
}

impl From<IntensityLevel> for u8 {
    fn from(level: IntensityLevel) -> Self {
        level.level()
    }
}

/// Clamp a completion rate into 0..=100; NaN becomes 0
pub fn clamp_rate(rate: f64) -> f64 {
    if rate.is_nan() {
        0.0
    } else {
        rate.clamp(0.0, 100.0)
    }
}

/// Heatmap level for a completion rate.
///
/// Precondition: `rate` is a percentage in 0..=100. Values outside it are
/// clamped (negative and NaN to level 0, above 100 to level 4); use
/// [`IntensityLevel::try_from_rate`] to reject them instead.
pub fn intensity_from_rate(rate: f64) -> IntensityLevel {
    IntensityLevel::from_rate(rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds() {
        let cases = [
            (0.0, 0),
            (24.0, 1),
            (25.0, 2),
            (49.0, 2),
            (50.0, 3),
            (74.0, 3),
            (75.0, 4),
            (100.0, 4),
        ];
        for (rate, expected) in cases {
            assert_eq!(intensity_from_rate(rate).level(), expected, "rate {}", rate);
        }
    }

    #[test]
    fn test_fractional_rates() {
        assert_eq!(intensity_from_rate(0.01), IntensityLevel::Low);
        assert_eq!(intensity_from_rate(24.999), IntensityLevel::Low);
        assert_eq!(intensity_from_rate(74.9), IntensityLevel::High);
    }

    #[test]
    fn test_out_of_domain_is_clamped() {
        assert_eq!(intensity_from_rate(-5.0), IntensityLevel::None);
        assert_eq!(intensity_from_rate(250.0), IntensityLevel::Max);
        assert_eq!(intensity_from_rate(f64::NAN), IntensityLevel::None);
        assert_eq!(intensity_from_rate(f64::INFINITY), IntensityLevel::Max);
    }

    #[test]
    fn test_try_from_rate_rejects_out_of_domain() {
        assert!(matches!(
            IntensityLevel::try_from_rate(-0.5),
            Err(HabitgridError::InvalidRate(_))
        ));
        assert!(IntensityLevel::try_from_rate(100.5).is_err());
        assert!(IntensityLevel::try_from_rate(f64::NAN).is_err());
        assert_eq!(
            IntensityLevel::try_from_rate(60.0).unwrap(),
            IntensityLevel::High
        );
    }

    #[test]
    fn test_monotonic_over_sweep() {
        let mut previous = intensity_from_rate(-10.0);
        let mut rate = -10.0;
        while rate <= 110.0 {
            let current = intensity_from_rate(rate);
            assert!(current >= previous, "level dropped at rate {}", rate);
            previous = current;
            rate += 0.25;
        }
    }

    #[test]
    fn test_lower_bounds_map_to_their_level() {
        for level in IntensityLevel::ALL {
            assert_eq!(intensity_from_rate(level.lower_bound()), level);
        }
    }

    #[test]
    fn test_serializes_as_number() {
        assert_eq!(serde_json::to_string(&IntensityLevel::High).unwrap(), "3");
    }

    #[test]
    fn test_labels() {
        assert_eq!(IntensityLevel::None.label(), "No");
        assert_eq!(IntensityLevel::Max.label(), "Very High");
    }
}
