//! Intensity levels and their compression profiles.
//!
//! Each level maps to one immutable [`IntensityProfile`]; the scheduler reads
//! every tunable number from here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// How aggressively non-work time is compressed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    Medium,
    High,
}

impl Default for Intensity {
    fn default() -> Self {
        Intensity::Medium
    }
}

/// Tunables selected by an [`Intensity`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntensityProfile {
    /// Length of each break between work blocks (minutes)
    pub break_minutes: i64,
    /// Longest continuous work block before splitting is suggested (minutes)
    pub break_frequency_minutes: i64,
    /// Cap on phone/social time (minutes)
    pub max_phone_minutes: i64,
    /// Cap on leisure time (minutes)
    pub max_leisure_minutes: i64,
    /// Most sleep that may be borrowed for work (minutes)
    pub sleep_reduction_minutes: i64,
    /// Sleep never planned below this many hours
    pub min_sleep_hours: f64,
}

const LOW: IntensityProfile = IntensityProfile {
    break_minutes: 20,
    break_frequency_minutes: 90,
    max_phone_minutes: 60,
    max_leisure_minutes: 120,
    sleep_reduction_minutes: 0,
    min_sleep_hours: 8.0,
};

const MEDIUM: IntensityProfile = IntensityProfile {
    break_minutes: 15,
    break_frequency_minutes: 120,
    max_phone_minutes: 30,
    max_leisure_minutes: 60,
    sleep_reduction_minutes: 0,
    min_sleep_hours: 7.5,
};

const HIGH: IntensityProfile = IntensityProfile {
    break_minutes: 10,
    break_frequency_minutes: 180,
    max_phone_minutes: 15,
    max_leisure_minutes: 30,
    sleep_reduction_minutes: 60,
    min_sleep_hours: 6.5,
};

impl Intensity {
    pub const ALL: [Intensity; 3] = [Intensity::Low, Intensity::Medium, Intensity::High];

    pub fn profile(&self) -> &'static IntensityProfile {
        match self {
            Self::Low => &LOW,
            Self::Medium => &MEDIUM,
            Self::High => &HIGH,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Capitalized name for messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl IntensityProfile {
    pub fn min_sleep_minutes(&self) -> i64 {
        (self.min_sleep_hours * 60.0).round() as i64
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intensity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ValidationError::UnknownIntensity(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_values() {
        let low = Intensity::Low.profile();
        assert_eq!(low.break_minutes, 20);
        assert_eq!(low.max_phone_minutes, 60);
        assert_eq!(low.max_leisure_minutes, 120);
        assert_eq!(low.sleep_reduction_minutes, 0);

        let medium = Intensity::Medium.profile();
        assert_eq!(medium.break_minutes, 15);
        assert_eq!(medium.max_phone_minutes, 30);
        assert_eq!(medium.max_leisure_minutes, 60);
        assert_eq!(medium.min_sleep_minutes(), 450);

        let high = Intensity::High.profile();
        assert_eq!(high.break_minutes, 10);
        assert_eq!(high.max_phone_minutes, 15);
        assert_eq!(high.max_leisure_minutes, 30);
        assert_eq!(high.sleep_reduction_minutes, 60);
        assert_eq!(high.min_sleep_minutes(), 390);
    }

    #[test]
    fn only_high_borrows_sleep() {
        for intensity in Intensity::ALL {
            let borrows = intensity.profile().sleep_reduction_minutes > 0;
            assert_eq!(borrows, intensity == Intensity::High);
        }
    }

    #[test]
    fn parse_round_trips_display() {
        for intensity in Intensity::ALL {
            assert_eq!(intensity.to_string().parse::<Intensity>().unwrap(), intensity);
        }
        assert_eq!("HIGH".parse::<Intensity>().unwrap(), Intensity::High);
        assert!("extreme".parse::<Intensity>().is_err());
    }
}
