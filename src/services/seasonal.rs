use serde::Serialize;

use crate::models::DroughtTolerance;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Summer,
    Winter,
    Transitional,
}

/// Typical conditions for a season, not derived from observations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalPattern {
    pub season: Season,
    pub typical_temp: f64,
    pub typical_rain_days: f64,
    pub drought_risk: DroughtTolerance,
}

/// Crude month-and-bounding-box approximation of the eastern Mediterranean
///
/// `month` is zero-based (January = 0). Points outside the box, and the
/// shoulder months inside it, are reported as transitional.
pub fn seasonal_pattern(lat: f64, lon: f64, month: u32) -> SeasonalPattern {
    let in_box = lat > 35.0 && lat < 45.0 && lon > 15.0 && lon < 30.0;

    if in_box {
        if (5..=8).contains(&month) {
            return SeasonalPattern {
                season: Season::Summer,
                typical_temp: 30.0,
                typical_rain_days: 1.0,
                drought_risk: DroughtTolerance::High,
            };
        }
        if month >= 11 || month <= 1 {
            return SeasonalPattern {
                season: Season::Winter,
                typical_temp: 12.0,
                typical_rain_days: 8.0,
                drought_risk: DroughtTolerance::Low,
            };
        }
    }

    SeasonalPattern {
        season: Season::Transitional,
        typical_temp: 20.0,
        typical_rain_days: 4.0,
        drought_risk: DroughtTolerance::Medium,
    }
}
