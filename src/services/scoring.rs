use crate::models::{DroughtTolerance, TraitMatch, TraitRecord, WeatherSnapshot};

/// Score given to candidates without a curated profile
pub const UNKNOWN_TRAITS_SCORE: u32 = 10;

/// Per-dimension contributions to a suitability score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreBreakdown {
    /// 0, 20, 25, 30 or 35
    pub drought: u32,
    /// 0, 5, 15, 25 or 30
    pub light: u32,
    /// 0, 10 or 20
    pub humidity: u32,
    /// 0, 8 or 15
    pub temperature: u32,
}

impl ScoreBreakdown {
    /// Unweighted sum; no ceiling is applied
    pub fn total(&self) -> u32 {
        self.drought + self.light + self.humidity + self.temperature
    }
}

/// Scores a resolved candidate against current weather
pub fn score(traits: &TraitMatch<'_>, weather: &WeatherSnapshot) -> u32 {
    match traits.record() {
        Some(record) => breakdown(record, weather).total(),
        None => UNKNOWN_TRAITS_SCORE,
    }
}

pub fn breakdown(record: &TraitRecord, weather: &WeatherSnapshot) -> ScoreBreakdown {
    ScoreBreakdown {
        drought: drought_score(record.drought, weather.rain_days),
        light: light_score(record.sun, weather.temp),
        humidity: humidity_score(record.humidity, weather.humidity),
        temperature: temperature_score(record.temp_min, record.temp_max, weather.temp),
    }
}

fn drought_score(drought: DroughtTolerance, rain_days: f64) -> u32 {
    match drought {
        DroughtTolerance::High if rain_days < 2.0 => 35,
        DroughtTolerance::High if rain_days < 4.0 => 25,
        DroughtTolerance::Medium if (2.0..=5.0).contains(&rain_days) => 30,
        DroughtTolerance::Low if rain_days > 5.0 => 35,
        DroughtTolerance::Medium => 20,
        _ => 0,
    }
}

/// Hotter weather calls for more sun-hungry plants
fn ideal_sun(temp: f64) -> u8 {
    if temp > 25.0 {
        8
    } else if temp > 15.0 {
        6
    } else {
        4
    }
}

fn light_score(sun: u8, temp: f64) -> u32 {
    match sun.abs_diff(ideal_sun(temp)) {
        0 => 30,
        1 => 25,
        2 => 15,
        3 => 5,
        _ => 0,
    }
}

fn humidity_score(preference: u8, ambient: f64) -> u32 {
    let preference = f64::from(preference);
    if ambient > 70.0 && preference > 6.0 {
        20
    } else if ambient < 50.0 && preference < 5.0 {
        20
    } else if (ambient / 10.0 - preference).abs() <= 2.0 {
        10
    } else {
        0
    }
}

fn temperature_score(temp_min: f64, temp_max: f64, temp: f64) -> u32 {
    if temp >= temp_min && temp <= temp_max {
        15
    } else if temp >= temp_min - 5.0 && temp <= temp_max + 5.0 {
        8
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchKind;
    use proptest::prelude::*;

    fn weather(temp: f64, humidity: f64, rain_days: f64) -> WeatherSnapshot {
        WeatherSnapshot {
            temp,
            humidity,
            precipitation: 0.0,
            wind_speed: 10.0,
            description: "clear sky".to_string(),
            forecast_temp: temp,
            rain_days,
            temp_min: temp - 5.0,
            temp_max: temp + 5.0,
            climate_summary: String::new(),
        }
    }

    fn olive() -> TraitRecord {
        TraitRecord {
            drought: DroughtTolerance::High,
            sun: 9,
            humidity: 4,
            temp_min: -10.0,
            temp_max: 40.0,
            native_regions: &["mediterranean"],
        }
    }

    #[test]
    fn test_absent_traits_get_baseline() {
        assert_eq!(score(&TraitMatch::Absent, &weather(28.0, 40.0, 0.5)), 10);
        assert_eq!(score(&TraitMatch::Absent, &weather(-5.0, 95.0, 6.0)), 10);
    }

    #[test]
    fn test_olive_in_hot_dry_summer() {
        let record = olive();
        let found = TraitMatch::Found {
            key: "olea europaea",
            record: &record,
            via: MatchKind::Exact,
        };

        // drought 35, light |9-8|=1 -> 25, humidity 40<50 && 4<5 -> 20, in range -> 15
        let parts = breakdown(&record, &weather(30.0, 40.0, 0.5));
        assert_eq!(
            parts,
            ScoreBreakdown {
                drought: 35,
                light: 25,
                humidity: 20,
                temperature: 15
            }
        );
        assert_eq!(score(&found, &weather(30.0, 40.0, 0.5)), 95);
    }

    #[test]
    fn test_drought_ladder() {
        assert_eq!(drought_score(DroughtTolerance::High, 1.9), 35);
        assert_eq!(drought_score(DroughtTolerance::High, 3.0), 25);
        assert_eq!(drought_score(DroughtTolerance::High, 4.0), 0);
        assert_eq!(drought_score(DroughtTolerance::Medium, 2.0), 30);
        assert_eq!(drought_score(DroughtTolerance::Medium, 5.0), 30);
        assert_eq!(drought_score(DroughtTolerance::Medium, 1.0), 20);
        assert_eq!(drought_score(DroughtTolerance::Medium, 6.0), 20);
        assert_eq!(drought_score(DroughtTolerance::Low, 5.5), 35);
        assert_eq!(drought_score(DroughtTolerance::Low, 5.0), 0);
    }

    #[test]
    fn test_light_ladder() {
        assert_eq!(light_score(8, 26.0), 30);
        assert_eq!(light_score(6, 25.0), 30);
        assert_eq!(light_score(4, 15.0), 30);
        assert_eq!(light_score(7, 15.0), 5);
        assert_eq!(light_score(2, 20.0), 0);
        assert_eq!(light_score(10, 26.0), 15);
    }

    #[test]
    fn test_humidity_ladder() {
        assert_eq!(humidity_score(7, 75.0), 20);
        assert_eq!(humidity_score(4, 45.0), 20);
        // |60/10 - 5| = 1
        assert_eq!(humidity_score(5, 60.0), 10);
        assert_eq!(humidity_score(9, 50.0), 0);
    }

    #[test]
    fn test_temperature_window() {
        assert_eq!(temperature_score(0.0, 30.0, 30.0), 15);
        assert_eq!(temperature_score(0.0, 30.0, 34.0), 8);
        assert_eq!(temperature_score(0.0, 30.0, -5.0), 8);
        assert_eq!(temperature_score(0.0, 30.0, 36.0), 0);
    }

    fn drought_strategy() -> impl Strategy<Value = DroughtTolerance> {
        prop_oneof![
            Just(DroughtTolerance::Low),
            Just(DroughtTolerance::Medium),
            Just(DroughtTolerance::High),
        ]
    }

    proptest! {
        #[test]
        fn property_sub_scores_stay_in_their_sets(
            drought in drought_strategy(),
            sun in 1u8..=10,
            humidity_pref in 1u8..=10,
            temp_min in -30.0f64..15.0,
            span in 0.0f64..40.0,
            temp in -30.0f64..45.0,
            humidity in 0.0f64..100.0,
            rain_days in 0.0f64..7.0,
        ) {
            let record = TraitRecord {
                drought,
                sun,
                humidity: humidity_pref,
                temp_min,
                temp_max: temp_min + span,
                native_regions: &[],
            };
            let parts = breakdown(&record, &weather(temp, humidity, rain_days));

            prop_assert!([0, 20, 25, 30, 35].contains(&parts.drought));
            prop_assert!([0, 5, 15, 25, 30].contains(&parts.light));
            prop_assert!([0, 10, 20].contains(&parts.humidity));
            prop_assert!([0, 8, 15].contains(&parts.temperature));
            prop_assert_eq!(parts.total(), parts.drought + parts.light + parts.humidity + parts.temperature);
        }
    }
}
