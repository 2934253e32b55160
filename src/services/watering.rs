use crate::models::{DroughtTolerance, WeatherSnapshot};

const BASE_INTERVAL_DAYS: i32 = 7;

/// Days until a plant should next be watered under the given weather
pub fn predict_water_interval_days(drought: DroughtTolerance, weather: &WeatherSnapshot) -> u32 {
    let mut days = BASE_INTERVAL_DAYS;

    if weather.precipitation > 50.0 {
        days += 3;
    }
    if weather.temp > 30.0 {
        days -= 2;
    }
    if drought == DroughtTolerance::High {
        days += 2;
    }

    days.max(0) as u32
}
