use crate::{
    error::{AppError, AppResult},
    models::{ClimateArchetype, CurrentConditions, ForecastSample, WeatherSnapshot},
};

/// Rainfall above this many mm marks an interval as rainy
const RAIN_THRESHOLD_MM: f64 = 0.1;
/// 3-hour sampling gives 8 intervals per calendar day
const SAMPLES_PER_DAY: f64 = 8.0;
const MS_TO_KMH: f64 = 3.6;

/// Reduces current conditions plus a non-empty forecast into a snapshot
///
/// Temperature statistics, humidity and wind are taken over the forecast
/// samples. The rain-day figure is the count of rainy intervals divided by the
/// intervals in one day, so it approximates rainy days over the forecast
/// window rather than counting distinct calendar days.
pub fn aggregate(current: &CurrentConditions, forecast: &[ForecastSample]) -> AppResult<WeatherSnapshot> {
    if forecast.is_empty() {
        return Err(AppError::EmptyForecast);
    }

    let temps: Vec<f64> = forecast.iter().map(|s| s.temperature).collect();
    let forecast_temp = median(&temps).ok_or(AppError::EmptyForecast)?;
    let temp_min = temps.iter().copied().fold(f64::INFINITY, f64::min);
    let temp_max = temps.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let avg_humidity = mean(forecast.iter().map(|s| s.humidity));
    let avg_wind_kmh = mean(forecast.iter().map(|s| s.wind_speed * MS_TO_KMH));

    let rainy_intervals = forecast
        .iter()
        .filter(|s| s.rain_mm > RAIN_THRESHOLD_MM)
        .count();
    let rain_days = rainy_intervals as f64 / SAMPLES_PER_DAY;

    let precipitation = forecast[0]
        .precipitation_probability
        .map(|p| p * 100.0)
        .filter(|p| p.is_finite())
        .unwrap_or(0.0);

    let climate_summary = climate_summary(forecast_temp, rain_days, avg_humidity, avg_wind_kmh);

    tracing::debug!(
        samples = forecast.len(),
        forecast_temp,
        rain_days,
        avg_humidity,
        avg_wind_kmh,
        "Forecast aggregated"
    );

    Ok(WeatherSnapshot {
        temp: current.temperature,
        humidity: current.humidity,
        precipitation,
        wind_speed: current.wind_speed * MS_TO_KMH,
        description: current.description.clone(),
        forecast_temp,
        rain_days,
        temp_min,
        temp_max,
        climate_summary,
    })
}

/// Standard statistical median; `None` for an empty slice
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Comma-joined phrase from independent threshold ladders, first match wins in each
pub fn climate_summary(temp: f64, rain_days: f64, humidity: f64, wind_kmh: f64) -> String {
    let mut parts = Vec::with_capacity(4);

    parts.push(if temp > 30.0 {
        "Very hot"
    } else if temp > 25.0 {
        "Hot"
    } else if temp > 20.0 {
        "Warm"
    } else if temp > 15.0 {
        "Mild"
    } else if temp > 10.0 {
        "Cool"
    } else {
        "Cold"
    });

    parts.push(if rain_days < 1.0 {
        "dry"
    } else if rain_days < 3.0 {
        "occasional rain"
    } else if rain_days < 5.0 {
        "moderate rain"
    } else {
        "rainy"
    });

    if humidity > 80.0 {
        parts.push("very humid");
    } else if humidity > 70.0 {
        parts.push("humid");
    } else if humidity < 40.0 {
        parts.push("dry air");
    }

    if wind_kmh > 30.0 {
        parts.push("windy");
    } else if wind_kmh > 20.0 {
        parts.push("breezy");
    }

    parts.join(", ")
}

/// Maps weather scalars to an archetype; rules overlap, so order is priority
pub fn classify(temp: f64, humidity: f64, rain_days: f64) -> ClimateArchetype {
    if temp > 25.0 && rain_days < 2.0 && humidity < 60.0 {
        ClimateArchetype::Mediterranean
    } else if temp > 20.0 && humidity > 70.0 {
        ClimateArchetype::Tropical
    } else if temp < 15.0 && rain_days > 4.0 {
        ClimateArchetype::TemperateWet
    } else if temp < 10.0 {
        ClimateArchetype::Cold
    } else if rain_days < 1.0 && temp > 20.0 {
        ClimateArchetype::Arid
    } else {
        ClimateArchetype::Temperate
    }
}

/// Classifies a snapshot using its current temperature and humidity
pub fn classify_snapshot(weather: &WeatherSnapshot) -> ClimateArchetype {
    classify(weather.temp, weather.humidity, weather.rain_days)
}
