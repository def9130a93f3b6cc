use serde::{Deserialize, Serialize};

/// Current conditions at turbine hub heights, as reported by the live
/// weather endpoint. Missing fields fall back to [`DEFAULT_LIVE_WEATHER`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveWeatherSnapshot {
    pub wind_speed_80m: f64,
    pub wind_speed_120m: f64,
    pub wind_speed_180m: f64,
    pub wind_direction_80m: f64,
    pub wind_direction_120m: f64,
    pub wind_direction_180m: f64,
    pub temperature_120m: f64,
    /// kg/m³
    pub air_density_120m: f64,
    /// hPa
    pub pressure_msl: f64,
    pub humidity: f64,
    pub precipitation: f64,
    pub cloud_cover: f64,
    /// km
    pub visibility: f64,
    pub apparent_temp: f64,
}

/// Neutral snapshot used whenever live weather is unavailable: calm air at
/// standard density and sea-level pressure.
pub const DEFAULT_LIVE_WEATHER: LiveWeatherSnapshot = LiveWeatherSnapshot {
    wind_speed_80m: 0.0,
    wind_speed_120m: 0.0,
    wind_speed_180m: 0.0,
    wind_direction_80m: 0.0,
    wind_direction_120m: 0.0,
    wind_direction_180m: 0.0,
    temperature_120m: 0.0,
    air_density_120m: 1.225,
    pressure_msl: 1013.25,
    humidity: 0.0,
    precipitation: 0.0,
    cloud_cover: 0.0,
    visibility: 0.0,
    apparent_temp: 0.0,
};

impl Default for LiveWeatherSnapshot {
    fn default() -> Self {
        DEFAULT_LIVE_WEATHER
    }
}

impl LiveWeatherSnapshot {
    pub fn is_default(&self) -> bool {
        *self == DEFAULT_LIVE_WEATHER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_payload_fills_neutral_values() {
        let snapshot: LiveWeatherSnapshot =
            serde_json::from_str(r#"{"wind_speed_120m": 7.4, "humidity": 63.0}"#).unwrap();

        assert_eq!(snapshot.wind_speed_120m, 7.4);
        assert_eq!(snapshot.humidity, 63.0);
        assert_eq!(snapshot.air_density_120m, 1.225);
        assert!(!snapshot.is_default());
    }

    #[test]
    fn test_empty_payload_is_default() {
        let snapshot: LiveWeatherSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.is_default());
    }
}
