use std::sync::Arc;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use rmcp::model::{Content, Tool};
use serde_json::{Value, json};
use site_model::{DEFAULT_LIVE_WEATHER, LiveWeatherSnapshot, WeatherService};

use crate::{
    ToolExecutor,
    utils::{explicit_location, text, tool},
};

pub struct LiveWeatherTool {
    weather: Arc<dyn WeatherService>,
}

impl LiveWeatherTool {
    pub fn new(weather: Arc<dyn WeatherService>) -> Self {
        Self { weather }
    }

    fn format_snapshot(snapshot: &LiveWeatherSnapshot) -> String {
        let mut result = String::from("Wind:\n");
        for (height, speed, direction) in [
            (80, snapshot.wind_speed_80m, snapshot.wind_direction_80m),
            (120, snapshot.wind_speed_120m, snapshot.wind_direction_120m),
            (180, snapshot.wind_speed_180m, snapshot.wind_direction_180m),
        ] {
            result.push_str(&format!("- {}m: {:.1} m/s from {:.0}°\n", height, speed, direction));
        }

        result.push_str("\nAtmosphere:\n");
        result.push_str(&format!("- Temperature at 120m: {:.1} °C\n", snapshot.temperature_120m));
        result.push_str(&format!("- Apparent temperature: {:.1} °C\n", snapshot.apparent_temp));
        result.push_str(&format!("- Air density at 120m: {:.3} kg/m³\n", snapshot.air_density_120m));
        result.push_str(&format!("- Sea-level pressure: {:.1} hPa\n", snapshot.pressure_msl));
        result.push_str(&format!("- Humidity: {:.0}%\n", snapshot.humidity));
        result.push_str(&format!("- Precipitation: {:.1} mm\n", snapshot.precipitation));
        result.push_str(&format!("- Cloud cover: {:.0}%\n", snapshot.cloud_cover));
        result.push_str(&format!("- Visibility: {:.1} km\n", snapshot.visibility));
        result
    }
}

#[async_trait]
impl ToolExecutor for LiveWeatherTool {
    async fn execute(&self, arguments: Option<Value>) -> Result<Vec<Content>> {
        log::debug!("Executing LiveWeatherTool");
        let args = arguments.ok_or_else(|| anyhow!("Missing arguments"))?;

        let location = explicit_location(&args)?
            .ok_or_else(|| anyhow!("Missing lat and lon parameters"))?;

        let mut result = format!("Live weather at {}\n\n", location);
        match self.weather.live_weather(location.lat, location.lon).await {
            Ok(snapshot) => result.push_str(&Self::format_snapshot(&snapshot)),
            Err(err) => {
                log::warn!("Live weather unavailable at {}: {}", location, err);
                result.push_str("Live weather unavailable; showing defaults\n\n");
                result.push_str(&Self::format_snapshot(&DEFAULT_LIVE_WEATHER));
            }
        }

        Ok(vec![text(result)])
    }

    fn to_tool(&self) -> Tool {
        tool(
            "live_weather",
            "Current wind at turbine hub heights and atmospheric conditions for a point",
            json!({
                "type": "object",
                "properties": {
                    "lat": {
                        "type": "number",
                        "description": "Latitude in degrees"
                    },
                    "lon": {
                        "type": "number",
                        "description": "Longitude in degrees"
                    }
                },
                "required": ["lat", "lon"]
            }),
        )
    }
}
