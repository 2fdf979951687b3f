//! Weather service response parsing.
//!
//! The calculator never fetches weather itself. A caller that already holds a
//! forecast body of the shape
//!
//! ```json
//! {
//!   "current_weather": { "windspeed": 3.4 },
//!   "hourly": { "cloud_cover": [35, ...], "boundary_layer_height": [820, ...] }
//! }
//! ```
//!
//! can turn it into a [`MeteorologicalInput`] here. Only the current wind
//! speed and the first entry of each hourly series are used.

use serde::Deserialize;
use tracing::debug;

use crate::core_types::{CloudCover, MeteorologicalInput, Meters, MetersPerSecond};
use crate::error::{PlumeError, Result};

/// Unit the service reported `windspeed` in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindSpeedUnit {
    /// Already in m/s (request made with `wind_speed_unit=ms`)
    #[default]
    MetersPerSecond,
    /// Service default of km/h
    KilometersPerHour,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrentWeather {
    pub windspeed: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HourlyForecast {
    /// Cloud cover in percent; entries may be null.
    #[serde(default)]
    pub cloud_cover: Vec<Option<f64>>,
    /// Boundary-layer height in meters; entries may be null.
    #[serde(default)]
    pub boundary_layer_height: Vec<Option<f64>>,
}

/// The subset of a forecast response the calculator reads.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeatherResponse {
    pub current_weather: CurrentWeather,
    pub hourly: HourlyForecast,
}

impl WeatherResponse {
    /// Parse a response body.
    ///
    /// # Errors
    /// Returns [`PlumeError::Json`] if the body is not JSON of the expected shape.
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Extract the meteorological input for the current hour.
    ///
    /// A missing or null boundary-layer height is not an error; it only feeds
    /// display.
    ///
    /// # Errors
    /// Returns [`PlumeError::WeatherResponse`] if the cloud-cover series is empty
    /// or starts with null, and [`PlumeError::InvalidInput`] if a value is out of
    /// range (negative wind, cloud cover above 100 %).
    pub fn to_meteorological_input(
        &self,
        wind_unit: WindSpeedUnit,
    ) -> Result<MeteorologicalInput> {
        let windspeed = self.current_weather.windspeed;
        let wind_speed = match wind_unit {
            WindSpeedUnit::MetersPerSecond => MetersPerSecond::try_new(windspeed)?,
            WindSpeedUnit::KilometersPerHour => MetersPerSecond::try_from_kmh(windspeed)?,
        };

        let cloud = self
            .hourly
            .cloud_cover
            .first()
            .copied()
            .flatten()
            .ok_or_else(|| {
                PlumeError::WeatherResponse(
                    "hourly.cloud_cover has no value for the current hour".to_string(),
                )
            })?;

        let mut met = MeteorologicalInput::new(wind_speed, CloudCover::percent(cloud)?);
        if let Some(height) = self.hourly.boundary_layer_height.first().copied().flatten() {
            met = met.with_mixing_height(Meters::try_named("mixing height", height)?);
        }
        debug!(
            wind = met.wind_speed.value(),
            cloud,
            mixing_height = met.mixing_height.map(Meters::value),
            "weather response interpreted"
        );
        Ok(met)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::CloudCoverUnit;

    const BODY: &str = r#"{
        "latitude": 28.61,
        "longitude": 77.2,
        "current_weather": { "windspeed": 4.2, "winddirection": 270, "temperature": 31.5 },
        "hourly": {
            "time": ["2024-05-01T00:00", "2024-05-01T01:00"],
            "cloud_cover": [35, 60],
            "boundary_layer_height": [820.0, 640.0]
        }
    }"#;

    #[test]
    fn reads_first_hourly_entry() {
        let met = WeatherResponse::from_json(BODY)
            .unwrap()
            .to_meteorological_input(WindSpeedUnit::MetersPerSecond)
            .unwrap();
        assert_eq!(met.wind_speed.value(), 4.2);
        assert_eq!(met.cloud_cover.value(), 35.0);
        assert_eq!(met.cloud_cover.unit(), CloudCoverUnit::Percent);
        assert_eq!(met.mixing_height.map(Meters::value), Some(820.0));
    }

    #[test]
    fn converts_kmh() {
        let met = WeatherResponse::from_json(
            r#"{"current_weather":{"windspeed":18.0},"hourly":{"cloud_cover":[10]}}"#,
        )
        .unwrap()
        .to_meteorological_input(WindSpeedUnit::KilometersPerHour)
        .unwrap();
        assert!((met.wind_speed.value() - 5.0).abs() < 1e-12);
        assert!(met.mixing_height.is_none());
    }

    #[test]
    fn empty_cloud_series_is_an_error() {
        let response = WeatherResponse::from_json(
            r#"{"current_weather":{"windspeed":2.0},"hourly":{"cloud_cover":[]}}"#,
        )
        .unwrap();
        let err = response
            .to_meteorological_input(WindSpeedUnit::MetersPerSecond)
            .unwrap_err();
        assert!(matches!(err, PlumeError::WeatherResponse(_)));
    }

    #[test]
    fn null_first_cloud_entry_is_an_error() {
        let response = WeatherResponse::from_json(
            r#"{"current_weather":{"windspeed":2.0},"hourly":{"cloud_cover":[null, 20]}}"#,
        )
        .unwrap();
        assert!(response
            .to_meteorological_input(WindSpeedUnit::MetersPerSecond)
            .is_err());
    }

    #[test]
    fn malformed_json_maps_to_json_error() {
        let err = WeatherResponse::from_json("{\"hourly\": {}}").unwrap_err();
        assert!(matches!(err, PlumeError::Json(_)));
    }

    #[test]
    fn out_of_range_values_are_invalid_input() {
        let response = WeatherResponse::from_json(
            r#"{"current_weather":{"windspeed":-1.0},"hourly":{"cloud_cover":[10]}}"#,
        )
        .unwrap();
        assert!(matches!(
            response.to_meteorological_input(WindSpeedUnit::MetersPerSecond),
            Err(PlumeError::InvalidInput { .. })
        ));
    }
}
