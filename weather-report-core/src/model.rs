use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A place the user wants weather for, identified by country and city.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub country: String,
    pub city: String,
}

impl Location {
    pub fn new(country: impl Into<String>, city: impl Into<String>) -> Self {
        Self { country: country.into(), city: city.into() }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.city, self.country)
    }
}

/// Coordinates configured for a single location.
///
/// Example TOML:
/// [[locations]]
/// country = "Norway"
/// city = "Oslo"
/// lat = 59.91
/// long = 10.75
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSettings {
    pub country: String,
    pub city: String,
    pub lat: f64,
    pub long: f64,
}

impl LocationSettings {
    pub fn location(&self) -> Location {
        Location::new(self.country.as_str(), self.city.as_str())
    }

    /// Exact, case-sensitive match on both country and city.
    pub fn matches(&self, location: &Location) -> bool {
        self.country == location.country && self.city == location.city
    }
}

const COMPASS_POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Point-in-time weather for a location.
///
/// Every measurement is independently optional. A reading with nothing set is
/// the "no data" answer and is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WeatherReading {
    /// Air temperature in °C.
    pub temperature: Option<f64>,
    /// Direction the wind blows from, in radians. 0 is north, clockwise.
    pub wind_direction: Option<f64>,
    /// Wind speed in m/s.
    pub wind_speed: Option<f64>,
}

impl WeatherReading {
    pub const fn empty() -> Self {
        Self { temperature: None, wind_direction: None, wind_speed: None }
    }

    pub fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.wind_direction.is_none() && self.wind_speed.is_none()
    }

    pub fn wind_direction_degrees(&self) -> Option<f64> {
        self.wind_direction.map(|rad| (rad * 180.0 / PI).rem_euclid(360.0))
    }

    /// 8-point compass name for the wind direction, e.g. "SW".
    pub fn wind_compass_point(&self) -> Option<&'static str> {
        self.wind_direction_degrees().map(|deg| {
            let idx = ((deg + 22.5) / 45.0).floor() as usize % COMPASS_POINTS.len();
            COMPASS_POINTS[idx]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_reading_has_no_fields() {
        let reading = WeatherReading::empty();
        assert!(reading.is_empty());
        assert_eq!(reading, WeatherReading::default());
        assert_eq!(reading.wind_compass_point(), None);
    }

    #[test]
    fn partial_reading_is_not_empty() {
        let reading = WeatherReading { temperature: Some(-2.0), ..WeatherReading::empty() };
        assert!(!reading.is_empty());
    }

    #[test]
    fn settings_match_is_case_sensitive() {
        let settings = LocationSettings {
            country: "Norway".into(),
            city: "Oslo".into(),
            lat: 59.91,
            long: 10.75,
        };

        assert!(settings.matches(&Location::new("Norway", "Oslo")));
        assert!(!settings.matches(&Location::new("norway", "Oslo")));
        assert!(!settings.matches(&Location::new("Norway", "Bergen")));
        assert_eq!(settings.location(), Location::new("Norway", "Oslo"));
    }

    #[test]
    fn compass_point_from_radians() {
        let at = |rad: f64| WeatherReading { wind_direction: Some(rad), ..WeatherReading::empty() };

        assert_eq!(at(0.0).wind_compass_point(), Some("N"));
        assert_eq!(at(0.25 * PI).wind_compass_point(), Some("NE"));
        assert_eq!(at(1.25 * PI).wind_compass_point(), Some("SW"));
        assert_eq!(at(1.95 * PI).wind_compass_point(), Some("N"));
    }

    #[test]
    fn degrees_wrap_into_range() {
        let reading = WeatherReading { wind_direction: Some(-0.5 * PI), ..WeatherReading::empty() };
        let deg = reading.wind_direction_degrees().expect("direction is set");
        assert!((deg - 270.0).abs() < 1e-9);
    }
}
