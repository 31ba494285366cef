use crate::{Config, Location, WeatherReading, error::WeatherServiceFailure};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod yr;

pub use yr::YrWeatherService;

/// Source of current weather for a configured location.
///
/// An unconfigured location or a sparse upstream payload yields
/// `WeatherReading::empty()`; only transport failures are errors.
#[async_trait]
pub trait WeatherService: Send + Sync + Debug {
    async fn get_weather(&self, location: &Location) -> Result<WeatherReading, WeatherServiceFailure>;
}

/// Construct the weather service described by config.
pub fn service_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherService>> {
    Ok(Box::new(YrWeatherService::from_config(config)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LocationSettings;

    #[tokio::test]
    async fn service_from_config_serves_unknown_location_as_empty() {
        let cfg = Config {
            locations: vec![LocationSettings {
                country: "Norway".into(),
                city: "Oslo".into(),
                lat: 59.91,
                long: 10.75,
            }],
            ..Config::default()
        };

        let service = service_from_config(&cfg).expect("service builds");
        let reading = service
            .get_weather(&Location::new("Nowhere", "Nowhere"))
            .await
            .expect("unknown location is not an error");
        assert!(reading.is_empty());
    }
}
