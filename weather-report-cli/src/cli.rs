use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use inquire::Select;
use weather_report_core::{
    Config, Location, LocationCatalog, UserSettings, WeatherReading, service_from_config,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-report", version, about = "Current weather from met.no")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current weather for the selected (or given) location.
    Show {
        /// Country; defaults to the saved selection.
        #[arg(long, requires = "city")]
        country: Option<String>,

        /// City; defaults to the saved selection.
        #[arg(long, requires = "country")]
        city: Option<String>,

        /// Print the reading as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List configured countries, or the cities of one country.
    Locations {
        country: Option<String>,
    },

    /// Save the location to show by default. Prompts when no location is given.
    Select {
        #[arg(requires = "city")]
        country: Option<String>,
        city: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config_path = Config::config_file_path()?;
        let config = Config::load_from(&config_path)?;
        tracing::debug!(
            path = %config_path.display(),
            locations = config.locations.len(),
            "loaded config"
        );

        match self.command {
            Command::Show { country, city, json } => {
                let location = target_location(country, city, &UserSettings::load()?)?;
                show(&config, &location, json).await?;
            }
            Command::Locations { country } => {
                let catalog = config.catalog();
                ensure_locations(&catalog)?;

                let names = match &country {
                    Some(country) => catalog.cities(country),
                    None => catalog.countries(),
                };
                if names.is_empty() {
                    println!("No cities configured for {}", country.unwrap_or_default());
                }
                for name in names {
                    println!("{name}");
                }
            }
            Command::Select { country, city } => {
                let catalog = config.catalog();
                ensure_locations(&catalog)?;

                let mut settings = UserSettings::load()?;
                let location = match (country, city) {
                    (Some(country), Some(city)) => Location::new(country, city),
                    _ => prompt_location(&catalog, &settings)?,
                };

                if catalog.resolve(&location).is_none() {
                    return Err(anyhow!(
                        "Location '{location}' is not configured.\n\
                         Hint: run `weather-report locations` to see what is available."
                    ));
                }

                settings.select(&location);
                settings.save()?;
                println!("Selected {location}");
            }
        }

        Ok(())
    }
}

/// Location given on the command line, else the saved selection.
fn target_location(
    country: Option<String>,
    city: Option<String>,
    settings: &UserSettings,
) -> anyhow::Result<Location> {
    let location = match (country, city) {
        (Some(country), Some(city)) => Location::new(country, city),
        _ => settings.selected_location().ok_or_else(|| {
            anyhow!(
                "No location selected.\n\
                 Hint: run `weather-report select` or pass --country and --city."
            )
        })?,
    };

    tracing::debug!(%location, "resolved target location");
    Ok(location)
}

async fn show(config: &Config, location: &Location, json: bool) -> anyhow::Result<()> {
    let service = service_from_config(config)?;
    let reading = service
        .get_weather(location)
        .await
        .with_context(|| format!("Could not fetch weather for {location}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reading)?);
    } else {
        let fetched_at = chrono::Local::now().format("%Y-%m-%d %H:%M");
        print!("{}", render_reading(location, &reading, &fetched_at.to_string()));
    }

    Ok(())
}

fn ensure_locations(catalog: &LocationCatalog) -> anyhow::Result<()> {
    if catalog.is_empty() {
        return Err(anyhow!(
            "No locations configured.\n\
             Hint: add [[locations]] entries to {}",
            Config::config_file_path()?.display()
        ));
    }
    Ok(())
}

/// Ask for country, then city, starting from the saved selection.
fn prompt_location(catalog: &LocationCatalog, settings: &UserSettings) -> anyhow::Result<Location> {
    let countries = catalog.countries();
    let cursor = starting_cursor(&countries, settings.selected_country.as_deref());
    let country = Select::new("Country:", countries)
        .with_starting_cursor(cursor)
        .prompt()
        .context("Country selection aborted")?
        .to_string();

    let cities = catalog.cities(&country);
    let cursor = starting_cursor(&cities, settings.selected_city.as_deref());
    let city = Select::new("City:", cities)
        .with_starting_cursor(cursor)
        .prompt()
        .context("City selection aborted")?
        .to_string();

    Ok(Location::new(country, city))
}

fn starting_cursor(options: &[&str], saved: Option<&str>) -> usize {
    saved.and_then(|saved| options.iter().position(|o| *o == saved)).unwrap_or(0)
}

fn render_reading(location: &Location, reading: &WeatherReading, fetched_at: &str) -> String {
    let mut out = format!("Weather for {location} ({fetched_at})\n");

    if reading.is_empty() {
        out.push_str("  No weather data available\n");
        return out;
    }

    if let Some(temperature) = reading.temperature {
        out.push_str(&format!("  Temperature: {temperature:.1} °C\n"));
    }

    let wind = match (reading.wind_speed, reading.wind_compass_point(), reading.wind_direction_degrees())
    {
        (Some(speed), Some(point), Some(deg)) => Some(format!("{speed:.1} m/s from {point} ({deg:.0}°)")),
        (Some(speed), _, _) => Some(format!("{speed:.1} m/s")),
        (None, Some(point), Some(deg)) => Some(format!("from {point} ({deg:.0}°)")),
        _ => None,
    };
    if let Some(wind) = wind {
        out.push_str(&format!("  Wind:        {wind}\n"));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn renders_full_reading() {
        let reading = WeatherReading {
            temperature: Some(3.5),
            wind_direction: Some(225.0 * PI / 180.0),
            wind_speed: Some(5.0),
        };

        let out = render_reading(&Location::new("Norway", "Oslo"), &reading, "2026-10-18 12:00");

        assert!(out.starts_with("Weather for Oslo, Norway (2026-10-18 12:00)"));
        assert!(out.contains("Temperature: 3.5 °C"));
        assert!(out.contains("5.0 m/s from SW (225°)"));
    }

    #[test]
    fn renders_empty_reading_as_no_data() {
        let out = render_reading(&Location::new("Nowhere", "Nowhere"), &WeatherReading::empty(), "now");
        assert!(out.contains("No weather data available"));
        assert!(!out.contains("Temperature"));
    }

    #[test]
    fn renders_speed_without_direction() {
        let reading = WeatherReading { wind_speed: Some(2.0), ..WeatherReading::empty() };
        let out = render_reading(&Location::new("Norway", "Oslo"), &reading, "now");
        assert!(out.contains("Wind:        2.0 m/s\n"));
    }

    #[test]
    fn renders_one_line_per_measurement() {
        let reading = WeatherReading {
            temperature: Some(-1.5),
            wind_direction: Some(0.0),
            wind_speed: Some(4.0),
        };
        let out = render_reading(&Location::new("Norway", "Tromsø"), &reading, "now");

        assert_eq!(
            out,
            "Weather for Tromsø, Norway (now)\n  Temperature: -1.5 °C\n  Wind:        4.0 m/s from N (0°)\n"
        );
    }

    #[test]
    fn target_location_prefers_arguments_over_saved_selection() {
        let mut settings = UserSettings::default();
        settings.select(&Location::new("Norway", "Bergen"));

        let given = target_location(Some("Sweden".into()), Some("Stockholm".into()), &settings)
            .expect("arguments win");
        assert_eq!(given, Location::new("Sweden", "Stockholm"));

        let saved = target_location(None, None, &settings).expect("saved selection");
        assert_eq!(saved, Location::new("Norway", "Bergen"));
    }

    #[test]
    fn target_location_without_selection_hints_at_select() {
        let err = target_location(None, None, &UserSettings::default()).unwrap_err();
        assert!(err.to_string().contains("weather-report select"));
    }

    #[test]
    fn starting_cursor_follows_saved_choice() {
        let options = ["Bergen", "Oslo", "Tromsø"];
        assert_eq!(starting_cursor(&options, Some("Oslo")), 1);
        assert_eq!(starting_cursor(&options, Some("Paris")), 0);
        assert_eq!(starting_cursor(&options, None), 0);
    }

    #[test]
    fn show_requires_country_and_city_together() {
        assert!(Cli::try_parse_from(["weather-report", "show", "--country", "Norway"]).is_err());

        let cli = Cli::try_parse_from([
            "weather-report",
            "show",
            "--country",
            "Norway",
            "--city",
            "Oslo",
            "--json",
        ])
        .expect("valid args");
        match cli.command {
            Command::Show { country, city, json } => {
                assert_eq!(country.as_deref(), Some("Norway"));
                assert_eq!(city.as_deref(), Some("Oslo"));
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn select_accepts_positional_location() {
        let cli = Cli::try_parse_from(["weather-report", "select", "Norway", "Oslo"]).expect("valid args");
        assert!(matches!(
            cli.command,
            Command::Select { country: Some(_), city: Some(_) }
        ));
    }
}
