//! Weather variable catalog.
//!
//! Each variable carries the metadata the rest of the system needs: display
//! units, the NASA dataset it is (nominally) derived from, and the default
//! exceedance threshold used when the request does not supply one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Weather variables supported by the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherVariable {
    Temperature,
    Precipitation,
    WindSpeed,
    Humidity,
    AirQuality,
}

impl WeatherVariable {
    /// All supported variables, in catalog order.
    pub const ALL: [WeatherVariable; 5] = [
        WeatherVariable::Temperature,
        WeatherVariable::Precipitation,
        WeatherVariable::WindSpeed,
        WeatherVariable::Humidity,
        WeatherVariable::AirQuality,
    ];

    /// Human-readable display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            WeatherVariable::Temperature => "Temperature",
            WeatherVariable::Precipitation => "Precipitation",
            WeatherVariable::WindSpeed => "Wind Speed",
            WeatherVariable::Humidity => "Humidity",
            WeatherVariable::AirQuality => "Air Quality",
        }
    }

    /// Display units for values of this variable.
    pub fn units(&self) -> &'static str {
        match self {
            WeatherVariable::Temperature => "°F",
            WeatherVariable::Precipitation => "inches",
            WeatherVariable::WindSpeed => "mph",
            WeatherVariable::Humidity => "%",
            WeatherVariable::AirQuality => "AQI",
        }
    }

    /// NASA dataset this variable is derived from.
    pub fn data_source(&self) -> &'static str {
        match self {
            WeatherVariable::Temperature => "MERRA-2",
            WeatherVariable::Precipitation => "GPM IMERG",
            WeatherVariable::WindSpeed => "MERRA-2",
            WeatherVariable::Humidity => "MERRA-2",
            WeatherVariable::AirQuality => "MODIS",
        }
    }

    /// Exceedance threshold applied when the request does not supply one.
    pub fn default_threshold(&self) -> f64 {
        match self {
            WeatherVariable::Temperature => 90.0,
            WeatherVariable::Precipitation => 2.0,
            WeatherVariable::WindSpeed => 25.0,
            WeatherVariable::Humidity => 80.0,
            WeatherVariable::AirQuality => 100.0,
        }
    }

    /// Typical magnitude of observed values, used to scale the tolerance
    /// below which a per-decade trend is labeled "stable".
    pub fn typical_magnitude(&self) -> f64 {
        match self {
            WeatherVariable::Temperature => 60.0,
            WeatherVariable::Precipitation => 1.5,
            WeatherVariable::WindSpeed => 15.0,
            WeatherVariable::Humidity => 65.0,
            WeatherVariable::AirQuality => 60.0,
        }
    }
}

impl fmt::Display for WeatherVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for WeatherVariable {
    type Err = String;

    /// Parse either the wire form (`wind_speed`) or the display form
    /// (`Wind Speed`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "temperature" => Ok(WeatherVariable::Temperature),
            "precipitation" => Ok(WeatherVariable::Precipitation),
            "wind_speed" => Ok(WeatherVariable::WindSpeed),
            "humidity" => Ok(WeatherVariable::Humidity),
            "air_quality" => Ok(WeatherVariable::AirQuality),
            _ => Err(format!("Unknown weather variable '{}'", s)),
        }
    }
}
