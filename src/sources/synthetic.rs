//! Synthetic sample generation for the demo deployment.
//!
//! Values are drawn from per-variable distributions around a location- and
//! date-informed baseline, so the dashboard shows plausible climatology
//! without any network access. In production a real NASA client replaces
//! this source behind the same trait.

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Gamma, Normal};
use sha2::{Digest, Sha256};

use crate::models::{Sample, SampleQuery, WeatherVariable};

use super::{SampleSource, SourceError};

/// Warming trend applied to synthetic temperatures, °F per year.
const TEMPERATURE_TREND_PER_YEAR: f64 = 0.2;

/// Amplitude of the synthetic seasonal temperature cycle, °F.
const SEASONAL_AMPLITUDE: f64 = 15.0;

/// In-process generator of plausible historical weather samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticSource;

impl SyntheticSource {
    pub fn new() -> Self {
        Self
    }

    fn generate<R: Rng + ?Sized>(
        &self,
        query: &SampleQuery,
        rng: &mut R,
    ) -> Result<Vec<Sample>, SourceError> {
        let draw = Draw::for_variable(query.variable)?;

        let current_year = Utc::now().year();
        let start_year = current_year - query.years as i32;
        let window = query.window_days as i32;

        let per_year = (2 * window + 1) as usize;
        let mut samples = Vec::with_capacity(query.years as usize * per_year);

        for year_index in 0..query.years as i32 {
            for offset in -window..=window {
                let day_of_year = query.target.offset_days(offset).day_of_year();
                let value = draw.sample(rng, query.latitude, day_of_year, year_index);
                samples.push(Sample::new(start_year + year_index, value));
            }
        }

        Ok(samples)
    }
}

#[async_trait]
impl SampleSource for SyntheticSource {
    async fn fetch_samples(&self, query: &SampleQuery) -> Result<Vec<Sample>, SourceError> {
        match query.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(derive_seed(seed, query));
                self.generate(query, &mut rng)
            }
            None => {
                let mut rng = rand::rng();
                self.generate(query, &mut rng)
            }
        }
    }
}

/// Pre-built sampling distribution for one variable.
enum Draw {
    Temperature(Normal<f64>),
    Precipitation(Gamma<f64>),
    WindSpeed(Gamma<f64>),
    Humidity(Normal<f64>),
    AirQuality(Gamma<f64>),
}

impl Draw {
    fn for_variable(variable: WeatherVariable) -> Result<Self, SourceError> {
        let generation = |e: &dyn std::fmt::Display| SourceError::Generation(e.to_string());
        match variable {
            WeatherVariable::Temperature => Normal::new(0.0, 8.0)
                .map(Draw::Temperature)
                .map_err(|e| generation(&e)),
            WeatherVariable::Precipitation => Gamma::new(2.0, 1.5)
                .map(Draw::Precipitation)
                .map_err(|e| generation(&e)),
            WeatherVariable::WindSpeed => Gamma::new(3.0, 5.0)
                .map(Draw::WindSpeed)
                .map_err(|e| generation(&e)),
            WeatherVariable::Humidity => Normal::new(0.0, 15.0)
                .map(Draw::Humidity)
                .map_err(|e| generation(&e)),
            WeatherVariable::AirQuality => Gamma::new(2.0, 30.0)
                .map(Draw::AirQuality)
                .map_err(|e| generation(&e)),
        }
    }

    fn sample<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        latitude: f64,
        day_of_year: u32,
        year_index: i32,
    ) -> f64 {
        match self {
            Draw::Temperature(noise) => {
                let base = 60.0 + 0.5 * latitude + seasonal_offset(latitude, day_of_year);
                base + noise.sample(rng) + TEMPERATURE_TREND_PER_YEAR * year_index as f64
            }
            Draw::Precipitation(dist) => dist.sample(rng),
            Draw::WindSpeed(dist) => dist.sample(rng),
            Draw::Humidity(noise) => (65.0 + noise.sample(rng)).clamp(0.0, 100.0),
            Draw::AirQuality(dist) => dist.sample(rng).clamp(0.0, 300.0),
        }
    }
}

/// Seasonal temperature swing: annual cycle peaking around mid-July,
/// inverted in the southern hemisphere.
fn seasonal_offset(latitude: f64, day_of_year: u32) -> f64 {
    let phase = 2.0 * std::f64::consts::PI * (day_of_year as f64 - 196.0) / 365.25;
    let hemisphere = if latitude >= 0.0 { 1.0 } else { -1.0 };
    hemisphere * SEASONAL_AMPLITUDE * phase.cos()
}

/// Fold the user seed and the query identity into one RNG seed, so each
/// (location, date, variable) series is independently reproducible.
fn derive_seed(seed: u64, query: &SampleQuery) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(format!(
        "{}|{:.4}|{:.4}|{}|{:?}",
        seed, query.latitude, query.longitude, query.target, query.variable
    ));
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}
