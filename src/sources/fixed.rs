//! Sample source backed by preloaded series.
//!
//! Used by tests, and the natural adapter for a real-data client: anything
//! that can hand over ordered (year, value) pairs plugs in here.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::models::{Sample, SampleQuery, WeatherVariable};

use super::{SampleSource, SourceError};

/// In-memory sample source serving fixed per-variable series.
#[derive(Debug, Clone, Default)]
pub struct FixedSource {
    samples: HashMap<WeatherVariable, Vec<Sample>>,
}

impl FixedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the series served for a variable.
    pub fn with_samples(mut self, variable: WeatherVariable, samples: Vec<Sample>) -> Self {
        self.samples.insert(variable, samples);
        self
    }
}

#[async_trait]
impl SampleSource for FixedSource {
    async fn fetch_samples(&self, query: &SampleQuery) -> Result<Vec<Sample>, SourceError> {
        Ok(self.samples.get(&query.variable).cloned().unwrap_or_default())
    }
}
