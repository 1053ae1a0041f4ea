//! Sample sources.
//!
//! A [`SampleSource`] produces ordered (year, value) samples for one variable
//! at one location/date. The statistics engine never depends on which
//! implementation is active: the demo uses [`SyntheticSource`], tests and a
//! future real-data client go through [`FixedSource`] or their own impl.

pub mod fixed;
pub mod synthetic;

pub use fixed::FixedSource;
pub use synthetic::SyntheticSource;

use async_trait::async_trait;

use crate::models::{Sample, SampleQuery, WeatherVariable};

/// Error type for sample source operations.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Sample generation failed (invalid distribution parameters etc.)
    #[error("Sample generation failed: {0}")]
    Generation(String),

    /// The backing dataset could not be reached.
    #[error("Data source unavailable: {0}")]
    Unavailable(String),
}

/// A provider of historical weather samples.
///
/// Implementations must return samples ordered by year; an empty vector
/// means no data is available for the query (the analysis reports a
/// `no_data` outcome for that variable).
#[async_trait]
pub trait SampleSource: Send + Sync {
    /// Produce the historical series for the query.
    async fn fetch_samples(&self, query: &SampleQuery) -> Result<Vec<Sample>, SourceError>;

    /// Label of the backing dataset for a variable.
    fn dataset_label(&self, variable: WeatherVariable) -> String {
        variable.data_source().to_string()
    }
}
