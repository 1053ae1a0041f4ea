//! Service layer for business logic and orchestration.
//!
//! Services sit between the sample sources and the HTTP layer: the pure
//! statistics calculator, the analysis orchestrator, interpretation,
//! export rendering, and the TTL result cache.

pub mod analysis;

pub mod cache;

pub mod export;

pub mod interpretation;

pub mod statistics;

pub use analysis::{analyze_request, analyze_with_cache, AnalysisError};
pub use cache::ResultCache;
pub use export::{export_document, export_json, summary_csv, time_series_csv, ExportError};
