//! # WPA Rust Backend
//!
//! Weather probability analysis engine.
//!
//! This crate provides the Rust backend for the Weather Probability Analyzer (WPA)
//! dashboard. Given a location, a target date, and a set of weather variables, it
//! computes historical probability statistics (mean, percentiles, exceedance
//! probability, long-term trend) over simulated NASA Earth observation data and
//! exposes them to the React frontend through a REST API, including CSV/JSON export.
//!
//! ## Features
//!
//! - **Sample Sources**: Pluggable data sources behind the [`sources::SampleSource`]
//!   trait (synthetic generator for the demo, preloaded samples for testing or a
//!   future real-data client)
//! - **Statistics**: Descriptive statistics, linear-interpolation percentiles,
//!   threshold exceedance probability, and OLS trend estimation
//! - **Interpretation**: Risk banding and natural-language summaries per variable
//! - **Export**: Summary CSV, time-series CSV, and JSON report documents
//! - **Caching**: Short-TTL in-memory memoization of repeated analysis requests
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Shared API types and consolidated DTO re-exports
//! - [`config`]: Analysis/cache configuration (TOML file + environment overrides)
//! - [`models`]: Domain model (weather variables, samples, analysis requests)
//! - [`sources`]: Sample source trait and implementations
//! - [`routes`]: Route-specific data types
//! - [`services`]: Business logic (statistics, orchestration, export, cache)
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod api;

pub mod config;
pub mod models;

pub mod routes;

pub mod services;

pub mod sources;

#[cfg(feature = "http-server")]
pub mod http;
