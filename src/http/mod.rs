//! HTTP server module for the WPA backend.
//!
//! This module provides an axum-based HTTP server that exposes the analysis
//! engine as a REST API. It reuses the service layer, the sample-source
//! seam, and the DTOs from the core library.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Request parsing and validation                         │
//! │  - JSON serialization/deserialization                     │
//! │  - CORS, compression, error handling                      │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (services/)                                │
//! │  - Statistics, interpretation, export                     │
//! │  - TTL result cache                                       │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Sample Sources (sources/)                                │
//! │  - SyntheticSource / FixedSource                          │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod handlers;

pub mod router;

pub mod state;

pub mod error;

pub mod dto;

pub use router::create_router;

pub use state::AppState;
