//! Route-specific data types.
//!
//! Each module defines the DTOs for one feature of the dashboard API. The
//! types are consolidated and re-exported through [`crate::api`].

pub mod analysis;

pub mod export;

pub mod variables;
