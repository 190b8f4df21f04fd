//! gpacalc-core — Course roster, lookup tables, and weighted GPA aggregation.
//!
//! This crate defines the data model, the grade-point and year-weight tables,
//! and the aggregation logic that the rest of gpacalc builds on.

pub mod aggregator;
pub mod config;
pub mod error;
pub mod model;
pub mod roster;
pub mod session;
pub mod tables;

pub use error::GpaError;
