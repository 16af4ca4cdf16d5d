//! Coverage reporter library.
//!
//! Parses Istanbul coverage output, submits normalized coverage records to
//! the coverage API backend, and fetches aggregated summaries and trends for
//! the dashboard.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod services;
