//! Read-path client for the coverage API consumed by the dashboard.

pub mod client;

pub use client::{CoverageApi, DateRange, PageParams};
