//! Dashboard UI state and terminal rendering.

pub mod state;
pub mod view;

pub use state::{DashboardState, RequestToken, Slice, TimeRange};
