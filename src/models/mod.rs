//! Core data models for activity history.

mod activity;
mod filter;
mod sort;

pub use activity::*;
pub use filter::*;
pub use sort::*;
