//! channel-dash crate root: re-exports and module wiring.
//!
//! An interactive sales-channel dashboard built on egui/eframe. It reads a
//! pre-aggregated Parquet table (one row per month and agent, with paired
//! percentage/count columns per order channel) and draws a stacked bar chart
//! in one of two views:
//! - compare several agents within one month
//! - follow one agent across months
//!
//! Modules:
//! - `data`: loading, filtering, reshaping and the chart model
//! - `panels`: the selector and chart panels
//! - `app`: window layout and the `run_dashboard` entry point
//! - `config`: configuration and the optional override file
//! - `color_scheme`: window themes

pub mod app;
pub mod color_scheme;
pub mod config;
pub mod data;
pub mod panels;

pub use app::{run_dashboard, DashboardApp, DashboardPanel};
pub use color_scheme::ColorScheme;
pub use config::{ConfigError, DashboardConfig};
pub use data::channels::{Channel, ChannelColors};
pub use data::dataset::{load_dataset, shared_dataset, Dataset, DatasetCache, LoadError};
pub use data::filter::{Selection, ViewMode};
pub use data::{compute_view, DashboardView};
