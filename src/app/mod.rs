//! Main application module for the dashboard.
//!
//! | Sub-module        | Responsibility |
//! | ----------------- | -------------- |
//! | [`update`]        | Per-frame layout: selector column and chart column |
//! | [`dashboard_app`] | Standalone [`DashboardApp`] (eframe) wrapper, theme and load-failure screen |
//! | [`run`]           | Top-level [`run_dashboard()`] entry point and icon loading |

mod dashboard_app;
mod run;
mod update;

pub use dashboard_app::DashboardApp;
pub use run::run_dashboard;

use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::data::dataset::Dataset;
use crate::data::DashboardData;
use crate::panels::chart_ui::ChartPanel;
use crate::panels::panel_trait::Panel;
use crate::panels::selector_ui::SelectorPanel;

/// The dashboard widget: pipeline state plus the panels that edit and draw it.
///
/// Can be driven by [`DashboardApp`] or embedded in a parent egui application
/// through [`DashboardPanel::update`].
pub struct DashboardPanel {
    /// Loaded dataset, current selection and cached view.
    pub data: DashboardData,

    /// Panels docked on the left (the filter column).
    pub left_side_panels: Vec<Box<dyn Panel>>,

    /// The chart filling the remaining space.
    pub chart_panel: ChartPanel,
}

impl DashboardPanel {
    pub fn new(dataset: Arc<Dataset>, cfg: &DashboardConfig) -> Self {
        let selector = SelectorPanel::new(&dataset);
        Self {
            data: DashboardData::new(
                dataset,
                cfg.default_agent_count,
                cfg.channel_colors.clone(),
                cfg.chart,
            ),
            left_side_panels: vec![Box::new(selector)],
            chart_panel: ChartPanel::default(),
        }
    }
}
