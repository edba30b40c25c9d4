pub mod chart_ui;
pub mod panel_trait;
pub mod selector_ui;

pub use chart_ui::ChartPanel;
pub use panel_trait::{Panel, PanelState};
pub use selector_ui::SelectorPanel;
