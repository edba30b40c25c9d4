//! Per-frame layout for [`DashboardPanel`].
//!
//! The filter column sits in a resizable left side panel (about a fifth of
//! the window); the chart fills the rest.

use eframe::egui;

use crate::panels::panel_trait::Panel;

use super::DashboardPanel;

impl DashboardPanel {
    /// Draw one frame. The pipeline only re-runs when the selection changed.
    pub fn update(&mut self, ui: &mut egui::Ui) {
        let width = ui.available_width();
        let mut list = std::mem::take(&mut self.left_side_panels);
        if list.iter().any(|p| p.state().visible) {
            egui::SidePanel::left("dashboard_filters")
                .resizable(true)
                .default_width((width * 0.2).max(220.0))
                .min_width(180.0)
                .show_inside(ui, |ui| {
                    for p in list.iter_mut().filter(|p| p.state().visible) {
                        ui.heading(p.title_and_icon());
                        p.render_panel(ui, &mut self.data);
                        ui.add_space(8.0);
                    }
                });
        }
        self.left_side_panels = list;

        egui::CentralPanel::default().show_inside(ui, |ui| {
            self.chart_panel.render_panel(ui, &mut self.data);
        });
    }
}
