//! Standalone application wrapper.
//!
//! [`DashboardApp`] wraps a [`DashboardPanel`](super::DashboardPanel) and
//! implements [`eframe::App`]. When the dataset failed to load it shows the
//! error instead and never builds the panel.

use eframe::egui;

use crate::color_scheme::ColorScheme;
use crate::config::DashboardConfig;
use crate::data::dataset::LoadError;

use super::DashboardPanel;

enum Content {
    Ready(Box<DashboardPanel>),
    /// Fatal load error, shown as-is for the rest of the session.
    Failed(String),
}

pub struct DashboardApp {
    content: Content,

    /// Heading text shown at the top of the window.
    pub headline: Option<String>,

    /// Color scheme to apply to the egui context. Applied once on the first frame.
    pub color_scheme: ColorScheme,
    color_scheme_applied: bool,
}

impl DashboardApp {
    pub fn new(panel: DashboardPanel, cfg: &DashboardConfig) -> Self {
        Self {
            content: Content::Ready(Box::new(panel)),
            headline: cfg.headline.clone(),
            color_scheme: cfg.color_scheme,
            color_scheme_applied: false,
        }
    }

    pub fn failed(err: &LoadError, cfg: &DashboardConfig) -> Self {
        Self {
            content: Content::Failed(format!(
                "Não foi possível carregar {}: {err}",
                cfg.data_path.display()
            )),
            headline: cfg.headline.clone(),
            color_scheme: cfg.color_scheme,
            color_scheme_applied: false,
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.color_scheme_applied {
            self.color_scheme.apply(ctx);
            self.color_scheme_applied = true;
        }

        if let Some(h) = &self.headline {
            egui::TopBottomPanel::top("dashboard_headline").show(ctx, |ui| {
                ui.heading(h);
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| match &mut self.content {
            Content::Ready(panel) => panel.update(ui),
            Content::Failed(msg) => {
                ui.colored_label(egui::Color32::LIGHT_RED, msg.as_str());
            }
        });
    }
}
