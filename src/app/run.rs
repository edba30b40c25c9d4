//! Top-level entry point for running the dashboard as a native window.
//!
//! [`run_dashboard`] loads the dataset through the process-wide cache, builds
//! the app (or its load-failure screen) and enters the eframe event loop.

use eframe::egui;
use tracing::{error, info};

use crate::config::DashboardConfig;
use crate::data::dataset::shared_dataset;

use super::{DashboardApp, DashboardPanel};

/// Launch the dashboard in a native window.
///
/// The call blocks until the window is closed.
pub fn run_dashboard(mut cfg: DashboardConfig) -> eframe::Result<()> {
    let app = match shared_dataset(&cfg.data_path) {
        Ok(dataset) => {
            info!(
                records = dataset.len(),
                channels = dataset.channels().len(),
                "dataset ready"
            );
            DashboardApp::new(DashboardPanel::new(dataset, &cfg), &cfg)
        }
        Err(e) => {
            error!(path = %cfg.data_path.display(), "failed to load dataset: {e}");
            DashboardApp::failed(&e, &cfg)
        }
    };

    let title = cfg.title.clone();
    let mut opts = cfg
        .native_options
        .take()
        .unwrap_or_else(eframe::NativeOptions::default);

    // Try to set application icon from icon.svg if available.
    if opts.viewport.icon.is_none() {
        if let Some(icon) = load_app_icon_svg() {
            opts.viewport = opts.viewport.clone().with_icon(icon);
        }
    }

    // Wide layout unless the caller picked a size.
    if opts.viewport.inner_size.is_none() {
        opts.viewport = opts
            .viewport
            .clone()
            .with_inner_size(egui::vec2(1400.0, 900.0));
    }

    eframe::run_native(
        &title,
        opts,
        Box::new(|cc| {
            // Install Phosphor icon font before creating the app.
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
}

/// Attempt to load the project's `icon.svg` as an [`egui::IconData`].
///
/// Returns `None` if the file does not exist or cannot be parsed/rendered.
fn load_app_icon_svg() -> Option<egui::IconData> {
    let svg_path = concat!(env!("CARGO_MANIFEST_DIR"), "/icon.svg");
    let data = std::fs::read(svg_path).ok()?;

    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_data(&data, &opt).ok()?;
    let size = tree.size().to_int_size();
    if size.width() == 0 || size.height() == 0 {
        return None;
    }
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())?;
    let mut canvas = pixmap.as_mut();
    resvg::render(&tree, tiny_skia::Transform::default(), &mut canvas);
    let rgba = pixmap.take();
    Some(egui::IconData {
        rgba,
        width: size.width(),
        height: size.height(),
    })
}
