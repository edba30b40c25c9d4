//! Window themes for the dashboard.
//!
//! Chart colors are fixed per channel (see [`crate::data::channels`]); the
//! scheme only drives the egui visuals around them.

use eframe::egui::{Color32, Context, Visuals};

/// Visual theme for the dashboard window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ColorScheme {
    /// eframe default dark visuals.
    #[default]
    Dark,
    /// Light theme, closest to the hosted web dashboard.
    Light,
    /// Solarized Dark.
    SolarizedDark,
    /// Solarized Light.
    SolarizedLight,
    /// Nord: blue-grey dark theme.
    Nord,
}

impl ColorScheme {
    /// All schemes (useful for combo-box UIs).
    pub fn all() -> &'static [ColorScheme] {
        &[
            ColorScheme::Dark,
            ColorScheme::Light,
            ColorScheme::SolarizedDark,
            ColorScheme::SolarizedLight,
            ColorScheme::Nord,
        ]
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ColorScheme::Dark => "Dark",
            ColorScheme::Light => "Light",
            ColorScheme::SolarizedDark => "Solarized Dark",
            ColorScheme::SolarizedLight => "Solarized Light",
            ColorScheme::Nord => "Nord",
        }
    }

    /// Case-insensitive lookup by label, ignoring spaces, dashes and underscores.
    pub fn from_name(name: &str) -> Option<ColorScheme> {
        let norm = |s: &str| {
            s.chars()
                .filter(|c| !matches!(c, ' ' | '-' | '_'))
                .flat_map(char::to_lowercase)
                .collect::<String>()
        };
        let wanted = norm(name);
        Self::all()
            .iter()
            .copied()
            .find(|s| norm(s.label()) == wanted)
    }

    /// Apply this scheme's visuals to an egui context.
    pub fn apply(&self, ctx: &Context) {
        match self {
            ColorScheme::Dark => ctx.set_visuals(Visuals::dark()),
            ColorScheme::Light => ctx.set_visuals(Visuals::light()),
            ColorScheme::SolarizedDark => {
                let mut v = Visuals::dark();
                let base03 = Color32::from_rgb(0, 43, 54);
                let base02 = Color32::from_rgb(7, 54, 66);
                let base01 = Color32::from_rgb(88, 110, 117);
                let base0 = Color32::from_rgb(131, 148, 150);
                v.panel_fill = base03;
                v.window_fill = base02;
                v.extreme_bg_color = base03;
                v.faint_bg_color = base02;
                v.override_text_color = Some(base0);
                v.widgets.noninteractive.bg_fill = base02;
                v.widgets.noninteractive.fg_stroke.color = base0;
                v.widgets.inactive.bg_fill = base02;
                v.widgets.inactive.fg_stroke.color = base01;
                v.widgets.hovered.bg_fill = base01;
                v.widgets.active.bg_fill = base01;
                ctx.set_visuals(v);
            }
            ColorScheme::SolarizedLight => {
                let mut v = Visuals::light();
                let base3 = Color32::from_rgb(253, 246, 227);
                let base2 = Color32::from_rgb(238, 232, 213);
                let base00 = Color32::from_rgb(101, 123, 131);
                v.panel_fill = base3;
                v.window_fill = base2;
                v.extreme_bg_color = base3;
                v.faint_bg_color = base2;
                v.override_text_color = Some(base00);
                v.widgets.noninteractive.bg_fill = base2;
                v.widgets.noninteractive.fg_stroke.color = base00;
                v.widgets.inactive.bg_fill = base2;
                v.widgets.inactive.fg_stroke.color = base00;
                ctx.set_visuals(v);
            }
            ColorScheme::Nord => {
                let mut v = Visuals::dark();
                let polar0 = Color32::from_rgb(46, 52, 64);
                let polar1 = Color32::from_rgb(59, 66, 82);
                let snow0 = Color32::from_rgb(216, 222, 233);
                let snow1 = Color32::from_rgb(229, 233, 240);
                v.panel_fill = polar0;
                v.window_fill = polar1;
                v.extreme_bg_color = polar0;
                v.faint_bg_color = polar1;
                v.override_text_color = Some(snow0);
                v.widgets.noninteractive.bg_fill = polar1;
                v.widgets.noninteractive.fg_stroke.color = snow0;
                v.widgets.inactive.fg_stroke.color = snow1;
                v.widgets.hovered.bg_fill = Color32::from_rgb(76, 86, 106);
                ctx.set_visuals(v);
            }
        }
    }
}

/// Black or white, whichever reads better on top of `fill`.
pub fn contrast_text_color(fill: Color32) -> Color32 {
    // Rec. 601 luma
    let luma = 0.299 * fill.r() as f32 + 0.587 * fill.g() as f32 + 0.114 * fill.b() as f32;
    if luma > 150.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_is_forgiving() {
        assert_eq!(ColorScheme::from_name("solarized-dark"), Some(ColorScheme::SolarizedDark));
        assert_eq!(ColorScheme::from_name("LIGHT"), Some(ColorScheme::Light));
        assert_eq!(ColorScheme::from_name("neon"), None);
    }

    #[test]
    fn contrast_picks_readable_text() {
        assert_eq!(contrast_text_color(Color32::from_rgb(0x98, 0xdf, 0x8a)), Color32::BLACK);
        assert_eq!(contrast_text_color(Color32::from_rgb(0x1f, 0x77, 0xb4)), Color32::WHITE);
    }
}
