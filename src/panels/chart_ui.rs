use eframe::egui;
use egui::{Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, GridInput, GridMark, Legend, Plot, PlotPoint, Text};

use super::panel_trait::{Panel, PanelState};
use crate::color_scheme::contrast_text_color;
use crate::data::chart::{category_tick_label, ChartSpec, Orientation};
use crate::data::{DashboardData, DashboardView, NO_DATA_WARNING};

/// Central column: the stacked bar chart, or the no-data warning.
pub struct ChartPanel {
    pub state: PanelState,
    reset_view: bool,
    show_labels: bool,
}

impl Default for ChartPanel {
    fn default() -> Self {
        Self {
            state: PanelState::new("Gráfico", egui_phosphor::regular::CHART_BAR),
            reset_view: false,
            show_labels: true,
        }
    }
}

impl ChartPanel {
    fn render_controls(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            if ui
                .button("Redefinir zoom")
                .on_hover_text("Ajusta os dois eixos ao gráfico")
                .clicked()
            {
                self.reset_view = true;
            }
            ui.checkbox(&mut self.show_labels, "Rótulos");
        });
    }

    fn render_chart(&mut self, ui: &mut Ui, chart: &ChartSpec) {
        ui.heading(&chart.title);
        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("{}:", chart.legend_title)).strong());
            for series in &chart.series {
                let text = RichText::new(format!("■ {}", series.channel));
                match series.color {
                    Some(c) => ui.label(text.color(c)),
                    None => ui.label(text),
                };
            }
        });

        let n = chart.categories.len();
        let horizontal = chart.orientation == Orientation::Horizontal;
        let cats = &chart.categories;
        let category_marks = move |_input: GridInput| -> Vec<GridMark> {
            (0..n)
                .map(|i| GridMark {
                    value: i as f64,
                    step_size: 1.0,
                })
                .collect()
        };

        let mut plot = Plot::new("channel_chart")
            .height(chart.height)
            .legend(Legend::default())
            .allow_scroll(false)
            .allow_boxed_zoom(true)
            .x_axis_label(chart.x_title)
            .y_axis_label(chart.y_title)
            .include_x(0.0)
            .include_y(0.0);
        let value_max = chart.max_stack().max(1.0) * 1.02;
        let cat_min = -0.5;
        let cat_max = n as f64 - 0.5;
        if horizontal {
            plot = plot
                .include_x(value_max)
                .include_y(cat_min)
                .include_y(cat_max)
                .y_grid_spacer(category_marks)
                .y_axis_formatter(move |mark, _range| category_tick_label(cats, mark.value));
        } else {
            plot = plot
                .include_y(value_max)
                .include_x(cat_min)
                .include_x(cat_max)
                .x_grid_spacer(category_marks)
                .x_axis_formatter(move |mark, _range| category_tick_label(cats, mark.value));
        }
        if self.reset_view {
            plot = plot.reset();
            self.reset_view = false;
        }

        let show_labels = self.show_labels;
        plot.show(ui, |plot_ui| {
            for series in &chart.series {
                let bars: Vec<Bar> = series
                    .segments
                    .iter()
                    .map(|seg| {
                        Bar::new(seg.category as f64, seg.value)
                            .base_offset(seg.base)
                            .name(format!("{}: {}", chart.categories[seg.category], seg.text))
                    })
                    .collect();
                let channel = series.channel.name();
                let mut bar_chart = BarChart::new(channel, bars)
                    .width(chart.bar_width)
                    .element_formatter(Box::new(move |bar: &Bar, _chart: &BarChart| {
                        format!("{channel}\n{}", bar.name)
                    }));
                if horizontal {
                    bar_chart = bar_chart.horizontal();
                }
                if let Some(color) = series.color {
                    bar_chart = bar_chart.color(color);
                }
                plot_ui.bar_chart(bar_chart);
            }

            if !show_labels {
                return;
            }
            for series in &chart.series {
                let text_color = series
                    .color
                    .map(contrast_text_color)
                    .unwrap_or(Color32::WHITE);
                for (i, seg) in series.segments.iter().enumerate() {
                    if seg.value <= 0.0 {
                        continue;
                    }
                    let pos = if horizontal {
                        PlotPoint::new(seg.center(), seg.category as f64)
                    } else {
                        PlotPoint::new(seg.category as f64, seg.center())
                    };
                    let rich = RichText::new(&seg.text).color(text_color).small();
                    plot_ui.text(Text::new(format!("{}_{i}", series.channel), pos, rich));
                }
            }
        });
    }
}

impl Panel for ChartPanel {
    fn state(&self) -> &PanelState {
        &self.state
    }
    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_panel(&mut self, ui: &mut Ui, data: &mut DashboardData) {
        self.render_controls(ui);
        ui.separator();
        match data.view() {
            DashboardView::Empty => {
                ui.colored_label(Color32::from_rgb(0xe6, 0xa2, 0x3c), format!("⚠ {NO_DATA_WARNING}"));
            }
            DashboardView::Chart { chart, .. } => {
                egui::ScrollArea::vertical()
                    .id_salt("chart_scroll")
                    .show(ui, |ui| self.render_chart(ui, chart));
            }
        }
    }
}
