//! Stacked bar chart model built from long rows.
//!
//! Everything the chart panel draws is decided here so it can be tested
//! without an egui context.

use egui::Color32;

use super::channels::{Channel, ChannelColors};
use super::filter::{FilteredSlice, ViewMode};
use super::reshape::LongRow;

pub const VALUE_AXIS_TITLE: &str = "Percentual de Pedidos (%)";
pub const AGENT_AXIS_TITLE: &str = "Vendedora";
pub const MONTH_AXIS_TITLE: &str = "Mês";
pub const LEGEND_TITLE: &str = "Canal";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Categories on the y axis, bars grow along x.
    Horizontal,
    /// Categories on the x axis, bars grow along y.
    Vertical,
}

impl From<ViewMode> for Orientation {
    fn from(mode: ViewMode) -> Self {
        match mode {
            ViewMode::CompareAgents => Orientation::Horizontal,
            ViewMode::AgentEvolution => Orientation::Vertical,
        }
    }
}

/// Sizing knobs for the chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartConfig {
    /// Chart height in points before any per-row growth.
    pub base_height: f32,
    /// Extra height per displayed record, horizontal charts only.
    pub row_height: f32,
    /// Bar thickness as a fraction of the category spacing.
    pub bar_width: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            base_height: 500.0,
            row_height: 25.0,
            bar_width: 0.7,
        }
    }
}

impl ChartConfig {
    pub fn height_for(&self, orientation: Orientation, row_count: usize) -> f32 {
        match orientation {
            Orientation::Horizontal => self.base_height + self.row_height * row_count as f32,
            Orientation::Vertical => self.base_height,
        }
    }
}

/// One stacked piece of a bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub category: usize,
    /// Where the segment starts along the value axis.
    pub base: f64,
    pub value: f64,
    pub text: String,
}

impl Segment {
    pub fn center(&self) -> f64 {
        self.base + self.value / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSeries {
    pub channel: Channel,
    /// `None` lets the plot pick from its own palette.
    pub color: Option<Color32>,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub orientation: Orientation,
    pub height: f32,
    pub bar_width: f64,
    pub categories: Vec<String>,
    pub series: Vec<ChannelSeries>,
    pub x_title: &'static str,
    pub y_title: &'static str,
    pub legend_title: &'static str,
}

impl ChartSpec {
    pub fn segment_count(&self) -> usize {
        self.series.iter().map(|s| s.segments.len()).sum()
    }

    /// Title of the axis carrying the categories.
    pub fn category_axis_title(&self) -> &'static str {
        match self.orientation {
            Orientation::Horizontal => self.y_title,
            Orientation::Vertical => self.x_title,
        }
    }

    /// Highest stacked total, used to fit the value axis.
    pub fn max_stack(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.segments.iter())
            .map(|seg| seg.base + seg.value)
            .fold(0.0, f64::max)
    }
}

/// Tick label for a category axis: the category name at integer positions,
/// nothing in between or outside the range.
pub fn category_tick_label(categories: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    categories.get(idx as usize).cloned().unwrap_or_default()
}

pub fn chart_title(label: &str) -> String {
    format!("Pedidos por Canal – {label}")
}

/// Build the chart model. Returns `None` for an empty slice; the caller shows
/// the no-data warning instead.
pub fn build_chart(
    slice: &FilteredSlice<'_>,
    rows: &[LongRow],
    colors: &ChannelColors,
    cfg: &ChartConfig,
) -> Option<ChartSpec> {
    if slice.is_empty() {
        return None;
    }
    let orientation = Orientation::from(slice.mode());

    let mut categories: Vec<String> = Vec::new();
    let mut stack_tops: Vec<f64> = Vec::new();
    let mut series: Vec<ChannelSeries> = Vec::new();
    for row in rows {
        let category = match categories.iter().position(|c| c == &row.entity) {
            Some(i) => i,
            None => {
                categories.push(row.entity.clone());
                stack_tops.push(0.0);
                categories.len() - 1
            }
        };
        let idx = match series.iter().position(|s| s.channel == row.channel) {
            Some(i) => i,
            None => {
                series.push(ChannelSeries {
                    channel: row.channel,
                    color: colors.get(row.channel),
                    segments: Vec::new(),
                });
                series.len() - 1
            }
        };
        let base = stack_tops[category];
        stack_tops[category] += row.pct;
        series[idx].segments.push(Segment {
            category,
            base,
            value: row.pct,
            text: row.text.clone(),
        });
    }

    let (x_title, y_title) = match orientation {
        Orientation::Horizontal => (VALUE_AXIS_TITLE, AGENT_AXIS_TITLE),
        Orientation::Vertical => (MONTH_AXIS_TITLE, VALUE_AXIS_TITLE),
    };

    Some(ChartSpec {
        title: chart_title(slice.label()),
        orientation,
        height: cfg.height_for(orientation, slice.len()),
        bar_width: cfg.bar_width,
        categories,
        series,
        x_title,
        y_title,
        legend_title: LEGEND_TITLE,
    })
}
