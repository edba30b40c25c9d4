//! Data pipeline: load → filter → reshape → chart model.

pub mod channels;
pub mod chart;
pub mod dataset;
pub mod filter;
pub mod reshape;

use std::sync::Arc;

use tracing::debug;

use chart::{build_chart, ChartConfig, ChartSpec};
use channels::ChannelColors;
use dataset::Dataset;
use filter::{select, Selection};
use reshape::{reshape, LongRow};

/// Result of running the pipeline for one selection.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    Chart {
        chart: ChartSpec,
        rows: Vec<LongRow>,
    },
    /// The selection matched no records.
    Empty,
}

impl DashboardView {
    pub fn chart(&self) -> Option<&ChartSpec> {
        match self {
            DashboardView::Chart { chart, .. } => Some(chart),
            DashboardView::Empty => None,
        }
    }
}

/// Message shown in place of the chart for an empty slice.
pub const NO_DATA_WARNING: &str = "Nenhum dado disponível com os filtros selecionados.";

/// Filter, reshape and build the chart for `sel`.
pub fn compute_view(
    ds: &Dataset,
    sel: &Selection,
    colors: &ChannelColors,
    cfg: &ChartConfig,
) -> DashboardView {
    let slice = select(ds, sel);
    if slice.is_empty() {
        debug!(mode = ?sel.mode, "selection matched no records");
        return DashboardView::Empty;
    }
    let rows = reshape(&slice, ds.channels());
    match build_chart(&slice, &rows, colors, cfg) {
        Some(chart) => {
            debug!(
                mode = ?sel.mode,
                records = slice.len(),
                segments = rows.len(),
                "rebuilt chart"
            );
            DashboardView::Chart { chart, rows }
        }
        None => DashboardView::Empty,
    }
}

/// Pipeline state that re-runs only when the selection changes.
#[derive(Debug)]
pub struct DashboardData {
    pub dataset: Arc<Dataset>,
    pub selection: Selection,
    pub colors: ChannelColors,
    pub chart_cfg: ChartConfig,
    view: Option<(Selection, DashboardView)>,
}

impl DashboardData {
    pub fn new(
        dataset: Arc<Dataset>,
        agent_count: usize,
        colors: ChannelColors,
        chart_cfg: ChartConfig,
    ) -> Self {
        let selection = Selection::defaults_for(&dataset, agent_count);
        Self {
            dataset,
            selection,
            colors,
            chart_cfg,
            view: None,
        }
    }

    /// Current view, recomputed if the selection moved since the last call.
    pub fn view(&mut self) -> &DashboardView {
        let current = match self.view.take() {
            Some((sel, view)) if sel == self.selection => (sel, view),
            _ => {
                let view =
                    compute_view(&self.dataset, &self.selection, &self.colors, &self.chart_cfg);
                (self.selection.clone(), view)
            }
        };
        &self.view.insert(current).1
    }
}
