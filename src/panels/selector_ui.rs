use eframe::egui;
use egui::Ui;

use super::panel_trait::{Panel, PanelState};
use crate::data::dataset::{Dataset, MonthKey};
use crate::data::filter::{available_agents, available_months, ViewMode};
use crate::data::DashboardData;

/// Left-hand column: view mode plus the month/agent pickers for that mode.
pub struct SelectorPanel {
    pub state: PanelState,
    months: Vec<MonthKey>,
    agents: Vec<String>,
}

impl SelectorPanel {
    pub fn new(ds: &Dataset) -> Self {
        Self {
            state: PanelState::new("Filtros", egui_phosphor::regular::FUNNEL),
            months: available_months(ds),
            agents: available_agents(ds),
        }
    }

    pub fn months(&self) -> &[MonthKey] {
        &self.months
    }

    pub fn agents(&self) -> &[String] {
        &self.agents
    }

    fn render_compare(&self, ui: &mut Ui, data: &mut DashboardData) {
        ui.label("Selecione o mês:");
        let selected = data
            .selection
            .month
            .as_ref()
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        egui::ComboBox::from_id_salt("month_select")
            .selected_text(selected)
            .show_ui(ui, |ui| {
                for m in &self.months {
                    ui.selectable_value(&mut data.selection.month, Some(m.clone()), m.as_str());
                }
            });

        ui.add_space(8.0);
        ui.label("Selecione vendedora(s):");
        ui.horizontal(|ui| {
            if ui.small_button("Todas").clicked() {
                data.selection.agents = self.agents.clone();
            }
            if ui.small_button("Nenhuma").clicked() {
                data.selection.agents.clear();
            }
        });
        egui::ScrollArea::vertical()
            .id_salt("agent_multiselect")
            .max_height((ui.available_height() - 8.0).max(80.0))
            .show(ui, |ui| {
                for agent in &self.agents {
                    let mut checked = data.selection.agents.contains(agent);
                    if ui.checkbox(&mut checked, agent.as_str()).changed() {
                        data.selection.toggle_agent(agent);
                    }
                }
            });
    }

    fn render_evolution(&self, ui: &mut Ui, data: &mut DashboardData) {
        ui.label("Selecione a vendedora:");
        let selected = data.selection.agent.clone().unwrap_or_default();
        egui::ComboBox::from_id_salt("agent_select")
            .selected_text(selected)
            .show_ui(ui, |ui| {
                for agent in &self.agents {
                    ui.selectable_value(&mut data.selection.agent, Some(agent.clone()), agent.as_str());
                }
            });
    }
}

impl Panel for SelectorPanel {
    fn state(&self) -> &PanelState {
        &self.state
    }
    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_panel(&mut self, ui: &mut Ui, data: &mut DashboardData) {
        ui.strong("Modo de visualização:");
        for mode in ViewMode::ALL {
            ui.radio_value(&mut data.selection.mode, mode, mode.label());
        }
        ui.separator();
        match data.selection.mode {
            ViewMode::CompareAgents => self.render_compare(ui, data),
            ViewMode::AgentEvolution => self.render_evolution(ui, data),
        }
    }
}
