//! View modes, user selections and the slices they select.

use std::collections::BTreeSet;

use super::dataset::{AggregatedRecord, Dataset, MonthKey};

/// Number of agents pre-selected in compare mode.
pub const DEFAULT_AGENT_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    /// Several agents side by side within one month.
    #[default]
    CompareAgents,
    /// One agent across every month.
    AgentEvolution,
}

impl ViewMode {
    pub const ALL: [ViewMode; 2] = [ViewMode::CompareAgents, ViewMode::AgentEvolution];

    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::CompareAgents => "Comparar vendedoras em um mês",
            ViewMode::AgentEvolution => "Evolução de uma vendedora",
        }
    }
}

/// Sorted unique months of the dataset.
pub fn available_months(ds: &Dataset) -> Vec<MonthKey> {
    let set: BTreeSet<&MonthKey> = ds.records().iter().map(|r| &r.month).collect();
    set.into_iter().cloned().collect()
}

/// Sorted unique agents of the dataset.
pub fn available_agents(ds: &Dataset) -> Vec<String> {
    let set: BTreeSet<&str> = ds.records().iter().map(|r| r.agent.as_str()).collect();
    set.into_iter().map(str::to_string).collect()
}

/// Most recent month.
pub fn default_month(months: &[MonthKey]) -> Option<MonthKey> {
    months.last().cloned()
}

/// First `count` agents of the sorted list.
pub fn default_agents(agents: &[String], count: usize) -> Vec<String> {
    agents.iter().take(count).cloned().collect()
}

pub fn default_agent(agents: &[String]) -> Option<String> {
    agents.first().cloned()
}

/// Everything the user picked in the side panel.
///
/// Both modes keep their own inputs so switching back and forth does not
/// lose the other mode's picks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    pub mode: ViewMode,
    pub month: Option<MonthKey>,
    pub agents: Vec<String>,
    pub agent: Option<String>,
}

impl Selection {
    pub fn defaults_for(ds: &Dataset, agent_count: usize) -> Self {
        let months = available_months(ds);
        let agents = available_agents(ds);
        Self {
            mode: ViewMode::CompareAgents,
            month: default_month(&months),
            agents: default_agents(&agents, agent_count),
            agent: default_agent(&agents),
        }
    }

    /// Toggle an agent in the compare-mode set, keeping the set sorted.
    pub fn toggle_agent(&mut self, agent: &str) {
        if let Some(pos) = self.agents.iter().position(|a| a == agent) {
            self.agents.remove(pos);
        } else {
            self.agents.push(agent.to_string());
            self.agents.sort();
        }
    }
}

/// Records picked by a selection, borrowed from the dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum FilteredSlice<'a> {
    Compare {
        month: MonthKey,
        rows: Vec<&'a AggregatedRecord>,
    },
    Evolution {
        agent: String,
        rows: Vec<&'a AggregatedRecord>,
    },
}

impl<'a> FilteredSlice<'a> {
    pub fn rows(&self) -> &[&'a AggregatedRecord] {
        match self {
            FilteredSlice::Compare { rows, .. } | FilteredSlice::Evolution { rows, .. } => rows,
        }
    }

    pub fn mode(&self) -> ViewMode {
        match self {
            FilteredSlice::Compare { .. } => ViewMode::CompareAgents,
            FilteredSlice::Evolution { .. } => ViewMode::AgentEvolution,
        }
    }

    /// Selected month in compare mode, selected agent in evolution mode.
    pub fn label(&self) -> &str {
        match self {
            FilteredSlice::Compare { month, .. } => month.as_str(),
            FilteredSlice::Evolution { agent, .. } => agent,
        }
    }

    pub fn len(&self) -> usize {
        self.rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }
}

/// Rows of `month` whose agent is in `agents`, in dataset order.
pub fn compare_slice<'a>(ds: &'a Dataset, month: &MonthKey, agents: &[String]) -> FilteredSlice<'a> {
    let rows = ds
        .records()
        .iter()
        .filter(|r| &r.month == month && agents.iter().any(|a| a == &r.agent))
        .collect();
    FilteredSlice::Compare {
        month: month.clone(),
        rows,
    }
}

/// Every row of `agent`, ascending by month.
pub fn evolution_slice<'a>(ds: &'a Dataset, agent: &str) -> FilteredSlice<'a> {
    let mut rows: Vec<&AggregatedRecord> =
        ds.records().iter().filter(|r| r.agent == agent).collect();
    rows.sort_by(|a, b| a.month.cmp(&b.month));
    FilteredSlice::Evolution {
        agent: agent.to_string(),
        rows,
    }
}

/// Apply a selection. A missing month or agent (empty dataset) selects nothing.
pub fn select<'a>(ds: &'a Dataset, sel: &Selection) -> FilteredSlice<'a> {
    match sel.mode {
        ViewMode::CompareAgents => match &sel.month {
            Some(month) => compare_slice(ds, month, &sel.agents),
            None => FilteredSlice::Compare {
                month: MonthKey::default(),
                rows: Vec::new(),
            },
        },
        ViewMode::AgentEvolution => match &sel.agent {
            Some(agent) => evolution_slice(ds, agent),
            None => FilteredSlice::Evolution {
                agent: String::new(),
                rows: Vec::new(),
            },
        },
    }
}
