// src/view.rs
use std::sync::Arc;
use tracing::{debug, warn};

use crate::charts::{self, ChartSpec};
use crate::data_provider::DataProvider;
use crate::data_types::Tab;
use crate::ui::html_escape;

pub const NO_DATA: &str = "No data available";

#[derive(Debug, Clone)]
pub enum Message {
    TabSelected(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Selection {
    Tab(Tab),
    Unknown(String),
}

/// Charts arranged for one tab.
#[derive(Debug, Clone, PartialEq)]
pub enum Layout {
    /// Full-width chart above two half-width charts.
    Split {
        full: ChartSpec,
        left: ChartSpec,
        right: ChartSpec,
    },
    Single(ChartSpec),
    Placeholder(&'static str),
}

impl Layout {
    pub fn placeholder() -> Self {
        Layout::Placeholder(NO_DATA)
    }

    pub fn to_html(&self) -> String {
        match self {
            Layout::Split { full, left, right } => format!(
                r#"<div><div>{}</div><div>{}{}</div></div>"#,
                figure_div(full, "chart"),
                figure_div(left, "chart chart--half"),
                figure_div(right, "chart chart--half chart--right"),
            ),
            Layout::Single(chart) => format!("<div>{}</div>", figure_div(chart, "chart")),
            Layout::Placeholder(text) => format!("<div>{}</div>", html_escape(text)),
        }
    }
}

fn figure_div(chart: &ChartSpec, class: &str) -> String {
    match serde_json::to_string(chart) {
        Ok(json) => format!(
            r#"<div class="{}" data-figure="{}"></div>"#,
            class,
            html_escape(&json)
        ),
        Err(err) => {
            warn!(chart = chart.title(), %err, "failed to serialize chart");
            format!("<div class=\"{}\">{}</div>", class, NO_DATA)
        }
    }
}

/// Places built charts for `tab`; anything short of a full set shows the placeholder.
pub fn compose_layout(tab: Tab, charts: Vec<ChartSpec>) -> Layout {
    match tab {
        Tab::Csp => match <[ChartSpec; 3]>::try_from(charts) {
            Ok([full, left, right]) => Layout::Split { full, left, right },
            Err(_) => Layout::placeholder(),
        },
        Tab::Services | Tab::Applications => charts
            .into_iter()
            .next()
            .map(Layout::Single)
            .unwrap_or_else(Layout::placeholder),
    }
}

/// Tab state for one page view. Starts on the CSP tab.
pub struct Dashboard {
    provider: Arc<DataProvider>,
    selection: Selection,
}

impl Dashboard {
    pub fn new(provider: Arc<DataProvider>) -> Self {
        Dashboard {
            provider,
            selection: Selection::Tab(Tab::default()),
        }
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::TabSelected(value) => {
                self.selection = match Tab::from_value(&value) {
                    Some(tab) => Selection::Tab(tab),
                    None => {
                        debug!(tab = %value, "unknown tab selected");
                        Selection::Unknown(value)
                    }
                };
            }
        }
    }

    /// Loads the selected dataset and lays out its charts.
    pub fn view(&self) -> Layout {
        let dataset_name = match &self.selection {
            Selection::Tab(tab) => tab.dataset().sheet_name(),
            Selection::Unknown(value) => value.as_str(),
        };
        let table = self.provider.load(dataset_name);
        let charts = match table.dataset() {
            Some(dataset) => charts::build(dataset, &table),
            None => Vec::new(),
        };
        debug!(
            dataset = dataset_name,
            columns = ?table.headers(),
            rows = table.len(),
            empty = table.is_empty(),
            charts = charts.len(),
            "rendered tab"
        );

        match &self.selection {
            Selection::Tab(tab) => compose_layout(*tab, charts),
            Selection::Unknown(_) => Layout::placeholder(),
        }
    }
}
