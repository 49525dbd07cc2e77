// src/charts.rs
//! Plotly figure specifications for each dataset.
//!
//! Everything here is a pure function of the table it is given; the browser
//! side only hands the serialized `{data, layout}` pair to `Plotly.newPlot`.

use serde::Serialize;

use crate::data_types::{ApplicationCost, CspSpend, Dataset, ServiceCost, TableData};
use crate::ui::PALETTE;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub data: Vec<Trace>,
    pub layout: ChartLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Bar(BarTrace),
    Waterfall(WaterfallTrace),
    Heatmap(HeatmapTrace),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarTrace {
    pub name: String,
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub marker: Marker,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterfallTrace {
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub text: Vec<String>,
    pub textposition: &'static str,
    pub increasing: BarStyle,
    pub decreasing: BarStyle,
    pub totals: BarStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapTrace {
    pub z: Vec<Vec<f64>>,
    pub x: Vec<String>,
    pub y: Vec<String>,
    pub colorscale: Vec<(f64, String)>,
    pub showscale: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarStyle {
    pub marker: Marker,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLayout {
    pub title: Title,
    pub font: Font,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barmode: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub family: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub x: String,
    pub y: String,
    pub text: String,
    pub showarrow: bool,
    pub font: Font,
}

impl ChartSpec {
    fn new(title: &str, data: Vec<Trace>) -> Self {
        ChartSpec {
            data,
            layout: ChartLayout {
                title: Title {
                    text: title.to_string(),
                },
                font: font(),
                barmode: None,
                annotations: Vec::new(),
            },
        }
    }

    pub fn title(&self) -> &str {
        &self.layout.title.text
    }
}

/// `$` followed by the plain number, no grouping: 12000 -> `$12000`.
pub fn format_currency(value: f64) -> String {
    format!("${}", value)
}

fn font() -> Font {
    Font {
        family: PALETTE.font_family.clone(),
    }
}

fn marker(color: &str) -> Marker {
    Marker {
        color: color.to_string(),
    }
}

/// Builds the charts for one dataset. Mismatched or empty tables give no charts.
pub fn build(dataset: Dataset, table: &TableData) -> Vec<ChartSpec> {
    match (dataset, table) {
        (Dataset::Csp, TableData::Csp(rows)) if !rows.is_empty() => csp_charts(rows),
        (Dataset::Services, TableData::Services(rows)) if !rows.is_empty() => {
            vec![service_heatmap(rows)]
        }
        (Dataset::Applications, TableData::Applications(rows)) if !rows.is_empty() => {
            vec![application_bar(rows)]
        }
        _ => Vec::new(),
    }
}

fn csp_charts(rows: &[CspSpend]) -> Vec<ChartSpec> {
    let providers: Vec<String> = rows.iter().map(|row| row.csp.clone()).collect();
    let services: Vec<f64> = rows.iter().map(|row| row.services_spend).collect();
    let marketplace: Vec<f64> = rows.iter().map(|row| row.marketplace_spend).collect();

    let mut totals = ChartSpec::new(
        "CSP Total Cost",
        vec![
            Trace::Bar(BarTrace {
                name: "ServicesSpend".to_string(),
                x: providers.clone(),
                y: services.clone(),
                marker: marker(&PALETTE.primary),
            }),
            Trace::Bar(BarTrace {
                name: "MarketplaceSpend".to_string(),
                x: providers.clone(),
                y: marketplace.clone(),
                marker: marker(&PALETTE.light),
            }),
        ],
    );
    totals.layout.barmode = Some("group");

    vec![
        totals,
        waterfall("Services Spend", providers.clone(), services),
        waterfall("Marketplace Spend", providers, marketplace),
    ]
}

fn waterfall(title: &str, x: Vec<String>, y: Vec<f64>) -> ChartSpec {
    let text = y.iter().copied().map(format_currency).collect();
    ChartSpec::new(
        title,
        vec![Trace::Waterfall(WaterfallTrace {
            x,
            y,
            text,
            textposition: "outside",
            increasing: BarStyle {
                marker: marker(&PALETTE.primary),
            },
            decreasing: BarStyle {
                marker: marker(&PALETTE.light),
            },
            totals: BarStyle {
                marker: marker(&PALETTE.primary),
            },
        })],
    )
}

fn service_heatmap(rows: &[ServiceCost]) -> ChartSpec {
    let services: Vec<String> = rows.iter().map(|row| row.service.clone()).collect();
    let costs: Vec<f64> = rows.iter().map(|row| row.cost).collect();

    let mut chart = ChartSpec::new(
        "Service Cost Heatmap",
        vec![Trace::Heatmap(HeatmapTrace {
            z: vec![costs],
            x: services,
            y: vec!["Cost".to_string()],
            colorscale: vec![(0.0, PALETTE.light.clone()), (1.0, PALETTE.primary.clone())],
            showscale: true,
        })],
    );
    chart.layout.annotations = rows
        .iter()
        .map(|row| Annotation {
            x: row.service.clone(),
            y: "Cost".to_string(),
            text: format_currency(row.cost),
            showarrow: false,
            font: font(),
        })
        .collect();
    chart
}

fn application_bar(rows: &[ApplicationCost]) -> ChartSpec {
    ChartSpec::new(
        "Cost by Application",
        vec![Trace::Bar(BarTrace {
            name: "Cost".to_string(),
            x: rows.iter().map(|row| row.application.clone()).collect(),
            y: rows.iter().map(|row| row.cost).collect(),
            marker: marker(&PALETTE.primary),
        })],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_provider::fallback_table;

    /// Category labels of the first trace.
    fn category_axis(chart: &ChartSpec) -> &[String] {
        match chart.data.first() {
            Some(Trace::Bar(trace)) => &trace.x,
            Some(Trace::Waterfall(trace)) => &trace.x,
            Some(Trace::Heatmap(trace)) => &trace.x,
            None => &[],
        }
    }

    /// Text drawn next to each bar or cell.
    fn value_labels(chart: &ChartSpec) -> Vec<&str> {
        match chart.data.first() {
            Some(Trace::Waterfall(trace)) => trace.text.iter().map(String::as_str).collect(),
            Some(Trace::Heatmap(_)) => chart
                .layout
                .annotations
                .iter()
                .map(|annotation| annotation.text.as_str())
                .collect(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn currency_has_no_grouping_or_trailing_zeroes() {
        assert_eq!(format_currency(12000.0), "$12000");
        assert_eq!(format_currency(8500.5), "$8500.5");
        assert_eq!(format_currency(0.0), "$0");
    }

    #[test]
    fn applications_bar_keeps_row_order() {
        let table = TableData::Applications(vec![
            ApplicationCost {
                application: "Zeta".to_string(),
                cost: 1.0,
            },
            ApplicationCost {
                application: "Alpha".to_string(),
                cost: 2.0,
            },
        ]);
        let charts = build(Dataset::Applications, &table);
        assert_eq!(charts.len(), 1);
        assert_eq!(category_axis(&charts[0]), ["Zeta", "Alpha"]);
        assert_eq!(charts[0].title(), "Cost by Application");
        match &charts[0].data[0] {
            Trace::Bar(trace) => {
                assert_eq!(trace.y, vec![1.0, 2.0]);
                assert_eq!(trace.marker.color, "#005eb8");
            }
            other => panic!("expected bar trace, got {:?}", other),
        }
    }

    #[test]
    fn csp_waterfalls_label_each_value() {
        let charts = build(Dataset::Csp, &fallback_table(Dataset::Csp));
        assert_eq!(charts.len(), 3);
        assert_eq!(charts[0].title(), "CSP Total Cost");
        assert_eq!(charts[0].data.len(), 2);
        assert_eq!(charts[0].layout.barmode, Some("group"));
        assert_eq!(value_labels(&charts[1]), ["$7000", "$5000", "$3000"]);
        assert_eq!(value_labels(&charts[2]), ["$2000", "$1500", "$1000"]);
        assert_eq!(category_axis(&charts[1]), ["AWS", "Azure", "GCP"]);
    }

    #[test]
    fn services_heatmap_annotates_every_cell() {
        let charts = build(Dataset::Services, &fallback_table(Dataset::Services));
        assert_eq!(charts.len(), 1);
        let heatmap = &charts[0];
        assert_eq!(category_axis(&heatmap), ["Compute", "Database", "Storage"]);
        assert_eq!(value_labels(&heatmap), ["$12000", "$8500", "$6000"]);
        assert!(heatmap.layout.annotations.iter().all(|a| a.y == "Cost" && !a.showarrow));
    }

    #[test]
    fn empty_or_mismatched_tables_give_no_charts() {
        assert!(build(Dataset::Csp, &TableData::Empty).is_empty());
        assert!(build(Dataset::Services, &TableData::Services(Vec::new())).is_empty());
        assert!(build(Dataset::Csp, &fallback_table(Dataset::Services)).is_empty());
    }

    #[test]
    fn serializes_as_plotly_figure() {
        let charts = build(Dataset::Services, &fallback_table(Dataset::Services));
        let json = serde_json::to_value(&charts[0]).unwrap();
        assert_eq!(json["data"][0]["type"], "heatmap");
        assert_eq!(json["data"][0]["z"][0][1], 8500.0);
        assert_eq!(json["data"][0]["colorscale"][1][1], "#005eb8");
        assert_eq!(json["layout"]["font"]["family"], "Aptos, Calibri");
        assert!(json["layout"].get("barmode").is_none());
    }
}
