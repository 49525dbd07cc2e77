// src/data_types.rs
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The three named worksheets the dashboard knows how to chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Services,
    Csp,
    Applications,
}

impl Dataset {
    pub const ALL: [Dataset; 3] = [Dataset::Services, Dataset::Csp, Dataset::Applications];

    pub fn sheet_name(&self) -> &'static str {
        match self {
            Dataset::Services => "Services",
            Dataset::Csp => "CSP",
            Dataset::Applications => "Applications",
        }
    }

    pub fn from_sheet_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|dataset| dataset.sheet_name() == name)
    }

    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Dataset::Services => &["Service", "Cost"],
            Dataset::Csp => &["CSP", "ServicesSpend", "MarketplaceSpend"],
            Dataset::Applications => &["Application", "Cost"],
        }
    }
}

/// Dashboard tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Csp,
    Services,
    Applications,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Csp, Tab::Services, Tab::Applications];

    /// Value sent by the tab bar when this tab is selected.
    pub fn value(&self) -> &'static str {
        match self {
            Tab::Csp => "tab-csp",
            Tab::Services => "tab-services",
            Tab::Applications => "tab-apps",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Csp => "CSP",
            Tab::Services => "Services",
            Tab::Applications => "Applications",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.value() == value)
    }

    pub fn dataset(&self) -> Dataset {
        match self {
            Tab::Csp => Dataset::Csp,
            Tab::Services => Dataset::Services,
            Tab::Applications => Dataset::Applications,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCost {
    #[serde(rename = "Service")]
    pub service: String,
    #[serde(rename = "Cost")]
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CspSpend {
    #[serde(rename = "CSP")]
    pub csp: String,
    #[serde(rename = "ServicesSpend")]
    pub services_spend: f64,
    #[serde(rename = "MarketplaceSpend")]
    pub marketplace_spend: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationCost {
    #[serde(rename = "Application")]
    pub application: String,
    #[serde(rename = "Cost")]
    pub cost: f64,
}

/// Rows of one dataset in the order they were stored.
#[derive(Debug, Clone, PartialEq)]
pub enum TableData {
    Services(Vec<ServiceCost>),
    Csp(Vec<CspSpend>),
    Applications(Vec<ApplicationCost>),
    Empty,
}

impl TableData {
    pub fn empty() -> Self {
        TableData::Empty
    }

    pub fn dataset(&self) -> Option<Dataset> {
        match self {
            TableData::Services(_) => Some(Dataset::Services),
            TableData::Csp(_) => Some(Dataset::Csp),
            TableData::Applications(_) => Some(Dataset::Applications),
            TableData::Empty => None,
        }
    }

    pub fn headers(&self) -> &'static [&'static str] {
        match self.dataset() {
            Some(dataset) => dataset.columns(),
            None => &[],
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TableData::Services(rows) => rows.len(),
            TableData::Csp(rows) => rows.len(),
            TableData::Applications(rows) => rows.len(),
            TableData::Empty => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    Workbook(PathBuf),
    CsvDirectory(PathBuf), // one <Sheet>.csv per dataset
}

impl DataSource {
    /// A directory holds CSV exports; any other path is treated as a workbook.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if path.is_dir() {
            DataSource::CsvDirectory(path.to_path_buf())
        } else {
            DataSource::Workbook(path.to_path_buf())
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            DataSource::Workbook(path) | DataSource::CsvDirectory(path) => path,
        }
    }
}
