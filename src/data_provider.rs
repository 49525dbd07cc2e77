// src/data_provider.rs
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

use crate::csv_handler::CSVHandler;
use crate::data_types::{
    ApplicationCost, CspSpend, DataSource, Dataset, ServiceCost, TableData,
};
use crate::workbook_handler::WorkbookHandler;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data source {} does not exist", .path.display())]
    SourceMissing { path: PathBuf },
    #[error("worksheet {sheet} not found in {}", .path.display())]
    SheetMissing { path: PathBuf, sheet: String },
    #[error("cannot read {}: {reason}", .path.display())]
    Unreadable { path: PathBuf, reason: String },
    #[error("worksheet {sheet} is malformed: {reason}")]
    Malformed { sheet: String, reason: String },
}

impl LoadError {
    /// True when there was simply nothing to read, as opposed to bad content.
    pub fn is_absent(&self) -> bool {
        matches!(
            self,
            LoadError::SourceMissing { .. } | LoadError::SheetMissing { .. }
        )
    }
}

/// A row that carries a unique label and non-negative amounts.
trait CostRow: DeserializeOwned {
    fn label(&self) -> &str;
    fn amounts(&self) -> Vec<(&'static str, f64)>;
}

impl CostRow for ServiceCost {
    fn label(&self) -> &str {
        &self.service
    }

    fn amounts(&self) -> Vec<(&'static str, f64)> {
        vec![("Cost", self.cost)]
    }
}

impl CostRow for CspSpend {
    fn label(&self) -> &str {
        &self.csp
    }

    fn amounts(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("ServicesSpend", self.services_spend),
            ("MarketplaceSpend", self.marketplace_spend),
        ]
    }
}

impl CostRow for ApplicationCost {
    fn label(&self) -> &str {
        &self.application
    }

    fn amounts(&self) -> Vec<(&'static str, f64)> {
        vec![("Cost", self.cost)]
    }
}

pub struct DataProvider {
    source: DataSource,
}

impl DataProvider {
    pub fn new(source: DataSource) -> Self {
        DataProvider { source }
    }

    /// Loads a dataset by sheet name. Unknown names give an empty table.
    pub fn load(&self, dataset_name: &str) -> TableData {
        match Dataset::from_sheet_name(dataset_name) {
            Some(dataset) => self.load_dataset(dataset),
            None => {
                debug!(dataset = dataset_name, "unknown dataset requested");
                TableData::empty()
            }
        }
    }

    /// Loads a dataset, substituting the built-in table when the source can't be used.
    pub fn load_dataset(&self, dataset: Dataset) -> TableData {
        match self.try_load(dataset) {
            Ok(table) => table,
            Err(err) if err.is_absent() => {
                debug!(dataset = dataset.sheet_name(), %err, "using fallback data");
                fallback_table(dataset)
            }
            Err(err) => {
                warn!(
                    dataset = dataset.sheet_name(),
                    source = %self.source.path().display(),
                    %err,
                    "spreadsheet content rejected, using fallback data"
                );
                fallback_table(dataset)
            }
        }
    }

    pub fn try_load(&self, dataset: Dataset) -> Result<TableData, LoadError> {
        Ok(match dataset {
            Dataset::Services => TableData::Services(self.read_rows(dataset)?),
            Dataset::Csp => TableData::Csp(self.read_rows(dataset)?),
            Dataset::Applications => TableData::Applications(self.read_rows(dataset)?),
        })
    }

    fn read_rows<R: CostRow>(&self, dataset: Dataset) -> Result<Vec<R>, LoadError> {
        let sheet_name = dataset.sheet_name();
        let rows: Vec<R> = match &self.source {
            DataSource::Workbook(path) => WorkbookHandler::new(path).read_sheet(sheet_name)?,
            DataSource::CsvDirectory(dir) => {
                let path = dir.join(format!("{}.csv", sheet_name));
                CSVHandler::new().read_csv(path, sheet_name)?
            }
        };
        validate_rows(&rows, sheet_name)?;
        Ok(rows)
    }
}

fn validate_rows<R: CostRow>(rows: &[R], sheet_name: &str) -> Result<(), LoadError> {
    let malformed = |reason: String| LoadError::Malformed {
        sheet: sheet_name.to_string(),
        reason,
    };

    let mut seen = HashSet::new();
    for (i, row) in rows.iter().enumerate() {
        if !seen.insert(row.label()) {
            return Err(malformed(format!("duplicate label {:?}", row.label())));
        }
        for (column, value) in row.amounts() {
            if !value.is_finite() || value < 0.0 {
                return Err(malformed(format!(
                    "{} in data row {} must be a non-negative number, got {}",
                    column,
                    i + 1,
                    value
                )));
            }
        }
    }
    Ok(())
}

/// Built-in figures shown whenever the spreadsheet can't be used.
pub fn fallback_table(dataset: Dataset) -> TableData {
    match dataset {
        Dataset::Services => TableData::Services(
            [("Compute", 12000.0), ("Database", 8500.0), ("Storage", 6000.0)]
                .into_iter()
                .map(|(service, cost)| ServiceCost {
                    service: service.to_string(),
                    cost,
                })
                .collect(),
        ),
        Dataset::Csp => TableData::Csp(
            [
                ("AWS", 7000.0, 2000.0),
                ("Azure", 5000.0, 1500.0),
                ("GCP", 3000.0, 1000.0),
            ]
            .into_iter()
            .map(|(csp, services_spend, marketplace_spend)| CspSpend {
                csp: csp.to_string(),
                services_spend,
                marketplace_spend,
            })
            .collect(),
        ),
        Dataset::Applications => TableData::Applications(
            [("App1", 7000.0), ("App2", 5000.0), ("App3", 6000.0)]
                .into_iter()
                .map(|(application, cost)| ApplicationCost {
                    application: application.to_string(),
                    cost,
                })
                .collect(),
        ),
    }
}
