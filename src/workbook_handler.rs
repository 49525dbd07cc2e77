// src/workbook_handler.rs
use calamine::{open_workbook_auto, Data, DeError, Range, RangeDeserializerBuilder, Reader};
use serde::de::DeserializeOwned;
use std::path::PathBuf;

use crate::data_provider::LoadError;

/// Reads named worksheets out of a spreadsheet file (xlsx, xls, xlsb or ods).
pub struct WorkbookHandler {
    path: PathBuf,
}

impl WorkbookHandler {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        WorkbookHandler { path: path.into() }
    }

    pub fn read_sheet<R: DeserializeOwned>(&self, sheet_name: &str) -> Result<Vec<R>, LoadError> {
        if !self.path.exists() {
            return Err(LoadError::SourceMissing {
                path: self.path.clone(),
            });
        }

        // The workbook is dropped before returning, nothing stays open between renders
        let mut workbook = open_workbook_auto(&self.path).map_err(|err| LoadError::Unreadable {
            path: self.path.clone(),
            reason: err.to_string(),
        })?;

        if !workbook.sheet_names().iter().any(|name| name == sheet_name) {
            return Err(LoadError::SheetMissing {
                path: self.path.clone(),
                sheet: sheet_name.to_string(),
            });
        }

        let range = workbook
            .worksheet_range(sheet_name)
            .map_err(|err| LoadError::Unreadable {
                path: self.path.clone(),
                reason: err.to_string(),
            })?;

        Self::deserialize_rows(&range, sheet_name)
    }

    fn deserialize_rows<R: DeserializeOwned>(
        range: &Range<Data>,
        sheet_name: &str,
    ) -> Result<Vec<R>, LoadError> {
        let malformed = |reason: String| LoadError::Malformed {
            sheet: sheet_name.to_string(),
            reason,
        };

        if range.is_empty() {
            return Err(malformed("worksheet has no header row".to_string()));
        }

        RangeDeserializerBuilder::new()
            .from_range(range)
            .map_err(|err| malformed(err.to_string()))?
            .collect::<Result<Vec<R>, DeError>>()
            .map_err(|err| malformed(err.to_string()))
    }
}
