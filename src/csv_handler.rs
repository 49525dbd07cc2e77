// src/csv_handler.rs
use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Seek, SeekFrom};
use std::path::Path;

use crate::data_provider::LoadError;

/// Reads one worksheet that was exported as a CSV file.
pub struct CSVHandler {}

impl CSVHandler {
    pub fn new() -> Self {
        CSVHandler {}
    }

    pub fn read_csv<R, P>(&self, path: P, sheet_name: &str) -> Result<Vec<R>, LoadError>
    where
        R: DeserializeOwned,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(LoadError::SheetMissing {
                    path: path.to_path_buf(),
                    sheet: sheet_name.to_string(),
                })
            }
            Err(err) => {
                return Err(LoadError::Unreadable {
                    path: path.to_path_buf(),
                    reason: err.to_string(),
                })
            }
        };

        let unreadable = |err: std::io::Error| LoadError::Unreadable {
            path: path.to_path_buf(),
            reason: err.to_string(),
        };

        // Peek at the header line, then rewind so the CSV reader sees it too
        let mut file = BufReader::new(file);
        let mut header_line = String::new();
        file.read_line(&mut header_line).map_err(unreadable)?;
        file.seek(SeekFrom::Start(0)).map_err(unreadable)?;

        let mut reader = ReaderBuilder::new()
            .delimiter(Self::detect_delimiter(&header_line))
            .trim(Trim::All)
            .from_reader(file);

        reader
            .deserialize()
            .collect::<Result<Vec<R>, csv::Error>>()
            .map_err(|err| LoadError::Malformed {
                sheet: sheet_name.to_string(),
                reason: err.to_string(),
            })
    }

    /// Exports from some locales separate fields with semicolons.
    fn detect_delimiter(header_line: &str) -> u8 {
        let semicolons = header_line.matches(';').count();
        let commas = header_line.matches(',').count();
        if semicolons > commas {
            b';'
        } else {
            b','
        }
    }
}

impl Default for CSVHandler {
    fn default() -> Self {
        Self::new()
    }
}
