//! Macro dataset loaded from a CSV file whose first column is the date.

use crate::adapters::numeric_cell;
use crate::domain::dates::parse_date;
use crate::domain::error::StocksvizError;
use crate::domain::macro_data::{MacroField, MacroRecord};
use crate::ports::macro_port::MacroSource;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

enum Column {
    Known(MacroField),
    Extra(String),
}

pub struct MacroCsvAdapter {
    path: PathBuf,
}

impl MacroCsvAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn malformed(&self, line: u64, reason: String) -> StocksvizError {
        StocksvizError::MalformedRow {
            file: self.path.display().to_string(),
            line,
            reason,
        }
    }
}

impl MacroSource for MacroCsvAdapter {
    fn load_macro(&self) -> Result<Vec<MacroRecord>, StocksvizError> {
        if !self.path.is_file() {
            return Err(StocksvizError::DataUnavailable {
                what: format!("macro file {}", self.path.display()),
            });
        }
        let content = fs::read_to_string(&self.path)?;
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let headers = rdr
            .headers()
            .map_err(|e| self.malformed(1, format!("unreadable header: {}", e)))?
            .clone();
        if headers.is_empty() {
            return Err(self.malformed(1, "missing date column".to_string()));
        }
        let columns: Vec<Column> = headers
            .iter()
            .skip(1)
            .map(|h| match MacroField::from_header(h) {
                Some(field) => Column::Known(field),
                None => Column::Extra(h.to_string()),
            })
            .collect();

        let mut records = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                self.malformed(line, format!("CSV parse error: {}", e))
            })?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let date_cell = record.get(0).unwrap_or("");
            let date = parse_date(date_cell)
                .ok_or_else(|| self.malformed(line, format!("unparseable date '{}'", date_cell)))?;

            let mut row = MacroRecord::new(date);
            for (column, cell) in columns.iter().zip(record.iter().skip(1)) {
                let Some(value) = numeric_cell(cell).map_err(|e| self.malformed(line, e))? else {
                    continue;
                };
                match column {
                    Column::Known(field) => row.values.set(*field, Some(value)),
                    Column::Extra(name) => {
                        row.extra.insert(name.clone(), value);
                    }
                }
            }
            records.push(row);
        }

        debug!(path = %self.path.display(), rows = records.len(), "read macro file");
        Ok(records)
    }
}
