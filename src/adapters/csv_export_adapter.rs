//! CSV table writer. Missing values become empty cells.

use crate::domain::error::StocksvizError;
use crate::domain::price::RawPriceRecord;
use crate::domain::table::{PreparedTable, STOCK_COLUMNS};
use crate::ports::export_port::TableSink;
use std::io::Write;

pub struct CsvTableSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvTableSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(inner),
        }
    }

    fn write_row<I, S>(&mut self, cells: I) -> Result<(), StocksvizError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        self.writer.write_record(cells).map_err(export_error)
    }

    fn flush(&mut self) -> Result<(), StocksvizError> {
        self.writer.flush().map_err(|e| StocksvizError::Export {
            reason: e.to_string(),
        })
    }
}

fn export_error(e: csv::Error) -> StocksvizError {
    StocksvizError::Export {
        reason: e.to_string(),
    }
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl<W: Write> TableSink for CsvTableSink<W> {
    fn write_prepared(&mut self, table: &PreparedTable) -> Result<(), StocksvizError> {
        self.write_row(table.columns())?;
        let extra = table.extra_columns();
        for row in table.rows() {
            let cells = row.cells(&extra).into_iter().map(Option::unwrap_or_default);
            self.write_row(cells)?;
        }
        self.flush()
    }

    fn write_raw(&mut self, rows: &[RawPriceRecord]) -> Result<(), StocksvizError> {
        self.write_row(STOCK_COLUMNS)?;
        for r in rows {
            self.write_row([
                r.date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
                cell(r.open),
                cell(r.high),
                cell(r.low),
                cell(r.close),
                cell(r.volume),
            ])?;
        }
        self.flush()
    }
}
