//! The prepared table handed to the display layer.
//!
//! A `PreparedTable` is built once per pipeline run and never mutated;
//! slicing produces a new table.

use crate::domain::engine::EnrichedRow;
use crate::domain::macro_data::{MacroField, MacroValues};
use crate::domain::price::Dated;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

pub const STOCK_COLUMNS: [&str; 6] = ["Date", "Open", "High", "Low", "Close", "Volume"];

pub const TECHNICAL_COLUMNS: [&str; 12] = [
    "MA_5",
    "MA_20",
    "MA_50",
    "Buy_Sell_Signal",
    "Daily_Return",
    "Price_Change",
    "Volatility",
    "RSI",
    "BB_Middle",
    "BB_StdDev",
    "BB_Upper",
    "BB_Lower",
];

/// An enriched row with the macro values known as of its date.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRow {
    pub enriched: EnrichedRow,
    pub macro_values: MacroValues,
    pub macro_extra: BTreeMap<String, f64>,
}

impl Dated for PreparedRow {
    fn date(&self) -> Option<NaiveDate> {
        Some(self.enriched.price.date)
    }
}

impl PreparedRow {
    /// Cell values in [`PreparedTable::columns`] order; `None` is a missing value.
    pub fn cells(&self, extra_columns: &[String]) -> Vec<Option<String>> {
        let p = &self.enriched.price;
        let ind = &self.enriched.indicators;
        let num = |v: Option<f64>| v.map(|x| x.to_string());

        let mut cells = vec![
            Some(p.date.format("%Y-%m-%d").to_string()),
            Some(p.open.to_string()),
            Some(p.high.to_string()),
            Some(p.low.to_string()),
            Some(p.close.to_string()),
            Some(p.volume.to_string()),
            num(ind.ma_5),
            num(ind.ma_20),
            num(ind.ma_50),
            Some(ind.signal.to_string()),
            num(ind.daily_return),
            num(ind.price_change),
            num(ind.volatility),
            num(ind.rsi),
            num(ind.bb_middle),
            num(ind.bb_std_dev),
            num(ind.bb_upper),
            num(ind.bb_lower),
        ];
        cells.extend(MacroField::ALL.iter().map(|f| num(self.macro_values.get(*f))));
        cells.extend(
            extra_columns
                .iter()
                .map(|name| num(self.macro_extra.get(name).copied())),
        );
        cells
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreparedTable {
    symbol: String,
    rows: Vec<PreparedRow>,
}

impl PreparedTable {
    pub fn new(symbol: impl Into<String>, rows: Vec<PreparedRow>) -> Self {
        Self {
            symbol: symbol.into(),
            rows,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn rows(&self) -> &[PreparedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.rows.first()?.enriched.price.date;
        let last = self.rows.last()?.enriched.price.date;
        Some((first, last))
    }

    /// Macro columns outside the recognized set, sorted by name.
    pub fn extra_columns(&self) -> Vec<String> {
        let names: BTreeSet<&String> = self.rows.iter().flat_map(|r| r.macro_extra.keys()).collect();
        names.into_iter().cloned().collect()
    }

    pub fn columns(&self) -> Vec<String> {
        STOCK_COLUMNS
            .iter()
            .chain(TECHNICAL_COLUMNS.iter())
            .map(|c| c.to_string())
            .chain(MacroField::ALL.iter().map(|f| f.column_name().to_string()))
            .chain(self.extra_columns())
            .collect()
    }

    pub fn summary(&self) -> DataSummary {
        let columns = self.columns();
        let extra = self.extra_columns();
        let mut missing_values: BTreeMap<String, usize> =
            columns.iter().map(|c| (c.clone(), 0)).collect();

        for row in &self.rows {
            for (column, cell) in columns.iter().zip(row.cells(&extra)) {
                if cell.is_none() {
                    if let Some(count) = missing_values.get_mut(column) {
                        *count += 1;
                    }
                }
            }
        }

        DataSummary {
            total_rows: self.rows.len(),
            date_range: self.date_range(),
            columns,
            missing_values,
        }
    }
}

/// Shape and completeness of a prepared table.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSummary {
    pub total_rows: usize,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub columns: Vec<String>,
    pub missing_values: BTreeMap<String, usize>,
}

impl DataSummary {
    pub fn stock_columns() -> &'static [&'static str] {
        &STOCK_COLUMNS
    }

    pub fn technical_columns() -> &'static [&'static str] {
        &TECHNICAL_COLUMNS
    }

    pub fn macro_columns() -> Vec<&'static str> {
        MacroField::ALL.iter().map(|f| f.column_name()).collect()
    }
}
