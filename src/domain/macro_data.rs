//! Macroeconomic observations keyed by date.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;

/// The macro fields that are forward-filled onto the price grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MacroField {
    Gdp,
    UnemploymentRate,
    Cpi,
    FedFundsRate,
}

impl MacroField {
    pub const ALL: [MacroField; 4] = [
        MacroField::Gdp,
        MacroField::UnemploymentRate,
        MacroField::Cpi,
        MacroField::FedFundsRate,
    ];

    /// Column header used in datasets and exports.
    pub fn column_name(self) -> &'static str {
        match self {
            MacroField::Gdp => "GDP",
            MacroField::UnemploymentRate => "Unemployment Rate",
            MacroField::Cpi => "CPI",
            MacroField::FedFundsRate => "Fed Funds Rate",
        }
    }

    /// Match a header, ignoring case, spaces and underscores, so both
    /// `Unemployment Rate` and `UnemploymentRate` are recognized.
    pub fn from_header(header: &str) -> Option<Self> {
        let key: String = header
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "gdp" => Some(MacroField::Gdp),
            "unemploymentrate" => Some(MacroField::UnemploymentRate),
            "cpi" => Some(MacroField::Cpi),
            "fedfundsrate" => Some(MacroField::FedFundsRate),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            MacroField::Gdp => 0,
            MacroField::UnemploymentRate => 1,
            MacroField::Cpi => 2,
            MacroField::FedFundsRate => 3,
        }
    }
}

impl fmt::Display for MacroField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Values of the recognized fields; any of them may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MacroValues([Option<f64>; 4]);

impl MacroValues {
    pub fn get(&self, field: MacroField) -> Option<f64> {
        self.0[field.index()]
    }

    pub fn set(&mut self, field: MacroField, value: Option<f64>) {
        self.0[field.index()] = value;
    }

    pub fn with(mut self, field: MacroField, value: f64) -> Self {
        self.set(field, Some(value));
        self
    }
}

/// One row of the macro dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct MacroRecord {
    pub date: NaiveDate,
    pub values: MacroValues,
    /// Columns outside [`MacroField`]; joined by exact date only.
    pub extra: BTreeMap<String, f64>,
}

impl MacroRecord {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            values: MacroValues::default(),
            extra: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_matching_is_lenient() {
        assert_eq!(
            MacroField::from_header("Unemployment Rate"),
            Some(MacroField::UnemploymentRate)
        );
        assert_eq!(
            MacroField::from_header("UnemploymentRate"),
            Some(MacroField::UnemploymentRate)
        );
        assert_eq!(
            MacroField::from_header("fed_funds_rate"),
            Some(MacroField::FedFundsRate)
        );
        assert_eq!(MacroField::from_header(" gdp "), Some(MacroField::Gdp));
        assert_eq!(MacroField::from_header("Inflation"), None);
    }

    #[test]
    fn column_names_round_trip_through_header_matching() {
        for field in MacroField::ALL {
            assert_eq!(MacroField::from_header(field.column_name()), Some(field));
        }
    }

    #[test]
    fn values_get_set() {
        let values = MacroValues::default().with(MacroField::Cpi, 301.2);
        assert_eq!(values.get(MacroField::Cpi), Some(301.2));
        assert_eq!(values.get(MacroField::Gdp), None);
    }
}
