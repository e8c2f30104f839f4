#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use stocksviz::domain::company::{CompanyInfo, CompanyListing};
use stocksviz::domain::error::StocksvizError;
use stocksviz::domain::macro_data::{MacroField, MacroRecord};
pub use stocksviz::domain::price::{PriceRecord, RawPriceRecord};
use stocksviz::ports::catalog_port::CompanyCatalog;
use stocksviz::ports::macro_port::MacroSource;
use tempfile::TempDir;

pub struct MockCatalog {
    pub data: HashMap<String, Vec<RawPriceRecord>>,
    pub synthetic: Vec<f64>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            synthetic: vec![10.0, 11.0, 12.0],
        }
    }

    pub fn with_rows(mut self, symbol: &str, rows: Vec<RawPriceRecord>) -> Self {
        self.data.insert(symbol.to_string(), rows);
        self
    }
}

impl CompanyCatalog for MockCatalog {
    fn list_companies(&self) -> Result<Vec<CompanyListing>, StocksvizError> {
        let mut listings: Vec<CompanyListing> =
            self.data.keys().map(CompanyListing::from_symbol).collect();
        listings.sort();
        Ok(listings)
    }

    fn load(&self, symbol: &str) -> Result<Vec<RawPriceRecord>, StocksvizError> {
        self.data
            .get(symbol)
            .cloned()
            .ok_or_else(|| StocksvizError::NotFound {
                symbol: symbol.to_string(),
            })
    }

    fn company_info(&self, symbol: &str) -> Result<CompanyInfo, StocksvizError> {
        let rows = self.load(symbol)?;
        Ok(CompanyInfo::from_rows(symbol, &rows, vec![]))
    }

    fn load_synthetic(&self, today: NaiveDate) -> Result<Vec<RawPriceRecord>, StocksvizError> {
        let n = self.synthetic.len() as i64;
        Ok(self
            .synthetic
            .iter()
            .enumerate()
            .map(|(i, &close)| raw_close(today - Duration::days(n - 1 - i as i64), close))
            .collect())
    }
}

pub struct MockMacro {
    pub rows: Option<Vec<MacroRecord>>,
}

impl MockMacro {
    pub fn with_rows(rows: Vec<MacroRecord>) -> Self {
        Self { rows: Some(rows) }
    }

    pub fn missing() -> Self {
        Self { rows: None }
    }
}

impl MacroSource for MockMacro {
    fn load_macro(&self) -> Result<Vec<MacroRecord>, StocksvizError> {
        self.rows
            .clone()
            .ok_or_else(|| StocksvizError::DataUnavailable {
                what: "mock macro source".into(),
            })
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn raw_close(date: NaiveDate, close: f64) -> RawPriceRecord {
    RawPriceRecord {
        date: Some(date),
        open: Some(close),
        high: Some(close),
        low: Some(close),
        close: Some(close),
        volume: Some(1000.0),
    }
}

/// One row per calendar day starting at `start`.
pub fn daily_series(start: NaiveDate, closes: &[f64]) -> Vec<RawPriceRecord> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| raw_close(start + Duration::days(i as i64), c))
        .collect()
}

pub fn macro_gdp(date: NaiveDate, gdp: f64) -> MacroRecord {
    let mut rec = MacroRecord::new(date);
    rec.values.set(MacroField::Gdp, Some(gdp));
    rec
}

/// A data directory laid out like the default one: a company directory,
/// a macro file and a synthetic dataset.
pub struct DataDir {
    pub dir: TempDir,
}

impl DataDir {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("processed")).unwrap();
        Self { dir }
    }

    pub fn processed_dir(&self) -> PathBuf {
        self.dir.path().join("processed")
    }

    pub fn macro_file(&self) -> PathBuf {
        self.dir.path().join("macro.csv")
    }

    pub fn synthetic_file(&self) -> PathBuf {
        self.dir.path().join("synthetic.csv")
    }

    pub fn write_company(&self, symbol: &str, content: &str) {
        fs::write(self.processed_dir().join(format!("{}.csv", symbol)), content).unwrap();
    }

    pub fn write_macro(&self, content: &str) {
        fs::write(self.macro_file(), content).unwrap();
    }

    pub fn write_synthetic(&self, content: &str) {
        fs::write(self.synthetic_file(), content).unwrap();
    }

    pub fn write_config(&self, extra: &str) -> PathBuf {
        let path = self.dir.path().join("stocksviz.ini");
        let content = format!(
            "[data]\nprocessed_dir = {}\nmacro_file = {}\nsynthetic_file = {}\n{}",
            self.processed_dir().display(),
            self.macro_file().display(),
            self.synthetic_file().display(),
            extra
        );
        fs::write(&path, content).unwrap();
        path
    }
}

/// CSV text for `closes` on consecutive days from `start`, dates as DD-MM-YYYY.
pub fn company_csv(start: NaiveDate, closes: &[f64]) -> String {
    let mut out = String::from("Date,Open,High,Low,Close,Volume\n");
    for (i, c) in closes.iter().enumerate() {
        let d = start + Duration::days(i as i64);
        out.push_str(&format!(
            "{},{},{},{},{},1000\n",
            d.format("%d-%m-%Y"),
            c,
            c + 1.0,
            c - 1.0,
            c
        ));
    }
    out
}
