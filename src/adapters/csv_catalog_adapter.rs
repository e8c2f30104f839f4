//! CSV file company catalog: one `<SYMBOL>.csv` per company in a directory.

use crate::adapters::numeric_cell;
use crate::domain::company::{CompanyInfo, CompanyListing};
use crate::domain::config::AppConfig;
use crate::domain::dates::parse_date;
use crate::domain::error::StocksvizError;
use crate::domain::price::RawPriceRecord;
use crate::ports::catalog_port::CompanyCatalog;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct PriceRow {
    #[serde(rename = "Date", alias = "date")]
    date: Option<String>,
    #[serde(rename = "Open", alias = "open", default, deserialize_with = "price_cell")]
    open: Option<f64>,
    #[serde(rename = "High", alias = "high", default, deserialize_with = "price_cell")]
    high: Option<f64>,
    #[serde(rename = "Low", alias = "low", default, deserialize_with = "price_cell")]
    low: Option<f64>,
    #[serde(rename = "Close", alias = "close", default, deserialize_with = "price_cell")]
    close: Option<f64>,
    #[serde(rename = "Volume", alias = "volume", default, deserialize_with = "price_cell")]
    volume: Option<f64>,
}

fn price_cell<'de, D: Deserializer<'de>>(de: D) -> Result<Option<f64>, D::Error> {
    match Option::<String>::deserialize(de)? {
        Some(cell) => numeric_cell(&cell).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

struct PriceFile {
    columns: Vec<String>,
    rows: Vec<(u64, PriceRow)>,
}

pub struct CsvCatalogAdapter {
    base_path: PathBuf,
    synthetic_path: PathBuf,
}

impl CsvCatalogAdapter {
    pub fn new(base_path: PathBuf, synthetic_path: PathBuf) -> Self {
        Self {
            base_path,
            synthetic_path,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.processed_dir.clone(), config.synthetic_file.clone())
    }

    fn csv_path(&self, symbol: &str) -> Option<PathBuf> {
        let valid = !symbol.is_empty()
            && !symbol.starts_with('.')
            && !symbol.contains(['/', '\\']);
        valid.then(|| self.base_path.join(format!("{}.csv", symbol)))
    }

    fn read_company(&self, symbol: &str) -> Result<(PathBuf, PriceFile), StocksvizError> {
        let not_found = || StocksvizError::NotFound {
            symbol: symbol.to_string(),
        };
        let path = self.csv_path(symbol).ok_or_else(not_found)?;
        if !path.is_file() {
            return Err(not_found());
        }
        let file = read_price_file(&path)?;
        Ok((path, file))
    }
}

fn read_price_file(path: &Path) -> Result<PriceFile, StocksvizError> {
    let content = fs::read_to_string(path)?;
    let file_name = path.display().to_string();
    let malformed = |line: u64, reason: String| StocksvizError::MalformedRow {
        file: file_name.clone(),
        line,
        reason,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());
    let headers = rdr
        .headers()
        .map_err(|e| malformed(1, format!("unreadable header: {}", e)))?
        .clone();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| {
            let line = e.position().map(|p| p.line()).unwrap_or(0);
            malformed(line, format!("CSV parse error: {}", e))
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let row: PriceRow = record
            .deserialize(Some(&headers))
            .map_err(|e| malformed(line, e.to_string()))?;
        rows.push((line, row));
    }

    Ok(PriceFile {
        columns: headers.iter().map(str::to_string).collect(),
        rows,
    })
}

fn to_raw_records(path: &Path, file: PriceFile) -> Result<Vec<RawPriceRecord>, StocksvizError> {
    let mut records = Vec::with_capacity(file.rows.len());
    for (line, row) in file.rows {
        let date = match row.date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(s) => Some(parse_date(s).ok_or_else(|| StocksvizError::MalformedRow {
                file: path.display().to_string(),
                line,
                reason: format!("unparseable date '{}'", s),
            })?),
        };
        records.push(RawPriceRecord {
            date,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
        });
    }

    records.sort_by_key(|r| r.date);

    let before = records.len();
    let mut last: Option<NaiveDate> = None;
    records.retain(|r| match r.date {
        Some(d) if last == Some(d) => false,
        other => {
            last = other.or(last);
            true
        }
    });
    if records.len() < before {
        warn!(
            file = %path.display(),
            dropped = before - records.len(),
            "dropped rows with duplicate dates"
        );
    }

    Ok(records)
}

impl CompanyCatalog for CsvCatalogAdapter {
    fn list_companies(&self) -> Result<Vec<CompanyListing>, StocksvizError> {
        if !self.base_path.is_dir() {
            debug!(dir = %self.base_path.display(), "company directory missing");
            return Ok(vec![]);
        }

        let mut companies = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let path = entry?.path();
            // exact match: `csv_path` only ever opens `<SYMBOL>.csv`
            let is_csv = path.extension().is_some_and(|ext| ext == "csv");
            if !is_csv || !path.is_file() {
                continue;
            }
            if let Some(stem) = path.file_stem() {
                companies.push(CompanyListing::from_symbol(stem.to_string_lossy()));
            }
        }

        companies.sort();
        Ok(companies)
    }

    fn load(&self, symbol: &str) -> Result<Vec<RawPriceRecord>, StocksvizError> {
        let (path, file) = self.read_company(symbol)?;
        let records = to_raw_records(&path, file)?;
        debug!(symbol, rows = records.len(), "loaded company data");
        Ok(records)
    }

    fn company_info(&self, symbol: &str) -> Result<CompanyInfo, StocksvizError> {
        let (path, file) = self.read_company(symbol)?;
        let columns = file.columns.clone();
        let records = to_raw_records(&path, file)?;
        Ok(CompanyInfo::from_rows(symbol, &records, columns))
    }

    fn load_synthetic(&self, today: NaiveDate) -> Result<Vec<RawPriceRecord>, StocksvizError> {
        if !self.synthetic_path.is_file() {
            return Err(StocksvizError::DataUnavailable {
                what: format!("synthetic dataset {}", self.synthetic_path.display()),
            });
        }
        let file = read_price_file(&self.synthetic_path)?;
        let count = file.rows.len() as u64;
        let start = today
            .checked_sub_days(Days::new(count.saturating_sub(1)))
            .unwrap_or(today);

        let records: Vec<RawPriceRecord> = file
            .rows
            .into_iter()
            .enumerate()
            .map(|(i, (_, row))| RawPriceRecord {
                date: start.checked_add_days(Days::new(i as u64)),
                open: row.open,
                high: row.high,
                low: row.low,
                close: row.close,
                volume: row.volume,
            })
            .collect();
        debug!(rows = records.len(), "loaded synthetic data");
        Ok(records)
    }
}
