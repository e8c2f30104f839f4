//! Concrete adapter implementations for ports.

pub mod csv_catalog_adapter;
pub mod csv_export_adapter;
pub mod file_config_adapter;
pub mod macro_csv_adapter;

const MISSING_TOKENS: [&str; 4] = ["na", "n/a", "null", "nan"];

/// Parse one numeric CSV cell. Blank cells, the usual NA spellings and
/// non-finite numbers are missing values; anything else must be a number.
pub(crate) fn numeric_cell(cell: &str) -> Result<Option<f64>, String> {
    let cell = cell.trim();
    if cell.is_empty() || MISSING_TOKENS.iter().any(|t| cell.eq_ignore_ascii_case(t)) {
        return Ok(None);
    }
    let value: f64 = cell
        .parse()
        .map_err(|_| format!("invalid number '{}'", cell))?;
    Ok(value.is_finite().then_some(value))
}
