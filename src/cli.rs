//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_catalog_adapter::CsvCatalogAdapter;
use crate::adapters::csv_export_adapter::CsvTableSink;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::macro_csv_adapter::MacroCsvAdapter;
use crate::domain::config::AppConfig;
use crate::domain::error::StocksvizError;
use crate::domain::pipeline::{self, Dataset, Selection};
use crate::domain::table::DataSummary;
use crate::domain::window::{self, TimeWindow};
use crate::ports::catalog_port::CompanyCatalog;
use crate::ports::export_port::TableSink;

#[derive(Parser, Debug)]
#[command(name = "stocksviz", about = "Stock data preparation for market visualization")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List companies with a dataset
    Companies {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Prepare a dataset and write it as CSV
    Prepare {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Company symbol; the synthetic series is used when omitted
        #[arg(long)]
        symbol: Option<String>,
        /// 1week, 1month, 3months or all
        #[arg(short, long)]
        window: Option<TimeWindow>,
        #[arg(long)]
        no_preprocess: bool,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show date range and columns of a company dataset
    Info {
        #[arg(long)]
        symbol: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Summarize the prepared table of a company
    Summary {
        #[arg(long)]
        symbol: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Companies { config } => run_companies(config.as_ref()),
        Command::Prepare {
            config,
            symbol,
            window,
            no_preprocess,
            output,
        } => run_prepare(
            config.as_ref(),
            symbol.as_deref(),
            window,
            no_preprocess,
            output.as_ref(),
        ),
        Command::Info { symbol, config } => run_info(&symbol, config.as_ref()),
        Command::Summary { symbol, config } => run_summary(&symbol, config.as_ref()),
        Command::Validate { config } => run_validate(config.as_ref()),
    }
}

/// Load the config file when one is given, otherwise use the defaults.
pub fn load_config(path: Option<&PathBuf>) -> Result<AppConfig, ExitCode> {
    let Some(path) = path else {
        return Ok(AppConfig::default());
    };
    FileConfigAdapter::from_file(path)
        .and_then(|adapter| AppConfig::from_port(&adapter))
        .map_err(|e| report(&e))
}

fn report(err: &StocksvizError) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::from(err)
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn selection(symbol: Option<&str>) -> Selection {
    match symbol.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => Selection::Company(s.to_string()),
        None => Selection::Synthetic,
    }
}

/// Slice `dataset` to `window` and hand it to `sink`.
pub fn write_dataset(
    dataset: &Dataset,
    window: TimeWindow,
    today: NaiveDate,
    sink: &mut dyn TableSink,
) -> Result<(), StocksvizError> {
    match dataset {
        Dataset::Prepared { table, .. } => {
            sink.write_prepared(&window::slice(table, window, today))
        }
        Dataset::Raw { rows, .. } => sink.write_raw(&window::slice_rows(rows, window, today)),
    }
}

fn run_companies(config_path: Option<&PathBuf>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let catalog = CsvCatalogAdapter::from_config(&config);

    let companies = match catalog.list_companies() {
        Ok(c) => c,
        Err(e) => return report(&e),
    };

    if companies.is_empty() {
        eprintln!("No companies found in {}", config.processed_dir.display());
    } else {
        for company in &companies {
            println!("{}\t{}", company.symbol, company.display_name);
        }
        eprintln!("{} companies found", companies.len());
    }
    ExitCode::SUCCESS
}

fn run_prepare(
    config_path: Option<&PathBuf>,
    symbol: Option<&str>,
    window: Option<TimeWindow>,
    no_preprocess: bool,
    output_path: Option<&PathBuf>,
) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let catalog = CsvCatalogAdapter::from_config(&config);
    let macro_source = MacroCsvAdapter::new(config.macro_file.clone());
    let window = window.unwrap_or(config.time_window);
    let today = today();

    let dataset = match pipeline::load_dataset(
        &catalog,
        &macro_source,
        &selection(symbol),
        config.enable_preprocessing && !no_preprocess,
        today,
    ) {
        Ok(d) => d,
        Err(e) => return report(&e),
    };

    if let Some(notice) = dataset.notice() {
        eprintln!("warning: {notice}");
        let kind = if dataset.is_prepared() { "prepared" } else { "unprocessed" };
        eprintln!("warning: showing {} data for {}", kind, dataset.label());
    }

    let result = match output_path {
        Some(path) => match File::create(path) {
            Ok(file) => write_dataset(
                &dataset,
                window,
                today,
                &mut CsvTableSink::new(BufWriter::new(file)),
            ),
            Err(e) => Err(e.into()),
        },
        None => write_dataset(
            &dataset,
            window,
            today,
            &mut CsvTableSink::new(io::stdout().lock()),
        ),
    };

    match result {
        Ok(()) => {
            if let Some(path) = output_path {
                eprintln!(
                    "Wrote {} ({} rows before windowing) to {}",
                    dataset.label(),
                    dataset.len(),
                    path.display()
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => report(&e),
    }
}

fn run_info(symbol: &str, config_path: Option<&PathBuf>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let catalog = CsvCatalogAdapter::from_config(&config);

    let info = match catalog.company_info(symbol) {
        Ok(i) => i,
        Err(e) => return report(&e),
    };

    let fmt_date = |d: Option<NaiveDate>| d.map(|d| d.to_string()).unwrap_or_else(|| "-".into());
    println!("Symbol:     {}", info.symbol);
    println!("Start date: {}", fmt_date(info.start_date));
    println!("End date:   {}", fmt_date(info.end_date));
    println!("Rows:       {}", info.total_days);
    println!("Columns:    {}", info.columns.join(", "));
    ExitCode::SUCCESS
}

fn run_summary(symbol: &str, config_path: Option<&PathBuf>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let catalog = CsvCatalogAdapter::from_config(&config);
    let macro_source = MacroCsvAdapter::new(config.macro_file.clone());

    let table = match pipeline::prepare(&catalog, &macro_source, symbol) {
        Ok(t) => t,
        Err(e) => return report(&e),
    };
    let summary = table.summary();

    println!("Symbol:     {}", table.symbol());
    println!("Rows:       {}", summary.total_rows);
    match summary.date_range {
        Some((start, end)) => println!("Date range: {} to {}", start, end),
        None => println!("Date range: -"),
    }
    println!("Stock:      {}", DataSummary::stock_columns().join(", "));
    println!("Technical:  {}", DataSummary::technical_columns().join(", "));
    println!("Macro:      {}", DataSummary::macro_columns().join(", "));
    println!("\nMissing values:");
    for column in &summary.columns {
        let missing = summary.missing_values.get(column).copied().unwrap_or(0);
        if missing > 0 {
            println!("  {:<20} {}", column, missing);
        }
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: Option<&PathBuf>) -> ExitCode {
    match config_path {
        Some(path) => eprintln!("Validating config: {}", path.display()),
        None => eprintln!("No config given, validating defaults"),
    }
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    eprintln!("  processed_dir        = {}", config.processed_dir.display());
    eprintln!("  macro_file           = {}", config.macro_file.display());
    eprintln!("  synthetic_file       = {}", config.synthetic_file.display());
    eprintln!("  enable_preprocessing = {}", config.enable_preprocessing);
    eprintln!("  time_window          = {}", config.time_window);

    if !config.processed_dir.is_dir() {
        eprintln!("warning: company directory does not exist");
    }
    if !config.macro_file.is_file() {
        eprintln!("warning: macro file does not exist");
    }
    if !config.synthetic_file.is_file() {
        eprintln!("warning: synthetic dataset does not exist");
    }

    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}
