use anyhow::{bail, Result};
use chrono::Local;
use clap::Parser;

use std::{path::PathBuf, process::ExitCode};

use order_splitter::{orders::Orders, resolver, xlsx};

/// Splits flat sales data into one formatted spreadsheet per order.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the sales data CSV file
    sales_csv: PathBuf,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            // --help and --version
            print!("{e}");
            return ExitCode::SUCCESS;
        }
    };
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR. {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let input = resolver::resolve_input(&cli.sales_csv)?;
    let today = Local::now().date_naive();
    let out_dir = resolver::prepare_output_dir(input, today)?;
    let mut orders = Orders::new();
    orders.read_csv(input)?;
    let mut failures = 0;
    for sheet in orders.into_sheets() {
        match xlsx::write_sheet(&sheet, &out_dir) {
            Ok(path) => println!("{}", path.display()),
            Err(e) => {
                eprintln!("ERROR. order {}: {e}", sheet.order_id);
                failures += 1;
            }
        }
    }
    if failures > 0 {
        bail!("{failures} order sheet(s) could not be written");
    }
    Ok(())
}
