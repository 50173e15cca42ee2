//! forecast-runner: CLI entry point for the forecasting engine.
//!
//! Usage:
//!   forecast-runner <district-file> <war-file> <generic-ballot> [trials]
//!   forecast-runner <district-file> <war-file> 2.5 5000 --seed 42
//!
//! With no positional arguments the runner falls back to interactive
//! prompts, searching common local paths for the two data files.

mod data;
mod report;

use anyhow::Result;
use forecast_core::config::{ModelConfig, OpenSeatTable};
use forecast_core::error::ForecastError;
use forecast_core::forecast::run_forecast;
use std::env;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

const DISTRICT_FILE_DEFAULT: &str = "District2025PVIs.csv";
const WAR_FILE_DEFAULT: &str = "WinAboveReplacementData.csv";

struct RunArgs {
    district_path: String,
    war_path: String,
    environment: f64,
    trials: u32,
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// Positional arguments: everything that is not a flag or a flag's value.
fn positionals(args: &[String]) -> Vec<&String> {
    let mut out = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg.starts_with("--") {
            skip_next = true;
            continue;
        }
        out.push(arg);
    }
    out
}

fn invalid(what: String) -> anyhow::Error {
    ForecastError::InvalidConfiguration(what).into()
}

fn prompt(question: &str) -> Result<String> {
    print!("{question}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().trim_matches(&['"', '\''][..]).to_string())
}

/// Search common local directories for a file by name.
fn find_file(filename: &str) -> Option<PathBuf> {
    let mut dirs = vec![PathBuf::from(".")];
    if let Some(home) = env::var_os("HOME") {
        let home = PathBuf::from(home);
        dirs.push(home.join("Downloads"));
        dirs.push(home.join("Documents"));
        dirs.push(home);
    }
    dirs.into_iter()
        .map(|d| d.join(filename))
        .find(|p| p.exists())
}

/// Ask for a data-file path, offering an auto-detected candidate and
/// re-prompting until the path exists.
fn get_file_path(label: &str, default_name: &str) -> Result<String> {
    if let Some(found) = find_file(default_name) {
        println!("  Found: {}", found.display());
        let answer = prompt("  Use this file? (Y/N) [Y]: ")?;
        if !answer.eq_ignore_ascii_case("n") {
            return Ok(found.to_string_lossy().into_owned());
        }
    }
    loop {
        let path = prompt(&format!("{label}: "))?;
        if Path::new(&path).exists() {
            return Ok(path);
        }
        println!("  Error: file not found. Please try again.");
    }
}

fn interactive_args() -> Result<RunArgs> {
    println!("\n--- DATA FILES ---");
    let district_path = get_file_path(
        &format!("Path to district file ({DISTRICT_FILE_DEFAULT})"),
        DISTRICT_FILE_DEFAULT,
    )?;
    let war_path = get_file_path(
        &format!("Path to WAR file ({WAR_FILE_DEFAULT})"),
        WAR_FILE_DEFAULT,
    )?;

    println!("\n--- PARAMETERS ---");
    let gb = prompt("Generic ballot (e.g. 4.5 for D+4.5, -2 for R+2) [0]: ")?;
    let environment = if gb.is_empty() {
        0.0
    } else {
        gb.parse().unwrap_or_else(|_| {
            println!("  Not a number; using 0.0");
            0.0
        })
    };
    let sims = prompt("Trials per simulation [1000]: ")?;
    let trials = if sims.is_empty() {
        1000
    } else {
        sims.parse().unwrap_or_else(|_| {
            println!("  Not a number; using 1000");
            1000
        })
    };

    Ok(RunArgs {
        district_path,
        war_path,
        environment,
        trials,
    })
}

fn positional_args(positionals: &[&String]) -> Result<RunArgs> {
    let district_path = positionals[0].clone();
    let war_path = positionals[1].clone();
    for path in [&district_path, &war_path] {
        if !Path::new(path).exists() {
            return Err(ForecastError::DataFile { path: path.clone() }.into());
        }
    }
    let environment: f64 = positionals[2]
        .parse()
        .map_err(|_| invalid(format!("generic ballot '{}' is not a number", positionals[2])))?;
    let trials: u32 = match positionals.get(3) {
        Some(raw) => raw
            .parse()
            .map_err(|_| invalid(format!("trial count '{raw}' is not a positive integer")))?,
        None => 1000,
    };
    if trials == 0 {
        return Err(invalid("trial count must be positive".into()));
    }
    Ok(RunArgs {
        district_path,
        war_path,
        environment,
        trials,
    })
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let data_dir = flag_value(&args, "--data-dir").unwrap_or("./data").to_string();
    let top: usize = match flag_value(&args, "--top") {
        Some(raw) => raw
            .parse()
            .map_err(|_| invalid(format!("--top '{raw}' is not a positive integer")))?,
        None => 25,
    };
    let seed: u64 = match flag_value(&args, "--seed") {
        Some(raw) => raw
            .parse()
            .map_err(|_| invalid(format!("--seed '{raw}' is not an integer")))?,
        None => chrono::Utc::now().timestamp_millis() as u64,
    };

    println!("{}", "=".repeat(70));
    println!("       U.S. HOUSE ELECTION FORECAST");
    println!("       (with Monte Carlo simulation)");
    println!("{}", "=".repeat(70));

    let pos = positionals(&args);
    let run_args = if pos.len() >= 3 {
        positional_args(&pos)?
    } else {
        interactive_args()?
    };

    let config = ModelConfig::load(&data_dir)?;
    let open_seats = OpenSeatTable::load(&data_dir)?;
    log::info!("{} open seats in reference table", open_seats.len());

    let war = data::load_war(&run_args.war_path)?;
    let records = data::load_districts(&run_args.district_path, &war, &open_seats)?;

    let run = run_forecast(
        &records,
        run_args.environment,
        run_args.trials,
        &config,
        seed,
    )?;

    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let csv_path = format!("house_forecast_{stamp}.csv");
    let summary_path = format!("forecast_summary_{stamp}.json");
    report::write_forecast_csv(&csv_path, &run)?;
    report::write_summary_json(&summary_path, &run, top)?;

    report::print_summary(&run, &config, top);

    println!("\n{}", "=".repeat(70));
    println!("Forecast complete. Table: {csv_path}  Summary: {summary_path}");
    println!("{}", "=".repeat(70));
    Ok(())
}
