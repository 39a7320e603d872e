//! Command-line front end: paste a PNR on stdin, get the itinerary back in
//! Russian. An optional argument names a CSV of airport display-name
//! overrides (`iata,airport_ru`).

use std::io::BufRead;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use pnr_itinerary::airports::AirportTable;
use pnr_itinerary::pipeline::{PipelineConfig, render_pnr};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Ошибка: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut airports = AirportTable::builtin();
    if let Some(path) = std::env::args().nth(1) {
        let file = std::fs::File::open(&path)?;
        let applied = airports.apply_ru_overrides(file)?;
        tracing::info!(applied, %path, "applied airport name overrides");
    }

    eprintln!("Вставьте бронирование (PNR) и завершите ввод пустой строкой:");
    let mut text = String::new();
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        // A blank line after some content ends the paste
        if line.trim().is_empty() && !text.trim().is_empty() {
            break;
        }
        text.push_str(&line);
        text.push('\n');
    }

    let output = render_pnr(&text, &airports, &PipelineConfig::today())?;
    println!("{output}");
    Ok(())
}
