//! Batch-driver binary: reads a JSON run description, sweeps trials across
//! arena widths, and writes the outcome table as CSV.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::process::ExitCode;

use serde::Deserialize;

use foragesim::batch::{run_batch, BatchConfig};

/// Full run description: the batch sweep plus the empirical pools and the
/// output path.
#[derive(Debug, Deserialize)]
struct RunSpec {
    #[serde(flatten)]
    batch: BatchConfig,
    /// Empirical step lengths (arena units per frame), positive.
    speed_pool: Vec<f64>,
    /// Empirical turn increments (degrees), signed.
    turn_pool: Vec<f64>,
    /// Destination CSV path.
    output: String,
}

fn main() -> ExitCode {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: foragesim <run.json>");
        return ExitCode::from(2);
    };

    match run(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[foragesim] run failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let spec: RunSpec = serde_json::from_reader(File::open(path)?)?;
    eprintln!(
        "[foragesim] {} / {}: {} trials x {} widths (seed {})",
        spec.batch.strategy.label(),
        spec.batch.task.label(),
        spec.batch.trials_per_width,
        spec.batch.widths.len(),
        spec.batch.seed,
    );

    let table = run_batch(&spec.batch, &spec.speed_pool, &spec.turn_pool)?;

    let mut out = BufWriter::new(File::create(&spec.output)?);
    table.write_csv(&mut out)?;
    out.flush()?;
    eprintln!(
        "[foragesim] wrote {} rows to {}",
        table.rows.len(),
        spec.output
    );
    Ok(())
}
