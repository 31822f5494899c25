use anyhow::{ensure, Context, Result};
use clap::Args;
use serde::Serialize;
use std::fs::File;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Instant;

#[derive(Args)]
pub(crate) struct TimeArgs {
    /// Binary to time
    pub(crate) input: PathBuf,

    /// Number of runs
    #[arg(short = 'n', long)]
    pub(crate) runs: usize,

    /// File fed to the binary's stdin; default is the input with extension `in`
    #[arg(short, long)]
    pub(crate) test: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct TimingReport {
    pub(crate) runs: Vec<f64>,
    pub(crate) average: f64,
    pub(crate) percentiles: Vec<Percentile>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Percentile {
    pub(crate) pct: u32,
    pub(crate) seconds: f64,
}

pub(crate) fn run(args: &TimeArgs) -> Result<()> {
    ensure!(args.runs > 0, "--runs must be at least 1");
    ensure!(
        args.input.is_file(),
        "input binary {} does not exist",
        args.input.display()
    );
    let binary = args.input.canonicalize()?;

    let test = match &args.test {
        Some(test) => test.clone(),
        None => {
            let guess = args.input.with_extension("in");
            log::info!("guessing test file to be {}", guess.display());
            guess
        }
    };
    ensure!(test.is_file(), "test file {} does not exist", test.display());

    println!("Running `{}` {} times", binary.display(), args.runs);
    let mut samples = Vec::with_capacity(args.runs);
    for it in 1..=args.runs {
        let stdin =
            File::open(&test).with_context(|| format!("failed to open {}", test.display()))?;
        let started = Instant::now();
        let status = Command::new(&binary)
            .stdin(stdin)
            .stdout(Stdio::null())
            .status()
            .with_context(|| format!("failed to run {}", binary.display()))?;
        let elapsed = started.elapsed().as_secs_f64();
        ensure!(status.success(), "run {it} failed with {status}");

        println!("{elapsed:.4} on run {it} of {}", args.runs);
        samples.push(elapsed);
    }

    let report = summarize(samples);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("\nResults ...........................");
        println!("Average: {:.4}", report.average);
        for p in &report.percentiles {
            println!("{}%: {:.4}", p.pct, p.seconds);
        }
    }
    Ok(())
}

pub(crate) fn summarize(mut runs: Vec<f64>) -> TimingReport {
    runs.sort_by(f64::total_cmp);
    let average = runs.iter().sum::<f64>() / runs.len() as f64;
    let percentiles = [20, 40, 50, 60, 80]
        .iter()
        .map(|&pct| Percentile {
            pct,
            seconds: runs[pct as usize * runs.len() / 100],
        })
        .collect();
    TimingReport {
        runs,
        average,
        percentiles,
    }
}
