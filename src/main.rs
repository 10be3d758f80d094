use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use mr_cfg::timer::TaskTimer;
use mr_cfg::{build_cfg, Algorithm, TextIndex};

#[derive(Parser)]
#[command(name = "mr-cfg")]
#[command(about = "Build the maximal-repeat context-free grammar of a file")]
struct Cli {
    /// Interval stabbing structure used during construction
    #[arg(value_enum)]
    algorithm: AlgorithmArg,

    /// Input file; its raw bytes form the text
    file: PathBuf,

    /// Exit with status 1 on success, like the original reference tool
    #[arg(long)]
    legacy_exit: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    #[value(name = "OPTIMAL")]
    Optimal,
    #[value(name = "ONLINE")]
    Online,
    #[value(name = "FAST")]
    Fast,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Optimal => Algorithm::Optimal,
            AlgorithmArg::Online => Algorithm::Online,
            AlgorithmArg::Fast => Algorithm::Fast,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => {
            if cli.legacy_exit {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut timer = TaskTimer::new();

    timer.start_task();
    println!("loading file");
    let data = std::fs::read(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;
    timer.end_task();

    timer.start_task();
    println!("building CSA");
    let index = TextIndex::from_bytes(&data)?;
    println!("\tcsa size: {}", index.n());
    println!("\talphabet: {}", index.sigma());
    println!("\twavelet tree size: {}", index.wavelet_len());
    timer.end_task();

    timer.start_task();
    println!("computing CFG");
    let cfg = build_cfg(&index, cli.algorithm.into());
    println!("\tnumber of rules: {}", cfg.rule_count());
    println!("\tstart rule size: {}", cfg.start_len());
    println!("\ttotal non-start size: {}", cfg.non_start_size());
    println!("\ttotal size: {}", cfg.total_size());
    timer.end_task();

    // Regenerate the input from the grammar for verification
    timer.start_task();
    println!("printing CFG");
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    cfg.expand_into(&index, &mut out)?;
    out.flush()?;
    timer.end_task();

    Ok(())
}
