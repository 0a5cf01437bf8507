use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use duodex::{AnalyzerOptions, DuodexError, Searcher};

#[derive(Parser)]
#[command(name = "bool_search")]
#[command(about = "Evaluate boolean queries against a built index", long_about = None)]
struct Args {
    /// Index directory
    #[arg(long)]
    index: PathBuf,

    /// Single query expression; omit to read one query per line from stdin
    #[arg(long)]
    query: Option<String>,

    /// Number of results to print per query
    #[arg(long, default_value_t = duodex::search::DEFAULT_TOP)]
    top: usize,

    /// Stem query terms the way the index was built
    #[arg(long)]
    stem: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(args: Args) -> Result<()> {
    let mut searcher = Searcher::open(&args.index, AnalyzerOptions { stem: args.stem })?;

    let stdout = io::stdout();
    if let Some(query) = &args.query {
        let mut out = stdout.lock();
        run_one(&mut searcher, query, args.top, &mut out)?;
        return Ok(());
    }

    // REPL: one query per line, `#` comments, `----` closes each block.
    // Parse errors are reported and the loop keeps going.
    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.starts_with('#') {
            continue;
        }
        let mut out = stdout.lock();
        if !line.is_empty() {
            if let Err(err) = run_one(&mut searcher, &line, args.top, &mut out) {
                if let Some(DuodexError::QueryParse(_)) = err.downcast_ref::<DuodexError>() {
                    warn!("{err}");
                } else {
                    return Err(err);
                }
            }
        }
        writeln!(out, "----")?;
    }
    Ok(())
}

fn run_one(
    searcher: &mut Searcher,
    query: &str,
    top: usize,
    out: &mut impl Write,
) -> Result<()> {
    let started = Instant::now();
    let hits = searcher.search(query)?;
    info!(
        "search: hits={} elapsed_ms={} query={}",
        hits.len(),
        started.elapsed().as_millis(),
        query
    );
    searcher.render(&hits, top, out)?;
    Ok(())
}
