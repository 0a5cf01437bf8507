use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use walkdir::WalkDir;

use duodex::stemmer::{stem, stem_en, stem_ru};
use duodex::{build_index, AnalyzerOptions, BuildOptions, IndexReader, Tokenizer};

#[derive(Parser)]
#[command(name = "bool_index")]
#[command(about = "Build and inspect the bilingual boolean index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the on-disk index from a corpus tree
    Build {
        /// Corpus root directory
        #[arg(long)]
        corpus: PathBuf,

        /// Output directory for the index artifacts
        #[arg(long)]
        out: PathBuf,

        /// Index only the first N corpus files (0 = all)
        #[arg(long, default_value_t = 0)]
        limit: usize,

        /// Stem tokens before indexing
        #[arg(long)]
        stem: bool,
    },
    /// Dump the first postings of a term
    Lookup {
        /// Index directory
        #[arg(long)]
        index: PathBuf,

        /// Term to look up
        #[arg(long)]
        term: String,

        /// Stem the term the way the index was built
        #[arg(long)]
        stem: bool,
    },
    /// Run the tokenizer over a file or a .txt corpus tree
    Tokenize {
        /// Input file or directory
        #[arg(long)]
        input: PathBuf,

        /// Print each token to stdout
        #[arg(long)]
        print: bool,

        /// Process only the first N files (0 = all)
        #[arg(long, default_value_t = 0)]
        limit: usize,

        /// Write term frequencies to this TSV, most frequent first
        #[arg(long)]
        freq_out: Option<PathBuf>,
    },
    /// Stem tokens read one per line
    Stem {
        /// Stemmer to apply: auto, en, or ru
        #[arg(long, default_value = "auto")]
        lang: String,

        /// Token file (stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Build {
            corpus,
            out,
            limit,
            stem,
        } => {
            let options = BuildOptions {
                limit,
                analyzer: AnalyzerOptions { stem },
            };
            build_index(&corpus, &out, &options)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Lookup { index, term, stem } => {
            lookup(&index, &term, stem)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Tokenize {
            input,
            print,
            limit,
            freq_out,
        } => tokenize(&input, print, limit, freq_out.as_deref()),
        Commands::Stem { lang, input } => {
            run_stem(&lang, input.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

const LOOKUP_SHOW: usize = 30;

/// Print a term's dictionary entry and its first postings.
fn lookup(index_dir: &Path, term: &str, stem: bool) -> Result<()> {
    let tokenizer = Tokenizer::new(&AnalyzerOptions { stem });
    let normalized = tokenizer.normalize_term(term);

    let mut reader = IndexReader::open(index_dir)?;
    let Some((df, _, _)) = reader.term_meta(&normalized) else {
        println!("NOT FOUND");
        return Ok(());
    };

    let postings = reader.postings(&normalized)?;
    println!("term={normalized} df={df}");
    for docid in postings.iter().take(LOOKUP_SHOW) {
        println!("{docid}");
    }
    if postings.len() > LOOKUP_SHOW {
        println!("... ({} more)", postings.len() - LOOKUP_SHOW);
    }
    Ok(())
}

#[derive(Default)]
struct TokenizeStats {
    files: u64,
    bytes: u64,
    tokens: u64,
    token_len_sum: u64,
    errors: u64,
}

fn tokenize(input: &Path, print: bool, limit: usize, freq_out: Option<&Path>) -> Result<ExitCode> {
    if !input.exists() {
        anyhow::bail!("input path does not exist: {}", input.display());
    }

    let files = if input.is_file() {
        vec![input.to_path_buf()]
    } else {
        let mut files: Vec<PathBuf> = WalkDir::new(input)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "txt"))
            .collect();
        files.sort();
        if limit > 0 && limit < files.len() {
            files.truncate(limit);
        }
        files
    };

    let tokenizer = Tokenizer::new(&AnalyzerOptions::default());
    let mut stats = TokenizeStats::default();
    let mut freq: HashMap<String, u64> = HashMap::new();
    let started = Instant::now();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for path in &files {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) => {
                warn!("cannot open {}: {err}", path.display());
                stats.errors += 1;
                continue;
            }
        };
        let mut reader = BufReader::new(file);
        skip_header(&mut reader)?;

        let mut line = Vec::new();
        loop {
            line.clear();
            let n = reader.read_until(b'\n', &mut line)?;
            if n == 0 {
                break;
            }
            stats.bytes += n as u64;
            for token in tokenizer.tokenize_line(&line) {
                stats.tokens += 1;
                stats.token_len_sum += token.chars().count() as u64;
                if print {
                    writeln!(out, "{token}")?;
                }
                if freq_out.is_some() {
                    *freq.entry(token).or_insert(0) += 1;
                }
            }
        }
        stats.files += 1;
    }
    out.flush()?;

    let secs = started.elapsed().as_secs_f64();
    let avg_len = if stats.tokens > 0 {
        stats.token_len_sum as f64 / stats.tokens as f64
    } else {
        0.0
    };
    let kb = stats.bytes as f64 / 1024.0;
    info!(
        "tokenize: files={} bytes={} tokens={} avg_token_len={:.2} elapsed_s={:.3} speed_kb_s={:.1} errors={}",
        stats.files,
        stats.bytes,
        stats.tokens,
        avg_len,
        secs,
        if secs > 0.0 { kb / secs } else { 0.0 },
        stats.errors
    );

    if let Some(freq_path) = freq_out {
        write_freq(freq_path, &freq)?;
        info!(
            "tokenize: freq_out={} unique_terms={}",
            freq_path.display(),
            freq.len()
        );
    }

    Ok(if stats.errors > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Corpus files start with a 6-line metadata header.
fn skip_header(reader: &mut impl BufRead) -> io::Result<()> {
    let mut line = Vec::new();
    for _ in 0..6 {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
    }
    Ok(())
}

/// Frequency table sorted by descending count, ties by ascending term.
fn write_freq(path: &Path, freq: &HashMap<String, u64>) -> Result<()> {
    let mut entries: Vec<(&String, &u64)> = freq.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    let mut out = BufWriter::new(File::create(path)?);
    for (term, count) in entries {
        writeln!(out, "{term}\t{count}")?;
    }
    out.flush()?;
    Ok(())
}

fn run_stem(lang: &str, input: Option<&Path>) -> Result<()> {
    let stemmer: fn(&str) -> String = match lang {
        "auto" => stem,
        "en" => stem_en,
        "ru" => stem_ru,
        other => anyhow::bail!("unknown --lang value: {other} (expected auto, en, or ru)"),
    };

    let reader: Box<dyn BufRead> = match input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut tokens: u64 = 0;
    let mut changed: u64 = 0;
    for line in reader.lines() {
        let line = line?;
        let token = line.trim_end_matches(['\n', '\r']);
        if token.is_empty() {
            continue;
        }
        let stemmed = stemmer(token);
        if stemmed != token {
            changed += 1;
        }
        writeln!(out, "{stemmed}")?;
        tokens += 1;
    }
    out.flush()?;

    info!("stem: tokens_in={tokens} changed={changed} lang={lang}");
    Ok(())
}
