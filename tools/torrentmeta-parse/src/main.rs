//! Line-oriented release title parser.
//!
//! Reads one title per line from stdin (or `--input`) and writes one JSON
//! parse outcome per line to stdout.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use torrentmeta_core::{ParseOutcome, ParserConfig, TorrentParser};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// CLI arguments
#[derive(Debug, Parser)]
#[command(name = "torrentmeta-parse")]
#[command(about = "Parse torrent release titles into JSON records")]
#[command(version)]
struct Cli {
    /// Read titles from this file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Emit one pretty-printed JSON array instead of JSON lines
    #[arg(long)]
    pretty: bool,

    /// Latest year accepted as a release year
    #[arg(long, env = "TORRENTMETA_LATEST_YEAR", default_value_t = ParserConfig::DEFAULT_LATEST_YEAR)]
    latest_year: u32,

    /// Keep season and episode on releases classified as movies
    #[arg(long)]
    keep_movie_episodes: bool,

    /// Skip the anime-specific fields
    #[arg(long)]
    no_anime: bool,

    /// Only emit invalid titles and records below the confidence threshold
    #[arg(long)]
    only_low_confidence: bool,
}

impl Cli {
    fn parser_config(&self) -> ParserConfig {
        ParserConfig::new()
            .with_latest_year(self.latest_year)
            .with_movie_episodes(self.keep_movie_episodes)
            .with_anime_info(!self.no_anime)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let parser = TorrentParser::new(cli.parser_config()).context("failed to build parser")?;

    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let stdout = io::stdout().lock();
    let mut writer = BufWriter::new(stdout);
    let written = run(&cli, &parser, reader, &mut writer)?;
    writer.flush().context("failed to flush output")?;

    info!(records = written, "done");
    Ok(())
}

/// Parses every non-blank line of `reader` and writes the outcomes.
/// Returns the number of records written.
fn run<R: BufRead, W: Write>(
    cli: &Cli,
    parser: &TorrentParser,
    reader: R,
    mut writer: W,
) -> Result<usize> {
    let mut collected = Vec::new();
    let mut written = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", index + 1))?;
        let title = line.trim();
        if title.is_empty() {
            continue;
        }

        let outcome = ParseOutcome::from(parser.parse(title));
        if cli.only_low_confidence && !is_low_confidence(parser, &outcome) {
            debug!(title, "skipping confident record");
            continue;
        }

        if cli.pretty {
            collected.push(outcome);
        } else {
            serde_json::to_writer(&mut writer, &outcome).context("failed to encode record")?;
            writeln!(writer).context("failed to write output")?;
        }
        written += 1;
    }

    if cli.pretty {
        serde_json::to_writer_pretty(&mut writer, &collected).context("failed to encode records")?;
        writeln!(writer).context("failed to write output")?;
    }

    Ok(written)
}

fn is_low_confidence(parser: &TorrentParser, outcome: &ParseOutcome) -> bool {
    match outcome.parsed() {
        Some(release) => parser.is_low_confidence(release),
        None => true,
    }
}
