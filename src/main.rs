use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use rayon::prelude::*;

use chunkmatch::matcher::{self, BatchMatcher};
use chunkmatch::modular::{self, Modulus};
use chunkmatch::util;

/// Number of rolling hash values printed per target in verbose mode.
const VERBOSE_HASH_COUNT: usize = 5;
/// Number of Bloom filter bits dumped in verbose mode.
const VERBOSE_BLOOM_BITS: usize = 160;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    /// Naive substring scan, one pass over the target per chunk
    Simple,
    /// Rabin-Karp rolling hash, one pass over the target per chunk
    Rk,
    /// All chunks at once through a Bloom filter, one pass per target
    RkBatch,
}

#[derive(Parser)]
#[command(
    name = "chunkmatch",
    about = "Count how many fixed-size chunks of a query document appear verbatim in target documents"
)]
struct Cli {
    /// Matching algorithm
    #[arg(short = 't', long, value_enum, default_value_t = Algorithm::Simple)]
    algo: Algorithm,

    /// Chunk length in bytes
    #[arg(short = 'k', long, default_value_t = 100)]
    chunk_size: usize,

    /// Prime modulus for the rolling hash
    #[arg(short = 'q', long, default_value_t = modular::DEFAULT_MODULUS)]
    modulus: u64,

    /// Print rolling hash values and the Bloom filter's leading bits
    #[arg(short, long)]
    verbose: bool,

    /// Query document whose chunks are matched
    query: PathBuf,

    /// Documents to match the query chunks against
    #[arg(required = true)]
    targets: Vec<PathBuf>,
}

struct Report {
    matched: usize,
    window_hashes: Vec<u64>,
}

fn match_target(
    cli: &Cli,
    modulus: Modulus,
    query: &[u8],
    batch: Option<&BatchMatcher<'_>>,
    path: &Path,
) -> Result<Report> {
    let target = util::load_document(path)?;

    let matched = match cli.algo {
        Algorithm::Simple => query
            .chunks_exact(cli.chunk_size)
            .filter(|chunk| matcher::simple_match(chunk, &target))
            .count(),
        Algorithm::Rk => {
            let mut found = 0;
            for chunk in query.chunks_exact(cli.chunk_size) {
                if matcher::rolling_match(chunk, &target, modulus)? {
                    found += 1;
                }
            }
            found
        }
        // No batch matcher means the query yielded zero chunks.
        Algorithm::RkBatch => batch.map_or(0, |b| b.count_matches(&target)),
    };

    let window_hashes = if cli.verbose && cli.algo == Algorithm::Rk {
        matcher::window_hashes(&target, cli.chunk_size, modulus, VERBOSE_HASH_COUNT)?
    } else {
        Vec::new()
    };

    Ok(Report {
        matched,
        window_hashes,
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.chunk_size == 0 {
        bail!("chunk size must be positive");
    }
    let modulus = Modulus::new(cli.modulus)?;

    let query = util::load_document(&cli.query)
        .with_context(|| format!("Failed to load query document: {}", cli.query.display()))?;
    let chunk_total = query.len() / cli.chunk_size;

    // Insert phase runs once; the resulting filter is read-only and shared
    // across all target scans. A query too short for a single chunk gets no
    // filter at all instead of a zero-bit one.
    let batch = if cli.algo == Algorithm::RkBatch && chunk_total > 0 {
        let filter_bits = (chunk_total * 10) & !7;
        let matcher = BatchMatcher::new(&query, cli.chunk_size, filter_bits, modulus)?;
        if cli.verbose {
            println!(
                "{} chunks inserted; bloom bits: {}",
                matcher.chunk_count(),
                matcher.filter().dump(VERBOSE_BLOOM_BITS)
            );
        }
        Some(matcher)
    } else {
        None
    };

    let start = Instant::now();
    let reports: Vec<(&PathBuf, Result<Report>)> = cli
        .targets
        .par_iter()
        .map(|path| (path, match_target(&cli, modulus, &query, batch.as_ref(), path)))
        .collect();
    let elapsed = start.elapsed();

    for (path, report) in reports {
        let report =
            report.with_context(|| format!("Failed to match target: {}", path.display()))?;
        if !report.window_hashes.is_empty() {
            let rendered: Vec<String> = report
                .window_hashes
                .iter()
                .map(|h| h.to_string())
                .collect();
            println!("{}: hashes: {}", path.display(), rendered.join(" "));
        }
        let ratio = if chunk_total > 0 {
            report.matched as f64 / chunk_total as f64
        } else {
            0.0
        };
        println!(
            "{}: {:.2} matched: {} out of {}",
            path.display(),
            ratio,
            report.matched,
            chunk_total
        );
    }

    if cli.verbose {
        println!("Time elapsed: {:.3}s", elapsed.as_secs_f64());
    }

    Ok(())
}
