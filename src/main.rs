use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use pagestats::analysis::layout::validate_boundary_points;
use pagestats::analysis::stats::{compute_doc_stats, StatsConfig};
use pagestats::core::model::{DocStats, PageDoc, StatValue};
use pagestats::export::{CsvExporter, Exporter, JsonExporter};

#[derive(Parser, Debug)]
#[command(name = "pagestats")]
#[command(version, about = "Aggregate descriptive statistics for parsed scanned-page documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute statistics for one or more page documents
    Stats {
        /// Input page document files (JSON)
        inputs: Vec<PathBuf>,

        /// Line width boundary points, ascending (e.g. 100,200)
        #[arg(short, long, value_delimiter = ',', required = true)]
        boundaries: Vec<u32>,

        /// File with stop words, one per line
        #[arg(short, long)]
        stop_words: Option<PathBuf>,

        /// Word length above which words count as oversized
        #[arg(long, default_value_t = 30)]
        max_word_length: usize,

        /// Split words on RegEx word boundaries instead of whitespace
        #[arg(short, long)]
        re_word_boundaries: bool,

        /// Output directory (default: ./stats_output)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format(s) to generate
        #[arg(short, long, value_enum, default_values_t = vec![Format::Json, Format::Csv])]
        format: Vec<Format>,

        /// Disable progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show the base counters of a single page document
    Info {
        /// Input page document file (JSON)
        input: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Debug, PartialEq)]
enum Format {
    Json,
    Csv,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Stats {
            inputs,
            boundaries,
            stop_words,
            max_word_length,
            re_word_boundaries,
            output,
            format,
            quiet,
        } => run_stats(
            inputs,
            boundaries,
            stop_words,
            max_word_length,
            re_word_boundaries,
            output,
            format,
            quiet,
        ),
        Commands::Info { input } => show_info(input),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_stats(
    inputs: Vec<PathBuf>,
    boundaries: Vec<u32>,
    stop_words: Option<PathBuf>,
    max_word_length: usize,
    re_word_boundaries: bool,
    output: Option<PathBuf>,
    formats: Vec<Format>,
    quiet: bool,
) -> Result<()> {
    if inputs.is_empty() {
        anyhow::bail!("No input files specified");
    }
    validate_boundary_points(&boundaries)?;

    let mut config = StatsConfig::new(boundaries)
        .with_max_word_length(max_word_length)
        .with_re_word_boundaries(re_word_boundaries);
    if let Some(path) = stop_words {
        config = config.with_stop_words(load_stop_words(&path)?);
    }

    let output_dir = output.unwrap_or_else(|| PathBuf::from("stats_output"));

    if !quiet {
        println!("[*] Processing {} document(s)", inputs.len());
        println!("[*] Output: {}", output_dir.display());
    }

    let mut records: Vec<DocStats> = Vec::with_capacity(inputs.len());
    let mut failed = 0;

    for (i, input) in inputs.iter().enumerate() {
        if !quiet {
            println!("[{}/{}] {}", i + 1, inputs.len(), input.display());
        }
        match process_document(input, &config, (i + 1) as u64) {
            Ok(record) => records.push(record),
            Err(e) => {
                eprintln!("  [!] Failed: {e:#}");
                failed += 1;
            }
        }
    }

    if !records.is_empty() {
        for format in &formats {
            match format {
                Format::Json => JsonExporter::new(output_dir.clone()).export(&records)?,
                Format::Csv => CsvExporter::new(output_dir.clone()).export(&records)?,
            }
        }
    }

    if !quiet {
        println!(
            "[*] Summary: {} succeeded, {} failed",
            records.len(),
            failed
        );
    }

    if failed > 0 {
        anyhow::bail!("{failed} document(s) failed to process");
    }

    Ok(())
}

fn process_document(input: &PathBuf, config: &StatsConfig, doc_num: u64) -> Result<DocStats> {
    let doc = load_doc(input)?;
    compute_doc_stats(&doc, config, Some(doc_num))
        .with_context(|| format!("failed to compute statistics for {}", input.display()))
}

fn show_info(input: PathBuf) -> Result<()> {
    let doc = load_doc(&input)?;
    let stats = doc.stats();

    println!("Page document");
    println!("=============");
    println!("File: {}", input.display());
    println!("Id: {}", doc.id);
    for (key, value) in stats.iter() {
        let shown = match value {
            StatValue::Int(v) => v.to_string(),
            StatValue::Float(v) => format!("{v:.2}"),
            StatValue::Null => "-".to_string(),
        };
        println!("{key}: {shown}");
    }
    if let Some(bbox) = doc.bbox() {
        println!("Extent: {:.0}x{:.0}", bbox.width(), bbox.height());
    }

    Ok(())
}

fn load_doc(path: &PathBuf) -> Result<PageDoc> {
    if !path.exists() {
        anyhow::bail!("Input file does not exist: {}", path.display());
    }
    let data =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("failed to parse page document {}", path.display()))
}

fn load_stop_words(path: &PathBuf) -> Result<HashSet<String>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read stop word file {}", path.display()))?;
    Ok(data
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
