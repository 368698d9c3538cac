//! sitefreq - Site Frequencies from Protein Alignments
//!
//! Command-line front end for parsing a protein alignment and emitting
//! per-site residue frequencies, the numeric code matrix, the overall
//! composition, or the alignment itself.
//!
//! ## Usage
//!
//! ```bash
//! sitefreq alignment.phy                     # per-site counts to stdout
//! sitefreq alignment.phy -g -n               # strip gap columns, normalize
//! sitefreq seqs.fasta -e alignment --to phylip -o out.phy
//! sitefreq bare.txt -f raw -e codes          # bare sequences, numeric codes
//! ```
//!
//! ## Supported Formats
//!
//! - FASTA (.fasta, .fa, .fna, .faa, .fas)
//! - PHYLIP (.phy, .phylip), sequential and interleaved
//! - raw: bare sequences separated by blank lines (explicit `-f raw` only)

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{info, warn};

use sitefreq::formats::{fasta, parse_file_with_options, phylip, FileFormat};
use sitefreq::freq::FrequencyTable;
use sitefreq::matrix::CodeMatrix;
use sitefreq::model::Alignment;
use sitefreq::residue::AminoAcid;

/// File format specification for command line
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// FASTA format
    Fasta,
    /// PHYLIP format
    Phylip,
    /// Bare sequences separated by blank lines
    Raw,
    /// Auto-detect from extension and content
    Auto,
}

impl From<FormatArg> for Option<FileFormat> {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Fasta => Some(FileFormat::Fasta),
            FormatArg::Phylip => Some(FileFormat::Phylip),
            FormatArg::Raw => Some(FileFormat::Raw),
            FormatArg::Auto => None,
        }
    }
}

/// What to emit for the parsed alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EmitArg {
    /// Per-site residue counts (or frequencies with -n)
    Freqs,
    /// The numeric residue-code matrix, one row per sequence
    Codes,
    /// Overall residue composition across all sites
    Composition,
    /// The alignment itself, re-written in --to format
    Alignment,
}

/// Output format for -e alignment.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutFormatArg {
    /// FASTA, one record per sequence
    Fasta,
    /// Relaxed sequential PHYLIP
    Phylip,
}

/// sitefreq - site frequency tables from protein alignments
///
/// Parses a protein alignment (PHYLIP, FASTA, or bare sequences), optionally
/// strips gap-bearing columns, and emits per-site residue frequencies, the
/// numeric code matrix, the overall composition, or the alignment itself.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Alignment file to read (FASTA, PHYLIP, or bare sequences)
    file: PathBuf,

    /// Force a specific file format (overrides auto-detection)
    #[arg(short = 'f', long = "format", value_enum, default_value = "auto")]
    format: FormatArg,

    /// Output file. Use "-" for stdout.
    #[arg(short = 'o', long = "output", default_value = "-")]
    output: String,

    /// What to emit
    #[arg(short = 'e', long = "emit", value_enum, default_value = "freqs")]
    emit: EmitArg,

    /// Output format for -e alignment (default: phylip)
    #[arg(long = "to", value_enum)]
    to: Option<OutFormatArg>,

    /// Remove gap-bearing columns before any other processing
    #[arg(short = 'g', long = "strip-gaps")]
    strip_gaps: bool,

    /// Normalize each frequency column to sum to 1
    #[arg(short = 'n', long = "normalize")]
    normalize: bool,
}

/// Runs CLI mode: parse file, optionally strip gaps, and write the requested
/// output.
fn run_cli_mode(args: &Args) -> Result<()> {
    let forced_format: Option<FileFormat> = args.format.into();
    let alignment = parse_file_with_options(&args.file, forced_format)?;

    if let Some(warning) = &alignment.warning {
        warn!("{}", warning);
    }
    let duplicates = alignment.duplicate_names();
    if !duplicates.is_empty() {
        warn!("duplicate sequence names: {}", duplicates.join(", "));
    }

    let alignment = if args.strip_gaps {
        let (stripped, removed) = alignment.strip_gap_columns();
        info!(
            "removed {} gap-bearing columns, {} remain",
            removed,
            stripped.alignment_length()
        );
        stripped
    } else {
        alignment
    };

    let rendered = match args.emit {
        EmitArg::Freqs => render_freqs(&alignment, args.normalize)?,
        EmitArg::Codes => render_codes(&alignment)?,
        EmitArg::Composition => render_composition(&alignment)?,
        EmitArg::Alignment => render_alignment(&alignment, args.to.unwrap_or(OutFormatArg::Phylip)),
    };

    write_output(&args.output, &rendered)?;
    Ok(())
}

/// Per-site table: one line per site, one column per canonical residue.
fn render_freqs(alignment: &Alignment, normalize: bool) -> Result<String> {
    let matrix = CodeMatrix::encode(alignment)?;
    let mut table = FrequencyTable::tabulate(&matrix, AminoAcid::COUNT);
    if normalize {
        table = table.normalized();
    }

    let mut out = String::from("site");
    for aa in AminoAcid::ALL {
        write!(out, "\t{}", aa.to_letter() as char)?;
    }
    out.push('\n');
    for site in 0..table.nsite() {
        write!(out, "{}", site + 1)?;
        for aa in AminoAcid::ALL {
            let value = table.value(aa.index(), site).unwrap_or(0.0);
            if normalize {
                write!(out, "\t{:.6}", value)?;
            } else {
                write!(out, "\t{}", value)?;
            }
        }
        out.push('\n');
    }
    Ok(out)
}

/// Numeric code matrix: name, then the row's codes space-separated.
fn render_codes(alignment: &Alignment) -> Result<String> {
    let matrix = CodeMatrix::encode(alignment)?;
    let mut out = String::new();
    for (name, row) in matrix.names().iter().zip(matrix.iter_rows()) {
        write!(out, "{}\t", name)?;
        for (site, code) in row.iter().enumerate() {
            if site > 0 {
                out.push(' ');
            }
            write!(out, "{}", code)?;
        }
        out.push('\n');
    }
    Ok(out)
}

/// Whole-matrix composition: one line per canonical residue.
fn render_composition(alignment: &Alignment) -> Result<String> {
    let matrix = CodeMatrix::encode(alignment)?;
    let table = FrequencyTable::tabulate(&matrix, AminoAcid::COUNT);
    let totals = table.overall();
    let counted: f64 = totals.iter().sum();

    let mut out = String::new();
    for aa in AminoAcid::ALL {
        let count = totals[aa.index()];
        let share = if counted > 0.0 { count / counted } else { 0.0 };
        writeln!(
            out,
            "{}\t{}\t{}\t{:.6}",
            aa.to_letter() as char,
            aa.name(),
            count,
            share
        )?;
    }
    Ok(out)
}

/// The alignment itself, re-written in the requested format.
fn render_alignment(alignment: &Alignment, to: OutFormatArg) -> String {
    match to {
        OutFormatArg::Fasta => fasta::to_fasta_string(alignment),
        OutFormatArg::Phylip => {
            let (text, truncated) = phylip::to_phylip_string(alignment);
            for name in truncated {
                warn!("name '{}' truncated to 10 characters for PHYLIP output", name);
            }
            text
        }
    }
}

fn write_output(target: &str, content: &str) -> Result<()> {
    if target == "-" {
        // Write to stdout
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(content.as_bytes())?;
    } else {
        std::fs::write(target, content)?;
        eprintln!("Wrote output to {}", target);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.normalize && args.emit != EmitArg::Freqs {
        anyhow::bail!("-n/--normalize only applies to -e freqs");
    }
    if args.to.is_some() && args.emit != EmitArg::Alignment {
        anyhow::bail!("--to only applies to -e alignment");
    }

    run_cli_mode(&args)
}
