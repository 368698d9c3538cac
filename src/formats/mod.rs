//! Multi-format alignment file parser.
//!
//! Supports automatic format detection for:
//! - FASTA (.fasta, .fa, .fna, .faa, .fas)
//! - PHYLIP (.phy, .phylip) - sequential and interleaved
//!
//! Bare-sequence ("raw") input has no recognizable signature and is never
//! auto-detected; it must be requested explicitly.
//!
//! Format detection priority:
//! 1. Explicit format specification (-f option)
//! 2. File extension
//! 3. Content-based detection

pub mod fasta;
pub mod phylip;
pub mod raw;

use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use thiserror::Error;

use crate::model::Alignment;
use fasta::parse_fasta_fast;

/// Detected file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Fasta,
    Phylip,
    Raw,
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileFormat::Fasta => write!(f, "FASTA"),
            FileFormat::Phylip => write!(f, "PHYLIP"),
            FileFormat::Raw => write!(f, "raw"),
        }
    }
}

/// Errors that can occur during file parsing.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to open file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Empty file")]
    EmptyFile,

    #[error("Could not determine file format.\n\
             Hint: Use -f/--format to specify the format explicitly:\n  \
             sitefreq -f fasta <file>   # FASTA format\n  \
             sitefreq -f phylip <file>  # PHYLIP format\n  \
             sitefreq -f raw <file>     # bare sequences, no names")]
    UnknownFormat,

    #[error("FASTA error: {0}")]
    FastaError(#[from] fasta::FastaError),

    #[error("PHYLIP error: {0}")]
    PhylipError(#[from] phylip::PhylipError),

    #[error("raw input error: {0}")]
    RawError(#[from] raw::RawError),
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Detects format from file extension.
pub fn detect_format_from_extension<P: AsRef<Path>>(path: P) -> Option<FileFormat> {
    let ext = path.as_ref().extension().and_then(OsStr::to_str)?;
    match ext.to_lowercase().as_str() {
        // FASTA extensions
        "fa" | "fas" | "fasta" | "fna" | "faa" | "ffn" | "frn" => Some(FileFormat::Fasta),
        // PHYLIP extensions
        "phy" | "phylip" | "ph" => Some(FileFormat::Phylip),
        _ => None,
    }
}

/// Detects the file format by examining the content.
///
/// Raw input is deliberately absent: anything could be a bare sequence, so
/// guessing it here would shadow real format errors.
pub fn detect_format_from_content(content: &str) -> Option<FileFormat> {
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        // FASTA: starts with > - very clear indicator
        if trimmed.starts_with('>') {
            return Some(FileFormat::Fasta);
        }

        // PHYLIP: first line is "ntax nsite" (two integers)
        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        if parts.len() >= 2 && parts[0].parse::<usize>().is_ok() && parts[1].parse::<usize>().is_ok()
        {
            return Some(FileFormat::Phylip);
        }

        // First non-empty line doesn't match any known format
        return None;
    }

    None
}

/// Tries to parse with multiple formats, returning the first success.
fn try_parse_formats(
    content: &str,
    formats: &[FileFormat],
) -> ParseResult<(Alignment, FileFormat)> {
    let mut last_error = None;

    for &format in formats {
        match parse_content(content, format) {
            Ok(alignment) => return Ok((alignment, format)),
            Err(e) => last_error = Some(e),
        }
    }

    Err(last_error.unwrap_or(ParseError::UnknownFormat))
}

/// Parses content with a specific format.
fn parse_content(content: &str, format: FileFormat) -> ParseResult<Alignment> {
    match format {
        FileFormat::Fasta => parse_fasta_fast(content).map_err(ParseError::FastaError),
        FileFormat::Phylip => phylip::parse_phylip_str(content).map_err(ParseError::PhylipError),
        FileFormat::Raw => raw::parse_raw_str(content).map_err(ParseError::RawError),
    }
}

/// Parses a sequence file with optional format specification.
///
/// Detection priority:
/// 1. Explicit format (if provided)
/// 2. File extension
/// 3. Content-based detection
/// 4. Try FASTA then PHYLIP (raw is only ever explicit)
pub fn parse_file_with_options<P: AsRef<Path>>(
    path: P,
    forced_format: Option<FileFormat>,
) -> ParseResult<Alignment> {
    let file = File::open(&path)?;
    let metadata = file.metadata()?;
    let file_size = metadata.len() as usize;

    if file_size == 0 {
        return Err(ParseError::EmptyFile);
    }

    let mut reader = BufReader::with_capacity(1024 * 1024, file);
    let mut content = String::with_capacity(file_size);
    reader.read_to_string(&mut content)?;

    // 1. Use explicit format if provided
    if let Some(format) = forced_format {
        return parse_content(&content, format);
    }

    // 2. Try to detect from extension
    if let Some(format) = detect_format_from_extension(&path) {
        match parse_content(&content, format) {
            Ok(alignment) => return Ok(alignment),
            Err(_) => {
                // Extension didn't work, try content detection
            }
        }
    }

    // 3. Try content-based detection
    if let Some(format) = detect_format_from_content(&content) {
        return parse_content(&content, format);
    }

    // 4. Last resort: FASTA has clear markers, PHYLIP is more ambiguous
    match try_parse_formats(&content, &[FileFormat::Fasta, FileFormat::Phylip]) {
        Ok((alignment, _)) => Ok(alignment),
        Err(_) => Err(ParseError::UnknownFormat),
    }
}

/// Parses a sequence file, automatically detecting the format.
/// Convenience wrapper around parse_file_with_options.
pub fn parse_file<P: AsRef<Path>>(path: P) -> ParseResult<Alignment> {
    parse_file_with_options(path, None)
}

/// Parses a sequence file with explicit format specification.
///
/// Use this when you know the format in advance or want to force a specific parser.
pub fn parse_file_as<P: AsRef<Path>>(path: P, format: FileFormat) -> ParseResult<Alignment> {
    parse_file_with_options(path, Some(format))
}
