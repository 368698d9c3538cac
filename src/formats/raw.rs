//! Bare-sequence reader.
//!
//! Some pipeline steps hand sequences around without any surrounding
//! format: no header line, no names, just residue characters wrapped over
//! one or more lines. A blank line (or end of input) terminates a record.
//!
//! ```text
//! ARNDCQEGHILK
//! MFPSTWYV
//!
//! AAAACCCCGGGG
//! RRRRNNNN
//! ```
//!
//! Because this layout has no recognizable signature, it is never
//! auto-detected; callers must ask for it explicitly.

use std::io::BufRead;

use thiserror::Error;

use crate::formats::phylip::{is_sequence_byte, next_nonspace};
use crate::model::{Alignment, Sequence};

/// Errors that can occur while reading bare sequences.
#[derive(Error, Debug)]
pub enum RawError {
    #[error("Failed to read input: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Empty input: no sequence data found")]
    EmptyFile,

    #[error("Unexpected symbol '{symbol}' in sequence data")]
    UnexpectedSymbol { symbol: char },
}

/// Result type for bare-sequence operations.
pub type RawResult<T> = Result<T, RawError>;

/// Reads one bare sequence from the stream.
///
/// Leading whitespace (including blank lines) is skipped. The record then
/// runs until a blank line or end of input; line breaks and spaces inside
/// the record are dropped, so a sequence may wrap over any number of lines.
/// Returns `Ok(None)` when the stream is exhausted before any residue, which
/// is the normal end-of-stream signal when draining records in a loop.
pub fn read_raw_sequence<R: BufRead>(reader: &mut R) -> RawResult<Option<Vec<u8>>> {
    let first = match next_nonspace(reader)? {
        Some(byte) => byte,
        None => return Ok(None),
    };
    if !is_sequence_byte(first) {
        return Err(RawError::UnexpectedSymbol {
            symbol: first as char,
        });
    }

    let mut data = vec![first];
    let mut at_line_break = false;
    loop {
        let buf = reader.fill_buf()?;
        let Some(&byte) = buf.first() else {
            break;
        };
        match byte {
            b'\n' => {
                reader.consume(1);
                if at_line_break {
                    // Second newline with nothing in between: blank line.
                    break;
                }
                at_line_break = true;
            }
            b' ' | b'\t' | b'\r' => {
                reader.consume(1);
            }
            _ if is_sequence_byte(byte) => {
                reader.consume(1);
                at_line_break = false;
                data.push(byte);
            }
            other => {
                return Err(RawError::UnexpectedSymbol {
                    symbol: other as char,
                });
            }
        }
    }
    Ok(Some(data))
}

/// Drains a buffer of blank-line-separated bare sequences into an
/// [`Alignment`], synthesizing `seq1`, `seq2`, … as row names.
pub fn parse_raw_str(content: &str) -> RawResult<Alignment> {
    let mut reader = content.as_bytes();
    let mut sequences = Vec::new();
    while let Some(data) = read_raw_sequence(&mut reader)? {
        let name = format!("seq{}", sequences.len() + 1);
        sequences.push(Sequence::from_bytes(name, data));
    }
    if sequences.is_empty() {
        return Err(RawError::EmptyFile);
    }
    Ok(Alignment::new(sequences))
}
