//! # sitefreq - Site Frequencies from Protein Alignments
//!
//! Reads multi-sequence protein alignments, maps amino-acid letters to and
//! from numeric residue codes, strips gap-bearing columns, and tabulates
//! per-site residue frequency distributions.
//!
//! ## Architecture
//!
//! The crate is a pipeline from file bytes to a frequency table:
//! - `formats`: PHYLIP (interleaved and sequential), FASTA, and bare-sequence
//!   parsing, writing, and format detection
//! - `model`: sequence names, sequences, and alignment-level operations
//! - `residue`: the fixed 20-letter amino-acid alphabet and its numeric codes
//! - `matrix`: flat row-major matrix of residue codes encoded from an
//!   alignment
//! - `freq`: per-site frequency tables, normalization, and overall
//!   composition

pub mod formats;
pub mod freq;
pub mod matrix;
pub mod model;
pub mod residue;
