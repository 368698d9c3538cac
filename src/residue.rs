//! Amino-acid alphabet and residue coding.
//!
//! This module provides:
//! - The closed 20-residue amino-acid alphabet with its fixed numeric order
//! - Case-insensitive letter to index and index to letter conversion
//! - An extended residue classification with reserved codes for gap/stop
//!   and for unrecognized symbols

use std::fmt;

/// Numeric code reserved for gap and stop symbols (`-`, `.`, `*`).
pub const GAP_CODE: u8 = 20;

/// Numeric code reserved for symbols outside the alphabet and the gap set
/// (`X`, `?`, ambiguity codes, stray characters).
pub const UNKNOWN_CODE: u8 = 21;

/// Number of distinct residue codes (20 amino acids + gap + unknown).
pub const CODE_COUNT: usize = 22;

/// The 20 canonical amino acids.
///
/// Variant order fixes the numeric code of each residue: alanine is 0,
/// valine is 19, matching the one-letter order `ARNDCQEGHILKMFPSTWYV`.
/// All conversions in this module preserve that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AminoAcid {
    Alanine = 0,
    Arginine,
    Asparagine,
    Aspartate,
    Cysteine,
    Glutamine,
    Glutamate,
    Glycine,
    Histidine,
    Isoleucine,
    Leucine,
    Lysine,
    Methionine,
    Phenylalanine,
    Proline,
    Serine,
    Threonine,
    Tryptophan,
    Tyrosine,
    Valine,
}

impl AminoAcid {
    /// Size of the canonical alphabet.
    pub const COUNT: usize = 20;

    /// All residues in code order.
    pub const ALL: [AminoAcid; AminoAcid::COUNT] = [
        AminoAcid::Alanine,
        AminoAcid::Arginine,
        AminoAcid::Asparagine,
        AminoAcid::Aspartate,
        AminoAcid::Cysteine,
        AminoAcid::Glutamine,
        AminoAcid::Glutamate,
        AminoAcid::Glycine,
        AminoAcid::Histidine,
        AminoAcid::Isoleucine,
        AminoAcid::Leucine,
        AminoAcid::Lysine,
        AminoAcid::Methionine,
        AminoAcid::Phenylalanine,
        AminoAcid::Proline,
        AminoAcid::Serine,
        AminoAcid::Threonine,
        AminoAcid::Tryptophan,
        AminoAcid::Tyrosine,
        AminoAcid::Valine,
    ];

    /// Maps a one-letter code to its residue, accepting either case.
    ///
    /// Returns `None` for anything outside the 20 canonical letters; gaps,
    /// stops, `X` and IUPAC ambiguity codes are *not* amino acids and never
    /// alias to one.
    pub fn from_letter(letter: u8) -> Option<AminoAcid> {
        match letter.to_ascii_uppercase() {
            b'A' => Some(AminoAcid::Alanine),
            b'R' => Some(AminoAcid::Arginine),
            b'N' => Some(AminoAcid::Asparagine),
            b'D' => Some(AminoAcid::Aspartate),
            b'C' => Some(AminoAcid::Cysteine),
            b'Q' => Some(AminoAcid::Glutamine),
            b'E' => Some(AminoAcid::Glutamate),
            b'G' => Some(AminoAcid::Glycine),
            b'H' => Some(AminoAcid::Histidine),
            b'I' => Some(AminoAcid::Isoleucine),
            b'L' => Some(AminoAcid::Leucine),
            b'K' => Some(AminoAcid::Lysine),
            b'M' => Some(AminoAcid::Methionine),
            b'F' => Some(AminoAcid::Phenylalanine),
            b'P' => Some(AminoAcid::Proline),
            b'S' => Some(AminoAcid::Serine),
            b'T' => Some(AminoAcid::Threonine),
            b'W' => Some(AminoAcid::Tryptophan),
            b'Y' => Some(AminoAcid::Tyrosine),
            b'V' => Some(AminoAcid::Valine),
            _ => None,
        }
    }

    /// The uppercase one-letter code.
    pub fn to_letter(self) -> u8 {
        b"ARNDCQEGHILKMFPSTWYV"[self.index()]
    }

    /// The numeric code of this residue (0-19).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Maps a numeric code back to its residue; `None` outside 0-19.
    pub fn from_index(index: usize) -> Option<AminoAcid> {
        AminoAcid::ALL.get(index).copied()
    }

    /// Full lowercase residue name, e.g. `"alanine"`.
    pub fn name(self) -> &'static str {
        match self {
            AminoAcid::Alanine => "alanine",
            AminoAcid::Arginine => "arginine",
            AminoAcid::Asparagine => "asparagine",
            AminoAcid::Aspartate => "aspartate",
            AminoAcid::Cysteine => "cysteine",
            AminoAcid::Glutamine => "glutamine",
            AminoAcid::Glutamate => "glutamate",
            AminoAcid::Glycine => "glycine",
            AminoAcid::Histidine => "histidine",
            AminoAcid::Isoleucine => "isoleucine",
            AminoAcid::Leucine => "leucine",
            AminoAcid::Lysine => "lysine",
            AminoAcid::Methionine => "methionine",
            AminoAcid::Phenylalanine => "phenylalanine",
            AminoAcid::Proline => "proline",
            AminoAcid::Serine => "serine",
            AminoAcid::Threonine => "threonine",
            AminoAcid::Tryptophan => "tryptophan",
            AminoAcid::Tyrosine => "tyrosine",
            AminoAcid::Valine => "valine",
        }
    }
}

impl fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_letter() as char)
    }
}

/// Classification of one alignment cell.
///
/// Unlike [`AminoAcid::from_letter`], this mapping is total: every input
/// byte lands in exactly one of the three classes, so conversion of a whole
/// matrix never fails. Numeric codes extend the canonical 0-19 with
/// [`GAP_CODE`] and [`UNKNOWN_CODE`], which stay disjoint so callers can
/// tell "no residue aligned here" from "symbol not recognized".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Residue {
    /// One of the 20 canonical amino acids.
    Amino(AminoAcid),
    /// Gap or stop: `-`, `.`, `*`.
    Gap,
    /// Anything else (`X`, `?`, `B`, `Z`, digits, ...).
    Unknown,
}

impl Residue {
    /// Classifies a raw alignment byte. Total over all byte values.
    pub fn from_letter(letter: u8) -> Residue {
        match AminoAcid::from_letter(letter) {
            Some(aa) => Residue::Amino(aa),
            None => match letter {
                b'-' | b'.' | b'*' => Residue::Gap,
                _ => Residue::Unknown,
            },
        }
    }

    /// The extended numeric code: 0-19, [`GAP_CODE`] or [`UNKNOWN_CODE`].
    ///
    /// Agrees with [`AminoAcid::index`] on the 20 canonical residues.
    #[inline]
    pub fn code(self) -> u8 {
        match self {
            Residue::Amino(aa) => aa.index() as u8,
            Residue::Gap => GAP_CODE,
            Residue::Unknown => UNKNOWN_CODE,
        }
    }

    /// Maps an extended code back to its class; `None` above
    /// [`UNKNOWN_CODE`].
    pub fn from_code(code: u8) -> Option<Residue> {
        match code {
            GAP_CODE => Some(Residue::Gap),
            UNKNOWN_CODE => Some(Residue::Unknown),
            c => AminoAcid::from_index(c as usize).map(Residue::Amino),
        }
    }

    /// The normalized display letter: uppercase code, `-` for gaps, `X` for
    /// unknowns.
    pub fn to_letter(self) -> u8 {
        match self {
            Residue::Amino(aa) => aa.to_letter(),
            Residue::Gap => b'-',
            Residue::Unknown => b'X',
        }
    }

    /// True for the 20 canonical residues only.
    #[inline]
    pub fn is_canonical(self) -> bool {
        matches!(self, Residue::Amino(_))
    }
}

impl fmt::Display for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_letter() as char)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_index_round_trip() {
        for (i, &aa) in AminoAcid::ALL.iter().enumerate() {
            assert_eq!(aa.index(), i);
            assert_eq!(AminoAcid::from_index(i), Some(aa));
            assert_eq!(AminoAcid::from_letter(aa.to_letter()), Some(aa));
        }
    }

    #[test]
    fn test_code_order_is_fixed() {
        // The numbering the rest of the crate relies on.
        for (i, &letter) in b"ARNDCQEGHILKMFPSTWYV".iter().enumerate() {
            let aa = AminoAcid::from_letter(letter).unwrap();
            assert_eq!(aa.index(), i, "letter {} out of order", letter as char);
        }
        assert_eq!(AminoAcid::from_letter(b'A'), Some(AminoAcid::Alanine));
        assert_eq!(AminoAcid::from_letter(b'V'), Some(AminoAcid::Valine));
        assert_eq!(AminoAcid::Alanine.index(), 0);
        assert_eq!(AminoAcid::Valine.index(), 19);
    }

    #[test]
    fn test_indices_are_distinct() {
        let mut seen = [false; AminoAcid::COUNT];
        for &aa in &AminoAcid::ALL {
            assert!(!seen[aa.index()]);
            seen[aa.index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_case_insensitive_input() {
        assert_eq!(AminoAcid::from_letter(b'a'), Some(AminoAcid::Alanine));
        assert_eq!(AminoAcid::from_letter(b'w'), Some(AminoAcid::Tryptophan));
        // Output is always normalized to uppercase.
        assert_eq!(AminoAcid::from_letter(b'g').unwrap().to_letter(), b'G');
    }

    #[test]
    fn test_non_canonical_letters_are_rejected() {
        // None of these may alias to a valid index.
        for &letter in b"XxBZJOU?-.*@ 0123456789" {
            assert_eq!(
                AminoAcid::from_letter(letter),
                None,
                "{} must not map to an amino acid",
                letter as char
            );
        }
        assert_eq!(AminoAcid::from_index(20), None);
    }

    #[test]
    fn test_residue_classes() {
        for &letter in b"-.*" {
            assert_eq!(Residue::from_letter(letter), Residue::Gap);
        }
        for &letter in b"X?BZJOU@7" {
            assert_eq!(Residue::from_letter(letter), Residue::Unknown);
        }
        assert_eq!(
            Residue::from_letter(b'm'),
            Residue::Amino(AminoAcid::Methionine)
        );
    }

    #[test]
    fn test_extended_codes_are_disjoint() {
        assert_eq!(Residue::Gap.code(), GAP_CODE);
        assert_eq!(Residue::Unknown.code(), UNKNOWN_CODE);
        assert_ne!(GAP_CODE, UNKNOWN_CODE);
        assert!((GAP_CODE as usize) >= AminoAcid::COUNT);
        assert!((UNKNOWN_CODE as usize) >= AminoAcid::COUNT);
        assert_eq!(CODE_COUNT, UNKNOWN_CODE as usize + 1);
    }

    #[test]
    fn test_residue_agrees_with_amino_numbering() {
        // The extended mapping and the plain one must never diverge on the
        // 20 shared letters.
        for &aa in &AminoAcid::ALL {
            let residue = Residue::from_letter(aa.to_letter());
            assert_eq!(residue, Residue::Amino(aa));
            assert_eq!(residue.code() as usize, aa.index());
        }
    }

    #[test]
    fn test_residue_code_round_trip() {
        for code in 0..CODE_COUNT as u8 {
            let residue = Residue::from_code(code).unwrap();
            assert_eq!(residue.code(), code);
        }
        assert_eq!(Residue::from_code(CODE_COUNT as u8), None);
    }

    #[test]
    fn test_normalized_letters() {
        assert_eq!(Residue::from_letter(b'.').to_letter(), b'-');
        assert_eq!(Residue::from_letter(b'*').to_letter(), b'-');
        assert_eq!(Residue::from_letter(b'?').to_letter(), b'X');
        assert_eq!(Residue::from_letter(b'w').to_letter(), b'W');
    }

    #[test]
    fn test_names() {
        assert_eq!(AminoAcid::Alanine.name(), "alanine");
        assert_eq!(AminoAcid::Aspartate.name(), "aspartate");
        assert_eq!(AminoAcid::Valine.name(), "valine");
        assert_eq!(format!("{}", AminoAcid::Phenylalanine), "F");
        assert_eq!(format!("{}", Residue::Gap), "-");
    }
}
