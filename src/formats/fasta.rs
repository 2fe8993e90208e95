//! FASTA record decoding and writing.
//!
//! A record is a header line followed by one or more sequence lines:
//!
//! ```text
//! >organism1 optional description
//! MKTAYIAKQRQISFVKSHFSRQLEERLGLIEVQAPILSRVGDGTQDNLSGAEKAVQVKVKALPDAQ
//! FEVVHSLAKWKRQTLGQHDFSAGEGLYTHMKALRPDEDRLSPLHSVYVDQWDWERVMGDGERQFSTLK
//! ```
//!
//! Decoding concatenates every non-header line; residues are not checked
//! here, that happens during composition analysis.

use std::io::{self, Write};

use crate::model::Sequence;

/// Line width used by the original reports.
pub const DEFAULT_LINE_WIDTH: usize = 60;

/// Decodes one record into a single contiguous sequence.
///
/// Lines starting with '>' are headers; the identifier is the first
/// whitespace-delimited token of the first header. All other lines are
/// joined with their line terminators removed. Text without sequence lines
/// decodes to an empty sequence.
///
/// # Examples
///
/// ```
/// use protscan::formats::fasta::decode_record;
///
/// let seq = decode_record(">x\nABC\nDEF\n");
/// assert_eq!(seq.id(), "x");
/// assert_eq!(seq.as_str(), "ABCDEF");
/// ```
pub fn decode_record(content: &str) -> Sequence {
    let mut id: Option<&str> = None;
    let mut data = String::with_capacity(content.len());

    // `lines` strips "\n" and "\r\n"; stray carriage returns are dropped too
    for line in content.lines() {
        if let Some(header) = line.strip_prefix('>') {
            if id.is_none() {
                id = Some(header.split_whitespace().next().unwrap_or(""));
            }
        } else if line.contains('\r') {
            data.extend(line.chars().filter(|&c| c != '\r'));
        } else {
            data.push_str(line);
        }
    }

    Sequence::new(id.unwrap_or(""), data)
}

/// Counts header lines in a record.
pub fn header_count(content: &str) -> usize {
    content.lines().filter(|l| l.starts_with('>')).count()
}

/// Writes a sequence as a FASTA record, wrapping residues at `width`.
///
/// A `width` of 0 writes the whole sequence on one line.
pub fn write_fasta<W: Write>(writer: &mut W, sequence: &Sequence, width: usize) -> io::Result<()> {
    writeln!(writer, ">{}", sequence.id())?;

    if sequence.is_empty() {
        return Ok(());
    }
    if width == 0 {
        return writeln!(writer, "{}", sequence.as_str());
    }

    let residues: Vec<char> = sequence.residues().collect();
    for chunk in residues.chunks(width) {
        let line: String = chunk.iter().collect();
        writeln!(writer, "{}", line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_multiline_record() {
        let seq = decode_record(">x\nABC\nDEF");
        assert_eq!(seq.id(), "x");
        assert_eq!(seq.as_str(), "ABCDEF");
    }

    #[test]
    fn test_decode_with_description() {
        let seq = decode_record(">sp|P69905|HBA_HUMAN Hemoglobin subunit alpha\nMVLSPADKTN\n");
        assert_eq!(seq.id(), "sp|P69905|HBA_HUMAN");
        assert_eq!(seq.len(), 10);
    }

    #[test]
    fn test_decode_crlf() {
        let seq = decode_record(">x\r\nMKT\r\nAYI\r\n");
        assert_eq!(seq.id(), "x");
        assert_eq!(seq.as_str(), "MKTAYI");
    }

    #[test]
    fn test_decode_without_header() {
        let seq = decode_record("MKT\nAYI\n");
        assert_eq!(seq.id(), "");
        assert_eq!(seq.as_str(), "MKTAYI");
    }

    #[test]
    fn test_decode_empty_record() {
        assert!(decode_record("").is_empty());
        assert!(decode_record(">only_header\n").is_empty());
        assert_eq!(decode_record(">only_header\n").id(), "only_header");
    }

    #[test]
    fn test_decode_keeps_case_and_symbols() {
        // No validation or normalisation at this stage
        let seq = decode_record(">x\nmk*X\n");
        assert_eq!(seq.as_str(), "mk*X");
    }

    #[test]
    fn test_header_count() {
        assert_eq!(header_count(">a\nMK\n>b\nTA\n"), 2);
        assert_eq!(header_count("MK\n"), 0);
    }

    #[test]
    fn test_write_wrapped() {
        let seq = Sequence::new("organism1-mutacao", "ABCDEFG");
        let mut out = Vec::new();
        write_fasta(&mut out, &seq, 3).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), ">organism1-mutacao\nABC\nDEF\nG\n");
    }

    #[test]
    fn test_write_unwrapped_and_empty() {
        let mut out = Vec::new();
        write_fasta(&mut out, &Sequence::new("a", "MKTAYI"), 0).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), ">a\nMKTAYI\n");

        let mut out = Vec::new();
        write_fasta(&mut out, &Sequence::new("e", ""), DEFAULT_LINE_WIDTH).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), ">e\n");
    }

    #[test]
    fn test_write_then_decode() {
        let seq = Sequence::new("p", "MKTAYIAKQRQISFVKSHFSRQLEERLGLIEVQAPILSRVGDGTQDNLSGAEKAVQVKVKALPDAQFEVV");
        let mut out = Vec::new();
        write_fasta(&mut out, &seq, DEFAULT_LINE_WIDTH).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert_eq!(decode_record(&text), seq);
    }
}
