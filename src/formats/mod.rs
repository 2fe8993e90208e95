//! Input and output formats.
//!
//! - `fasta`: record decoding and wrapped FASTA output
//! - `tsv`: tab-separated composition and diff tables
//! - `svg`: bar chart of residue counts
//!
//! This is the only layer that deals with files; the analysis modules work
//! on decoded sequences and report records.

pub mod fasta;
pub mod svg;
pub mod tsv;

use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::warn;
use thiserror::Error;

use crate::model::Sequence;

/// Errors that can occur while reading an input record.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Returns true if the path has a FASTA extension.
pub fn is_fasta_extension<P: AsRef<Path>>(path: P) -> bool {
    let Some(ext) = path.as_ref().extension().and_then(OsStr::to_str) else {
        return false;
    };
    matches!(
        ext.to_lowercase().as_str(),
        "fa" | "fas" | "fasta" | "faa" | "mpfa"
    )
}

/// Name used for an input in report file names: the file stem.
pub fn record_name<P: AsRef<Path>>(path: P) -> String {
    path.as_ref()
        .file_stem()
        .and_then(OsStr::to_str)
        .map(str::to_string)
        .unwrap_or_else(|| path.as_ref().display().to_string())
}

/// Reads a file holding one record and decodes it.
///
/// When the file has no header, the sequence is named after the file stem.
pub fn read_record_file<P: AsRef<Path>>(path: P) -> ParseResult<Sequence> {
    let file = File::open(&path)?;
    let file_size = file.metadata()?.len() as usize;

    let mut reader = BufReader::new(file);
    let mut content = String::with_capacity(file_size);
    reader.read_to_string(&mut content)?;

    if !is_fasta_extension(&path) {
        warn!(
            "{}: unexpected extension, reading as FASTA",
            path.as_ref().display()
        );
    }
    let headers = fasta::header_count(&content);
    if headers > 1 {
        warn!(
            "{}: {} header lines found; sequence lines of all records are joined",
            path.as_ref().display(),
            headers
        );
    }

    let sequence = fasta::decode_record(&content);
    if sequence.id().is_empty() {
        return Ok(sequence.renamed(record_name(&path)));
    }
    Ok(sequence)
}
