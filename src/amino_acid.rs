//! Amino acid alphabet definitions.
//!
//! This module provides:
//! - The 20 canonical amino acid codes with their full names
//! - Code lookup used by composition analysis
//! - The ordered code list used for mutation draws
//!
//! Tables are immutable once built and are handed to the analyzer and
//! simulator explicitly, so alternate alphabets can be substituted.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur when building an amino acid table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlphabetError {
    #[error("Amino acid table must contain at least one code")]
    Empty,

    #[error("Duplicate amino acid code '{0}'")]
    DuplicateCode(char),
}

/// A single amino acid: its one-letter code and full name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AminoAcid {
    /// One-letter code
    pub code: char,
    /// Full name, as printed in composition reports
    pub name: String,
}

impl AminoAcid {
    /// Creates a new amino acid entry.
    pub fn new(code: char, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
        }
    }
}

/// The 20 canonical codes, in the order used for mutation draws.
const STANDARD: [(char, &str); 20] = [
    ('A', "Alanina"),
    ('R', "Arginina"),
    ('N', "Asparagina"),
    ('D', "Ácido aspártico"),
    ('C', "Cisteína"),
    ('E', "Ácido glutâmico"),
    ('Q', "Glutamina"),
    ('G', "Glicina"),
    ('H', "Histidina"),
    ('I', "Isoleucina"),
    ('L', "Leucina"),
    ('K', "Lisina"),
    ('M', "Metionina"),
    ('F', "Fenilalanina"),
    ('P', "Prolina"),
    ('S', "Serina"),
    ('T', "Treonina"),
    ('W', "Triptofano"),
    ('Y', "Tirosina"),
    ('V', "Valina"),
];

/// An ordered amino acid alphabet with code lookup.
#[derive(Debug, Clone)]
pub struct AminoAcidTable {
    acids: Vec<AminoAcid>,
    /// Code to index into `acids`
    index: HashMap<char, usize>,
}

impl AminoAcidTable {
    /// Builds a table from an ordered list of amino acids.
    ///
    /// # Errors
    /// * `AlphabetError::Empty` if `acids` is empty
    /// * `AlphabetError::DuplicateCode` if a code appears twice
    pub fn new(acids: Vec<AminoAcid>) -> Result<Self, AlphabetError> {
        if acids.is_empty() {
            return Err(AlphabetError::Empty);
        }

        let mut index = HashMap::with_capacity(acids.len());
        for (i, aa) in acids.iter().enumerate() {
            if index.insert(aa.code, i).is_some() {
                return Err(AlphabetError::DuplicateCode(aa.code));
            }
        }

        Ok(Self { acids, index })
    }

    /// The 20 canonical amino acids.
    pub fn standard() -> Self {
        let acids: Vec<AminoAcid> = STANDARD
            .iter()
            .map(|&(code, name)| AminoAcid::new(code, name))
            .collect();
        let index = acids.iter().enumerate().map(|(i, aa)| (aa.code, i)).collect();
        Self { acids, index }
    }

    /// Gets an amino acid by code.
    pub fn get(&self, code: char) -> Option<&AminoAcid> {
        self.index.get(&code).map(|&i| &self.acids[i])
    }

    /// Gets the full name for a code.
    pub fn name(&self, code: char) -> Option<&str> {
        self.get(code).map(|aa| aa.name.as_str())
    }

    /// Returns true if `code` belongs to the alphabet.
    pub fn contains(&self, code: char) -> bool {
        self.index.contains_key(&code)
    }

    /// Returns all amino acids in table order.
    pub fn all(&self) -> &[AminoAcid] {
        &self.acids
    }

    /// Gets the amino acid at a table index.
    pub fn nth(&self, i: usize) -> Option<&AminoAcid> {
        self.acids.get(i)
    }

    /// Number of codes in the alphabet.
    pub fn len(&self) -> usize {
        self.acids.len()
    }

    /// Always false for a constructed table.
    pub fn is_empty(&self) -> bool {
        self.acids.is_empty()
    }
}

impl Default for AminoAcidTable {
    fn default() -> Self {
        Self::standard()
    }
}
