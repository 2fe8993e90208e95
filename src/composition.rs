//! Amino acid composition analysis.
//!
//! Counts every residue of a sequence and records the 1-based positions at
//! which each code occurs. Codes are kept in order of first occurrence so
//! reports and charts list them the same way on every run.

use std::collections::HashMap;

use log::debug;
use serde::Serialize;
use thiserror::Error;

use crate::amino_acid::{AminoAcid, AminoAcidTable};
use crate::model::Sequence;

/// Errors that can occur during composition analysis.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompositionError {
    #[error("Unknown amino acid code '{code}' at position {position}")]
    UnknownResidue { code: char, position: usize },
}

/// Count and positions of one amino acid within a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResidueCount {
    /// The amino acid this entry describes
    pub amino_acid: AminoAcid,
    /// Number of occurrences
    pub count: usize,
    /// Strictly increasing 1-based positions
    pub positions: Vec<usize>,
}

/// Per-residue counts and positions, in first-occurrence order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Composition {
    entries: Vec<ResidueCount>,
    #[serde(skip)]
    index: HashMap<char, usize>,
}

impl Composition {
    /// Looks up the entry for a code.
    pub fn get(&self, code: char) -> Option<&ResidueCount> {
        self.index.get(&code).map(|&i| &self.entries[i])
    }

    /// Occurrence count for a code (0 if absent).
    pub fn count(&self, code: char) -> usize {
        self.get(code).map_or(0, |e| e.count)
    }

    /// Entries in first-occurrence order.
    pub fn entries(&self) -> &[ResidueCount] {
        &self.entries
    }

    /// Iterates over entries in first-occurrence order.
    pub fn iter(&self) -> std::slice::Iter<'_, ResidueCount> {
        self.entries.iter()
    }

    /// (code, count) pairs in first-occurrence order.
    pub fn counts(&self) -> Vec<(char, usize)> {
        self.entries
            .iter()
            .map(|e| (e.amino_acid.code, e.count))
            .collect()
    }

    /// Sum of all counts; equals the analyzed sequence length.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Number of distinct codes seen.
    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no residues were counted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Composition {
    type Item = &'a ResidueCount;
    type IntoIter = std::slice::Iter<'a, ResidueCount>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Composition analyzer bound to an amino acid alphabet.
#[derive(Debug, Clone, Default)]
pub struct CompositionAnalyzer {
    table: AminoAcidTable,
}

impl CompositionAnalyzer {
    /// Creates an analyzer for the given alphabet.
    pub fn new(table: AminoAcidTable) -> Self {
        Self { table }
    }

    /// The alphabet residues are validated against.
    pub fn table(&self) -> &AminoAcidTable {
        &self.table
    }

    /// Analyzes a sequence.
    ///
    /// # Errors
    /// Returns `CompositionError::UnknownResidue` for the first residue that
    /// is not in the alphabet. No partial composition is returned.
    pub fn analyze(&self, sequence: &Sequence) -> Result<Composition, CompositionError> {
        let mut composition = Composition::default();

        for (i, code) in sequence.residues().enumerate() {
            let position = i + 1;
            let slot = match composition.index.get(&code) {
                Some(&slot) => slot,
                None => {
                    let amino_acid = self
                        .table
                        .get(code)
                        .ok_or(CompositionError::UnknownResidue { code, position })?;
                    composition.entries.push(ResidueCount {
                        amino_acid: amino_acid.clone(),
                        count: 0,
                        positions: Vec::new(),
                    });
                    let slot = composition.entries.len() - 1;
                    composition.index.insert(code, slot);
                    slot
                }
            };

            let entry = &mut composition.entries[slot];
            entry.count += 1;
            entry.positions.push(position);
        }

        debug!(
            "Composition of '{}': {} residues, {} distinct codes",
            sequence.id(),
            composition.total(),
            composition.distinct()
        );
        Ok(composition)
    }
}
