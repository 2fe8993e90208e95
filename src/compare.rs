//! Pairwise positional comparison of two sequences.
//!
//! Sequences are compared position by position over their shared prefix.
//! Residues past the end of the shorter sequence are not compared and are
//! not reported as differences; callers that care about truncation check
//! `DiffReport::length_mismatch`.

use std::fmt;

use serde::Serialize;

use crate::model::Sequence;

/// A position where two sequences carry different residues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiffEntry {
    /// 1-based position
    pub position: usize,
    /// Residue in the first sequence
    pub residue_a: char,
    /// Residue in the second sequence
    pub residue_b: char,
}

/// Lengths of two compared sequences that differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LengthMismatch {
    pub len_a: usize,
    pub len_b: usize,
}

impl LengthMismatch {
    /// Number of trailing residues that were not compared.
    pub fn ignored(&self) -> usize {
        self.len_a.abs_diff(self.len_b)
    }
}

impl fmt::Display for LengthMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sequences have different lengths ({} vs {}); only the first {} positions were compared",
            self.len_a,
            self.len_b,
            self.len_a.min(self.len_b)
        )
    }
}

/// Ordered differences between two sequences, plus both input lengths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffReport {
    pub entries: Vec<DiffEntry>,
    pub len_a: usize,
    pub len_b: usize,
}

impl DiffReport {
    /// Number of positions that were compared.
    pub fn compared(&self) -> usize {
        self.len_a.min(self.len_b)
    }

    /// Returns the mismatch if the inputs had different lengths.
    pub fn length_mismatch(&self) -> Option<LengthMismatch> {
        (self.len_a != self.len_b).then_some(LengthMismatch {
            len_a: self.len_a,
            len_b: self.len_b,
        })
    }

    /// Number of differing positions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no differing positions were found.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over differences in position order.
    pub fn iter(&self) -> std::slice::Iter<'_, DiffEntry> {
        self.entries.iter()
    }
}

/// Compares two sequences over `1..=min(len a, len b)`.
pub fn compare(a: &Sequence, b: &Sequence) -> DiffReport {
    let entries = a
        .residues()
        .zip(b.residues())
        .enumerate()
        .filter(|(_, (ra, rb))| ra != rb)
        .map(|(i, (residue_a, residue_b))| DiffEntry {
            position: i + 1,
            residue_a,
            residue_b,
        })
        .collect();

    DiffReport {
        entries,
        len_a: a.len(),
        len_b: b.len(),
    }
}
