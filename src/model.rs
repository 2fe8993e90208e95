//! Sequence data model.
//!
//! A `Sequence` is an identifier plus an ordered run of residues. Residue
//! positions are 1-based everywhere in the public API, matching the
//! positions printed in reports. Sequences are never modified in place.

use std::fmt;

/// Represents a single protein sequence with its identifier and residues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    /// The sequence identifier (from the FASTA header, without '>')
    id: String,
    /// The residues, one character each
    data: String,
    /// Number of residues (characters, not bytes)
    len: usize,
}

impl Sequence {
    /// Creates a new sequence.
    pub fn new(id: impl Into<String>, data: impl Into<String>) -> Self {
        let data = data.into();
        let len = data.chars().count();
        Self {
            id: id.into(),
            data,
            len,
        }
    }

    /// Returns the sequence identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the number of residues.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the sequence has no residues.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the residues as a string slice.
    pub fn as_str(&self) -> &str {
        &self.data
    }

    /// Iterates over residues in order.
    pub fn residues(&self) -> std::str::Chars<'_> {
        self.data.chars()
    }

    /// Gets the residue at a 1-based position.
    pub fn residue_at(&self, position: usize) -> Option<char> {
        if position == 0 {
            return None;
        }
        self.data.chars().nth(position - 1)
    }

    /// Returns a copy of this sequence under a different identifier.
    pub fn renamed(&self, id: impl Into<String>) -> Sequence {
        Self {
            id: id.into(),
            data: self.data.clone(),
            len: self.len,
        }
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_creation() {
        let seq = Sequence::new("seq1", "MKTA");
        assert_eq!(seq.id(), "seq1");
        assert_eq!(seq.as_str(), "MKTA");
        assert_eq!(seq.len(), 4);
        assert!(!seq.is_empty());
        assert!(Sequence::new("", "").is_empty());
    }

    #[test]
    fn test_residue_at_is_one_based() {
        let seq = Sequence::new("seq1", "MKTA");
        assert_eq!(seq.residue_at(0), None);
        assert_eq!(seq.residue_at(1), Some('M'));
        assert_eq!(seq.residue_at(4), Some('A'));
        assert_eq!(seq.residue_at(5), None);
    }

    #[test]
    fn test_renamed() {
        let seq = Sequence::new("seq1", "MKTA");
        let copy = seq.renamed("seq1-mutacao");
        assert_eq!(copy.id(), "seq1-mutacao");
        assert_eq!(copy.as_str(), seq.as_str());
        assert_eq!(seq.id(), "seq1");
    }

    #[test]
    fn test_length_counts_characters() {
        let seq = Sequence::new("odd", "AÉC");
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.residue_at(2), Some('É'));
    }
}
