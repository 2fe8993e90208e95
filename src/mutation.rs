//! Point mutation simulation.
//!
//! A mutation picks one position uniformly from the sequence and one
//! replacement code uniformly from the whole alphabet. The replacement may
//! be the residue already there; such silent draws are kept as they are so
//! a seeded source always yields the same sequence of outcomes.

use log::debug;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;

use crate::amino_acid::AminoAcidTable;
use crate::model::Sequence;

/// Errors that can occur during mutation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    #[error("Cannot mutate an empty sequence")]
    EmptySequence,
}

/// The outcome of a single point mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    pub original: Sequence,
    pub mutated: Sequence,
    /// 1-based position of the substitution
    pub position: usize,
    /// Residue found at `position` before the substitution
    pub original_residue: char,
    /// Residue written at `position`
    pub new_residue: char,
}

impl MutationRecord {
    /// Returns true if the drawn residue equals the original one.
    pub fn is_silent(&self) -> bool {
        self.original_residue == self.new_residue
    }
}

/// Serializable view of a mutation without the full sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Substitution {
    pub position: usize,
    pub from: char,
    pub to: char,
}

impl From<&MutationRecord> for Substitution {
    fn from(record: &MutationRecord) -> Self {
        Self {
            position: record.position,
            from: record.original_residue,
            to: record.new_residue,
        }
    }
}

/// Applies one random point mutation to `sequence`.
///
/// The position is drawn first, then the replacement code, both from `rng`.
///
/// # Errors
/// Returns `MutationError::EmptySequence` if `sequence` has no residues.
pub fn mutate<R: Rng>(
    sequence: &Sequence,
    table: &AminoAcidTable,
    rng: &mut R,
) -> Result<MutationRecord, MutationError> {
    if sequence.is_empty() {
        return Err(MutationError::EmptySequence);
    }

    let mut residues: Vec<char> = sequence.residues().collect();
    let index = rng.random_range(0..residues.len());
    // A constructed table always holds at least one code
    let new_residue = table.all()[rng.random_range(0..table.len())].code;
    let original_residue = std::mem::replace(&mut residues[index], new_residue);
    let position = index + 1;
    let mutated = Sequence::new(sequence.id().to_string(), residues.into_iter().collect::<String>());

    debug!(
        "Mutated '{}' at {}: {} -> {}",
        sequence.id(), position, original_residue, new_residue
    );

    Ok(MutationRecord {
        original: sequence.clone(),
        mutated,
        position,
        original_residue,
        new_residue,
    })
}
