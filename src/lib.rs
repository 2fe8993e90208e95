//! # protscan - Protein Sequence Composition and Mutation Toolkit
//!
//! Tallies amino acid composition of protein records, compares sequences
//! position by position, and simulates single point mutations.
//!
//! ## Architecture
//!
//! The analysis core works on decoded sequences only:
//! - `amino_acid`: The canonical 20-code alphabet and full names
//! - `model`: The immutable `Sequence` type
//! - `composition`: Per-residue counts and positions
//! - `compare`: Positional diff over the shared prefix of two sequences
//! - `mutation`: Single point mutation with an injected random source
//! - `report`: Serializable tables and chart series
//!
//! Around it:
//! - `formats`: FASTA decoding/writing, TSV tables, SVG charts, file reading
//! - `controller`: Batch run over several input files

pub mod amino_acid;
pub mod compare;
pub mod composition;
pub mod controller;
pub mod formats;
pub mod model;
pub mod mutation;
pub mod report;
