//! Report records handed to writers and chart renderers.
//!
//! Everything here is plain data: stable ordering, no I/O, no file names.
//! Tables expose their header and per-row fields as strings so any
//! line-oriented writer can emit them; all records serialize with serde.

use serde::Serialize;

use crate::compare::{DiffEntry, DiffReport, LengthMismatch};
use crate::composition::Composition;
use crate::mutation::{MutationRecord, Substitution};

/// Column headers of the composition table.
pub const COMPOSITION_HEADER: [&str; 4] = [
    "Código do aminoácido",
    "Nome completo",
    "Número de ocorrências",
    "Posições",
];

/// First column header of every diff table.
pub const POSITION_HEADER: &str = "Posição";

/// One amino acid line of a composition table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompositionRow {
    pub code: char,
    pub name: String,
    pub count: usize,
    pub positions: Vec<usize>,
}

impl CompositionRow {
    /// Code, name, count and comma-joined positions.
    pub fn fields(&self) -> [String; 4] {
        let positions = self
            .positions
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(",");
        [
            self.code.to_string(),
            self.name.clone(),
            self.count.to_string(),
            positions,
        ]
    }
}

/// Composition of one sequence, rows in first-occurrence order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompositionTable {
    pub id: String,
    pub length: usize,
    pub rows: Vec<CompositionRow>,
}

impl CompositionTable {
    pub fn new(id: impl Into<String>, composition: &Composition) -> Self {
        let rows = composition
            .iter()
            .map(|entry| CompositionRow {
                code: entry.amino_acid.code,
                name: entry.amino_acid.name.clone(),
                count: entry.count,
                positions: entry.positions.clone(),
            })
            .collect();
        Self {
            id: id.into(),
            length: composition.total(),
            rows,
        }
    }

    pub fn header(&self) -> [&'static str; 4] {
        COMPOSITION_HEADER
    }
}

/// Differences between two labelled sequences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffTable {
    /// Column labels for the first and second sequence
    pub labels: [String; 2],
    pub rows: Vec<DiffEntry>,
    pub len_a: usize,
    pub len_b: usize,
    /// Present when the tail of the longer sequence was not compared
    pub length_mismatch: Option<LengthMismatch>,
}

impl DiffTable {
    pub fn new(label_a: impl Into<String>, label_b: impl Into<String>, report: &DiffReport) -> Self {
        Self {
            labels: [label_a.into(), label_b.into()],
            rows: report.entries.clone(),
            len_a: report.len_a,
            len_b: report.len_b,
            length_mismatch: report.length_mismatch(),
        }
    }

    pub fn header(&self) -> [String; 3] {
        [
            POSITION_HEADER.to_string(),
            self.labels[0].clone(),
            self.labels[1].clone(),
        ]
    }

    /// Position and both residues of a row.
    pub fn fields(entry: &DiffEntry) -> [String; 3] {
        [
            entry.position.to_string(),
            entry.residue_a.to_string(),
            entry.residue_b.to_string(),
        ]
    }
}

/// A simulated point mutation and its diff against the original.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutationSummary {
    pub id: String,
    pub mutated_id: String,
    pub substitution: Substitution,
    pub silent: bool,
    pub diff: DiffTable,
}

impl MutationSummary {
    pub fn new(record: &MutationRecord, diff: DiffTable) -> Self {
        Self {
            id: record.original.id().to_string(),
            mutated_id: record.mutated.id().to_string(),
            substitution: Substitution::from(record),
            silent: record.is_silent(),
            diff,
        }
    }
}

/// A single bar of a residue count chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub code: char,
    pub count: usize,
}

/// Residue counts in first-occurrence order, with labels for a bar chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn from_composition(name: &str, composition: &Composition) -> Self {
        Self {
            title: format!("Número de Ocorrências de Aminoácidos em {}", name),
            x_label: "Aminoácidos".to_string(),
            y_label: "Número de Ocorrências".to_string(),
            points: composition
                .counts()
                .into_iter()
                .map(|(code, count)| ChartPoint { code, count })
                .collect(),
        }
    }

    /// Largest count in the series (0 when empty).
    pub fn max_count(&self) -> usize {
        self.points.iter().map(|p| p.count).max().unwrap_or(0)
    }
}

/// Everything produced for one input record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrganismReport {
    /// Name of the input (file stem)
    pub name: String,
    pub composition: CompositionTable,
    pub mutation: Option<MutationSummary>,
}

/// Outcome of one pairwise comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonSummary {
    pub first: String,
    pub second: String,
    pub differences: usize,
    pub len_a: usize,
    pub len_b: usize,
    pub length_mismatch: Option<LengthMismatch>,
}

impl ComparisonSummary {
    pub fn new(first: impl Into<String>, second: impl Into<String>, report: &DiffReport) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
            differences: report.len(),
            len_a: report.len_a,
            len_b: report.len_b,
            length_mismatch: report.length_mismatch(),
        }
    }
}

/// An input that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub name: String,
    pub stage: String,
    pub error: String,
}

/// Aggregate of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub organisms: Vec<OrganismReport>,
    pub comparisons: Vec<ComparisonSummary>,
    pub failures: Vec<Failure>,
}

impl BatchSummary {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}
