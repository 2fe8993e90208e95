//! Batch controller.
//!
//! This module orchestrates a run over several input records:
//! - Composition table and bar chart per input
//! - Pairwise comparisons between inputs
//! - One simulated point mutation per input, with its diff
//!
//! Each input is isolated: a file that cannot be read, contains an unknown
//! residue, or cannot be mutated is recorded as a failure and the run
//! continues with the others. A chart that cannot be written is recorded
//! too, but the input still takes part in comparisons and mutation.
//!
//! Output files are named after the input's file stem. Inputs sharing a
//! stem get `_2`, `_3`, ... appended so no output is overwritten.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use rand::Rng;

use crate::compare::compare;
use crate::composition::{Composition, CompositionAnalyzer};
use crate::formats::fasta::{write_fasta, DEFAULT_LINE_WIDTH};
use crate::formats::{read_record_file, record_name, svg, tsv};
use crate::model::Sequence;
use crate::mutation::mutate;
use crate::report::{
    BatchSummary, ChartSeries, ComparisonSummary, CompositionTable, DiffTable, Failure,
    MutationSummary, OrganismReport,
};

/// Which pairs of inputs are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PairMode {
    /// The first input against every other input
    #[default]
    FirstVsRest,
    /// Every unordered pair of inputs
    All,
}

/// Settings for one batch run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Input record files, in order
    pub inputs: Vec<PathBuf>,
    /// Directory receiving all output files
    pub out_dir: PathBuf,
    /// FASTA line width for mutated sequences (0 = no wrapping)
    pub line_width: usize,
    /// Whether to write SVG bar charts
    pub charts: bool,
    pub pairs: PairMode,
    /// Whether to simulate a point mutation per input
    pub mutate: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            out_dir: PathBuf::from("."),
            line_width: DEFAULT_LINE_WIDTH,
            charts: true,
            pairs: PairMode::default(),
            mutate: true,
        }
    }
}

/// An input that decoded and analyzed cleanly.
struct Loaded {
    name: String,
    sequence: Sequence,
    composition: Composition,
    report: OrganismReport,
}

/// Returns the index pairs to compare for `n` inputs.
pub fn comparison_pairs(n: usize, mode: PairMode) -> Vec<(usize, usize)> {
    match mode {
        PairMode::FirstVsRest => (1..n).map(|j| (0, j)).collect(),
        PairMode::All => (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .collect(),
    }
}

/// Output names for `inputs`: file stems, made unique in input order.
pub fn unique_names(inputs: &[PathBuf]) -> Vec<String> {
    let mut used = HashSet::with_capacity(inputs.len());
    inputs
        .iter()
        .map(|path| {
            let stem = record_name(path);
            let mut name = stem.clone();
            let mut n = 1;
            while used.contains(&name) {
                n += 1;
                name = format!("{}_{}", stem, n);
            }
            if name != stem {
                warn!(
                    "{}: file stem '{}' already used, writing outputs as '{}'",
                    path.display(),
                    stem,
                    name
                );
            }
            used.insert(name.clone());
            name
        })
        .collect()
}

fn record_failure(summary: &mut BatchSummary, name: String, stage: &str, e: &anyhow::Error) {
    warn!("{}: {:#}", name, e);
    summary.failures.push(Failure {
        name,
        stage: stage.to_string(),
        error: format!("{:#}", e),
    });
}

fn create_output(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(BufWriter::new(file))
}

fn finish(mut writer: BufWriter<File>, path: &Path) -> Result<()> {
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Runs a batch over `config.inputs`, drawing mutations from `rng`.
///
/// Only failures to set up the output directory abort the run; per-input
/// problems are collected in the returned summary.
pub fn run_batch<R: Rng>(
    config: &Config,
    analyzer: &CompositionAnalyzer,
    rng: &mut R,
) -> Result<BatchSummary> {
    fs::create_dir_all(&config.out_dir).with_context(|| {
        format!("Failed to create output directory {}", config.out_dir.display())
    })?;

    let mut summary = BatchSummary::default();
    let mut loaded = Vec::with_capacity(config.inputs.len());

    let names = unique_names(&config.inputs);
    for (path, name) in config.inputs.iter().zip(names) {
        match analyze_input(config, analyzer, path, &name) {
            Ok(entry) => {
                if config.charts {
                    if let Err(e) = write_chart(config, &entry) {
                        record_failure(&mut summary, name, "chart", &e);
                    }
                }
                loaded.push(entry);
            }
            Err(e) => record_failure(&mut summary, name, "analysis", &e),
        }
    }

    for (i, j) in comparison_pairs(loaded.len(), config.pairs) {
        let (a, b) = (&loaded[i], &loaded[j]);
        match write_comparison(config, a, b) {
            Ok(comparison) => summary.comparisons.push(comparison),
            Err(e) => {
                let name = format!("{}_vs_{}", a.name, b.name);
                record_failure(&mut summary, name, "comparison", &e);
            }
        }
    }

    for mut entry in loaded {
        if config.mutate {
            match write_mutation(config, analyzer, &entry, rng) {
                Ok(mutation) => entry.report.mutation = Some(mutation),
                Err(e) => record_failure(&mut summary, entry.name.clone(), "mutation", &e),
            }
        }
        summary.organisms.push(entry.report);
    }

    info!(
        "Processed {} of {} inputs, {} comparisons, {} failures",
        summary.organisms.len(),
        config.inputs.len(),
        summary.comparisons.len(),
        summary.failures.len()
    );
    Ok(summary)
}

fn analyze_input(
    config: &Config,
    analyzer: &CompositionAnalyzer,
    path: &Path,
    name: &str,
) -> Result<Loaded> {
    let sequence = read_record_file(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    let composition = analyzer.analyze(&sequence)?;
    info!(
        "{}: {} residues, {} distinct amino acids",
        name,
        sequence.len(),
        composition.distinct()
    );

    let table = CompositionTable::new(name, &composition);
    let out = config.out_dir.join(format!("{}-aminoacidos.txt", name));
    let mut writer = create_output(&out)?;
    tsv::write_composition(&mut writer, &table)?;
    finish(writer, &out)?;

    Ok(Loaded {
        name: name.to_string(),
        sequence,
        composition,
        report: OrganismReport {
            name: name.to_string(),
            composition: table,
            mutation: None,
        },
    })
}

fn write_chart(config: &Config, entry: &Loaded) -> Result<()> {
    let series = ChartSeries::from_composition(&entry.name, &entry.composition);
    let out = config.out_dir.join(format!("{}-histograma.svg", entry.name));
    let mut writer = create_output(&out)?;
    svg::write_bar_chart(&mut writer, &series)?;
    finish(writer, &out)
}

fn write_comparison(config: &Config, a: &Loaded, b: &Loaded) -> Result<ComparisonSummary> {
    let report = compare(&a.sequence, &b.sequence);
    if let Some(mismatch) = report.length_mismatch() {
        warn!("{} vs {}: {}", a.name, b.name, mismatch);
    }
    info!("{} vs {}: {} differences", a.name, b.name, report.len());

    let table = DiffTable::new("Organismo 1", "Organismo 2", &report);
    let out = config
        .out_dir
        .join(format!("comparacao_{}_vs_{}.txt", a.name, b.name));
    let mut writer = create_output(&out)?;
    tsv::write_diff(&mut writer, &table)?;
    finish(writer, &out)?;

    Ok(ComparisonSummary::new(a.name.as_str(), b.name.as_str(), &report))
}

fn write_mutation<R: Rng>(
    config: &Config,
    analyzer: &CompositionAnalyzer,
    entry: &Loaded,
    rng: &mut R,
) -> Result<MutationSummary> {
    let mut record = mutate(&entry.sequence, analyzer.table(), rng)?;
    record.mutated = record.mutated.renamed(format!("{}-mutacao", entry.name));
    if record.is_silent() {
        info!(
            "{}: silent mutation at {} ({})",
            entry.name, record.position, record.new_residue
        );
    } else {
        info!(
            "{}: mutation at {} ({} -> {})",
            entry.name, record.position, record.original_residue, record.new_residue
        );
    }

    let out = config
        .out_dir
        .join(format!("{}-mutacao.fasta", entry.name));
    let mut writer = create_output(&out)?;
    write_fasta(&mut writer, &record.mutated, config.line_width)?;
    finish(writer, &out)?;

    let table = DiffTable::new("Organismo 1", "Mutacao", &compare(&record.original, &record.mutated));
    let out = config
        .out_dir
        .join(format!("comparacao_{}_vs_mutacao.txt", entry.name));
    let mut writer = create_output(&out)?;
    tsv::write_diff(&mut writer, &table)?;
    finish(writer, &out)?;

    Ok(MutationSummary::new(&record, table))
}

/// Writes the run summary as pretty-printed JSON.
pub fn write_summary(path: &Path, summary: &BatchSummary) -> Result<()> {
    let mut writer = create_output(path)?;
    serde_json::to_writer_pretty(&mut writer, summary)
        .with_context(|| format!("Failed to serialize summary to {}", path.display()))?;
    writeln!(writer)?;
    finish(writer, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    fn write_input(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn config(inputs: Vec<PathBuf>, out_dir: &Path) -> Config {
        Config {
            inputs,
            out_dir: out_dir.to_path_buf(),
            ..Config::default()
        }
    }

    #[test]
    fn test_comparison_pairs() {
        assert_eq!(
            comparison_pairs(4, PairMode::FirstVsRest),
            vec![(0, 1), (0, 2), (0, 3)]
        );
        assert_eq!(
            comparison_pairs(3, PairMode::All),
            vec![(0, 1), (0, 2), (1, 2)]
        );
        assert!(comparison_pairs(1, PairMode::FirstVsRest).is_empty());
        assert!(comparison_pairs(0, PairMode::All).is_empty());
    }

    #[test]
    fn test_full_batch() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let inputs = vec![
            write_input(&input, "organism1.fasta", ">organism1\nMKTAYIAK\nQRQ\n"),
            write_input(&input, "organism2.fasta", ">organism2\nMKTAWIAK\nQRA\n"),
            write_input(&input, "organism3.fasta", ">organism3\nMRTAY\n"),
        ];
        let config = config(inputs, output.path());
        let mut rng = StdRng::seed_from_u64(42);

        let summary = run_batch(&config, &CompositionAnalyzer::default(), &mut rng).unwrap();
        assert!(!summary.has_failures());
        assert_eq!(summary.organisms.len(), 3);
        assert_eq!(summary.comparisons.len(), 2);

        let composition =
            fs::read_to_string(output.path().join("organism1-aminoacidos.txt")).unwrap();
        let mut lines = composition.lines();
        assert_eq!(
            lines.next(),
            Some("Código do aminoácido\tNome completo\tNúmero de ocorrências\tPosições")
        );
        assert_eq!(lines.next(), Some("M\tMetionina\t1\t1"));
        assert_eq!(lines.next(), Some("K\tLisina\t2\t2,8"));

        let diff =
            fs::read_to_string(output.path().join("comparacao_organism1_vs_organism2.txt")).unwrap();
        assert_eq!(diff, "Posição\tOrganismo 1\tOrganismo 2\n5\tY\tW\n11\tQ\tA\n");

        // Shorter second sequence: only the shared prefix is compared
        let diff =
            fs::read_to_string(output.path().join("comparacao_organism1_vs_organism3.txt")).unwrap();
        assert_eq!(diff, "Posição\tOrganismo 1\tOrganismo 2\n2\tK\tR\n");
        assert!(summary.comparisons[1].length_mismatch.is_some());

        assert!(output.path().join("organism2-histograma.svg").exists());

        let mutated = fs::read_to_string(output.path().join("organism1-mutacao.fasta")).unwrap();
        assert!(mutated.starts_with(">organism1-mutacao\n"));
        let mutation_diff =
            fs::read_to_string(output.path().join("comparacao_organism1_vs_mutacao.txt")).unwrap();
        assert!(mutation_diff.starts_with("Posição\tOrganismo 1\tMutacao\n"));
        assert!(mutation_diff.lines().count() <= 2);

        let report = summary.organisms[0].mutation.as_ref().unwrap();
        assert_eq!(report.mutated_id, "organism1-mutacao");
        assert_eq!(report.diff.rows.len(), usize::from(!report.silent));
    }

    #[test]
    fn test_bad_input_is_isolated() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let inputs = vec![
            write_input(&input, "good.fasta", ">good\nMKTA\n"),
            write_input(&input, "bad.fasta", ">bad\nMKXA\n"),
            input.path().join("missing.fasta"),
            write_input(&input, "empty.fasta", ">empty\n"),
        ];
        let mut config = config(inputs, output.path());
        config.charts = false;
        let mut rng = StdRng::seed_from_u64(1);

        let summary = run_batch(&config, &CompositionAnalyzer::default(), &mut rng).unwrap();

        // good and empty analyze; bad and missing fail
        assert_eq!(summary.organisms.len(), 2);
        let failed: Vec<(&str, &str)> = summary
            .failures
            .iter()
            .map(|f| (f.name.as_str(), f.stage.as_str()))
            .collect();
        assert_eq!(
            failed,
            vec![("bad", "analysis"), ("missing", "analysis"), ("empty", "mutation")]
        );
        assert!(summary.failures[0].error.contains("'X' at position 3"));

        assert!(output.path().join("good-aminoacidos.txt").exists());
        assert!(!output.path().join("bad-aminoacidos.txt").exists());
        assert!(!output.path().join("good-histograma.svg").exists());
        assert!(output.path().join("comparacao_good_vs_empty.txt").exists());
        assert!(output.path().join("good-mutacao.fasta").exists());
        assert!(!output.path().join("empty-mutacao.fasta").exists());
    }

    #[test]
    fn test_unique_names() {
        let inputs = vec![
            PathBuf::from("a/org.fasta"),
            PathBuf::from("b/org.fa"),
            PathBuf::from("org_2.fasta"),
            PathBuf::from("c/org.fasta"),
            PathBuf::from("other.fasta"),
        ];
        assert_eq!(
            unique_names(&inputs),
            vec!["org", "org_2", "org_2_2", "org_3", "other"]
        );
    }

    #[test]
    fn test_same_stem_inputs_keep_separate_outputs() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let inputs = vec![
            write_input(&first, "org.fasta", ">org\nAAAA\n"),
            write_input(&second, "org.fasta", ">org\nWWWW\n"),
        ];
        let mut config = config(inputs, output.path());
        config.mutate = false;
        let mut rng = StdRng::seed_from_u64(3);

        let summary = run_batch(&config, &CompositionAnalyzer::default(), &mut rng).unwrap();
        assert!(!summary.has_failures());
        assert_eq!(summary.organisms.len(), 2);
        assert_eq!(summary.organisms[1].name, "org_2");

        let a = fs::read_to_string(output.path().join("org-aminoacidos.txt")).unwrap();
        assert!(a.contains("A\tAlanina\t4\t1,2,3,4"));
        let w = fs::read_to_string(output.path().join("org_2-aminoacidos.txt")).unwrap();
        assert!(w.contains("W\tTriptofano\t4\t1,2,3,4"));
        assert!(output.path().join("org_2-histograma.svg").exists());

        let diff = fs::read_to_string(output.path().join("comparacao_org_vs_org_2.txt")).unwrap();
        assert_eq!(diff.lines().count(), 5);
    }

    #[test]
    fn test_chart_failure_keeps_input() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let inputs = vec![
            write_input(&input, "first.fasta", ">first\nMKTA\n"),
            write_input(&input, "second.fasta", ">second\nMRTA\n"),
        ];
        // A directory where the chart file should go makes the chart write fail
        fs::create_dir(output.path().join("first-histograma.svg")).unwrap();
        let config = config(inputs, output.path());
        let mut rng = StdRng::seed_from_u64(5);

        let summary = run_batch(&config, &CompositionAnalyzer::default(), &mut rng).unwrap();
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].name, "first");
        assert_eq!(summary.failures[0].stage, "chart");

        assert_eq!(summary.organisms.len(), 2);
        assert!(summary.organisms[0].mutation.is_some());
        assert_eq!(summary.comparisons.len(), 1);
        assert_eq!(summary.comparisons[0].differences, 1);
        assert!(output.path().join("first-aminoacidos.txt").exists());
        assert!(output.path().join("second-histograma.svg").exists());
    }

    #[test]
    fn test_seeded_runs_match() {
        let input = tempfile::tempdir().unwrap();
        let inputs = vec![write_input(&input, "p.fasta", ">p\nMKTAYIAKQRQISFVKSHFSRQ\n")];

        let mut outputs = Vec::new();
        for _ in 0..2 {
            let output = tempfile::tempdir().unwrap();
            let config = config(inputs.clone(), output.path());
            let mut rng = StdRng::seed_from_u64(2024);
            run_batch(&config, &CompositionAnalyzer::default(), &mut rng).unwrap();
            outputs.push(fs::read_to_string(output.path().join("p-mutacao.fasta")).unwrap());
        }
        assert_eq!(outputs[0], outputs[1]);
    }

    #[test]
    fn test_write_summary() {
        let output = tempfile::tempdir().unwrap();
        let path = output.path().join("summary.json");
        let mut summary = BatchSummary::default();
        summary.failures.push(Failure {
            name: "x".to_string(),
            stage: "analysis".to_string(),
            error: "boom".to_string(),
        });

        write_summary(&path, &summary).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["failures"][0]["stage"], "analysis");
        assert!(value["organisms"].as_array().unwrap().is_empty());
    }
}
