mod corpus;
mod error;
mod parser;
mod record;
mod settings;
mod table;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::info;

use record::Record;
use settings::Settings;
use table::Table;

const OUTPUT_PATH: &str = "output.csv";

#[derive(Parser)]
#[command(
    name = "paper_table",
    about = "Tabulate a directory of markdown papers (frontmatter + ## sections) into output.csv"
)]
struct Cli {
    /// Input directory of .md files
    input: PathBuf,
    /// Paths to skip, matched against <INPUT>/<file name> verbatim
    #[arg(long, num_args = 0..)]
    ignore: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load()?;
    info!(?settings, input = %cli.input.display(), "Starting paper table");

    let summary = run(&settings, &cli.input, &cli.ignore, Path::new(OUTPUT_PATH))?;
    summary.print();

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }
    Ok(())
}

#[derive(Debug)]
struct RunSummary {
    documents: usize,
    columns: usize,
    output: PathBuf,
}

impl RunSummary {
    fn print(&self) {
        println!(
            "Wrote {} rows x {} columns to {}.",
            self.documents,
            self.columns,
            self.output.display(),
        );
    }
}

/// Parse every accepted document, then write the table. Any failure aborts
/// before `output` is touched.
fn run(settings: &Settings, input: &Path, ignore: &[String], output: &Path) -> Result<RunSummary> {
    let paths = corpus::list_documents(input, ignore)?;
    info!(documents = paths.len(), "Listed input directory");
    println!("Processing {} documents...", paths.len());

    let records = process_documents(settings, &paths)?;
    let table = Table::from_records(records)?;
    info!(
        rows = table.row_count(),
        columns = table.columns().len(),
        "Built table"
    );

    table
        .write_csv(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(output = %output.display(), "Wrote table");

    Ok(RunSummary {
        documents: table.row_count(),
        columns: table.columns().len(),
        output: output.to_path_buf(),
    })
}

/// Records come back in `paths` order whether or not parsing is parallel.
fn process_documents(settings: &Settings, paths: &[PathBuf]) -> Result<Vec<Record>> {
    let pb = if settings.progress {
        let pb = ProgressBar::new(paths.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
                .progress_chars("#>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let load = |path: &PathBuf| -> Result<Record> {
        let doc = corpus::read_document(path)?;
        let record = parser::parse_document(&doc)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        pb.inc(1);
        Ok(record)
    };

    let records = if settings.parallel {
        paths.par_iter().map(load).collect::<Result<Vec<_>>>()
    } else {
        paths.iter().map(load).collect::<Result<Vec<_>>>()
    };

    pb.finish_and_clear();
    records
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::Duration;

    use super::*;
    use crate::error::Error;

    const CORPUS: &str = "tests/fixtures/corpus";

    fn quiet(parallel: bool) -> Settings {
        Settings {
            parallel,
            progress: false,
        }
    }

    fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        let header = rdr.headers().unwrap().iter().map(String::from).collect();
        let rows = rdr
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect();
        (header, rows)
    }

    #[test]
    fn corpus_to_csv() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("output.csv");
        let summary = run(&quiet(false), Path::new(CORPUS), &[], &out).unwrap();
        assert_eq!(summary.documents, 4);

        let (header, rows) = read_csv(&out);
        assert_eq!(
            header,
            vec!["paper", "authors", "conference", "tldr", "Abstract", "Method", "Intro", "abstract", "Results"]
        );
        let papers: Vec<_> = rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(papers, vec!["bert", "draft", "notes", "resnet"]);

        // notes.md: frontmatter with unknown keys only, no headings
        assert!(rows[2][1..].iter().all(|c| c.is_empty()));
        // tldr set only for bert
        assert_eq!(rows[0][3], "Deep bidirectional pre-training for language understanding.");
        assert_eq!(rows[3][3], "");
        assert_eq!(rows[3][1], "Kaiming He,Xiangyu Zhang");
        assert_eq!(
            rows[3][5],
            "Residual blocks, \"shortcut\" connections, identity mappings.\nStacked in stages."
        );
    }

    #[test]
    fn parallel_matches_sequential() {
        let dir = tempfile::tempdir().unwrap();
        let seq = dir.path().join("seq.csv");
        let par = dir.path().join("par.csv");
        run(&quiet(false), Path::new(CORPUS), &[], &seq).unwrap();
        run(&quiet(true), Path::new(CORPUS), &[], &par).unwrap();
        assert_eq!(fs::read(&seq).unwrap(), fs::read(&par).unwrap());
    }

    #[test]
    fn ignored_file_has_no_row() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("output.csv");
        let ignore = vec![format!("{}/draft.md", CORPUS)];
        run(&quiet(false), Path::new(CORPUS), &ignore, &out).unwrap();

        let (header, rows) = read_csv(&out);
        assert!(!header.contains(&"Intro".to_string()));
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn malformed_document_aborts_without_output() {
        let input = tempfile::tempdir().unwrap();
        fs::write(input.path().join("a.md"), "## Fine\nok\n").unwrap();
        fs::write(input.path().join("b.md"), "---\nauthors:\n  - Alice\n## Intro\n").unwrap();
        let out = input.path().join("output.csv");

        let err = run(&quiet(true), input.path(), &[], &out).unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::MalformedFrontmatter)));
        assert!(format!("{:#}", err).contains("b.md"));
        assert!(!out.exists());
    }

    #[test]
    fn undecodable_document_aborts_without_output() {
        let input = tempfile::tempdir().unwrap();
        fs::write(input.path().join("a.md"), "## Fine\nok\n").unwrap();
        fs::write(input.path().join("b.md"), b"## A\n\xff\xfe\n").unwrap();
        let out = input.path().join("output.csv");

        let err = run(&quiet(false), input.path(), &[], &out).unwrap_err();
        assert!(format!("{:#}", err).contains("b.md"));
        assert!(!out.exists());
    }

    #[test]
    fn empty_directory_aborts_without_output() {
        let input = tempfile::tempdir().unwrap();
        fs::write(input.path().join("readme.txt"), "not markdown").unwrap();
        let out = input.path().join("output.csv");

        let err = run(&quiet(false), input.path(), &[], &out).unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::EmptyCorpus)));
        assert!(!out.exists());
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
        assert_eq!(format_duration(Duration::from_secs(184)), "3m 4s");
        assert_eq!(format_duration(Duration::from_secs(3723)), "1h 2m 3s");
    }
}
