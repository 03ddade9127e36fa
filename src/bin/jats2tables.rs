use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use jats_tables::{Article, CorpusStats, ExtractOptions, ExtractionReport, extract_article};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "jats2tables",
    version,
    about = "Extract table grids from JATS/PMC XML articles"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract metadata and table grids from an article or a folder of articles.
    Extract(ExtractArgs),
}

#[derive(Debug, Args)]
struct ExtractArgs {
    /// Input XML file, or directory of .xml/.nxml articles.
    #[arg(short, long)]
    input: PathBuf,

    /// Classify each table by type after grid construction.
    #[arg(long = "classify-type")]
    classify_type: bool,

    /// Classify each table by complexity after grid construction.
    #[arg(long = "classify-complexity")]
    classify_complexity: bool,

    /// Statistics report file, appended per classified table.
    #[arg(long, default_value = "TableStats.txt")]
    report: PathBuf,

    /// Print every resolved grid cell.
    #[arg(long = "print-cells")]
    print_cells: bool,

    /// Enable verbose warning output.
    #[arg(short, long)]
    verbose: bool,
}

fn collect_input_files(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    let entries = std::fs::read_dir(input)
        .with_context(|| format!("failed to read input directory '{}'", input.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_article = path
            .extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| {
                extension.eq_ignore_ascii_case("xml") || extension.eq_ignore_ascii_case("nxml")
            });
        if path.is_file() && is_article {
            files.push(path);
        }
    }
    files.sort();

    if files.is_empty() {
        anyhow::bail!("no .xml or .nxml files found in '{}'", input.display());
    }
    Ok(files)
}

fn print_article(article: &Article, report: &ExtractionReport, print_cells: bool) {
    println!(
        "{}: {} table(s), {} filled cell(s)",
        article.file_name, report.table_count, report.filled_cell_count
    );
    for table in &article.tables {
        println!(
            "  {} [{}x{}] header={} body={} image={}",
            table.label,
            table.rows(),
            table.columns(),
            table.has_header,
            table.has_body,
            table.no_xml_table
        );
        if print_cells {
            for cell in table.grid.cells().filter(|cell| cell.is_filled) {
                println!("    {},{}: {}", cell.row, cell.col, cell.content);
            }
        }
    }
}

fn log_warnings(report: &ExtractionReport, verbose: bool) {
    if report.warnings.is_empty() {
        return;
    }

    eprintln!("warning: {} issue(s) detected", report.warnings.len());
    if verbose {
        for warning in &report.warnings {
            eprintln!(
                "  - {:?} table={:?} row={:?}: {}",
                warning.code, warning.table_index, warning.row, warning.message
            );
        }
    }
}

fn print_corpus_stats(stats: &CorpusStats) {
    println!("Documents:           {}", stats.documents);
    println!("Tables:              {}", stats.tables);
    println!("Image tables:        {}", stats.image_tables);
    println!("Tables without head: {}", stats.tables_without_head);
    println!("Tables without body: {}", stats.tables_without_body);
    println!("Header rows:         {}", stats.header_rows);
    println!("Body rows:           {}", stats.body_rows);
    println!("Row-spanning cells:  {}", stats.row_spanning_cells);
    println!("Col-spanning cells:  {}", stats.col_spanning_cells);
    println!("Total rows:          {}", stats.total_rows);
    println!("Total columns:       {}", stats.total_columns);
}

fn run_extract(args: &ExtractArgs) -> Result<usize> {
    let files = collect_input_files(&args.input)?;
    let options = ExtractOptions {
        classify_by_type: args.classify_type,
        classify_by_complexity: args.classify_complexity,
        stats_report: args.classify_type.then(|| args.report.clone()),
    };

    let mut stats = CorpusStats::default();
    let mut total_tables = 0_usize;
    for file in &files {
        let (article, report) = extract_article(file, &options, &mut stats);
        print_article(&article, &report, args.print_cells);
        log_warnings(&report, args.verbose);
        total_tables += report.table_count;
    }

    println!();
    print_corpus_stats(&stats);
    Ok(total_tables)
}

fn main() -> ExitCode {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jats_tables=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Extract(args) => match run_extract(&args) {
            Ok(total_tables) => {
                if total_tables > 0 {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::from(2)
                }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                ExitCode::from(1)
            }
        },
    }
}
