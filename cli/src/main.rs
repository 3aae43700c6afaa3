//! pdflens CLI - PDF outline and persona analysis tool

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use crossbeam_channel::Receiver;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;

use pdflens::analysis::FontStatistics;
use pdflens::model::document_title;
use pdflens::render::{analysis_to_text, outline_to_text, to_json};
use pdflens::{
    progress_channel, AnalysisConfig, Analyzer, DocumentSource, JsonFormat, PdfDecoder, Preset,
    Progress, SpanDumpFile,
};

#[derive(Parser)]
#[command(name = "pdflens")]
#[command(version)]
#[command(about = "Heading outlines and persona-driven section ranking for PDFs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the heading outline of a document
    Outline {
        /// Span dump of the document (e.g. report.pdf.json)
        #[arg(value_name = "DUMP")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Heuristic preset
        #[arg(long, value_enum, default_value = "standard", env = "PDFLENS_PRESET")]
        preset: PresetArg,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Output an indented text tree instead of JSON
        #[arg(long, conflicts_with = "compact")]
        text: bool,
    },

    /// Rank document sections for a persona and a job-to-be-done
    Analyze {
        /// Span dumps of the documents
        #[arg(value_name = "DUMP", required_unless_present = "input")]
        documents: Vec<PathBuf>,

        /// Reader role (e.g. "Investment Analyst")
        #[arg(long, required_unless_present = "input")]
        persona: Option<String>,

        /// Task the reader is doing (e.g. "Analyze revenue trends")
        #[arg(long, required_unless_present = "input")]
        job: Option<String>,

        /// Challenge file listing documents, persona and job
        #[arg(short, long, value_name = "FILE", conflicts_with = "documents")]
        input: Option<PathBuf>,

        /// Directory holding the span dumps named in the challenge file
        #[arg(long, value_name = "DIR", requires = "input")]
        dir: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Heuristic preset
        #[arg(long, value_enum, default_value = "standard", env = "PDFLENS_PRESET")]
        preset: PresetArg,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Output a readable ranking instead of JSON
        #[arg(long, conflicts_with = "compact")]
        text: bool,
    },

    /// Show document and glyph-height information
    Info {
        /// Span dump of the document
        #[arg(value_name = "DUMP")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PresetArg {
    /// Balanced thresholds, sequential
    Standard,
    /// Short page caps, headings may contain periods
    Basic,
    /// Lower thresholds, larger results, parallel
    Concurrent,
}

impl From<PresetArg> for Preset {
    fn from(preset: PresetArg) -> Self {
        match preset {
            PresetArg::Standard => Preset::Standard,
            PresetArg::Basic => Preset::Basic,
            PresetArg::Concurrent => Preset::Concurrent,
        }
    }
}

/// Challenge-style analysis request.
#[derive(Debug, Deserialize)]
struct Challenge {
    documents: Vec<ChallengeDocument>,
    persona: ChallengePersona,
    job_to_be_done: ChallengeJob,
}

#[derive(Debug, Deserialize)]
struct ChallengeDocument {
    filename: String,
}

#[derive(Debug, Deserialize)]
struct ChallengePersona {
    role: String,
}

#[derive(Debug, Deserialize)]
struct ChallengeJob {
    task: String,
}

/// What to analyze, however it was given.
struct AnalysisRequest {
    sources: Vec<Arc<dyn DocumentSource>>,
    persona: String,
    job: String,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Outline {
            input,
            output,
            preset,
            compact,
            text,
        } => cmd_outline(&input, output.as_deref(), preset, compact, text),
        Commands::Analyze {
            documents,
            persona,
            job,
            input,
            dir,
            output,
            preset,
            compact,
            text,
        } => build_request(documents, persona, job, input.as_deref(), dir.as_deref())
            .and_then(|request| cmd_analyze(request, output.as_deref(), preset, compact, text)),
        Commands::Info { input } => cmd_info(&input),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

/// Spinner fed by analysis progress events until the sender side closes.
fn spawn_progress(rx: Receiver<Progress>) -> thread::JoinHandle<()> {
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} pages {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    thread::spawn(move || {
        for event in rx {
            match event {
                Progress::DocumentStarted { document, pages } => {
                    pb.inc_length(u64::from(pages));
                    pb.set_message(document);
                }
                Progress::PageDone { .. } => pb.inc(1),
                Progress::PageSkipped {
                    document,
                    page,
                    reason,
                } => {
                    pb.inc(1);
                    pb.println(format!(
                        "{} {} page {}: {}",
                        "Skipped".yellow(),
                        document,
                        page,
                        reason
                    ));
                }
                Progress::DocumentSkipped { document, reason } => {
                    pb.println(format!("{} {}: {}", "Skipped".yellow(), document, reason));
                }
                Progress::Finished { documents, pages } => {
                    pb.finish_with_message(format!("{} documents, {} pages", documents, pages));
                }
            }
        }
        if !pb.is_finished() {
            pb.finish_and_clear();
        }
    })
}

fn cmd_outline(
    input: &Path,
    output: Option<&Path>,
    preset: PresetArg,
    compact: bool,
    text: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let analyzer = Analyzer::new().with_preset(preset.into());
    let outline = analyzer.extract_outline(&SpanDumpFile::new(input))?;

    let content = if text {
        outline_to_text(&outline)
    } else {
        to_json(&outline, json_format(compact))?
    };
    write_output(output, &content)
}

fn build_request(
    documents: Vec<PathBuf>,
    persona: Option<String>,
    job: Option<String>,
    input: Option<&Path>,
    dir: Option<&Path>,
) -> Result<AnalysisRequest, Box<dyn std::error::Error>> {
    if let Some(path) = input {
        return load_challenge(path, dir);
    }

    let sources = documents
        .into_iter()
        .map(|path| Arc::new(SpanDumpFile::new(path)) as Arc<dyn DocumentSource>)
        .collect();

    Ok(AnalysisRequest {
        sources,
        persona: persona.ok_or("--persona is required")?,
        job: job.ok_or("--job is required")?,
    })
}

/// Read a challenge file. Each listed `name.pdf` resolves to `DIR/name.pdf.json`,
/// where `DIR` defaults to the challenge file's directory.
fn load_challenge(
    path: &Path,
    dir: Option<&Path>,
) -> Result<AnalysisRequest, Box<dyn std::error::Error>> {
    let data = fs::read(path)?;
    let challenge: Challenge = serde_json::from_slice(&data)
        .map_err(|e| format!("Invalid challenge file {}: {}", path.display(), e))?;

    let dir = dir
        .map(Path::to_path_buf)
        .or_else(|| path.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));

    let sources = challenge
        .documents
        .into_iter()
        .map(|doc| {
            let dump = dir.join(format!("{}.json", doc.filename));
            Arc::new(SpanDumpFile::new(dump).with_filename(doc.filename)) as Arc<dyn DocumentSource>
        })
        .collect();

    Ok(AnalysisRequest {
        sources,
        persona: challenge.persona.role,
        job: challenge.job_to_be_done.task,
    })
}

fn cmd_analyze(
    request: AnalysisRequest,
    output: Option<&Path>,
    preset: PresetArg,
    compact: bool,
    text: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (tx, rx) = progress_channel();
    let progress = spawn_progress(rx);

    let analyzer = Analyzer::new()
        .with_preset(preset.into())
        .with_progress(tx);

    let rt = tokio::runtime::Runtime::new()?;
    let result = rt.block_on(analyzer.analyze_for_persona_async(
        request.sources,
        request.persona,
        request.job,
    ));

    // Closing the last sender ends the progress thread
    drop(analyzer);
    let _ = progress.join();

    let analysis = result?;
    let content = if text {
        analysis_to_text(&analysis)
    } else {
        to_json(&analysis, json_format(compact))?
    };
    write_output(output, &content)
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let source = SpanDumpFile::new(input);
    let decoder = source.open()?;
    let config = AnalysisConfig::default();

    let mut stats = FontStatistics::new();
    let mut failed = 0;
    for page in 1..=decoder.page_count() {
        match decoder.text_spans(page) {
            Ok(spans) => stats.add_spans(&spans),
            Err(e) => {
                log::warn!("Skipping page {}: {}", page, e);
                failed += 1;
            }
        }
    }

    let metadata_title = decoder.metadata_title();
    let title = document_title(source.filename(), metadata_title.as_deref());

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), source.path().display());
    println!("{}: {}", "Document".bold(), source.filename());
    println!("{}: {}", "Title".bold(), title);
    println!("{}: {}", "Pages".bold(), decoder.page_count());
    if failed > 0 {
        println!("{}: {}", "Unreadable pages".bold(), failed.to_string().yellow());
    }

    println!();
    println!("{}", "Glyph Heights".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Spans".bold(), stats.span_count());
    match stats.body_height() {
        Some(body) => println!("{}: {}", "Body height".bold(), body),
        None => println!("{}: {}", "Body height".bold(), "n/a".dimmed()),
    }

    let heading_heights = stats.heading_heights();
    if heading_heights.is_empty() {
        println!("{}: {}", "Heading heights".bold(), "none".dimmed());
    } else {
        let listed: Vec<String> = heading_heights
            .iter()
            .take(config.heading_clusters)
            .map(|h| h.to_string())
            .collect();
        println!("{}: {}", "Heading heights".bold(), listed.join(", "));
    }

    for (height, count) in stats.histogram.iter().rev() {
        println!("  {:>4} {}", height, format!("x{}", count).dimmed());
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdflens".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF outline and persona analysis tool");
    println!();
    println!("License: MIT");
}
