mod settings;

use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use livesub_core::alignment::domain::alignment_table::AlignmentTable;
use livesub_core::alignment::domain::segment::Segmenter;
use livesub_core::document::infrastructure::ingestion_worker;
use livesub_core::session::session_logger::LogSessionLogger;
use livesub_core::session::session_runner::SessionRunner;
use livesub_core::session::subtitle_session::{DocumentRole, SubtitleSession};
use livesub_core::subtitle::infrastructure::writer_subtitle_sink::WriterSubtitleSink;
use livesub_core::transcript::domain::transcript_source::TranscriptSource;
use livesub_core::transcript::infrastructure::line_transcript_source::LineTranscriptSource;
use livesub_core::transcript::infrastructure::scripted_transcript_source::ScriptedTranscriptSource;

use settings::Settings;

/// Live bilingual subtitles: follow a speech transcript through a source
/// document and print the matching translated sentence.
#[derive(Parser)]
#[command(name = "livesub")]
struct Cli {
    /// Source-language document (.txt, .pdf, .docx, .doc).
    #[arg(long)]
    original: PathBuf,

    /// Translated document, sentence-for-sentence with the original.
    #[arg(long)]
    translated: PathBuf,

    /// Replay transcript snapshots from a file (one per line) instead of
    /// reading recognition results from stdin.
    #[arg(long)]
    transcript: Option<PathBuf>,

    /// Pause before each replayed snapshot, in milliseconds.
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Drop sentence fragments at or below this many characters.
    #[arg(long)]
    min_segment_chars: Option<usize>,

    /// Print the matched source sentence above each subtitle.
    #[arg(long)]
    show_source: bool,

    /// Print the alignment table and exit.
    #[arg(long)]
    dump_table: bool,

    /// Settings file (JSON). Defaults to the user config directory.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;
    let settings = resolve_settings(&cli)?;
    let segmenter = Segmenter::new(settings.min_segment_chars);

    let sink = WriterSubtitleSink::new(io::stdout()).with_source(settings.show_source);
    let mut session = SubtitleSession::with_segmenter(
        segmenter,
        Box::new(sink),
        Box::new(LogSessionLogger::new()),
    );
    load_documents(&mut session, &cli.original, &cli.translated)?;

    if cli.dump_table {
        return dump_table(session.table());
    }

    let source = build_source(cli.transcript.as_deref(), settings.replay_delay_ms)?;
    let cancelled = Arc::new(AtomicBool::new(false));
    let summary = SessionRunner::new().run(&mut session, source, cancelled)?;
    session.summary();
    log::info!(
        "{} position changes over {} snapshots",
        summary.position_changes,
        summary.snapshots
    );
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    for path in [&cli.original, &cli.translated] {
        if !path.exists() {
            return Err(format!("Input file not found: {}", path.display()).into());
        }
    }
    if let Some(ref transcript) = cli.transcript {
        if !transcript.exists() {
            return Err(format!("Transcript file not found: {}", transcript.display()).into());
        }
    }
    if cli.delay_ms.is_some() && cli.transcript.is_none() {
        return Err("--delay-ms only applies when replaying with --transcript".into());
    }
    Ok(())
}

fn resolve_settings(cli: &Cli) -> Result<Settings, Box<dyn std::error::Error>> {
    let mut settings = match cli.config {
        Some(ref path) => Settings::load_from(path)?,
        None => Settings::load(),
    };
    if let Some(min) = cli.min_segment_chars {
        settings.min_segment_chars = min;
    }
    if let Some(delay) = cli.delay_ms {
        settings.replay_delay_ms = delay;
    }
    settings.show_source |= cli.show_source;
    Ok(settings)
}

/// Extracts both documents concurrently, then hands them to the session.
fn load_documents(
    session: &mut SubtitleSession,
    original: &Path,
    translated: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let original_rx = ingestion_worker::spawn(original.to_path_buf());
    let translated_rx = ingestion_worker::spawn(translated.to_path_buf());

    for (role, rx) in [
        (DocumentRole::Original, original_rx),
        (DocumentRole::Translated, translated_rx),
    ] {
        match ingestion_worker::wait(&rx) {
            Ok(doc) => session.load(role, &doc.name, doc.text),
            Err(e) => {
                session.load_failed(role, &e);
                return Err(e.into());
            }
        }
    }
    Ok(())
}

fn build_source(
    transcript: Option<&Path>,
    delay_ms: u64,
) -> Result<Box<dyn TranscriptSource>, Box<dyn std::error::Error>> {
    match transcript {
        Some(path) => {
            let source = ScriptedTranscriptSource::from_file(path)?
                .with_delay(Duration::from_millis(delay_ms));
            log::info!("Replaying {} snapshots from {}", source.len(), path.display());
            Ok(Box::new(source))
        }
        None => {
            log::info!("Reading recognition results from stdin");
            Ok(Box::new(LineTranscriptSource::new(BufReader::new(io::stdin()))))
        }
    }
}

fn dump_table(table: &AlignmentTable) -> Result<(), Box<dyn std::error::Error>> {
    let mut out = io::stdout().lock();
    for entry in table {
        writeln!(out, "{:4}  {}", entry.index, entry.source)?;
        writeln!(out, "      {}", entry.translated)?;
    }
    writeln!(out, "{} aligned segments", table.len())?;
    Ok(())
}
