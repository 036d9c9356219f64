use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::Result;

use scantron::attempt::RunOptions;
use scantron::models::QuestionSetDocument;
use scantron::runner;
use scantron::validate::validate_document;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show a question set's metadata without starting a test.
    Info { file: PathBuf },
    /// Check that a question set file is well-formed.
    Validate { file: PathBuf },
    /// Re-emit a question set with export metadata stamped.
    Export {
        file: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Take the test in the terminal.
    Run {
        file: PathBuf,
        /// Shuffle answer choices within each question.
        #[arg(long)]
        shuffle_choices: bool,
        /// Fixed randomization seed, for reproducible runs.
        #[arg(long, env = "SCANTRON_SEED")]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "scantron=info".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Info { file } => info(&file),
        Command::Validate { file } => validate(&file),
        Command::Export { file, output } => export(&file, &output),
        Command::Run {
            file,
            shuffle_choices,
            seed,
        } => run(&file, RunOptions { shuffle_choices, seed }),
    }
}

fn info(path: &Path) -> Result<()> {
    let document = QuestionSetDocument::from_path(path)?;
    println!("{} - {}", document.metadata.name, document.metadata.subject);
    println!(
        "{} questions • {} minutes • {}",
        document.total_questions(),
        document.metadata.time_limit,
        if document.metadata.allow_answer_change {
            "answer changes allowed"
        } else {
            "no answer changes"
        }
    );
    Ok(())
}

fn validate(path: &Path) -> Result<()> {
    let document = QuestionSetDocument::from_path(path)?;
    validate_document(&document)?;
    println!(
        "OK: {} items, {} questions per attempt",
        document.questions.len(),
        document.total_questions()
    );
    Ok(())
}

fn export(path: &Path, output: &Path) -> Result<()> {
    let document = QuestionSetDocument::from_path(path)?;
    validate_document(&document)?;
    let exported = document.export();
    std::fs::write(output, serde_json::to_string_pretty(&exported)?)?;
    tracing::info!("exported {} to {}", path.display(), output.display());
    Ok(())
}

fn run(path: &Path, options: RunOptions) -> Result<()> {
    let document = QuestionSetDocument::from_path(path)?;
    validate_document(&document)?;

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();

    let report = runner::run_attempt(&document, options, &mut input, &mut output)?;
    runner::print_report(&mut output, &report)?;
    Ok(())
}
