use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::{info, warn};

use plagcheck::config::{validate_threshold, Config};
use plagcheck::output::{report, terminal};
use plagcheck::session::{self, Session, SessionCommand, SessionOutcome};
use plagcheck::similarity::engine::{PreprocessMode, SimilarityEngine};

/// Plagcheck: lexical plagiarism detection.
///
/// Scores a query document against reference documents with TF-IDF cosine
/// similarity and reports every reference above the threshold with a
/// severity verdict.
#[derive(Parser)]
#[command(name = "plagcheck", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a query file against reference files
    Check {
        /// The file to check
        query: PathBuf,

        /// Reference file, optionally tagged with its language (LANG=PATH).
        /// Untagged references use --lang. One reference is kept per tag.
        #[arg(long = "reference", short = 'r', value_name = "[LANG=]PATH", value_parser = parse_reference, required = true)]
        references: Vec<ReferenceArg>,

        #[command(flatten)]
        options: EngineOptions,

        /// Also write the results to a CSV file
        #[arg(long, value_name = "PATH")]
        csv: Option<PathBuf>,

        /// Print results as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Interactive add/check/reset loop reading commands from stdin
    Session {
        #[command(flatten)]
        options: EngineOptions,
    },

    /// Show the severity band table
    Bands,
}

#[derive(clap::Args)]
struct EngineOptions {
    /// Language tag for the query and for untagged references (default: en)
    #[arg(long, default_value = "en")]
    lang: String,

    /// Report references scoring strictly above this (default: PLAGCHECK_THRESHOLD or 0.7)
    #[arg(long)]
    threshold: Option<f64>,

    /// Remove stopwords from references too, not just the query
    #[arg(long)]
    symmetric: bool,
}

/// A `--reference` argument.
#[derive(Debug, Clone)]
struct ReferenceArg {
    language: Option<String>,
    path: PathBuf,
}

fn parse_reference(raw: &str) -> Result<ReferenceArg, String> {
    if raw.trim().is_empty() {
        return Err("reference path is empty".to_string());
    }
    match raw.split_once('=') {
        Some((language, path))
            if !language.is_empty() && !language.contains(['/', '\\']) && !path.is_empty() =>
        {
            Ok(ReferenceArg {
                language: Some(language.to_string()),
                path: PathBuf::from(path),
            })
        }
        _ => Ok(ReferenceArg {
            language: None,
            path: PathBuf::from(raw),
        }),
    }
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("plagcheck=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            query,
            references,
            options,
            csv,
            json,
        } => {
            let mut engine = build_engine(&options)?;

            for reference in &references {
                let language = reference.language.as_deref().unwrap_or(&options.lang);
                let text = session::read_text(&reference.path)?;
                if engine.add_document(text, language).is_some() {
                    warn!(
                        language,
                        path = %reference.path.display(),
                        "Reference replaces an earlier one with the same language tag"
                    );
                }
            }

            let query_text = session::read_text(&query)?;
            let results = engine.check(query_text.trim(), &options.lang);

            if json {
                println!("{}", report::results_json(&results)?);
            } else {
                terminal::display_results(&results, engine.threshold());
            }

            if let Some(csv_path) = csv {
                report::write_csv_report(&csv_path, &query.display().to_string(), &results)?;
                info!(path = %csv_path.display(), rows = results.len(), "Wrote CSV report");
            }
        }

        Commands::Session { options } => {
            let engine = build_engine(&options)?;
            run_session(Session::new(engine, options.lang.clone()))?;
        }

        Commands::Bands => terminal::display_band_table(),
    }

    Ok(())
}

/// Environment config with the CLI flags layered on top.
fn build_engine(options: &EngineOptions) -> Result<SimilarityEngine> {
    let mut config = Config::load()?;
    if let Some(threshold) = options.threshold {
        config.threshold = validate_threshold(threshold)?;
    }
    if options.symmetric {
        config.preprocess_mode = PreprocessMode::Symmetric;
    }
    Ok(config.build_engine())
}

fn run_session(mut session: Session) -> Result<()> {
    println!("{}", "plagcheck session. Type `help` for commands.".bold());
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let outcome = line
            .parse::<SessionCommand>()
            .and_then(|command| session.execute(command));

        match outcome {
            Ok(SessionOutcome::Added {
                language,
                path,
                replaced,
            }) => {
                let verb = if replaced { "Replaced" } else { "Added" };
                println!("{verb} [{language}] {}", path.display());
            }
            Ok(SessionOutcome::Checked {
                path,
                threshold,
                results,
            }) => {
                println!("Checked {}", path.display());
                terminal::display_results(&results, threshold);
            }
            Ok(SessionOutcome::Listing(documents)) => {
                if documents.is_empty() {
                    println!("No references loaded.");
                }
                for (language, chars) in documents {
                    println!("  [{language}] {chars} characters");
                }
            }
            Ok(SessionOutcome::Reset) => println!("All references removed."),
            Ok(SessionOutcome::Help) => println!("{}", session::HELP),
            Ok(SessionOutcome::Quit) => break,
            Err(e) => println!("{} {e:#}", "error:".red().bold()),
        }
    }

    Ok(())
}
