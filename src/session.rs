// Interactive session: add reference files, check query files, reset.
//
// Commands are read one per line. Each maps onto one engine operation, so a
// session is the command-line counterpart of an add/check/reset button panel.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use tracing::warn;

use crate::similarity::engine::{SimilarityEngine, SimilarityResult};

pub const HELP: &str = "\
Commands:
  add [LANG] PATH     add a reference file (replaces any file under LANG)
  check [LANG] PATH   check a query file against the references
  list                show the current references
  reset               drop every reference
  help                show this message
  quit                leave the session";

/// One parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Add {
        language: Option<String>,
        path: PathBuf,
    },
    Check {
        language: Option<String>,
        path: PathBuf,
    },
    List,
    Reset,
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_lowercase().as_str() {
            "add" => {
                let (language, path) = language_and_path(rest, "add")?;
                Ok(SessionCommand::Add { language, path })
            }
            "check" => {
                let (language, path) = language_and_path(rest, "check")?;
                Ok(SessionCommand::Check { language, path })
            }
            "list" | "ls" => Ok(SessionCommand::List),
            "reset" => Ok(SessionCommand::Reset),
            "help" | "?" => Ok(SessionCommand::Help),
            "quit" | "exit" | "q" => Ok(SessionCommand::Quit),
            "" => anyhow::bail!("Empty command. Type `help` for a list of commands."),
            other => anyhow::bail!("Unknown command `{other}`. Type `help` for a list of commands."),
        }
    }
}

/// Split `[LANG] PATH`: a single token is the path, otherwise the first token
/// is the language tag and the remainder (spaces included) is the path.
fn language_and_path(rest: &str, verb: &str) -> Result<(Option<String>, PathBuf)> {
    if rest.is_empty() {
        anyhow::bail!("`{verb}` needs a file path: {verb} [LANG] PATH");
    }
    match rest.split_once(char::is_whitespace) {
        Some((language, path)) => Ok((Some(language.to_string()), PathBuf::from(path.trim()))),
        None => Ok((None, PathBuf::from(rest))),
    }
}

/// What a command did, for the caller to display.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    Added {
        language: String,
        path: PathBuf,
        replaced: bool,
    },
    Checked {
        path: PathBuf,
        threshold: f64,
        results: Vec<SimilarityResult>,
    },
    /// (language tag, character count) per reference, in corpus order
    Listing(Vec<(String, usize)>),
    Reset,
    Help,
    Quit,
}

/// A running session around one engine.
pub struct Session {
    engine: SimilarityEngine,
    default_language: String,
}

impl Session {
    pub fn new(engine: SimilarityEngine, default_language: impl Into<String>) -> Self {
        Self {
            engine,
            default_language: default_language.into(),
        }
    }

    pub fn engine(&self) -> &SimilarityEngine {
        &self.engine
    }

    pub fn execute(&mut self, command: SessionCommand) -> Result<SessionOutcome> {
        match command {
            SessionCommand::Add { language, path } => {
                let language = language.unwrap_or_else(|| self.default_language.clone());
                let text = read_text(&path)?;
                let replaced = self.engine.add_document(text, language.as_str()).is_some();
                if replaced {
                    warn!(language = %language, path = %path.display(), "Replaced earlier reference with the same language tag");
                }
                Ok(SessionOutcome::Added {
                    language,
                    path,
                    replaced,
                })
            }
            SessionCommand::Check { language, path } => {
                let language = language.unwrap_or_else(|| self.default_language.clone());
                let text = read_text(&path)?;
                let threshold = self.engine.threshold();
                let results = self.engine.check(text.trim(), &language);
                Ok(SessionOutcome::Checked {
                    path,
                    threshold,
                    results,
                })
            }
            SessionCommand::List => Ok(SessionOutcome::Listing(
                self.engine
                    .corpus()
                    .documents()
                    .map(|d| (d.language.clone(), d.text.chars().count()))
                    .collect(),
            )),
            SessionCommand::Reset => {
                self.engine.reset();
                Ok(SessionOutcome::Reset)
            }
            SessionCommand::Help => Ok(SessionOutcome::Help),
            SessionCommand::Quit => Ok(SessionOutcome::Quit),
        }
    }
}

/// Read a UTF-8 text file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_with_and_without_language() {
        assert_eq!(
            "add refs/a.txt".parse::<SessionCommand>().unwrap(),
            SessionCommand::Add {
                language: None,
                path: PathBuf::from("refs/a.txt")
            }
        );
        assert_eq!(
            "  ADD fr  my notes.txt ".parse::<SessionCommand>().unwrap(),
            SessionCommand::Add {
                language: Some("fr".to_string()),
                path: PathBuf::from("my notes.txt")
            }
        );
    }

    #[test]
    fn test_parse_simple_verbs() {
        assert_eq!("reset".parse::<SessionCommand>().unwrap(), SessionCommand::Reset);
        assert_eq!("ls".parse::<SessionCommand>().unwrap(), SessionCommand::List);
        assert_eq!("exit".parse::<SessionCommand>().unwrap(), SessionCommand::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert!("check".parse::<SessionCommand>().is_err());
        assert!("frobnicate x".parse::<SessionCommand>().is_err());
        assert!("   ".parse::<SessionCommand>().is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut session = Session::new(SimilarityEngine::default(), "en");
        let result = session.execute(SessionCommand::Add {
            language: None,
            path: PathBuf::from("/definitely/not/here.txt"),
        });
        assert!(result.is_err());
        assert!(session.engine().corpus().is_empty());
    }
}
