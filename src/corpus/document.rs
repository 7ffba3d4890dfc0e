// Document: one reference text plus the language tag it was filed under.

use serde::{Deserialize, Serialize};

/// A single reference document held in the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Language tag supplied by the caller (e.g. "en", "english", "fr")
    pub language: String,
    /// Raw, unprocessed text
    pub text: String,
}

impl Document {
    pub fn new(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            text: text.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
