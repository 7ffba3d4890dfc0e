// Language-keyed preprocessing: stopword filtering and the strategy registry.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use stop_words::{get, LANGUAGE};

use super::traits::{Passthrough, Preprocessor};

/// Tags the English stopword strategy is filed under when nothing else is
/// configured.
pub const DEFAULT_STOPWORD_TAGS: &[&str] = &["english"];

/// Drops whitespace-separated tokens whose lower-cased form is a stopword.
///
/// Tokens are compared verbatim after lower-casing, so "The" is dropped but
/// "the," (with trailing punctuation) survives. Survivors are rejoined with
/// single spaces.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    words: HashSet<String>,
}

impl StopwordFilter {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// English stopwords from the `stop-words` crate.
    pub fn english() -> Self {
        let stop_words: Vec<String> = get(LANGUAGE::English);
        Self::new(stop_words)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Preprocessor for StopwordFilter {
    fn preprocess(&self, text: &str) -> String {
        text.split_whitespace()
            .filter(|token| !self.contains(token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Maps language tags to preprocessing strategies.
///
/// Lookups are case-insensitive and ignore surrounding whitespace. Any tag
/// without a registered strategy is passed through unchanged.
#[derive(Clone, Default)]
pub struct PreprocessorRegistry {
    strategies: HashMap<String, Arc<dyn Preprocessor>>,
}

impl PreprocessorRegistry {
    /// An empty registry: every tag passes through.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the English stopword filter under each of `tags`.
    pub fn english<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let filter: Arc<dyn Preprocessor> = Arc::new(StopwordFilter::english());
        let mut registry = Self::new();
        for tag in tags {
            registry.register_shared(tag.as_ref(), Arc::clone(&filter));
        }
        registry
    }

    /// File `strategy` under `tag`, replacing any earlier registration.
    pub fn register(&mut self, tag: &str, strategy: impl Preprocessor + 'static) {
        self.register_shared(tag, Arc::new(strategy));
    }

    pub fn register_shared(&mut self, tag: &str, strategy: Arc<dyn Preprocessor>) {
        self.strategies.insert(normalize_tag(tag), strategy);
    }

    /// Whether `tag` has a strategy other than the pass-through.
    pub fn recognizes(&self, tag: &str) -> bool {
        self.strategies.contains_key(&normalize_tag(tag))
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.strategies.keys().cloned().collect();
        tags.sort();
        tags
    }

    /// Normalize `text` with the strategy registered for `tag`.
    pub fn preprocess(&self, text: &str, tag: &str) -> String {
        match self.strategies.get(&normalize_tag(tag)) {
            Some(strategy) => strategy.preprocess(text),
            None => Passthrough.preprocess(text),
        }
    }
}

impl std::fmt::Debug for PreprocessorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreprocessorRegistry")
            .field("tags", &self.tags())
            .finish()
    }
}

fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}
