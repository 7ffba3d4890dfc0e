// Similarity engine: owns the corpus and the lazily built vector space.
//
// The cached space is an explicit two-state value. Any corpus mutation drops
// it back to Stale, and the next similarity query rebuilds it from the full
// current corpus before scoring. Callers never refresh it by hand.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::band::{classify, SeverityBand};
use super::preprocess::{PreprocessorRegistry, DEFAULT_STOPWORD_TAGS};
use super::vector_space::VectorSpace;
use crate::corpus::document::Document;
use crate::corpus::store::CorpusStore;

/// Default `check` threshold: only scores strictly above this are reported.
pub const DEFAULT_THRESHOLD: f64 = 0.7;

/// Which side of the comparison gets preprocessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreprocessMode {
    /// Only the query is preprocessed; corpus documents are fitted from raw text.
    #[default]
    QueryOnly,
    /// Corpus documents are preprocessed with their own tag before fitting.
    Symmetric,
}

enum SpaceState {
    Stale,
    Built(VectorSpace),
}

/// One corpus document and its similarity to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentScore<'a> {
    pub document: &'a Document,
    pub score: f64,
}

/// A document that cleared the threshold, with its verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    /// Language tag the matched document is stored under
    pub language: String,
    /// Full text of the matched document
    pub document_text: String,
    /// Cosine similarity in [0, 1]
    pub score: f64,
    /// (1 - score) * 100
    pub dissimilarity_percent: f64,
    pub band: SeverityBand,
}

/// Scores query documents against the reference corpus.
pub struct SimilarityEngine {
    corpus: CorpusStore,
    preprocessors: PreprocessorRegistry,
    mode: PreprocessMode,
    threshold: f64,
    state: SpaceState,
}

impl Default for SimilarityEngine {
    fn default() -> Self {
        Self::new(PreprocessorRegistry::english(DEFAULT_STOPWORD_TAGS))
    }
}

impl SimilarityEngine {
    pub fn new(preprocessors: PreprocessorRegistry) -> Self {
        Self {
            corpus: CorpusStore::new(),
            preprocessors,
            mode: PreprocessMode::default(),
            threshold: DEFAULT_THRESHOLD,
            state: SpaceState::Stale,
        }
    }

    pub fn with_mode(mut self, mode: PreprocessMode) -> Self {
        self.mode = mode;
        self.state = SpaceState::Stale;
        self
    }

    /// Threshold used by `check`.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn mode(&self) -> PreprocessMode {
        self.mode
    }

    pub fn corpus(&self) -> &CorpusStore {
        &self.corpus
    }

    pub fn preprocessors(&self) -> &PreprocessorRegistry {
        &self.preprocessors
    }

    /// Whether the cached space matches the current corpus.
    pub fn is_built(&self) -> bool {
        matches!(self.state, SpaceState::Built(_))
    }

    /// Insert or replace the reference document for `language`.
    pub fn add_document(
        &mut self,
        text: impl Into<String>,
        language: impl Into<String>,
    ) -> Option<Document> {
        let language = language.into();
        let replaced = self.corpus.add_document(text, language.as_str());
        if replaced.is_some() {
            debug!(language = %language, "Replaced reference document");
        } else {
            debug!(language = %language, documents = self.corpus.len(), "Added reference document");
        }
        self.state = SpaceState::Stale;
        replaced
    }

    /// Drop every reference document.
    pub fn reset(&mut self) {
        self.corpus.reset();
        self.state = SpaceState::Stale;
        debug!("Corpus reset");
    }

    /// Normalize `text` with the strategy registered for `language`.
    pub fn preprocess(&self, text: &str, language: &str) -> String {
        self.preprocessors.preprocess(text, language)
    }

    /// Score the query against every corpus document, in corpus order.
    ///
    /// Rebuilds the vector space first if the corpus changed since the last
    /// build. An empty corpus yields an empty list.
    pub fn similarity(&mut self, text: &str, language: &str) -> Vec<DocumentScore<'_>> {
        self.rebuild_if_stale();
        let SpaceState::Built(space) = &self.state else {
            return Vec::new();
        };

        let query = space.transform(&self.preprocessors.preprocess(text, language));
        space
            .cosine_scores(&query)
            .into_iter()
            .zip(self.corpus.documents())
            .map(|(score, document)| DocumentScore { document, score })
            .collect()
    }

    /// `check_with_threshold` using the engine's configured threshold.
    pub fn check(&mut self, text: &str, language: &str) -> Vec<SimilarityResult> {
        let threshold = self.threshold;
        self.check_with_threshold(text, language, threshold)
    }

    /// Documents scoring strictly above `threshold`, classified, in corpus order.
    pub fn check_with_threshold(
        &mut self,
        text: &str,
        language: &str,
        threshold: f64,
    ) -> Vec<SimilarityResult> {
        let results: Vec<SimilarityResult> = self
            .similarity(text, language)
            .into_iter()
            .filter(|s| s.score > threshold)
            .map(|s| {
                let (dissimilarity_percent, band) = classify(s.score);
                SimilarityResult {
                    language: s.document.language.clone(),
                    document_text: s.document.text.clone(),
                    score: s.score,
                    dissimilarity_percent,
                    band,
                }
            })
            .collect();

        info!(
            language,
            threshold,
            documents = self.corpus.len(),
            matches = results.len(),
            "Checked query against corpus"
        );
        results
    }

    fn rebuild_if_stale(&mut self) {
        if self.is_built() {
            return;
        }

        let texts: Vec<String> = match self.mode {
            PreprocessMode::QueryOnly => {
                self.corpus.documents().map(|d| d.text.clone()).collect()
            }
            PreprocessMode::Symmetric => self
                .corpus
                .documents()
                .map(|d| self.preprocessors.preprocess(&d.text, &d.language))
                .collect(),
        };

        let space = VectorSpace::fit(&texts);
        info!(
            documents = space.len(),
            vocabulary = space.vocabulary_len(),
            mode = ?self.mode,
            "Built TF-IDF vector space"
        );
        self.state = SpaceState::Built(space);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_transitions() {
        let mut engine = SimilarityEngine::default();
        assert!(!engine.is_built());

        engine.similarity("query", "en");
        assert!(engine.is_built());

        engine.add_document("some reference text", "en");
        assert!(!engine.is_built());

        engine.check("some reference text", "en");
        assert!(engine.is_built());

        engine.reset();
        assert!(!engine.is_built());
    }

    #[test]
    fn test_rebuild_sees_new_documents() {
        let mut engine = SimilarityEngine::default();
        engine.add_document("cats are wonderful pets", "en");
        assert_eq!(engine.similarity("cats", "en").len(), 1);

        engine.add_document("les chats sont merveilleux", "fr");
        let scores = engine.similarity("chats merveilleux", "fr");
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[1].document.language, "fr");
        assert!(scores[1].score > scores[0].score);
    }

    #[test]
    fn test_symmetric_mode_restores_self_similarity() {
        let text = "the quick brown fox jumps over the lazy dog";

        let mut asymmetric = SimilarityEngine::new(PreprocessorRegistry::english(["en"]));
        asymmetric.add_document(text, "en");
        let skewed = asymmetric.similarity(text, "en")[0].score;
        assert!(skewed < 0.999, "query-only stopword removal should depress the score");

        let mut symmetric = SimilarityEngine::new(PreprocessorRegistry::english(["en"]))
            .with_mode(PreprocessMode::Symmetric);
        symmetric.add_document(text, "en");
        let score = symmetric.similarity(text, "en")[0].score;
        assert!((score - 1.0).abs() < 1e-9, "got {score}");
    }
}
