// In-memory corpus store keyed by language tag.
//
// The store is a mapping, not a list: adding a document under a tag that is
// already present replaces the earlier one. Iteration follows first-insertion
// order, and a replaced document keeps its slot, so row i of a vector space
// built from `documents()` always lines up with the i-th document here.

use indexmap::IndexMap;

use super::document::Document;

/// Holds the current set of reference documents.
#[derive(Debug, Clone, Default)]
pub struct CorpusStore {
    documents: IndexMap<String, Document>,
}

impl CorpusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the document for `language`.
    ///
    /// Returns the document that was replaced, if any. Empty text is accepted.
    pub fn add_document(
        &mut self,
        text: impl Into<String>,
        language: impl Into<String>,
    ) -> Option<Document> {
        let document = Document::new(text, language);
        self.documents.insert(document.language.clone(), document)
    }

    /// Current documents in stable order.
    pub fn documents(&self) -> impl ExactSizeIterator<Item = &Document> + '_ {
        self.documents.values()
    }

    /// Look up the document stored under a language tag.
    pub fn get(&self, language: &str) -> Option<&Document> {
        self.documents.get(language)
    }

    /// The document at row `index` of the stable ordering.
    pub fn get_index(&self, index: usize) -> Option<&Document> {
        self.documents.get_index(index).map(|(_, doc)| doc)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Drop every document.
    pub fn reset(&mut self) {
        self.documents.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_replace_keeps_slot() {
        let mut store = CorpusStore::new();
        assert!(store.add_document("first english", "en").is_none());
        assert!(store.add_document("premier", "fr").is_none());

        let replaced = store.add_document("second english", "en");
        assert_eq!(replaced.map(|d| d.text), Some("first english".to_string()));

        let order: Vec<&str> = store.documents().map(|d| d.text.as_str()).collect();
        assert_eq!(order, vec!["second english", "premier"]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_reset_clears() {
        let mut store = CorpusStore::new();
        store.add_document("text", "en");
        store.reset();
        assert!(store.is_empty());
        assert!(store.get("en").is_none());
    }

    #[test]
    fn test_empty_text_accepted() {
        let mut store = CorpusStore::new();
        store.add_document("", "en");
        assert_eq!(store.len(), 1);
        assert!(store.get_index(0).is_some_and(|d| d.is_empty()));
    }
}
