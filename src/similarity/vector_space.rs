// TF-IDF vector space fitted over the whole corpus.
//
// Weighting:
//
//   tf(t, d)  = raw count of term t in document d
//   idf(t)    = ln((1 + n) / (1 + df(t))) + 1
//   w(t, d)   = tf(t, d) * idf(t), then L2-normalized per document
//
// where n is the number of documents and df(t) the number of documents that
// contain t. The smoothing keeps idf finite and strictly positive, so a term
// shared by every document still carries weight. Because every vector is unit
// length (or all zero), cosine similarity is a plain dot product.
//
// Vocabulary indices follow sorted term order and sparse entries are kept
// sorted by index, so the floating-point summation order (and therefore every
// score) is identical across rebuilds of the same corpus.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::tokenizer::tokenize;

/// A sparse weight vector: (vocabulary index, weight) pairs sorted by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build from entries that are already sorted by index.
    fn from_sorted(entries: Vec<(usize, f64)>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Number of non-zero entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|&(_, w)| w == 0.0)
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Dot product by merging the two sorted index lists.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_w) = self.entries[i];
            let (b_idx, b_w) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_w * b_w;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
    }
}

/// Cosine similarity between two non-negative weight vectors.
///
/// Returns 0.0 when either vector is all zero, otherwise a value clamped to
/// [0.0, 1.0] to absorb rounding on near-identical vectors.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(0.0, 1.0)
}

/// Fitted vocabulary, IDF weights and one unit vector per corpus document.
#[derive(Debug, Clone, Default)]
pub struct VectorSpace {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    vectors: Vec<SparseVector>,
}

impl VectorSpace {
    /// A space with no documents and no vocabulary.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fit over `documents`, producing one vector per document in order.
    ///
    /// Never fails: no documents gives an empty space, and documents with no
    /// usable tokens get a zero vector.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        if documents.is_empty() {
            return Self::empty();
        }

        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d.as_ref())).collect();

        // Document frequency per term; BTreeMap gives the sorted vocabulary order.
        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &tokenized {
            let unique: BTreeSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let n = documents.len() as f64;
        let mut vocabulary = HashMap::with_capacity(doc_freq.len());
        let mut idf = Vec::with_capacity(doc_freq.len());
        for (idx, (term, df)) in doc_freq.iter().enumerate() {
            vocabulary.insert((*term).to_string(), idx);
            idf.push(((1.0 + n) / (1.0 + *df as f64)).ln() + 1.0);
        }

        let mut space = Self {
            vocabulary,
            idf,
            vectors: Vec::with_capacity(documents.len()),
        };
        let vectors = tokenized.iter().map(|tokens| space.weigh(tokens)).collect();
        space.vectors = vectors;
        space
    }

    /// Project `text` into the fitted vocabulary.
    ///
    /// Terms the corpus never contained are ignored; a text made only of such
    /// terms yields a zero vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        self.weigh(&tokenize(text))
    }

    /// Cosine similarity of `query` against every document, in corpus order.
    pub fn cosine_scores(&self, query: &SparseVector) -> Vec<f64> {
        self.vectors
            .iter()
            .map(|doc| cosine_similarity(query, doc))
            .collect()
    }

    /// Number of documents the space was fitted on.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// IDF weight of `term`, if it is in the vocabulary.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&idx| self.idf[idx])
    }

    /// The fitted vector for the document at `index`.
    pub fn vector(&self, index: usize) -> Option<&SparseVector> {
        self.vectors.get(index)
    }

    fn weigh(&self, tokens: &[String]) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokens {
            if let Some(&idx) = self.vocabulary.get(token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let entries = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf * self.idf[idx]))
            .collect();
        let mut vector = SparseVector::from_sorted(entries);
        vector.normalize();
        vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_empty_corpus() {
        let docs: Vec<String> = vec![];
        let space = VectorSpace::fit(&docs);
        assert!(space.is_empty());
        assert_eq!(space.vocabulary_len(), 0);
        let query = space.transform("anything at all");
        assert!(query.is_zero());
        assert!(space.cosine_scores(&query).is_empty());
    }

    #[test]
    fn test_vectors_are_unit_length() {
        let space = VectorSpace::fit(&["cats are wonderful pets", "dogs are loyal pets too"]);
        for i in 0..space.len() {
            let norm = space.vector(i).map(SparseVector::norm).unwrap_or(0.0);
            assert!((norm - 1.0).abs() < 1e-12, "row {i} has norm {norm}");
        }
    }

    #[test]
    fn test_smoothed_idf() {
        let space = VectorSpace::fit(&["shared alpha", "shared beta"]);
        // shared: ln(3/3) + 1 = 1.0; alpha: ln(3/2) + 1
        assert!((space.idf("shared").unwrap() - 1.0).abs() < 1e-12);
        assert!((space.idf("alpha").unwrap() - ((1.5f64).ln() + 1.0)).abs() < 1e-12);
        assert!(space.idf("gamma").is_none());
    }

    #[test]
    fn test_empty_document_gets_zero_vector() {
        let space = VectorSpace::fit(&["", "real words here"]);
        assert_eq!(space.len(), 2);
        assert!(space.vector(0).is_some_and(SparseVector::is_zero));
        let scores = space.cosine_scores(&space.transform("real words"));
        assert_eq!(scores[0], 0.0);
        assert!(scores[1] > 0.0);
    }

    #[test]
    fn test_out_of_vocabulary_query_scores_zero() {
        let space = VectorSpace::fit(&["cats are wonderful pets"]);
        let query = space.transform("economic policy interest rates");
        assert!(query.is_zero());
        assert_eq!(space.cosine_scores(&query), vec![0.0]);
    }

    #[test]
    fn test_dot_merges_sorted_indices() {
        let a = SparseVector::from_sorted(vec![(0, 1.0), (2, 2.0), (5, 3.0)]);
        let b = SparseVector::from_sorted(vec![(1, 4.0), (2, 0.5), (5, 1.0)]);
        assert!((a.dot(&b) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_zero_vector() {
        let zero = SparseVector::default();
        let v = SparseVector::from_sorted(vec![(0, 1.0)]);
        assert_eq!(cosine_similarity(&zero, &v), 0.0);
    }
}
