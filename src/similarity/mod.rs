// Similarity engine: TF-IDF vectorization, cosine scoring and severity banding.

pub mod band;
pub mod engine;
pub mod preprocess;
pub mod tokenizer;
pub mod traits;
pub mod vector_space;
