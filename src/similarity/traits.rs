// Preprocessor trait: the per-language text normalization strategy.
//
// The engine never branches on a language name. It asks the registry for the
// strategy filed under a tag and falls back to a pass-through when none is
// registered, so adding a language is a registration, not an engine change.

/// A text normalization step applied before vectorizing.
pub trait Preprocessor: Send + Sync {
    /// Normalize `text`. Must be pure.
    fn preprocess(&self, text: &str) -> String;
}

/// Returns its input unchanged. Used for every unrecognized language tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Preprocessor for Passthrough {
    fn preprocess(&self, text: &str) -> String {
        text.to_string()
    }
}
