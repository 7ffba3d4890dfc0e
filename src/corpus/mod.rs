// Corpus store: the reference documents a query is checked against.

pub mod document;
pub mod store;
