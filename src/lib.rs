// Plagcheck: lexical plagiarism detection against a small reference corpus.
//
// This is the library root. The corpus and similarity modules form the core;
// config, output and session are the surfaces the binary drives them through.

pub mod config;
pub mod corpus;
pub mod output;
pub mod session;
pub mod similarity;
