//! Bilingual text segmentation
//!
//! Streams raw corpus bytes through the UTF-8 codec and emits lowercased
//! lexical tokens: letter/digit runs with interior hyphens, `+`, decimal
//! points, and apostrophes kept when the following character continues the
//! token.

mod tokenizer;

pub use tokenizer::Tokenizer;
