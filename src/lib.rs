//! Bilingual (English + Russian) boolean text-retrieval over a static corpus
//!
//! A build pass turns a tree of plain-text documents into a persistent
//! inverted index (dictionary, raw posting arrays, document directory);
//! queries combine terms with AND / OR / NOT and parentheses and evaluate by
//! sorted set algebra over posting lists loaded from disk.

pub mod codec;
pub mod config;
pub mod error;
pub mod index;
pub mod query;
pub mod search;
pub mod stemmer;
pub mod tokenizer;

pub use config::{AnalyzerOptions, BuildOptions, IndexPaths};
pub use error::{DuodexError, Result};
pub use index::{build_index, BuildStats, IndexBuilder, IndexReader};
pub use query::{parse_query, QueryNode};
pub use search::Searcher;
pub use tokenizer::Tokenizer;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
