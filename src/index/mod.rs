//! Inverted-index construction and on-disk access
//!
//! A build walks the corpus once, accumulates per-term posting lists, and
//! writes three artifacts: `terms.tsv` (dictionary, sorted by term bytes),
//! `postings.bin` (raw little-endian u32 arrays in dictionary order), and
//! `docs.tsv` (the document directory). The reader loads the dictionary and
//! directory into memory and serves posting lists by random read.

mod builder;
mod reader;
mod types;

pub use builder::{build_index, BuildStats, IndexBuilder};
pub use reader::IndexReader;
pub use types::{DocId, DocRec, Lang, TermEntry, RU_DOC_OFFSET};
