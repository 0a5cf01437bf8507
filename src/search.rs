//! Query pipeline glue: parse, evaluate, format

use std::io::{self, Write};
use std::path::Path;

use crate::config::AnalyzerOptions;
use crate::error::Result;
use crate::index::{DocId, IndexReader};
use crate::query::{parse_query, QueryExecutor};

/// Number of results printed when no explicit limit is given.
pub const DEFAULT_TOP: usize = 20;

/// Owns an open index and evaluates boolean queries against it.
pub struct Searcher {
    reader: IndexReader,
    analyzer: AnalyzerOptions,
}

impl Searcher {
    pub fn open(index_dir: &Path, analyzer: AnalyzerOptions) -> Result<Self> {
        Ok(Self {
            reader: IndexReader::open(index_dir)?,
            analyzer,
        })
    }

    /// Evaluate one query expression into a sorted-unique docid list.
    pub fn search(&mut self, query: &str) -> Result<Vec<DocId>> {
        let ast = parse_query(query)?;
        QueryExecutor::new(&mut self.reader, &self.analyzer).execute(&ast)
    }

    pub fn reader(&self) -> &IndexReader {
        &self.reader
    }

    /// Write the first `top` hits, one `docid \t lang \t title \t url` line
    /// each. Docids missing from the directory render with `?` placeholders.
    pub fn render(&self, hits: &[DocId], top: usize, out: &mut impl Write) -> io::Result<()> {
        for &docid in hits.iter().take(top) {
            match self.reader.doc(docid) {
                Some(doc) => writeln!(
                    out,
                    "{}\t{}\t{}\t{}",
                    docid,
                    doc.lang.as_str(),
                    doc.title,
                    doc.url
                )?,
                None => writeln!(out, "{}\t?\t?\t?", docid)?,
            }
        }
        Ok(())
    }
}
