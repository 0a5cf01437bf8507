//! Read-side access to a built index
//!
//! The dictionary and document directory are loaded fully at open time; the
//! postings file stays open for random reads. Term bytes live in one
//! contiguous pool with dictionary entries referencing offsets into it,
//! preserving the ascending order written by the builder so lookups can
//! binary search.

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;
use std::time::Instant;

use tracing::info;

use crate::config::IndexPaths;
use crate::error::{DuodexError, Result};
use crate::index::types::{DocId, DocRec, Lang};

/// Dictionary entry referencing term bytes in the shared pool.
#[derive(Clone, Copy, Debug)]
struct DictEntry {
    term_off: u32,
    term_len: u32,
    df: u32,
    post_off: u64,
    post_len: u64,
}

/// Read-side view of an index directory.
pub struct IndexReader {
    term_pool: Vec<u8>,
    dict: Vec<DictEntry>,
    postings: File,
    docs: Vec<DocRec>,
    universe: Vec<DocId>,
}

impl IndexReader {
    pub fn open(dir: &Path) -> Result<Self> {
        let started = Instant::now();
        let paths = IndexPaths::new(dir);
        let (docs, universe) = load_docs(&paths.docs())?;
        let (term_pool, dict) = load_dict(&paths.terms())?;
        let postings = File::open(paths.postings())
            .map_err(|err| DuodexError::open(&paths.postings(), err))?;

        info!(
            "loaded index: docs={} universe={} terms={} elapsed_ms={}",
            docs.len(),
            universe.len(),
            dict.len(),
            started.elapsed().as_millis()
        );
        Ok(Self {
            term_pool,
            dict,
            postings,
            docs,
            universe,
        })
    }

    /// Load the posting list for a term. Unknown terms yield an empty list.
    pub fn postings(&mut self, term: &str) -> Result<Vec<DocId>> {
        let Some(entry) = self.find_term(term).copied() else {
            return Ok(Vec::new());
        };
        if entry.df == 0 || entry.post_len == 0 {
            return Ok(Vec::new());
        }
        let mut buf = vec![0u8; entry.post_len as usize];
        self.postings.seek(SeekFrom::Start(entry.post_off))?;
        self.postings.read_exact(&mut buf)?;
        Ok(buf
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect())
    }

    /// Dictionary metadata for a term: `(df, post_off, post_len)`.
    pub fn term_meta(&self, term: &str) -> Option<(u32, u64, u64)> {
        self.find_term(term)
            .map(|e| (e.df, e.post_off, e.post_len))
    }

    /// Directory record for a docid, if known.
    pub fn doc(&self, docid: DocId) -> Option<&DocRec> {
        self.docs
            .binary_search_by_key(&docid, |d| d.docid)
            .ok()
            .map(|i| &self.docs[i])
    }

    /// Sorted, unique docids of every document in the directory.
    pub fn universe(&self) -> &[DocId] {
        &self.universe
    }

    pub fn doc_count(&self) -> usize {
        self.docs.len()
    }

    pub fn term_count(&self) -> usize {
        self.dict.len()
    }

    fn term_at(&self, entry: &DictEntry) -> &[u8] {
        let start = entry.term_off as usize;
        &self.term_pool[start..start + entry.term_len as usize]
    }

    fn find_term(&self, term: &str) -> Option<&DictEntry> {
        self.dict
            .binary_search_by(|entry| self.term_at(entry).cmp(term.as_bytes()))
            .ok()
            .map(|i| &self.dict[i])
    }
}

/// Parse `docs.tsv` into the directory (sorted by docid) and the universe.
fn load_docs(path: &Path) -> Result<(Vec<DocRec>, Vec<DocId>)> {
    let file = File::open(path).map_err(|err| DuodexError::open(path, err))?;
    let reader = BufReader::new(file);

    let mut docs = Vec::new();
    let mut universe = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        let mut fields = line.splitn(5, '\t');
        let (Some(docid), Some(lang), Some(title), Some(url), Some(doc_path)) = (
            fields.next(),
            fields.next(),
            fields.next(),
            fields.next(),
            fields.next(),
        ) else {
            continue;
        };
        let Ok(docid) = docid.parse::<DocId>() else {
            continue;
        };
        docs.push(DocRec {
            docid,
            lang: Lang::parse(lang),
            title: title.to_string(),
            url: url.to_string(),
            path: doc_path.to_string(),
        });
        universe.push(docid);
    }

    docs.sort_by_key(|d| d.docid);
    universe.sort_unstable();
    universe.dedup();
    Ok((docs, universe))
}

/// Parse `terms.tsv` into the term pool and dictionary vector.
fn load_dict(path: &Path) -> Result<(Vec<u8>, Vec<DictEntry>)> {
    let file = File::open(path).map_err(|err| DuodexError::open(path, err))?;
    let reader = BufReader::new(file);

    let mut pool = Vec::new();
    let mut dict = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        let mut fields = line.splitn(4, '\t');
        let (Some(term), Some(df), Some(post_off), Some(post_len)) = (
            fields.next(),
            fields.next(),
            fields.next(),
            fields.next(),
        ) else {
            return Err(DuodexError::format(
                "terms.tsv",
                format!("line {}: expected 4 tab-separated fields", lineno + 1),
            ));
        };
        let parse_err = |field: &str| {
            DuodexError::format(
                "terms.tsv",
                format!("line {}: bad {} value", lineno + 1, field),
            )
        };
        let entry = DictEntry {
            term_off: pool.len() as u32,
            term_len: term.len() as u32,
            df: df.parse().map_err(|_| parse_err("df"))?,
            post_off: post_off.parse().map_err(|_| parse_err("post_off"))?,
            post_len: post_len.parse().map_err(|_| parse_err("post_len"))?,
        };
        pool.extend_from_slice(term.as_bytes());
        dict.push(entry);
    }
    Ok((pool, dict))
}
