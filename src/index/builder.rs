//! Corpus traversal and inverted-index construction
//!
//! One pass over the corpus accumulates the term table and the document
//! directory in memory; finalization sorts the table by term bytes, compacts
//! each posting list to sorted-unique, and emits the three artifacts
//! (`postings.bin`, `terms.tsv`, `docs.tsv`).

use std::collections::{HashMap, HashSet};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::config::{BuildOptions, IndexPaths};
use crate::error::{DuodexError, Result};
use crate::index::types::{DocRec, Lang, TermEntry};
use crate::tokenizer::Tokenizer;

/// Counters reported after a build.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuildStats {
    pub docs: u32,
    pub bytes: u64,
    pub tokens: u64,
    pub unique_terms: u64,
    pub postings: u64,
}

/// Accumulates the term table and document directory for one corpus pass.
pub struct IndexBuilder {
    tokenizer: Tokenizer,
    term_ids: HashMap<String, u32>,
    terms: Vec<TermEntry>,
    docs: Vec<DocRec>,
    seen: HashSet<u32>,
    stats: BuildStats,
}

impl IndexBuilder {
    pub fn new(options: &BuildOptions) -> Self {
        Self {
            tokenizer: Tokenizer::new(&options.analyzer),
            term_ids: HashMap::new(),
            terms: Vec::new(),
            docs: Vec::new(),
            seen: HashSet::new(),
            stats: BuildStats::default(),
        }
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Index one corpus file: header, directory record, then the token stream.
    pub fn add_file(&mut self, path: &Path) -> Result<()> {
        let file = File::open(path).map_err(|err| DuodexError::open(path, err))?;
        let mut reader = BufReader::new(file);

        let path_str = path.to_string_lossy().into_owned();
        let lang = Lang::from_path(&path_str);
        let (title, url) = parse_header(&mut reader)?;
        let docid = docid_from_stem(path).wrapping_add(lang.doc_offset());
        self.docs.push(DocRec {
            docid,
            lang,
            title,
            url,
            path: path_str,
        });

        self.seen.clear();
        let mut line = Vec::new();
        loop {
            line.clear();
            let n = reader.read_until(b'\n', &mut line)?;
            if n == 0 {
                break;
            }
            self.stats.bytes += n as u64;
            for token in self.tokenizer.tokenize_line(&line) {
                self.stats.tokens += 1;
                let id = self.term_id(token);
                if self.seen.insert(id) {
                    let entry = &mut self.terms[id as usize];
                    entry.postings.push(docid);
                    entry.df += 1;
                    self.stats.postings += 1;
                }
            }
        }
        self.stats.docs += 1;
        Ok(())
    }

    /// Sort, compact, and write the three artifacts into `out_dir`.
    pub fn finish(mut self, out_dir: &Path) -> Result<BuildStats> {
        self.stats.unique_terms = self.terms.len() as u64;
        self.terms.sort_unstable_by(|a, b| a.term.cmp(&b.term));

        let paths = IndexPaths::new(out_dir);
        let mut postings_out = BufWriter::new(File::create(paths.postings())?);
        let mut terms_out = BufWriter::new(File::create(paths.terms())?);

        let mut offset: u64 = 0;
        for entry in &mut self.terms {
            entry.postings.sort_unstable();
            entry.postings.dedup();
            entry.df = entry.postings.len() as u32;

            let post_len = entry.postings.len() as u64 * 4;
            writeln!(
                terms_out,
                "{}\t{}\t{}\t{}",
                entry.term, entry.df, offset, post_len
            )?;
            for docid in &entry.postings {
                postings_out.write_all(&docid.to_le_bytes())?;
            }
            offset += post_len;
        }
        postings_out.flush()?;
        terms_out.flush()?;

        let mut docs_out = BufWriter::new(File::create(paths.docs())?);
        for doc in &self.docs {
            writeln!(
                docs_out,
                "{}\t{}\t{}\t{}\t{}",
                doc.docid,
                doc.lang.as_str(),
                doc.title,
                doc.url,
                doc.path
            )?;
        }
        docs_out.flush()?;

        Ok(self.stats)
    }

    /// Stable index of a term in the table, inserting on first sight.
    fn term_id(&mut self, term: String) -> u32 {
        if let Some(&id) = self.term_ids.get(&term) {
            return id;
        }
        let id = self.terms.len() as u32;
        self.term_ids.insert(term.clone(), id);
        self.terms.push(TermEntry::new(term));
        id
    }
}

/// Build an index from every `.txt` file under a `/text/` directory of the
/// corpus tree, in sorted path order.
pub fn build_index(corpus: &Path, out_dir: &Path, options: &BuildOptions) -> Result<BuildStats> {
    fs::create_dir_all(out_dir)?;

    let mut files = collect_text_files(corpus);
    if files.is_empty() {
        return Err(DuodexError::InvalidInput(format!(
            "no .txt files found under {}",
            corpus.display()
        )));
    }
    if options.limit > 0 && options.limit < files.len() {
        files.truncate(options.limit);
    }

    let started = Instant::now();
    let mut builder = IndexBuilder::new(options);
    for path in &files {
        if let Err(err) = builder.add_file(path) {
            warn!("skipping corpus file: {err}");
            continue;
        }
        let stats = builder.stats();
        if stats.docs % 500 == 0 {
            info!(
                "indexing: docs={} terms={} postings={} tokens={} elapsed_ms={}",
                stats.docs,
                builder.term_count(),
                stats.postings,
                stats.tokens,
                started.elapsed().as_millis()
            );
        }
    }

    let stats = builder.finish(out_dir)?;
    let secs = started.elapsed().as_secs_f64();
    let kb = stats.bytes as f64 / 1024.0;
    info!(
        "built index: docs={} unique_terms={} postings={} tokens={} bytes_kb={:.0} elapsed_s={:.3} speed_kb_s={:.1}",
        stats.docs,
        stats.unique_terms,
        stats.postings,
        stats.tokens,
        kb,
        secs,
        if secs > 0.0 { kb / secs } else { 0.0 }
    );
    Ok(stats)
}

/// Regular `.txt` files under the corpus root whose path contains `/text/`,
/// sorted ascending.
fn collect_text_files(corpus: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(corpus)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension().is_some_and(|ext| ext == "txt")
                && path.to_string_lossy().contains("/text/")
        })
        .collect();
    files.sort();
    files
}

/// All ASCII digits of the file stem, concatenated and parsed base-10.
fn docid_from_stem(path: &Path) -> u32 {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut value: u32 = 0;
    for b in stem.bytes() {
        if b.is_ascii_digit() {
            value = value.wrapping_mul(10).wrapping_add((b - b'0') as u32);
        }
    }
    value
}

/// Consume up to 6 header lines, capturing `Title:` and `URL:` values.
fn parse_header(reader: &mut impl BufRead) -> Result<(String, String)> {
    let mut title = String::new();
    let mut url = String::new();
    let mut line = Vec::new();
    for _ in 0..6 {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        let text = String::from_utf8_lossy(trim_eol(&line));
        if let Some(rest) = text.strip_prefix("Title:") {
            title = rest.strip_prefix(' ').unwrap_or(rest).to_string();
        } else if let Some(rest) = text.strip_prefix("URL:") {
            url = rest.strip_prefix(' ').unwrap_or(rest).to_string();
        }
    }
    Ok((title, url))
}

fn trim_eol(line: &[u8]) -> &[u8] {
    let mut end = line.len();
    while end > 0 && (line[end - 1] == b'\n' || line[end - 1] == b'\r') {
        end -= 1;
    }
    &line[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_docid_from_stem() {
        assert_eq!(docid_from_stem(Path::new("corpus/text/0001.txt")), 1);
        assert_eq!(docid_from_stem(Path::new("corpus/text/doc12x3.txt")), 123);
        assert_eq!(docid_from_stem(Path::new("corpus/text/readme.txt")), 0);
    }

    #[test]
    fn test_parse_header() {
        let raw = b"Id: 7\nTitle: Hello Page\nURL: http://example.org/7\nLang: en\nFetched: x\n\nbody starts here\n";
        let mut reader = Cursor::new(&raw[..]);
        let (title, url) = parse_header(&mut reader).unwrap();
        assert_eq!(title, "Hello Page");
        assert_eq!(url, "http://example.org/7");

        let mut rest = String::new();
        reader.read_line(&mut rest).unwrap();
        assert_eq!(rest, "body starts here\n");
    }

    #[test]
    fn test_parse_header_short_file() {
        let mut reader = Cursor::new(&b"Title:NoSpace\n"[..]);
        let (title, url) = parse_header(&mut reader).unwrap();
        assert_eq!(title, "NoSpace");
        assert_eq!(url, "");
    }
}
