use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Options shared by every stage that turns raw text into index terms
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct AnalyzerOptions {
    /// Reduce tokens with the morphological stemmer after segmentation
    pub stem: bool,
}

/// Options controlling corpus traversal and index construction
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BuildOptions {
    /// Keep only the first N corpus files after sorting (0 = all)
    pub limit: usize,
    /// Token normalization applied while indexing
    pub analyzer: AnalyzerOptions,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            limit: 0,
            analyzer: AnalyzerOptions::default(),
        }
    }
}

/// Locations of the three on-disk artifacts inside an index directory
pub struct IndexPaths {
    root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Document directory: `docid \t lang \t title \t url \t path` per line.
    pub fn docs(&self) -> PathBuf {
        self.root.join("docs.tsv")
    }

    /// Term dictionary: `term \t df \t post_off \t post_len` per line,
    /// ascending by term bytes.
    pub fn terms(&self) -> PathBuf {
        self.root.join("terms.tsv")
    }

    /// Concatenated little-endian u32 posting arrays in dictionary order.
    pub fn postings(&self) -> PathBuf {
        self.root.join("postings.bin")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_paths() {
        let paths = IndexPaths::new("/tmp/idx");
        assert_eq!(paths.docs(), PathBuf::from("/tmp/idx/docs.tsv"));
        assert_eq!(paths.terms(), PathBuf::from("/tmp/idx/terms.tsv"));
        assert_eq!(paths.postings(), PathBuf::from("/tmp/idx/postings.bin"));
    }

    #[test]
    fn test_default_options() {
        let options = BuildOptions::default();
        assert_eq!(options.limit, 0);
        assert!(!options.analyzer.stem);
    }
}
