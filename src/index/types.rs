/// 32-bit document identifier derived from filename digits plus a language offset.
pub type DocId = u32;

/// Additive docid offset keeping the Russian id-space disjoint from the English one.
pub const RU_DOC_OFFSET: DocId = 30_000;

/// Source language of a document, inferred from its corpus path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lang {
    En,
    Ru,
    Unk,
}

impl Lang {
    pub fn from_path(path: &str) -> Self {
        if path.contains("/enwiki/") {
            Lang::En
        } else if path.contains("/ruwiki/") {
            Lang::Ru
        } else {
            Lang::Unk
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "en" => Lang::En,
            "ru" => Lang::Ru,
            _ => Lang::Unk,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Ru => "ru",
            Lang::Unk => "unk",
        }
    }

    pub fn doc_offset(&self) -> DocId {
        match self {
            Lang::Ru => RU_DOC_OFFSET,
            _ => 0,
        }
    }
}

/// Document directory record, one line of `docs.tsv`.
#[derive(Clone, Debug)]
pub struct DocRec {
    pub docid: DocId,
    pub lang: Lang,
    pub title: String,
    pub url: String,
    pub path: String,
}

/// In-memory posting accumulator for one term during a build.
///
/// After finalization `postings` is sorted ascending and strictly unique,
/// and `df == postings.len()`.
#[derive(Clone, Debug)]
pub struct TermEntry {
    pub term: String,
    pub df: u32,
    pub postings: Vec<DocId>,
}

impl TermEntry {
    pub fn new(term: String) -> Self {
        Self {
            term,
            df: 0,
            postings: Vec::new(),
        }
    }
}
