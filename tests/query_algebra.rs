use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use duodex::{build_index, AnalyzerOptions, BuildOptions, DuodexError, Searcher};

fn write_doc(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let content = format!("Id: x\nTitle: t\nURL: u\nLang: x\nFetched: x\n\n{body}\n");
    fs::write(path, content).unwrap();
}

/// Four documents, one of them without any indexable token.
fn build_fixture() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let corpus = tmp.path().join("corpus");
    write_doc(&corpus, "enwiki/text/0001.txt", "alpha beta");
    write_doc(&corpus, "enwiki/text/0002.txt", "beta gamma");
    write_doc(&corpus, "enwiki/text/0003.txt", "alpha gamma delta");
    write_doc(&corpus, "enwiki/text/0004.txt", "...");
    let out = tmp.path().join("index");
    build_index(&corpus, &out, &BuildOptions::default()).unwrap();
    (tmp, out)
}

fn open(out: &Path) -> Searcher {
    Searcher::open(out, AnalyzerOptions::default()).unwrap()
}

#[test]
fn complement_partitions_the_universe() {
    let (_tmp, out) = build_fixture();
    let mut searcher = open(&out);

    let universe: Vec<u32> = searcher.reader().universe().to_vec();
    assert_eq!(universe, vec![1, 2, 3, 4]);

    for query in ["alpha", "beta AND gamma", "alpha OR delta"] {
        let yes = searcher.search(query).unwrap();
        let no = searcher.search(&format!("NOT ({query})")).unwrap();

        let mut both = yes.clone();
        both.extend_from_slice(&no);
        both.sort_unstable();
        assert_eq!(both, universe, "partition failed for {query}");
        assert!(yes.iter().all(|id| !no.contains(id)));
    }
}

#[test]
fn operators_commute_and_associate() {
    let (_tmp, out) = build_fixture();
    let mut searcher = open(&out);

    assert_eq!(
        searcher.search("alpha AND beta").unwrap(),
        searcher.search("beta AND alpha").unwrap()
    );
    assert_eq!(
        searcher.search("alpha OR beta").unwrap(),
        searcher.search("beta OR alpha").unwrap()
    );
    assert_eq!(
        searcher.search("(alpha OR beta) OR gamma").unwrap(),
        searcher.search("alpha OR (beta OR gamma)").unwrap()
    );
    assert_eq!(
        searcher.search("(alpha AND beta) AND gamma").unwrap(),
        searcher.search("alpha AND (beta AND gamma)").unwrap()
    );
}

#[test]
fn de_morgan_holds_over_the_universe() {
    let (_tmp, out) = build_fixture();
    let mut searcher = open(&out);

    assert_eq!(
        searcher.search("NOT (alpha AND beta)").unwrap(),
        searcher.search("(NOT alpha) OR (NOT beta)").unwrap()
    );
    assert_eq!(
        searcher.search("NOT (alpha OR beta)").unwrap(),
        searcher.search("(NOT alpha) AND (NOT beta)").unwrap()
    );
}

#[test]
fn results_stay_sorted_and_unique() {
    let (_tmp, out) = build_fixture();
    let mut searcher = open(&out);

    for query in [
        "alpha",
        "alpha OR alpha",
        "alpha OR beta OR gamma OR delta",
        "NOT delta",
        "-(alpha AND beta) OR gamma",
    ] {
        let hits = searcher.search(query).unwrap();
        assert!(
            hits.windows(2).all(|w| w[0] < w[1]),
            "unsorted result for {query}"
        );
    }
}

#[test]
fn query_terms_are_case_folded() {
    let (_tmp, out) = build_fixture();
    let mut searcher = open(&out);

    assert_eq!(
        searcher.search("ALPHA and Beta").unwrap(),
        searcher.search("alpha AND beta").unwrap()
    );
}

#[test]
fn unknown_terms_evaluate_to_empty() {
    let (_tmp, out) = build_fixture();
    let mut searcher = open(&out);

    assert!(searcher.search("zzz").unwrap().is_empty());
    assert_eq!(searcher.search("NOT zzz").unwrap(), vec![1, 2, 3, 4]);
    assert!(searcher.search("zzz AND alpha").unwrap().is_empty());
    assert_eq!(searcher.search("zzz OR alpha").unwrap(), vec![1, 3]);
}

#[test]
fn minus_is_prefix_not() {
    let (_tmp, out) = build_fixture();
    let mut searcher = open(&out);

    assert_eq!(
        searcher.search("-alpha").unwrap(),
        searcher.search("NOT alpha").unwrap()
    );
}

#[test]
fn parse_errors_surface_for_bad_queries() {
    let (_tmp, out) = build_fixture();
    let mut searcher = open(&out);

    for query in ["", "(alpha", "alpha AND", "alpha beta", ")("] {
        match searcher.search(query) {
            Err(DuodexError::QueryParse(_)) => {}
            other => panic!("expected parse error for {query:?}, got {other:?}"),
        }
    }
}
