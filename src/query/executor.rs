//! Post-order query evaluation over sorted posting lists
//!
//! Every operand and every intermediate result is a sorted-ascending,
//! strictly unique docid list; the two-pointer merges below preserve that.

use std::cmp::Ordering;

use crate::config::AnalyzerOptions;
use crate::error::Result;
use crate::index::{DocId, IndexReader};
use crate::query::ast::QueryNode;
use crate::tokenizer::Tokenizer;

/// Merge-intersection of two sorted-unique lists.
pub fn intersect(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
        }
    }
    out
}

/// Merge-union of two sorted-unique lists.
pub fn union(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
            Ordering::Less => {
                out.push(a[i]);
                i += 1;
            }
            Ordering::Greater => {
                out.push(b[j]);
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

/// Two-pointer difference `universe - b`, both sorted-unique.
pub fn difference(universe: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let mut out = Vec::with_capacity(universe.len());
    let mut j = 0;
    for &u in universe {
        while j < b.len() && b[j] < u {
            j += 1;
        }
        if j < b.len() && b[j] == u {
            continue;
        }
        out.push(u);
    }
    out
}

/// Evaluates a parsed query against an open index.
pub struct QueryExecutor<'a> {
    reader: &'a mut IndexReader,
    tokenizer: Tokenizer,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(reader: &'a mut IndexReader, analyzer: &AnalyzerOptions) -> Self {
        Self {
            reader,
            tokenizer: Tokenizer::new(analyzer),
        }
    }

    /// Materialize the docid list for `node`, sorted ascending and unique.
    pub fn execute(&mut self, node: &QueryNode) -> Result<Vec<DocId>> {
        match node {
            QueryNode::Term(word) => {
                let term = self.tokenizer.normalize_term(word);
                self.reader.postings(&term)
            }
            QueryNode::Not(inner) => {
                let matched = self.execute(inner)?;
                Ok(difference(self.reader.universe(), &matched))
            }
            QueryNode::And(left, right) => {
                let left = self.execute(left)?;
                let right = self.execute(right)?;
                Ok(intersect(&left, &right))
            }
            QueryNode::Or(left, right) => {
                let left = self.execute(left)?;
                let right = self.execute(right)?;
                Ok(union(&left, &right))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: &[DocId] = &[1, 3, 5, 7];
    const B: &[DocId] = &[2, 3, 6, 7, 9];
    const C: &[DocId] = &[3, 9];

    fn is_sorted_unique(v: &[DocId]) -> bool {
        v.windows(2).all(|w| w[0] < w[1])
    }

    #[test]
    fn test_intersect() {
        assert_eq!(intersect(A, B), vec![3, 7]);
        assert_eq!(intersect(A, &[]), Vec::<DocId>::new());
        assert!(is_sorted_unique(&intersect(A, B)));
    }

    #[test]
    fn test_union() {
        assert_eq!(union(A, B), vec![1, 2, 3, 5, 6, 7, 9]);
        assert_eq!(union(&[], B), B.to_vec());
        assert!(is_sorted_unique(&union(A, B)));
    }

    #[test]
    fn test_difference() {
        assert_eq!(difference(B, A), vec![2, 6, 9]);
        assert_eq!(difference(B, &[]), B.to_vec());
        assert_eq!(difference(&[], A), Vec::<DocId>::new());
    }

    #[test]
    fn test_commutativity_and_associativity() {
        assert_eq!(intersect(A, B), intersect(B, A));
        assert_eq!(union(A, B), union(B, A));
        assert_eq!(union(&union(A, B), C), union(A, &union(B, C)));
        assert_eq!(intersect(&intersect(A, B), C), intersect(A, &intersect(B, C)));
    }

    #[test]
    fn test_de_morgan_over_universe() {
        let universe: Vec<DocId> = (1..=10).collect();
        // NOT (A AND B) == (NOT A) OR (NOT B)
        let lhs = difference(&universe, &intersect(A, B));
        let rhs = union(&difference(&universe, A), &difference(&universe, B));
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_complement_partitions_universe() {
        let universe: Vec<DocId> = (1..=10).collect();
        let not_a = difference(&universe, A);
        assert_eq!(union(A, &not_a), universe);
        assert_eq!(intersect(A, &not_a), Vec::<DocId>::new());
    }
}
