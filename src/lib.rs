//! Knuth-Morris-Pratt failure tables and matching, plus the Aho-Corasick
//! automaton that generalizes them to many patterns.
//!
//! Everything works over any token type that can be compared for equality:
//! bytes, chars, integers, or structural markers such as [`tree::Token`].
//! Text is consumed through iterators and never buffered, so it can be
//! produced lazily or be unbounded.

use std::borrow::Borrow;

pub mod ahocorasick;
pub mod error;
pub mod failure;
pub mod kmp;
pub mod tree;

pub use ahocorasick::{Automaton, AutomatonBuilder, Scan};
pub use error::BuildError;
pub use failure::{period, FailureTable};
pub use kmp::{FindIter, Kmp, KmpBuilder};

/// Matched pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Match {
    pub pattern_id: usize,
    pub pattern_len: usize,
}

/// Location of a match within some source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Location {
    pub r#match: Match,
    /// Index of the first token after the match.
    pub end: usize,
}

impl Location {
    /// Index of the first token of the match.
    pub fn start(&self) -> usize {
        self.end - self.r#match.pattern_len
    }

    /// Index of the last token of the match, or `None` for an empty pattern.
    pub fn last(&self) -> Option<usize> {
        self.end.checked_sub(1).filter(|_| self.r#match.pattern_len > 0)
    }
}

/// Searchable token pattern.
#[derive(Clone, Debug)]
pub struct Pattern<'a, T> {
    /// Must be unique within a set of patterns.
    pub id: usize,
    /// The actual tokens to match for this pattern.
    pub value: &'a [T],
}

/// Build the failure table for `pattern`.
pub fn build_failure_table<T: PartialEq>(pattern: &[T]) -> FailureTable {
    FailureTable::new(pattern)
}

/// Return the start of the first occurrence of `pattern` in `text`.
///
/// The empty pattern occurs at 0 in every text.
pub fn find_first<T, I>(text: I, pattern: &[T]) -> Option<usize>
where
    T: PartialEq + Clone,
    I: IntoIterator,
    I::Item: Borrow<T>,
{
    Kmp::new(pattern).find(text)
}

/// Return a lazy iterator over the start of every, possibly overlapping,
/// occurrence of `pattern` in `text`.
pub fn find_all<T, I>(text: I, pattern: &[T]) -> FindIter<T, Kmp<T>, I::IntoIter>
where
    T: PartialEq + Clone,
    I: IntoIterator,
    I::Item: Borrow<T>,
{
    Kmp::new(pattern).into_find_iter(text)
}

/// Build an automaton over `patterns`, numbering them by position.
pub fn build_automaton<T, I, P>(patterns: I) -> Result<Automaton<T>, BuildError>
where
    T: PartialEq + Clone,
    I: IntoIterator<Item = P>,
    P: AsRef<[T]>,
{
    Automaton::new(patterns)
}

/// Return an iterator over every match of every pattern of `automaton` in
/// `text`. See [`Automaton::scan`].
pub fn scan<T, I>(automaton: &Automaton<T>, text: I) -> Scan<'_, T, I::IntoIter>
where
    T: PartialEq,
    I: IntoIterator,
    I::Item: Borrow<T>,
{
    automaton.scan(text)
}
