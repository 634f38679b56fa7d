use std::borrow::Borrow;
use std::iter::Fuse;
use std::marker::PhantomData;

use crate::failure::FailureTable;

/// Configuration for a [`Kmp`] matcher.
#[derive(Clone, Debug)]
pub struct KmpBuilder {
    overlapping: bool,
}

impl Default for KmpBuilder {
    fn default() -> Self {
        Self { overlapping: true }
    }
}

impl KmpBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether reported matches may share text tokens. Enabled by default.
    ///
    /// When disabled, the search resumes after the end of each match, so
    /// `"AA"` in `"AAAA"` is found at 0 and 2 only.
    pub fn overlapping(&mut self, yes: bool) -> &mut Self {
        self.overlapping = yes;
        self
    }

    /// Build a matcher for `pattern`. Any pattern is valid, including the
    /// empty one.
    pub fn build<T: PartialEq + Clone>(&self, pattern: &[T]) -> Kmp<T> {
        let table = FailureTable::new(pattern);
        log::debug!(
            "kmp matcher built: len={} period={} overlapping={}",
            pattern.len(),
            table.period(),
            self.overlapping,
        );
        Kmp { pattern: pattern.to_vec(), table, overlapping: self.overlapping }
    }
}

/// Single-pattern Knuth-Morris-Pratt matcher.
///
/// The pattern and its failure table are immutable once built, so one
/// matcher can serve any number of concurrent searches. Every search keeps
/// its own cursors.
#[derive(Clone, Debug)]
pub struct Kmp<T> {
    pattern: Vec<T>,
    table: FailureTable,
    overlapping: bool,
}

impl<T: PartialEq> Kmp<T> {
    /// Build an overlapping matcher for `pattern`.
    pub fn new(pattern: &[T]) -> Self
    where
        T: Clone,
    {
        KmpBuilder::new().build(pattern)
    }

    pub fn pattern(&self) -> &[T] {
        &self.pattern
    }

    pub fn failure_table(&self) -> &FailureTable {
        &self.table
    }

    pub fn len(&self) -> usize {
        self.pattern.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    /// Return the start of the first match in `text`.
    pub fn find<I>(&self, text: I) -> Option<usize>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        self.find_iter(text).next()
    }

    /// Return an iterator over the start of every match in `text`, in
    /// increasing order.
    ///
    /// Text is pulled lazily and each token is requested exactly once, so
    /// `text` may be an unbounded stream.
    pub fn find_iter<I>(&self, text: I) -> FindIter<T, &Self, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        FindIter::new(self, text.into_iter())
    }

    /// Like [`Kmp::find_iter`], but the iterator owns the matcher.
    pub fn into_find_iter<I>(self, text: I) -> FindIter<T, Self, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        FindIter::new(self, text.into_iter())
    }

    pub fn is_match<I>(&self, text: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        self.find(text).is_some()
    }

    pub fn count<I>(&self, text: I) -> usize
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        self.find_iter(text).count()
    }

    /// Cursor state before any text has been seen.
    pub fn start(&self) -> usize {
        0
    }

    /// Advance `state` by one text token and return the new state.
    ///
    /// A state is the number of pattern tokens matched by the text seen so
    /// far. This lets callers feed text that is produced piecewise, or that
    /// branches, by keeping one state per branch. With the empty pattern
    /// every state is a match state.
    pub fn next_state<U: Borrow<T>>(&self, state: usize, token: U) -> usize {
        let m = self.len();
        if m == 0 {
            return 0;
        }
        let token: &T = token.borrow();
        let mut state = if state >= m { self.restart() } else { state };
        loop {
            if self.pattern[state] == *token {
                return state + 1;
            }
            if state == 0 {
                return 0;
            }
            state = self.table.fallback(state);
        }
    }

    /// True when `state` has just completed a match.
    pub fn is_match_state(&self, state: usize) -> bool {
        state == self.len()
    }

    /// State to resume from right after a full match.
    fn restart(&self) -> usize {
        if self.overlapping { self.table.fallback(self.len()) } else { 0 }
    }
}

/// Iterator over match starts produced by [`Kmp::find_iter`].
///
/// `K` is either a borrowed or an owned matcher.
pub struct FindIter<T, K, I: Iterator> {
    kmp: K,
    text: Fuse<I>,
    /// Token at `x` held back while the pattern cursor retreats.
    pending: Option<I::Item>,
    /// Number of text tokens consumed.
    x: usize,
    /// Number of pattern tokens matched.
    y: usize,
    done: bool,
    _token: PhantomData<fn() -> T>,
}

impl<T, K, I> FindIter<T, K, I>
where
    T: PartialEq,
    K: Borrow<Kmp<T>>,
    I: Iterator,
    I::Item: Borrow<T>,
{
    fn new(kmp: K, text: I) -> Self {
        let m = Borrow::<Kmp<T>>::borrow(&kmp).len();
        // The pattern cannot fit, so there is no reason to read anything.
        let done = m > 0 && text.size_hint().1.is_some_and(|n| n < m);
        Self {
            kmp,
            text: text.fuse(),
            pending: None,
            x: 0,
            y: 0,
            done,
            _token: PhantomData,
        }
    }

    /// Number of text tokens consumed so far. Never decreases.
    pub fn position(&self) -> usize {
        self.x
    }
}

impl<T, K, I> Iterator for FindIter<T, K, I>
where
    T: PartialEq,
    K: Borrow<Kmp<T>>,
    I: Iterator,
    I::Item: Borrow<T>,
{
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.done {
            return None;
        }
        let kmp: &Kmp<T> = self.kmp.borrow();
        let m = kmp.len();
        if m == 0 {
            // The empty pattern matches once, at the start of any text.
            self.done = true;
            return Some(0);
        }
        loop {
            let token = match self.pending.take() {
                Some(token) => token,
                None => match self.text.next() {
                    Some(token) => token,
                    None => {
                        self.done = true;
                        return None;
                    }
                },
            };
            let current: &T = token.borrow();
            if kmp.pattern[self.y] == *current {
                self.x += 1;
                self.y += 1;
                if self.y == m {
                    self.y = kmp.restart();
                    return Some(self.x - m);
                }
            } else if self.y == 0 {
                self.x += 1;
            } else {
                self.y = kmp.table.fallback(self.y);
                self.pending = Some(token);
            }
        }
    }
}
