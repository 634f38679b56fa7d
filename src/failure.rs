/// Partial-match table for a single pattern.
///
/// Entry `i` holds the length of the longest proper border of the pattern's
/// length-`i` prefix, i.e. the longest `k < i` such that `pattern[..k]` equals
/// `pattern[i - k..i]`. There are `len() + 1` entries. Entry `0` has no border
/// at all, which [`FailureTable::border`] reports as `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailureTable {
    /// Slot 0 is a placeholder and is never read as a length.
    borders: Box<[usize]>,
}

impl FailureTable {
    /// Build the table for `pattern` in `O(pattern.len())`.
    pub fn new<T: PartialEq>(pattern: &[T]) -> Self {
        let m = pattern.len();
        let mut borders = vec![0; m + 1];
        // `i` is the prefix length being solved, `cn` the current border candidate.
        let mut i = 2;
        let mut cn = 0;
        while i <= m {
            if pattern[i - 1] == pattern[cn] {
                cn += 1;
                borders[i] = cn;
                i += 1;
            } else if cn > 0 {
                // Fall back to the border of the border.
                cn = borders[cn];
            } else {
                borders[i] = 0;
                i += 1;
            }
        }
        let table = Self { borders: borders.into_boxed_slice() };
        log::trace!("failure table built: len={} period={}", m, table.period());
        table
    }

    /// Length of the pattern this table was built from.
    pub fn len(&self) -> usize {
        self.borders.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the longest proper border of the length-`len` prefix.
    ///
    /// Returns `None` for `len == 0`, where no retreat is possible and a
    /// matcher has to advance through the text instead. Also returns `None`
    /// when `len` exceeds the pattern length.
    pub fn border(&self, len: usize) -> Option<usize> {
        match len {
            0 => None,
            _ => self.borders.get(len).copied(),
        }
    }

    /// Iterate over every entry, starting with the empty prefix.
    pub fn borders(&self) -> impl Iterator<Item = Option<usize>> + '_ {
        (0..self.borders.len()).map(|len| self.border(len))
    }

    /// Where the pattern cursor retreats to after failing at `len`.
    /// `len` must be in `1..=self.len()`.
    pub(crate) fn fallback(&self, len: usize) -> usize {
        debug_assert!(len > 0 && len <= self.len());
        self.borders[len]
    }

    /// Length of the shortest period of the whole pattern.
    ///
    /// The pattern is a (possibly truncated) repetition of its first
    /// `period()` tokens. The empty pattern has period 0.
    pub fn period(&self) -> usize {
        let m = self.len();
        m - self.borders[m]
    }

    /// Number of times the period repeats, if the pattern is an exact
    /// repetition of its period. A pattern with no shorter period is one
    /// repetition of itself.
    pub fn repetitions(&self) -> Option<usize> {
        let p = self.period();
        if p == 0 || self.len() % p != 0 {
            return None;
        }
        Some(self.len() / p)
    }

    /// True when the pattern is made of at least two full copies of a
    /// shorter sequence.
    pub fn is_periodic(&self) -> bool {
        self.repetitions().is_some_and(|r| r >= 2)
    }
}

/// Shortest period of `seq`. See [`FailureTable::period`].
pub fn period<T: PartialEq>(seq: &[T]) -> usize {
    FailureTable::new(seq).period()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[track_caller]
    fn t(pattern: &str, expected: &[usize]) {
        let table = FailureTable::new(pattern.as_bytes());
        let got: Vec<usize> = table.borders().skip(1).map(|b| b.unwrap()).collect();
        assert_eq!(expected, got.as_slice(), "pattern {pattern:?}");
    }

    /// Longest proper border of every prefix by exhaustive comparison.
    fn brute_force(pattern: &[u8]) -> Vec<usize> {
        (1..=pattern.len())
            .map(|i| {
                (0..i)
                    .rev()
                    .find(|&k| pattern[..k] == pattern[i - k..i])
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn failure_table_basics() {
        t("ABABCABAB", &[0, 0, 1, 2, 0, 1, 2, 3, 4]);
        t("AAAA", &[0, 1, 2, 3]);
        t("abcd", &[0, 0, 0, 0]);
        t("aabaaab", &[0, 1, 0, 1, 2, 2, 3]);
    }

    #[test]
    fn failure_table_degenerate() {
        let empty = FailureTable::new::<u8>(&[]);
        assert_eq!(0, empty.len());
        assert!(empty.is_empty());
        assert_eq!(None, empty.border(0));
        assert_eq!(None, empty.border(1));
        assert_eq!(0, empty.period());
        assert_eq!(None, empty.repetitions());

        let single = FailureTable::new(b"x");
        assert_eq!(None, single.border(0));
        assert_eq!(Some(0), single.border(1));
        assert_eq!(1, single.period());
        assert_eq!(Some(1), single.repetitions());
        assert!(!single.is_periodic());
    }

    #[test]
    fn failure_table_non_byte_tokens() {
        let table = FailureTable::new(&[7, 7, 3, 7, 7, 3, 7]);
        assert_eq!(
            vec![None, Some(0), Some(1), Some(0), Some(1), Some(2), Some(3), Some(4)],
            table.borders().collect::<Vec<_>>(),
        );
        assert_eq!(3, table.period());
        assert_eq!(None, table.repetitions());
    }

    #[test]
    fn periodicity() {
        assert_eq!(3, period(b"abcabcabc"));
        assert_eq!(Some(3), FailureTable::new(b"abcabcabc").repetitions());
        assert!(FailureTable::new(b"abcabcabc").is_periodic());

        assert_eq!(3, period(b"abcab"));
        assert_eq!(None, FailureTable::new(b"abcab").repetitions());

        assert_eq!(1, period(b"aaaa"));
        assert_eq!(Some(4), FailureTable::new(b"aaaa").repetitions());

        assert_eq!(4, period(b"abcd"));
        assert_eq!(Some(1), FailureTable::new(b"abcd").repetitions());
        assert!(!FailureTable::new(b"abcd").is_periodic());
    }

    proptest! {
        #[test]
        fn borders_match_brute_force(pattern in prop::collection::vec(0u8..3, 0..=20)) {
            let table = FailureTable::new(&pattern);
            prop_assert_eq!(None, table.border(0));
            for (i, expected) in brute_force(&pattern).into_iter().enumerate() {
                prop_assert_eq!(Some(expected), table.border(i + 1));
            }
        }

        #[test]
        fn construction_is_idempotent(pattern in prop::collection::vec(0u8..4, 0..=20)) {
            prop_assert_eq!(FailureTable::new(&pattern), FailureTable::new(&pattern));
        }

        #[test]
        fn periodic_sequences_reconstruct(seq in prop::collection::vec(0u8..2, 1..=20)) {
            let table = FailureTable::new(&seq);
            let p = table.period();
            // Every token repeats `p` positions later.
            for i in p..seq.len() {
                prop_assert_eq!(seq[i], seq[i - p]);
            }
            if let Some(r) = table.repetitions() {
                prop_assert_eq!(seq.len() % p, 0);
                prop_assert_eq!(seq[..p].repeat(r), seq.clone());
            }
        }

        #[test]
        fn built_periods_are_found(unit in prop::collection::vec(0u8..3, 1..=5), copies in 2usize..=4) {
            let seq = unit.repeat(copies);
            let table = FailureTable::new(&seq);
            // The shortest period divides any exact period.
            prop_assert_eq!(unit.len() % table.period(), 0);
            prop_assert!(table.repetitions().unwrap() >= copies);
        }
    }
}
