/// Errors that can occur while building an automaton.
///
/// Searching never fails. Only construction can.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("pattern id {id} is used by more than one pattern")]
    DuplicatePatternId { id: usize },
    #[error("automaton would need more than {limit} states")]
    StateLimitExceeded { limit: usize },
}

impl BuildError {
    pub(crate) fn duplicate_pattern_id(id: usize) -> Self {
        Self::DuplicatePatternId { id }
    }

    pub(crate) fn state_limit_exceeded(limit: usize) -> Self {
        Self::StateLimitExceeded { limit }
    }
}
