use std::borrow::Borrow;
use std::collections::{
    HashSet,
    VecDeque,
};
use std::iter::Fuse;

use crate::{
    error::BuildError,
    Match,
    Location,
    Pattern,
};

const ROOT: usize = 0;

/// Automaton node.
#[derive(Clone, Debug)]
struct Node<T> {
    /// Patterns ending at this node, in insertion order.
    matches: Vec<Match>,
    /// Transitions to child nodes.
    transitions: Vec<(T, usize)>,
    /// Fail transition id.
    fail: usize,
    /// Closest node on the fail chain that has matches, if any.
    output: Option<usize>,
    /// Distance from ROOT.
    depth: usize,
}

impl<T: PartialEq> Node<T> {
    fn new(depth: usize) -> Self {
        return Self { matches: Vec::new(), transitions: Vec::new(), fail: ROOT, output: None, depth }
    }

    /// Return the child reached by `token`, if any.
    fn next(&self, token: &T) -> Option<usize> {
        self.transitions.iter().find(|(t, _)| t == token).map(|&(_, id)| id)
    }
}

/// Configuration for an [`Automaton`].
#[derive(Clone, Debug)]
pub struct AutomatonBuilder {
    overlapping: bool,
    state_limit: Option<usize>,
}

impl Default for AutomatonBuilder {
    fn default() -> Self {
        Self { overlapping: true, state_limit: None }
    }
}

impl AutomatonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether to report every match (the default), or only matches that
    /// don't share text with an earlier reported one.
    ///
    /// Without overlapping, the scan reports the first match it finds,
    /// skips anything else ending at the same position and starts over from
    /// the next token.
    pub fn overlapping(&mut self, yes: bool) -> &mut Self {
        self.overlapping = yes;
        self
    }

    /// Upper bound on the number of trie nodes, root included. Unlimited by
    /// default.
    pub fn state_limit(&mut self, limit: Option<usize>) -> &mut Self {
        self.state_limit = limit;
        self
    }

    /// Build an automaton from patterns with caller-chosen ids.
    ///
    /// Ids must be unique. An empty set is fine and gives an automaton that
    /// never matches.
    pub fn build<T: PartialEq + Clone>(&self, patterns: &[Pattern<'_, T>]) -> Result<Automaton<T>, BuildError> {
        let mut automaton = Automaton {
            nodes: Vec::new(),
            overlapping: self.overlapping,
            patterns_len: patterns.len(),
            max_pattern_len: patterns.iter().map(|p| p.value.len()).max().unwrap_or(0),
        };
        automaton.build_trie(patterns, self.state_limit)?;
        automaton.encode_trie_failure();
        log::debug!(
            "automaton built: patterns={} states={} max_pattern_len={} overlapping={}",
            automaton.patterns_len,
            automaton.nodes.len(),
            automaton.max_pattern_len,
            automaton.overlapping,
        );
        Ok(automaton)
    }
}

/// Aho-Corasick automaton reporting every occurrence of every pattern.
///
/// Immutable once built. Any number of scans may run over one automaton at
/// the same time.
#[derive(Clone, Debug)]
pub struct Automaton<T> {
    nodes: Vec<Node<T>>,
    overlapping: bool,
    patterns_len: usize,
    max_pattern_len: usize,
}

impl<T: PartialEq> Automaton<T> {
    /// Build an automaton where each pattern's id is its position in
    /// `patterns`.
    pub fn new<I, P>(patterns: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[T]>,
        T: Clone,
    {
        let values: Vec<P> = patterns.into_iter().collect();
        let patterns: Vec<Pattern<'_, T>> = values
            .iter()
            .enumerate()
            .map(|(id, value)| Pattern { id, value: value.as_ref() })
            .collect();
        AutomatonBuilder::new().build(&patterns)
    }

    /// Return an iterator over every [`Location`] in `text`.
    ///
    /// Locations come out in order of their end. Several locations sharing
    /// an end are ordered longest pattern first, and patterns with identical
    /// values in insertion order. Empty patterns are reported once, with
    /// `end == 0`, before any text is read.
    pub fn scan<I>(&self, text: I) -> Scan<'_, T, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        Scan {
            automaton: self,
            text: text.into_iter().fuse(),
            current_node_id: ROOT,
            pending: (!self.nodes[ROOT].matches.is_empty()).then_some((ROOT, 0)),
            position: 0,
        }
    }

    /// Return the [`Location`] with the smallest end in `text`. When several
    /// share it, the longest pattern wins.
    pub fn find<I>(&self, text: I) -> Option<Location>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        self.scan(text).next()
    }

    pub fn is_match<I>(&self, text: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        self.find(text).is_some()
    }

    /// Number of patterns the automaton was built from.
    pub fn patterns_len(&self) -> usize {
        self.patterns_len
    }

    /// Number of trie nodes, root included.
    pub fn states_len(&self) -> usize {
        self.nodes.len()
    }

    pub fn max_pattern_len(&self) -> usize {
        self.max_pattern_len
    }

    /// Return the id of the node reached from `id` on `token`.
    fn next_node_id(&self, mut id: usize, token: &T) -> usize {
        loop {
            if let Some(next) = self.nodes[id].next(token) {
                return next
            }
            if id == ROOT {
                return ROOT
            }
            id = self.nodes[id].fail;
        }
    }

    /// Return the first node whose matches end at `id`, following output links.
    /// ROOT only holds empty patterns, which are never reported here.
    fn first_output(&self, id: usize) -> Option<usize> {
        let node = &self.nodes[id];
        if id != ROOT && !node.matches.is_empty() {
            Some(id)
        } else {
            node.output
        }
    }

    //>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>>
    // Trie
    //<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<

    /// Build a trie with a node for each token in patterns.
    fn build_trie(&mut self, patterns: &[Pattern<'_, T>], limit: Option<usize>) -> Result<(), BuildError>
    where
        T: Clone,
    {
        let mut ids = HashSet::with_capacity(patterns.len());
        self.add_node(0, limit)?;
        // For each pattern, create a chain of nodes ending with a node containing a match.
        for pattern in patterns.iter() {
            if !ids.insert(pattern.id) {
                return Err(BuildError::duplicate_pattern_id(pattern.id));
            }
            let mut current_node_id = ROOT;
            for (depth, token) in pattern.value.iter().enumerate() {
                current_node_id = match self.nodes[current_node_id].next(token) {
                    // Transition already exists, so just move to it.
                    Some(next_id) => next_id,
                    None => {
                        let new_node_id = self.add_node(depth + 1, limit)?;
                        self.nodes[current_node_id].transitions.push((token.clone(), new_node_id));
                        new_node_id
                    }
                };
            }
            let m = Match { pattern_id: pattern.id, pattern_len: pattern.value.len() };
            self.nodes[current_node_id].matches.push(m);
        }
        Ok(())
    }

    /// Encode a fail transition and an output link for each node, in
    /// breadth-first order so that every node's fail target is finished
    /// before the node itself.
    fn encode_trie_failure(&mut self) {
        let mut queue: VecDeque<usize> = VecDeque::new();

        // Depth-1 nodes always fail to ROOT, which is already their default.
        for &(_, id) in self.nodes[ROOT].transitions.iter() {
            queue.push_back(id);
        }

        while let Some(id) = queue.pop_front() {
            for index in 0..self.nodes[id].transitions.len() {
                let next_id = self.nodes[id].transitions[index].1;
                queue.push_back(next_id);

                // Figure out what this falls back to.
                let fail_id = {
                    let token = &self.nodes[id].transitions[index].0;
                    let mut fail_id = self.nodes[id].fail;
                    loop {
                        if let Some(target) = self.nodes[fail_id].next(token) {
                            break target;
                        }
                        if fail_id == ROOT {
                            break ROOT;
                        }
                        fail_id = self.nodes[fail_id].fail;
                    }
                };
                debug_assert!(fail_id != next_id);
                debug_assert!(self.nodes[fail_id].depth < self.nodes[next_id].depth);

                let output = self.first_output(fail_id);
                let next = &mut self.nodes[next_id];
                next.fail = fail_id;
                next.output = output;
                log::trace!("node {} (depth {}): fail={} output={:?}", next_id, next.depth, fail_id, output);
            }
        }
    }

    /// Add a Node and return its id.
    fn add_node(&mut self, depth: usize, limit: Option<usize>) -> Result<usize, BuildError> {
        if let Some(limit) = limit.filter(|&limit| self.nodes.len() >= limit) {
            return Err(BuildError::state_limit_exceeded(limit));
        }
        let id = self.nodes.len();
        self.nodes.push(Node::new(depth));
        Ok(id)
    }
} // impl Automaton

/// Iterator over the locations found by [`Automaton::scan`].
pub struct Scan<'a, T, I: Iterator> {
    automaton: &'a Automaton<T>,
    text: Fuse<I>,
    current_node_id: usize,
    /// Node whose matches are being reported and the index of the next one.
    pending: Option<(usize, usize)>,
    /// Number of text tokens consumed.
    position: usize,
}

impl<T, I: Iterator> Scan<'_, T, I> {
    /// Number of text tokens consumed so far. Never decreases.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl<T, I> Iterator for Scan<'_, T, I>
where
    T: PartialEq,
    I: Iterator,
    I::Item: Borrow<T>,
{
    type Item = Location;

    fn next(&mut self) -> Option<Location> {
        let automaton = self.automaton;
        loop {
            if let Some((id, index)) = self.pending {
                let node = &automaton.nodes[id];
                if let Some(&m) = node.matches.get(index) {
                    if automaton.overlapping {
                        self.pending = Some((id, index + 1));
                    } else {
                        self.pending = None;
                        self.current_node_id = ROOT;
                    }
                    return Some(Location { r#match: m, end: self.position });
                }
                self.pending = node.output.map(|output| (output, 0));
                continue;
            }
            let token = self.text.next()?;
            let token: &T = token.borrow();
            self.current_node_id = automaton.next_node_id(self.current_node_id, token);
            self.position += 1;
            self.pending = automaton.first_output(self.current_node_id).map(|id| (id, 0));
        }
    }
}
