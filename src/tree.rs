//! Matching over binary trees.
//!
//! A tree becomes text in two ways: its pre-order serialization with explicit
//! markers for missing children, which turns "is this a subtree" into plain
//! substring search, and its downward paths, which the stepwise
//! [`Kmp::next_state`] follows one branch at a time.

use crate::kmp::Kmp;

pub type Tree<T> = Option<Box<Node<T>>>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node<T> {
    pub value: T,
    pub left: Tree<T>,
    pub right: Tree<T>,
}

impl<T> Node<T> {
    pub fn new(value: T, left: Tree<T>, right: Tree<T>) -> Box<Self> {
        Box::new(Self { value, left, right })
    }

    pub fn leaf(value: T) -> Box<Self> {
        Self::new(value, None, None)
    }
}

/// Serialization token: a node's value, or the marker for a missing child.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Token<T> {
    Value(T),
    Absent,
}

/// Lazy pre-order serialization of a tree.
pub struct Preorder<'a, T> {
    stack: Vec<Option<&'a Node<T>>>,
}

impl<'a, T> Iterator for Preorder<'a, T> {
    type Item = Token<&'a T>;

    fn next(&mut self) -> Option<Token<&'a T>> {
        match self.stack.pop()? {
            Some(node) => {
                self.stack.push(node.right.as_deref());
                self.stack.push(node.left.as_deref());
                Some(Token::Value(&node.value))
            }
            None => Some(Token::Absent),
        }
    }
}

/// Walk `tree` in pre-order, emitting [`Token::Absent`] for every missing
/// child. The empty tree serializes to a single `Absent`.
pub fn preorder<T>(tree: &Tree<T>) -> Preorder<'_, T> {
    Preorder { stack: vec![tree.as_deref()] }
}

pub fn serialize<T>(tree: &Tree<T>) -> Vec<Token<&T>> {
    preorder(tree).collect()
}

/// True when `needle` appears in `haystack` as a complete subtree: some node
/// of `haystack` has exactly the same shape and values below it. The empty
/// tree is a subtree of every tree.
///
/// The haystack is serialized lazily while it is searched.
pub fn is_subtree<T: PartialEq>(haystack: &Tree<T>, needle: &Tree<T>) -> bool {
    let pattern = serialize(needle);
    Kmp::new(&pattern).is_match(preorder(haystack))
}

/// True when `path` occurs as consecutive values along a downward path of
/// `tree`, starting at any node. The empty path always occurs.
pub fn contains_downward_path<T: PartialEq>(tree: &Tree<T>, path: &[T]) -> bool {
    let path: Vec<&T> = path.iter().collect();
    let kmp = Kmp::new(&path);
    if kmp.is_empty() {
        return true;
    }
    // Each branch carries the matcher state reached at its parent.
    let mut stack: Vec<(&Node<T>, usize)> = Vec::new();
    if let Some(root) = tree.as_deref() {
        stack.push((root, kmp.start()));
    }
    while let Some((node, state)) = stack.pop() {
        let state = kmp.next_state(state, &node.value);
        if kmp.is_match_state(state) {
            return true;
        }
        for child in [node.left.as_deref(), node.right.as_deref()].into_iter().flatten() {
            stack.push((child, state));
        }
    }
    false
}
