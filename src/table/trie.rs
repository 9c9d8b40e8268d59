/*
 * SPDX-FileCopyrightText: 2024 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The binary trie underlying a [`PrefixTable`](super::PrefixTable).
//!
//! Nodes are owned by their parent (the root by the trie) and are only ever
//! traversed downwards. Since a codeword may be thousands of bits long, no
//! operation on the trie recurses: walks are loops, and deallocation uses an
//! explicit stack.

use crate::codes::CodeWord;
use crate::error::TableError;

type Child<T> = Option<Box<Node<T>>>;

/// A node of the trie.
///
/// Whether a node is a leaf is structural: a leaf holds an element and has
/// no children, an internal node has children (indexed by bit) and no
/// element.
pub(crate) enum Node<T> {
    Leaf(T),
    Internal([Child<T>; 2]),
}

impl<T> Node<T> {
    #[inline(always)]
    fn internal() -> Self {
        Node::Internal([None, None])
    }

    /// Return the child reached by `bit`; leaves have no children.
    #[inline(always)]
    pub(crate) fn child(&self, bit: bool) -> Option<&Node<T>> {
        match self {
            Node::Internal(children) => children[bit as usize].as_deref(),
            Node::Leaf(_) => None,
        }
    }
}

pub(crate) struct Trie<T> {
    root: Child<T>,
}

impl<T> Trie<T> {
    pub(crate) const fn new() -> Self {
        Self { root: None }
    }

    #[inline(always)]
    pub(crate) fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    /// Check that a leaf can be attached at the end of `codeword`.
    ///
    /// The path must either leave the existing trie at some point, or the
    /// trie must be empty. Reaching a leaf along the path means that an
    /// existing codeword is a prefix of `codeword`; ending on an existing
    /// node means that `codeword` is a prefix of (or equal to) an existing
    /// codeword. Both are reported as
    /// [`PrefixConflict`](TableError::PrefixConflict).
    pub(crate) fn check_path(&self, codeword: &CodeWord) -> Result<(), TableError> {
        let Some(mut node) = self.root() else {
            return Ok(());
        };
        for (depth, bit) in codeword.iter().enumerate() {
            match node {
                Node::Leaf(_) => return Err(TableError::PrefixConflict { depth }),
                Node::Internal(children) => match children[bit as usize].as_deref() {
                    Some(child) => node = child,
                    None => return Ok(()),
                },
            }
        }
        Err(TableError::PrefixConflict {
            depth: codeword.len(),
        })
    }

    /// Attach a leaf for `element` at the end of `codeword`, allocating the
    /// missing internal nodes.
    ///
    /// [`check_path`](Trie::check_path) must have succeeded on `codeword`.
    pub(crate) fn attach(&mut self, codeword: &CodeWord, element: T) {
        let mut slot = &mut self.root;
        for bit in codeword {
            let node = slot.get_or_insert_with(|| Box::new(Node::internal()));
            let Node::Internal(children) = &mut **node else {
                unreachable!("attaching below a leaf on a validated path");
            };
            slot = &mut children[bit as usize];
        }
        debug_assert!(slot.is_none());
        *slot = Some(Box::new(Node::Leaf(element)));
    }

    /// Return the element at the end of `codeword`, if it is a leaf.
    pub(crate) fn leaf(&self, codeword: &CodeWord) -> Option<&T> {
        let mut node = self.root()?;
        for bit in codeword {
            node = node.child(bit)?;
        }
        match node {
            Node::Leaf(element) => Some(element),
            Node::Internal(_) => None,
        }
    }

    /// Return the number of leaves, and whether every internal node has
    /// two children.
    pub(crate) fn shape(&self) -> (usize, bool) {
        let mut leaves = 0;
        let mut complete = true;
        let mut stack: Vec<&Node<T>> = self.root().into_iter().collect();
        while let Some(node) = stack.pop() {
            match node {
                Node::Leaf(_) => leaves += 1,
                Node::Internal(children) => {
                    complete &= children.iter().all(Option::is_some);
                    stack.extend(children.iter().filter_map(|child| child.as_deref()));
                }
            }
        }
        (leaves, complete)
    }

    /// Release all nodes, leaving the trie empty.
    ///
    /// Children are moved to a worklist before their parent is dropped, so
    /// each node is freed with no children attached.
    pub(crate) fn release(&mut self) {
        let mut stack: Vec<Box<Node<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            if let Node::Internal(children) = &mut *node {
                stack.extend(children.iter_mut().filter_map(Option::take));
            }
        }
    }
}

impl<T> Drop for Trie<T> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Depth-first iterator on the leaves of a trie, `0` branch first (that is,
/// in lexicographic order of codewords).
pub(crate) struct Leaves<'a, T> {
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Leaves<'a, T> {
    pub(crate) fn new(trie: &'a Trie<T>) -> Self {
        Self {
            stack: trie.root().into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for Leaves<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        while let Some(node) = self.stack.pop() {
            match node {
                Node::Leaf(element) => return Some(element),
                Node::Internal([zero, one]) => {
                    self.stack.extend(one.as_deref());
                    self.stack.extend(zero.as_deref());
                }
            }
        }
        None
    }
}
