/*
 * SPDX-FileCopyrightText: 2024 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Prefix-code tables.

A [`PrefixTable`] associates elements with [codewords](crate::codes::CodeWord)
forming a prefix code, that is, such that no codeword is a prefix of
another. The codewords are stored in a binary trie whose leaves hold the
elements, which makes greedy decoding of a bit sequence unambiguous, and in
a map from elements to codewords, which is used for encoding.

Tables are built by successive [insertions](PrefixTable::insert); a
codeword that would break the prefix property is rejected with a
[`PrefixConflict`](crate::error::TableError::PrefixConflict), and the table
is left unchanged. Once built, a table can
[decode](PrefixTable::decode) and [encode](PrefixTable::encode) any number
of times.

Tables have no internal synchronization: decoding and encoding take a
shared reference, insertion an exclusive one, so sharing a table between
threads requires the usual external locking (e.g., a
[`RwLock`](std::sync::RwLock)).

*/

mod trie;

use core::fmt::{Debug, Formatter};
use core::hash::Hash;
use std::collections::HashMap;

use crate::codes::CodeWord;
use crate::error::{Partial, TableError};
use trie::{Leaves, Node, Trie};

/// A table of prefix codes.
///
/// The type `T` of elements must be usable as a key of a [`HashMap`], and
/// must be [`Clone`], as each element is stored both in the trie and in the
/// encoding map.
pub struct PrefixTable<T> {
    trie: Trie<T>,
    codewords: HashMap<T, CodeWord>,
}

impl<T> PrefixTable<T> {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            trie: Trie::new(),
            codewords: HashMap::new(),
        }
    }

    /// Return the number of elements in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.codewords.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.codewords.is_empty()
    }

    /// Discard all elements and codewords, returning to the empty state.
    ///
    /// This is always possible, and it is the recovery action after any
    /// failure.
    pub fn clear(&mut self) {
        self.trie.release();
        self.codewords.clear();
    }

    /// Return the length of the longest codeword, or zero if the table is
    /// empty.
    pub fn max_codeword_len(&self) -> usize {
        self.codewords
            .values()
            .map(CodeWord::len)
            .max()
            .unwrap_or(0)
    }

    /// Return whether the code is complete, that is, whether every internal
    /// node of the trie has two children.
    ///
    /// When decoding with a complete code, the only possible failure is a
    /// truncated final codeword. An empty table is not complete.
    pub fn is_complete(&self) -> bool {
        !self.is_empty() && self.trie.shape().1
    }
}

impl<T: Eq + Hash + Clone> PrefixTable<T> {
    /// Build a table inserting the given pairs in order.
    ///
    /// Return the error of the first failed insertion.
    pub fn from_pairs<I: IntoIterator<Item = (T, CodeWord)>>(pairs: I) -> Result<Self, TableError> {
        let mut table = Self::new();
        for (element, codeword) in pairs {
            table.insert(element, &codeword)?;
        }
        Ok(table)
    }

    /// Add `element` to the table with the given codeword.
    ///
    /// # Errors
    ///
    /// - [`DuplicateElement`](TableError::DuplicateElement) if `element` is
    ///   already in the table;
    /// - [`PrefixConflict`](TableError::PrefixConflict) if `codeword` is a
    ///   prefix of, an extension of, or equal to a codeword in the table;
    /// - [`AllocationFailure`](TableError::AllocationFailure) if the
    ///   encoding map cannot grow.
    ///
    /// The whole path is validated before the table is modified, so on
    /// failure the table is unchanged.
    pub fn insert(&mut self, element: T, codeword: &CodeWord) -> Result<(), TableError> {
        if self.codewords.contains_key(&element) {
            return Err(TableError::DuplicateElement);
        }
        self.trie.check_path(codeword)?;
        self.codewords
            .try_reserve(1)
            .map_err(|_| TableError::AllocationFailure)?;

        self.trie.attach(codeword, element.clone());
        self.codewords.insert(element, codeword.clone());

        #[cfg(feature = "checks")]
        assert!(self.is_consistent(), "Inconsistent table after insertion");

        Ok(())
    }

    /// Return whether `element` is in the table.
    #[inline]
    pub fn contains(&self, element: &T) -> bool {
        self.codewords.contains_key(element)
    }

    /// Return the codeword of `element`, if any.
    #[inline]
    pub fn codeword(&self, element: &T) -> Option<&CodeWord> {
        self.codewords.get(element)
    }

    /// Decode a sequence of bits.
    ///
    /// Decoding is greedy: starting from the root of the trie, one bit is
    /// consumed per step, and each time a leaf is reached its element is
    /// output and decoding restarts from the root.
    ///
    /// # Errors
    ///
    /// - [`UninitializedTable`](TableError::UninitializedTable) if the
    ///   table is empty (the output is empty);
    /// - [`TruncatedCode`](TableError::TruncatedCode) if the bits end in the
    ///   middle of a codeword, or follow a path that is not in the trie (the
    ///   output contains the elements decoded before).
    pub fn decode(&self, bits: &CodeWord) -> Result<Vec<T>, Partial<Vec<T>>> {
        let Some(root) = self.trie.root() else {
            return Err(Partial::new(Vec::new(), TableError::UninitializedTable));
        };

        let mut output = Vec::new();
        let mut node = root;
        // Start of the current codeword
        let mut start = 0;
        for (pos, bit) in bits.iter().enumerate() {
            match node.child(bit) {
                Some(Node::Leaf(element)) => {
                    output.push(element.clone());
                    node = root;
                    start = pos + 1;
                }
                Some(child) => node = child,
                None => {
                    return Err(Partial::new(
                        output,
                        TableError::TruncatedCode { bit_pos: start },
                    ));
                }
            }
        }

        if start == bits.len() {
            Ok(output)
        } else {
            Err(Partial::new(
                output,
                TableError::TruncatedCode { bit_pos: start },
            ))
        }
    }

    /// Encode a sequence of elements, concatenating their codewords.
    ///
    /// # Errors
    ///
    /// [`UnknownElement`](TableError::UnknownElement) if some element is not
    /// in the table; the output contains the codewords of the elements
    /// preceding it.
    pub fn encode(&self, elements: &[T]) -> Result<CodeWord, Partial<CodeWord>> {
        let mut output = CodeWord::new();
        for (index, element) in elements.iter().enumerate() {
            match self.codewords.get(element) {
                Some(codeword) => output += codeword,
                None => {
                    return Err(Partial::new(
                        output,
                        TableError::UnknownElement { index },
                    ));
                }
            }
        }
        Ok(output)
    }

    /// Return an iterator on the pairs of the table, in lexicographic order
    /// of codewords.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            leaves: Leaves::new(&self.trie),
            codewords: &self.codewords,
        }
    }

    /// Check that the keys of the encoding map are exactly the elements
    /// stored in the leaves of the trie, and that the codeword of each key
    /// leads to the leaf holding it.
    pub fn is_consistent(&self) -> bool {
        let (leaves, _) = self.trie.shape();
        leaves == self.codewords.len()
            && self
                .codewords
                .iter()
                .all(|(element, codeword)| self.trie.leaf(codeword) == Some(element))
    }
}

impl<T> Default for PrefixTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Debug + Eq + Hash + Clone> Debug for PrefixTable<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// An iterator on the `(element, codeword)` pairs of a [`PrefixTable`].
///
/// See [`PrefixTable::iter`].
pub struct Iter<'a, T> {
    leaves: Leaves<'a, T>,
    codewords: &'a HashMap<T, CodeWord>,
}

impl<'a, T: Eq + Hash> Iterator for Iter<'a, T> {
    type Item = (&'a T, &'a CodeWord);

    fn next(&mut self) -> Option<Self::Item> {
        for element in self.leaves.by_ref() {
            if let Some(codeword) = self.codewords.get(element) {
                return Some((element, codeword));
            }
        }
        None
    }
}

impl<'a, T: Eq + Hash + Clone> IntoIterator for &'a PrefixTable<T> {
    type Item = (&'a T, &'a CodeWord);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize + Eq + Hash + Clone> serde::Serialize for PrefixTable<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de> + Eq + Hash + Clone> serde::Deserialize<'de>
    for PrefixTable<T>
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pairs = <Vec<(T, CodeWord)>>::deserialize(deserializer)?;
        Self::from_pairs(pairs).map_err(<D::Error as serde::de::Error>::custom)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn code(s: &str) -> CodeWord {
        s.parse().unwrap()
    }

    fn small() -> PrefixTable<u32> {
        PrefixTable::from_pairs([(2, code("0")), (3, code("10")), (4, code("11"))]).unwrap()
    }

    #[test]
    fn test_decode() {
        let table = small();
        assert_eq!(
            table.decode(&code("0010101100")),
            Ok(vec![2, 2, 3, 3, 4, 2, 2])
        );
        assert_eq!(table.decode(&CodeWord::new()), Ok(vec![]));
        let err = table.decode(&code("00101011001")).unwrap_err();
        assert_eq!(err.output, vec![2, 2, 3, 3, 4, 2, 2]);
        assert_eq!(err.error, TableError::TruncatedCode { bit_pos: 10 });
    }

    #[test]
    fn test_failed_insert_is_atomic() {
        let mut table = small();
        assert_eq!(
            table.insert(5, &code("101")),
            Err(TableError::PrefixConflict { depth: 2 })
        );
        assert_eq!(
            table.insert(5, &code("1")),
            Err(TableError::PrefixConflict { depth: 1 })
        );
        assert_eq!(table.insert(4, &code("0")), Err(TableError::DuplicateElement));
        assert!(!table.contains(&5));
        assert_eq!(table.len(), 3);
        assert!(table.is_consistent());
        assert_eq!(
            table.encode(&[2, 5]),
            Err(Partial::new(code("0"), TableError::UnknownElement { index: 1 }))
        );
    }

    #[test]
    fn test_iter_debug() {
        let table = small();
        let pairs: Vec<_> = table.iter().map(|(e, c)| (*e, c.to_string())).collect();
        let expected: Vec<(u32, String)> = vec![
            (2, "0".to_string()),
            (3, "10".to_string()),
            (4, "11".to_string()),
        ];
        assert_eq!(pairs, expected);
        assert_eq!(
            format!("{:?}", table),
            r#"{2: CodeWord("0"), 3: CodeWord("10"), 4: CodeWord("11")}"#
        );
        assert_eq!(table.max_codeword_len(), 2);
        assert!(table.is_complete());
    }
}
