/*
 * SPDX-FileCopyrightText: 2024 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Packed bit sequences.

use core::cmp::Ordering;
use core::fmt::{Debug, Display, Formatter};
use core::iter::FusedIterator;
use core::ops::{AddAssign, Index, Shl};
use core::str::FromStr;

#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

use crate::error::{Partial, TableError};

const WORD_BITS: usize = u64::BITS as usize;

/// A finite sequence of bits.
///
/// Bits are packed in `u64` words, bit `i` of the codeword being bit
/// `i % 64` of word `i / 64`. Bits of the last word beyond the length are
/// always zero, so that equality and hashing can work on words.
///
/// Codewords can be built bit by bit with [`push`](CodeWord::push) or
/// `<<`, collected from an iterator of `bool`, concatenated with
/// [`append`](CodeWord::append) or `+=`, and parsed from strings of `0`
/// and `1` characters:
///
/// ```
/// use prefix_table::codes::CodeWord;
///
/// let mut a = CodeWord::new() << true << false;
/// let b: CodeWord = "011".parse()?;
/// a += &b;
/// assert_eq!(a.to_string(), "10011");
/// assert_eq!(a.len(), 5);
/// assert!(a[0] && !a[1]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct CodeWord {
    words: Vec<u64>,
    len: usize,
}

impl CodeWord {
    /// Create an empty codeword.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            words: Vec::new(),
            len: 0,
        }
    }

    /// Create an empty codeword with space for at least `bits` bits.
    #[must_use]
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            words: Vec::with_capacity(bits.div_ceil(WORD_BITS)),
            len: 0,
        }
    }

    /// Return the number of bits.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Return the bit at position `index`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<bool> {
        (index < self.len).then(|| self.words[index / WORD_BITS] >> (index % WORD_BITS) & 1 != 0)
    }

    /// Append a bit.
    #[inline]
    pub fn push(&mut self, bit: bool) {
        self.push_bits(bit as u64, 1);
    }

    /// Append the lowest `n` bits of `value`, lowest bit first.
    fn push_bits(&mut self, value: u64, n: usize) {
        debug_assert!(n <= WORD_BITS);
        if n == 0 {
            return;
        }
        let value = if n < WORD_BITS {
            value & ((1 << n) - 1)
        } else {
            value
        };
        let offset = self.len % WORD_BITS;
        if offset == 0 {
            self.words.push(value);
        } else {
            if let Some(last) = self.words.last_mut() {
                *last |= value << offset;
            }
            if offset + n > WORD_BITS {
                self.words.push(value >> (WORD_BITS - offset));
            }
        }
        self.len += n;
    }

    /// Append all the bits of `other` (concatenation).
    pub fn append(&mut self, other: &CodeWord) {
        self.words.reserve(other.words.len());
        let mut left = other.len;
        for &word in &other.words {
            let n = left.min(WORD_BITS);
            self.push_bits(word, n);
            left -= n;
        }
    }

    /// Return an iterator over the bits, first bit first.
    #[inline]
    pub fn iter(&self) -> BitIter<'_> {
        BitIter {
            code: self,
            pos: 0,
        }
    }

    /// Return whether this codeword is a (not necessarily strict) prefix
    /// of `other`.
    pub fn is_prefix_of(&self, other: &CodeWord) -> bool {
        if self.len > other.len {
            return false;
        }
        let full = self.len / WORD_BITS;
        if self.words[..full] != other.words[..full] {
            return false;
        }
        let rem = self.len % WORD_BITS;
        rem == 0 || (self.words[full] ^ other.words[full]) & ((1 << rem) - 1) == 0
    }

    /// Parse a string of `0` and `1` characters.
    ///
    /// On failure, the returned [`Partial`] contains the bits preceding
    /// the first invalid character, and a
    /// [`MalformedCodeWord`](TableError::MalformedCodeWord) error.
    pub fn parse(s: &str) -> Result<Self, Partial<Self>> {
        let mut code = Self::with_capacity(s.len());
        for (pos, c) in s.chars().enumerate() {
            match c {
                '0' => code.push(false),
                '1' => code.push(true),
                found => {
                    return Err(Partial::new(
                        code,
                        TableError::MalformedCodeWord { pos, found },
                    ));
                }
            }
        }
        Ok(code)
    }
}

/// An iterator over the bits of a [`CodeWord`].
#[derive(Debug, Clone)]
pub struct BitIter<'a> {
    code: &'a CodeWord,
    pos: usize,
}

impl Iterator for BitIter<'_> {
    type Item = bool;

    #[inline]
    fn next(&mut self) -> Option<bool> {
        let bit = self.code.get(self.pos)?;
        self.pos += 1;
        Some(bit)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.code.len - self.pos;
        (left, Some(left))
    }
}

impl ExactSizeIterator for BitIter<'_> {}
impl FusedIterator for BitIter<'_> {}

impl<'a> IntoIterator for &'a CodeWord {
    type Item = bool;
    type IntoIter = BitIter<'a>;

    fn into_iter(self) -> BitIter<'a> {
        self.iter()
    }
}

impl Index<usize> for CodeWord {
    type Output = bool;

    fn index(&self, index: usize) -> &bool {
        match self.get(index) {
            Some(true) => &true,
            Some(false) => &false,
            None => panic!(
                "Index out of bounds: the length is {} but the index is {}",
                self.len, index
            ),
        }
    }
}

impl FromIterator<bool> for CodeWord {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut code = Self::new();
        code.extend(iter);
        code
    }
}

impl Extend<bool> for CodeWord {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        for bit in iter {
            self.push(bit);
        }
    }
}

impl From<&[bool]> for CodeWord {
    fn from(bits: &[bool]) -> Self {
        bits.iter().copied().collect()
    }
}

impl Shl<bool> for CodeWord {
    type Output = Self;

    /// Append a bit.
    #[inline]
    fn shl(mut self, bit: bool) -> Self {
        self.push(bit);
        self
    }
}

impl AddAssign<&CodeWord> for CodeWord {
    #[inline]
    fn add_assign(&mut self, other: &CodeWord) {
        self.append(other);
    }
}

impl PartialOrd for CodeWord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Lexicographic order on bits: a codeword precedes its extensions.
impl Ord for CodeWord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl Display for CodeWord {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        for bit in self {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl Debug for CodeWord {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "CodeWord(\"{}\")", self)
    }
}

impl FromStr for CodeWord {
    type Err = Partial<CodeWord>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CodeWord {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CodeWord {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CodeWordVisitor;

        impl serde::de::Visitor<'_> for CodeWordVisitor {
            type Value = CodeWord;

            fn expecting(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
                f.write_str("a string of '0' and '1' characters")
            }

            fn visit_str<E: serde::de::Error>(self, s: &str) -> Result<CodeWord, E> {
                CodeWord::parse(s).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(CodeWordVisitor)
    }
}
