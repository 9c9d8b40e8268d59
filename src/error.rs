/*
 * SPDX-FileCopyrightText: 2024 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Error types.
//!
//! All fallible operations of this crate report a [`TableError`]. Operations
//! that produce output incrementally (decoding, encoding and parsing of
//! codewords) return instead a [`Partial`], which carries, besides the
//! error, the output computed before the failure point.

use core::error::Error;
use core::fmt::{Debug, Display, Formatter};

/// The kinds of failure of a [`PrefixTable`](crate::table::PrefixTable)
/// and of [`CodeWord`](crate::codes::CodeWord) parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableError {
    /// The element has already been assigned a codeword.
    DuplicateElement,
    /// The codeword is a prefix of, an extension of, or equal to a codeword
    /// already in the table. `depth` is the number of bits walked when the
    /// conflict was detected.
    PrefixConflict { depth: usize },
    /// Memory for the new entry could not be reserved.
    AllocationFailure,
    /// The table contains no codeword.
    UninitializedTable,
    /// The input ended in the middle of a codeword, or followed a path that
    /// is not in the table. `bit_pos` is the position at which the pending
    /// codeword started.
    TruncatedCode { bit_pos: usize },
    /// The element at position `index` of the message has no codeword.
    UnknownElement { index: usize },
    /// The character `found` at position `pos` is neither `0` nor `1`.
    MalformedCodeWord { pos: usize, found: char },
}

impl Display for TableError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            TableError::DuplicateElement => write!(f, "Element already present in the table"),
            TableError::PrefixConflict { depth } => write!(
                f,
                "Codeword conflicts with an existing codeword at bit {}",
                depth
            ),
            TableError::AllocationFailure => write!(f, "Not enough memory"),
            TableError::UninitializedTable => write!(f, "Table is not initialized"),
            TableError::TruncatedCode { bit_pos } => write!(
                f,
                "Data does not match the table: incomplete codeword at bit {}",
                bit_pos
            ),
            TableError::UnknownElement { index } => write!(
                f,
                "Element at position {} of the message is not in the table",
                index
            ),
            TableError::MalformedCodeWord { pos, found } => write!(
                f,
                "Invalid character {:?} at position {} of codeword",
                found, pos
            ),
        }
    }
}

impl Error for TableError {}

/// A failure together with the output produced before it.
///
/// Callers are never left without the work completed so far: for example,
/// a failed [`decode`](crate::table::PrefixTable::decode) still returns
/// all the elements decoded before the offending codeword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partial<O> {
    /// The output produced before the failure.
    pub output: O,
    /// What went wrong.
    pub error: TableError,
}

impl<O> Partial<O> {
    pub fn new(output: O, error: TableError) -> Self {
        Self { output, error }
    }

    /// Discard the error, returning the partial output.
    pub fn into_output(self) -> O {
        self.output
    }
}

impl<O> Display for Partial<O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} (partial output available)", self.error)
    }
}

impl<O: Debug> Error for Partial<O> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}

impl<O> From<Partial<O>> for TableError {
    fn from(partial: Partial<O>) -> Self {
        partial.error
    }
}
