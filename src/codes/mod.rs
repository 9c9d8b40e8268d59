/*
 * SPDX-FileCopyrightText: 2024 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Codewords.

A [`CodeWord`] is a finite sequence of bits. It is used both as the path
from the root of a [`PrefixTable`](crate::table::PrefixTable) trie to a
leaf (a `0` bit moves to the left child, a `1` bit to the right child)
and as the bit sequence fed to, or produced by, decoding and encoding.

The textual form of a codeword is a string of `0` and `1` characters,
first bit first:

| Bits              | Text    |
|-------------------|--------:|
| (empty)           |      "" |
| `false`           |     "0" |
| `true, false`     |    "10" |
| `true, true, false` |  "110" |

Conversion from text to codeword and back is the identity on every
string made only of `0` and `1`.

*/

pub mod codeword;
pub use codeword::{BitIter, CodeWord};
