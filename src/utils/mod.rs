/*
 * SPDX-FileCopyrightText: 2024 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Helpers living around a [`PrefixTable`](crate::table::PrefixTable).

[`CountTable`] keeps track of the number of bits decoded and encoded
by a table, optionally printing on standard error the operations performed.

The [`text`] module reads and writes tables in a simple line-oriented
format.

*/

mod count;
pub use count::*;

pub mod text;
pub use text::{LoadError, load_table, read_table, read_table_from_path, write_table};
