/*
 * SPDX-FileCopyrightText: 2024 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Textual tables.
//!
//! A table is described by a sequence of lines, each containing an unsigned
//! decimal element and its codeword as a string of `0` and `1`, separated
//! by whitespace:
//!
//! ```text
//! 30 0
//! 888 10
//! 999 11
//! ```
//!
//! Leading and trailing whitespace is ignored, and so are blank lines. A
//! line containing only an element assigns it the empty codeword, which is
//! how [`write_table`] writes a table whose single codeword is empty.

use core::error::Error;
use core::fmt::{Display, Formatter};
use core::hash::Hash;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use num_traits::{Num, Unsigned};

use crate::codes::CodeWord;
use crate::error::TableError;
use crate::table::PrefixTable;

/// Error type for reading textual tables.
///
/// Line numbers start from one.
#[derive(Debug)]
pub enum LoadError {
    /// The underlying reader failed.
    Io(std::io::Error),
    /// The line is not made of an element followed by a codeword.
    Syntax { line: usize },
    /// The element is not a valid number of the element type.
    Element { line: usize },
    /// The codeword contains characters other than `0` and `1`.
    CodeWord { line: usize, error: TableError },
    /// The table rejected the pair.
    Insert { line: usize, error: TableError },
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "I/O error while reading table: {}", e),
            LoadError::Syntax { line } => write!(f, "Malformed line {}", line),
            LoadError::Element { line } => write!(f, "Invalid element at line {}", line),
            LoadError::CodeWord { line, error } => {
                write!(f, "Invalid codeword at line {}: {}", line, error)
            }
            LoadError::Insert { line, error } => {
                write!(f, "Cannot insert pair at line {}: {}", line, error)
            }
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::CodeWord { error, .. } | LoadError::Insert { error, .. } => Some(error),
            LoadError::Syntax { .. } | LoadError::Element { .. } => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

/// Parse a single line into an element and its codeword.
fn parse_line<T: Num>(line: &str, line_num: usize) -> Result<(T, CodeWord), LoadError> {
    let mut tokens = line.split_whitespace();
    // A missing codeword is the empty codeword
    let (Some(element), codeword, None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Err(LoadError::Syntax { line: line_num });
    };
    if !element.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LoadError::Syntax { line: line_num });
    }
    let element =
        T::from_str_radix(element, 10).map_err(|_| LoadError::Element { line: line_num })?;
    let codeword =
        CodeWord::parse(codeword.unwrap_or("")).map_err(|partial| LoadError::CodeWord {
            line: line_num,
            error: partial.error,
        })?;
    Ok((element, codeword))
}

/// Insert into `table` the pairs read from `reader`, returning the number
/// of pairs inserted.
///
/// Reading stops at the first error. Since the pairs read before the error
/// are already in the table, the table is then [cleared](PrefixTable::clear).
pub fn load_table<T, R>(table: &mut PrefixTable<T>, reader: R) -> Result<usize, LoadError>
where
    T: Num + Unsigned + Eq + Hash + Clone,
    R: BufRead,
{
    let res = load_lines(table, reader);
    if res.is_err() {
        table.clear();
    }
    res
}

fn load_lines<T, R>(table: &mut PrefixTable<T>, reader: R) -> Result<usize, LoadError>
where
    T: Num + Unsigned + Eq + Hash + Clone,
    R: BufRead,
{
    let mut inserted = 0;
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let (element, codeword) = parse_line(&line, i + 1)?;
        table
            .insert(element, &codeword)
            .map_err(|error| LoadError::Insert { line: i + 1, error })?;
        inserted += 1;
    }
    Ok(inserted)
}

/// Read a table from `reader`.
pub fn read_table<T, R>(reader: R) -> Result<PrefixTable<T>, LoadError>
where
    T: Num + Unsigned + Eq + Hash + Clone,
    R: BufRead,
{
    let mut table = PrefixTable::new();
    load_table(&mut table, reader)?;
    Ok(table)
}

/// Read a table from the file at `path`.
pub fn read_table_from_path<T, P>(path: P) -> Result<PrefixTable<T>, LoadError>
where
    T: Num + Unsigned + Eq + Hash + Clone,
    P: AsRef<Path>,
{
    read_table(BufReader::new(std::fs::File::open(path)?))
}

/// Write `table` to `writer`, one pair per line in lexicographic order of
/// codewords.
pub fn write_table<T, W>(table: &PrefixTable<T>, mut writer: W) -> std::io::Result<()>
where
    T: Display + Eq + Hash + Clone,
    W: Write,
{
    for (element, codeword) in table {
        writeln!(writer, "{} {}", element, codeword)?;
    }
    writer.flush()
}
