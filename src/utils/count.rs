/*
 * SPDX-FileCopyrightText: 2024 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use core::fmt::Debug;
use core::hash::Hash;

use crate::codes::CodeWord;
use crate::error::{Partial, TableError};
use crate::table::PrefixTable;

/// Wrapping struct that keeps track of the bits decoded and encoded by a
/// [`PrefixTable`]. Optionally, prints to standard error information about
/// the methods called.
pub struct CountTable<T, const PRINT: bool = false> {
    table: PrefixTable<T>,
    /// The number of bits consumed by successful decodings, plus the bits
    /// preceding the failure point of failed ones.
    pub bits_decoded: usize,
    /// The number of elements output by decodings.
    pub elements_decoded: usize,
    /// The number of bits output by encodings, including partial ones.
    pub bits_encoded: usize,
    /// The number of failed operations.
    pub failures: usize,
}

impl<T, const PRINT: bool> CountTable<T, PRINT> {
    pub fn new(table: PrefixTable<T>) -> Self {
        Self {
            table,
            bits_decoded: 0,
            elements_decoded: 0,
            bits_encoded: 0,
            failures: 0,
        }
    }

    /// Return a reference to the wrapped table.
    pub fn table(&self) -> &PrefixTable<T> {
        &self.table
    }

    pub fn into_inner(self) -> PrefixTable<T> {
        self.table
    }

    pub fn clear(&mut self) {
        self.table.clear();
        if PRINT {
            eprintln!("clear()");
        }
    }
}

impl<T: Debug + Eq + Hash + Clone, const PRINT: bool> CountTable<T, PRINT> {
    pub fn insert(&mut self, element: T, codeword: &CodeWord) -> Result<(), TableError> {
        if PRINT {
            eprint!("insert({:?}, {}) = ", element, codeword);
        }
        let res = self.table.insert(element, codeword);
        if res.is_err() {
            self.failures += 1;
        }
        if PRINT {
            eprintln!("{:?} (len = {})", res, self.table.len());
        }
        res
    }

    pub fn decode(&mut self, bits: &CodeWord) -> Result<Vec<T>, Partial<Vec<T>>> {
        let res = self.table.decode(bits);
        let (consumed, elements) = match &res {
            Ok(output) => (bits.len(), output.len()),
            Err(Partial {
                output,
                error: TableError::TruncatedCode { bit_pos },
            }) => (*bit_pos, output.len()),
            Err(Partial { output, .. }) => (0, output.len()),
        };
        self.bits_decoded += consumed;
        self.elements_decoded += elements;
        if res.is_err() {
            self.failures += 1;
        }
        if PRINT {
            match &res {
                Ok(output) => eprintln!(
                    "decode({}) = {:?} (total = {} bits)",
                    bits, output, self.bits_decoded
                ),
                Err(partial) => eprintln!(
                    "decode({}) = {:?}: {} (total = {} bits)",
                    bits, partial.output, partial.error, self.bits_decoded
                ),
            }
        }
        res
    }

    pub fn encode(&mut self, elements: &[T]) -> Result<CodeWord, Partial<CodeWord>> {
        let res = self.table.encode(elements);
        match &res {
            Ok(output) => self.bits_encoded += output.len(),
            Err(partial) => {
                self.bits_encoded += partial.output.len();
                self.failures += 1;
            }
        }
        if PRINT {
            match &res {
                Ok(output) => eprintln!(
                    "encode({:?}) = {} (total = {} bits)",
                    elements, output, self.bits_encoded
                ),
                Err(partial) => eprintln!(
                    "encode({:?}) = {}: {} (total = {} bits)",
                    elements, partial.output, partial.error, self.bits_encoded
                ),
            }
        }
        res
    }
}

#[cfg(test)]
#[test]
fn test_count() -> Result<(), Box<dyn core::error::Error>> {
    let table = PrefixTable::from_pairs([
        ('a', "0".parse::<CodeWord>()?),
        ('b', "10".parse()?),
        ('c', "11".parse()?),
    ])?;
    let mut count = CountTable::<_, true>::new(table);

    let bits = count.encode(&['a', 'b', 'c'])?;
    assert_eq!(count.bits_encoded, 5);
    assert_eq!(count.decode(&bits)?, ['a', 'b', 'c']);
    assert_eq!(count.bits_decoded, 5);
    assert_eq!(count.elements_decoded, 3);

    assert!(count.decode(&"0101".parse()?).is_err());
    assert_eq!(count.bits_decoded, 5 + 3);
    assert!(count.encode(&['a', 'z']).is_err());
    assert_eq!(count.bits_encoded, 5 + 1);
    assert!(count.insert('d', &"1".parse()?).is_err());
    assert_eq!(count.failures, 3);

    count.clear();
    assert!(count.table().is_empty());
    Ok(())
}
