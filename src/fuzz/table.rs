/*
 * SPDX-FileCopyrightText: 2024 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Differential fuzzing of [`PrefixTable`] against a naive model keeping
//! the pairs in a vector.

use crate::prelude::*;
use arbitrary::Arbitrary;

const DEBUG: bool = false;

macro_rules! debugln {
    ($($arg:tt)*) => {
        if DEBUG {
            println!($($arg)*);
        }
    };
}

#[derive(Arbitrary, Debug, Clone)]
pub struct FuzzCase {
    commands: Vec<RandomCommand>,
}

#[derive(Arbitrary, Debug, Clone)]
enum RandomCommand {
    Insert(u8, Vec<bool>),
    /// Split the codeword of the given index (modulo the number of pairs)
    /// in two, keeping the code complete.
    Split(u16),
    Decode(Vec<bool>),
    /// Decode the encoding of the given message, plus some trailing bits.
    RoundTrip(Vec<u8>, Vec<bool>),
    Encode(Vec<u8>),
    Clear,
}

/// Decode `bits` greedily by searching the codewords linearly.
fn model_decode(model: &[(u8, CodeWord)], bits: &CodeWord) -> Result<Vec<u8>, Partial<Vec<u8>>> {
    if model.is_empty() {
        return Err(Partial::new(vec![], TableError::UninitializedTable));
    }
    if model.iter().any(|(_, c)| c.is_empty()) {
        return if bits.is_empty() {
            Ok(vec![])
        } else {
            Err(Partial::new(vec![], TableError::TruncatedCode { bit_pos: 0 }))
        };
    }
    let mut output = vec![];
    let mut pos = 0;
    while pos < bits.len() {
        let rest: CodeWord = bits.iter().skip(pos).collect();
        match model.iter().find(|(_, c)| c.is_prefix_of(&rest)) {
            Some((e, c)) => {
                output.push(*e);
                pos += c.len();
            }
            None => {
                return Err(Partial::new(
                    output,
                    TableError::TruncatedCode { bit_pos: pos },
                ));
            }
        }
    }
    Ok(output)
}

fn model_encode(model: &[(u8, CodeWord)], message: &[u8]) -> Result<CodeWord, Partial<CodeWord>> {
    let mut output = CodeWord::new();
    for (index, element) in message.iter().enumerate() {
        match model.iter().find(|(e, _)| e == element) {
            Some((_, c)) => output += c,
            None => {
                return Err(Partial::new(output, TableError::UnknownElement { index }));
            }
        }
    }
    Ok(output)
}

pub fn harness(data: FuzzCase) {
    let mut table = PrefixTable::<u8>::new();
    let mut model: Vec<(u8, CodeWord)> = vec![];

    for command in data.commands {
        debugln!("{:?}", command);
        match command {
            RandomCommand::Insert(element, bits) => {
                let codeword = CodeWord::from(&bits[..]);
                let expected = if model.iter().any(|(e, _)| *e == element) {
                    Err(TableError::DuplicateElement)
                } else if model
                    .iter()
                    .any(|(_, c)| c.is_prefix_of(&codeword) || codeword.is_prefix_of(c))
                {
                    Err(TableError::PrefixConflict { depth: 0 })
                } else {
                    Ok(())
                };
                let res = table.insert(element, &codeword);
                match (expected, res) {
                    (Ok(()), Ok(())) => model.push((element, codeword)),
                    (Err(TableError::DuplicateElement), Err(TableError::DuplicateElement)) => {}
                    (
                        Err(TableError::PrefixConflict { .. }),
                        Err(TableError::PrefixConflict { .. }),
                    ) => {}
                    (expected, res) => panic!("expected {:?}, got {:?}", expected, res),
                }
            }
            RandomCommand::Split(index) => {
                // Only on complete codes whose elements are 0..n
                if model.is_empty() {
                    table.insert(0, &CodeWord::new()).unwrap();
                    model.push((0, CodeWord::new()));
                    continue;
                }
                let n = model.len();
                if n >= 256 || !table.is_complete() {
                    continue;
                }
                if model.iter().enumerate().any(|(i, (e, _))| *e as usize != i) {
                    continue;
                }
                let i = index as usize % n;
                let codeword = model[i].1.clone();
                model[i].1 = codeword.clone() << false;
                model.push((n as u8, codeword << true));
                table = PrefixTable::from_pairs(model.iter().cloned()).unwrap();
                assert!(table.is_complete());
            }
            RandomCommand::Decode(bits) => {
                let bits = CodeWord::from(&bits[..]);
                assert_eq!(table.decode(&bits), model_decode(&model, &bits));
            }
            RandomCommand::RoundTrip(message, tail) => {
                if model.is_empty() || model.iter().any(|(_, c)| c.is_empty()) {
                    continue;
                }
                let message: Vec<u8> = message
                    .iter()
                    .map(|i| model[*i as usize % model.len()].0)
                    .collect();
                let mut bits = table.encode(&message).unwrap();
                assert_eq!(table.decode(&bits).unwrap(), message);
                bits.extend(tail);
                let decoded = match table.decode(&bits) {
                    Ok(output) => output,
                    Err(partial) => partial.output,
                };
                assert_eq!(decoded[..message.len()], message[..]);
                assert_eq!(table.decode(&bits), model_decode(&model, &bits));
            }
            RandomCommand::Encode(message) => {
                assert_eq!(table.encode(&message), model_encode(&model, &message));
            }
            RandomCommand::Clear => {
                table.clear();
                model.clear();
            }
        }
        assert_eq!(table.len(), model.len());
        assert!(table.is_consistent());
    }

    // Iteration is in lexicographic order of codewords
    let pairs: Vec<_> = table.iter().map(|(e, c)| (*e, c.clone())).collect();
    model.sort_by(|(_, a), (_, b)| a.cmp(b));
    assert_eq!(pairs, model);
}
