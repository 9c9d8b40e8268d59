/*
 * SPDX-FileCopyrightText: 2024 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use prefix_table::prelude::*;
use proptest::prelude::*;

/// Build a complete code by splitting, for each index in `splits`, the
/// codeword at that position (modulo the current number of codewords).
fn split_code(splits: &[usize]) -> Vec<CodeWord> {
    let mut codes = vec![CodeWord::new()];
    for &s in splits {
        let c = codes.swap_remove(s % codes.len());
        codes.push(c.clone() << false);
        codes.push(c << true);
    }
    codes
}

fn bits() -> impl Strategy<Value = CodeWord> {
    prop::collection::vec(any::<bool>(), 0..100).prop_map(|v| CodeWord::from(&v[..]))
}

proptest! {
    #[test]
    fn test_round_trip(
        splits in prop::collection::vec(any::<usize>(), 1..64),
        message in prop::collection::vec(any::<usize>(), 0..200),
    ) {
        let codes = split_code(&splits);
        let table = PrefixTable::from_pairs(codes.iter().cloned().enumerate()).unwrap();
        let message: Vec<usize> = message.iter().map(|m| m % codes.len()).collect();
        let bits = table.encode(&message).unwrap();
        prop_assert_eq!(table.decode(&bits).unwrap(), message);
    }

    #[test]
    fn test_text_round_trip(s in "[01]{0,300}") {
        let code: CodeWord = s.parse().unwrap();
        prop_assert_eq!(code.len(), s.len());
        prop_assert_eq!(code.to_string(), s);
    }

    #[test]
    fn test_malformed_text(prefix in "[01]{0,100}", bad in "[^01]", suffix in ".{0,10}") {
        let s = format!("{}{}{}", prefix, bad, suffix);
        let err = s.parse::<CodeWord>().unwrap_err();
        prop_assert_eq!(err.output.to_string(), prefix.clone());
        let found = bad.chars().next().unwrap();
        prop_assert_eq!(
            err.error,
            TableError::MalformedCodeWord { pos: prefix.chars().count(), found }
        );
    }

    #[test]
    fn test_prefix_conflict(c in bits(), ext in bits(), extend_first in any::<bool>()) {
        let longer = {
            let mut l = c.clone();
            l += &ext;
            l
        };
        let (first, second) = if extend_first { (&longer, &c) } else { (&c, &longer) };
        let mut table = PrefixTable::new();
        table.insert(0_u8, first).unwrap();
        let is_conflict = matches!(table.insert(1, second), Err(TableError::PrefixConflict { .. }));
        prop_assert!(is_conflict);
        prop_assert!(!table.contains(&1));
        prop_assert!(table.is_consistent());
    }

    #[test]
    fn test_duplicate(splits in prop::collection::vec(any::<usize>(), 1..32), extra in bits()) {
        let codes = split_code(&splits);
        let mut table = PrefixTable::from_pairs(codes.iter().cloned().enumerate()).unwrap();
        let message: Vec<usize> = (0..codes.len()).collect();
        let before = table.encode(&message).unwrap();
        prop_assert_eq!(table.insert(0, &extra), Err(TableError::DuplicateElement));
        prop_assert_eq!(table.encode(&message).unwrap(), before.clone());
        prop_assert_eq!(table.decode(&before).unwrap(), message);
    }

    #[test]
    fn test_clear_is_fresh(splits in prop::collection::vec(any::<usize>(), 0..32), input in bits()) {
        let codes = split_code(&splits);
        let mut table = PrefixTable::from_pairs(codes.iter().cloned().enumerate()).unwrap();
        table.clear();
        let fresh = PrefixTable::<usize>::new();
        prop_assert_eq!(table.decode(&input), fresh.decode(&input));
        prop_assert_eq!(table.encode(&[0, 1]), fresh.encode(&[0, 1]));
        prop_assert!(table.is_empty());
    }

    #[test]
    fn test_unknown_element(splits in prop::collection::vec(any::<usize>(), 1..32), at in 0..20_usize) {
        let codes = split_code(&splits);
        let table = PrefixTable::from_pairs(codes.iter().cloned().enumerate()).unwrap();
        let mut message: Vec<usize> = (0..20).map(|i| i % codes.len()).collect();
        message[at] = codes.len();
        let err = table.encode(&message).unwrap_err();
        prop_assert_eq!(&err.output, &table.encode(&message[..at]).unwrap());
        prop_assert_eq!(err.error, TableError::UnknownElement { index: at });
    }
}
