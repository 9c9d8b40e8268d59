/*
 * SPDX-FileCopyrightText: 2024 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![cfg(feature = "serde")]

use prefix_table::prelude::*;
use std::error::Error;

#[test]
fn test_codeword_json() -> Result<(), Box<dyn Error>> {
    let code: CodeWord = "0110".parse()?;
    assert_eq!(serde_json::to_string(&code)?, "\"0110\"");
    assert_eq!(serde_json::from_str::<CodeWord>("\"0110\"")?, code);
    assert!(serde_json::from_str::<CodeWord>("\"01a0\"").is_err());
    assert!(serde_json::from_str::<CodeWord>("12").is_err());
    Ok(())
}

#[test]
fn test_table_json() -> Result<(), Box<dyn Error>> {
    let table = PrefixTable::from_pairs([
        (4_u32, "11".parse::<CodeWord>()?),
        (2, "0".parse()?),
        (3, "10".parse()?),
    ])?;
    let json = serde_json::to_string(&table)?;
    assert_eq!(json, r#"[[2,"0"],[3,"10"],[4,"11"]]"#);

    let back: PrefixTable<u32> = serde_json::from_str(&json)?;
    assert!(back.is_consistent());
    assert_eq!(back.decode(&"0010101100".parse()?)?, [2, 2, 3, 3, 4, 2, 2]);

    // Conflicting pairs are rejected
    let err = serde_json::from_str::<PrefixTable<u32>>(r#"[[2,"0"],[3,"01"]]"#);
    assert!(err.is_err());
    let err = serde_json::from_str::<PrefixTable<u32>>(r#"[[2,"0"],[2,"1"]]"#);
    assert!(err.is_err());
    Ok(())
}
