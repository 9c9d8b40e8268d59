/*
 * SPDX-FileCopyrightText: 2024 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![no_main]

use libfuzzer_sys::fuzz_target;
use prefix_table::fuzz::table::*;

fuzz_target!(|data: FuzzCase| harness(data));
