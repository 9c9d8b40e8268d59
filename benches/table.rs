/*
 * SPDX-FileCopyrightText: 2024 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use criterion::{Criterion, criterion_group, criterion_main};
use prefix_table::prelude::*;
use rand::rngs::SmallRng;
use rand::Rng;
use rand::SeedableRng;
use std::hint::black_box;
use std::time::Duration;

const ELEMENTS: u64 = 1 << 10;

pub fn gen_zeta_data(n: usize) -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(0);
    let distr = rand_distr::Zeta::new(2.0).unwrap();

    (0..n)
        .map(|_| (rng.sample(distr) as u64 - 1).min(ELEMENTS - 1))
        .collect::<Vec<_>>()
}

/// Unary-like code: the element `i` is `i` ones followed by a zero, except
/// the last one, which has no trailing zero.
pub fn unary_table() -> PrefixTable<u64> {
    PrefixTable::from_pairs((0..ELEMENTS).map(|i| {
        let mut code: CodeWord = std::iter::repeat_n(true, i as usize).collect();
        if i != ELEMENTS - 1 {
            code.push(false);
        }
        (i, code)
    }))
    .unwrap()
}

/// Balanced code: every element has a ten-bit codeword.
pub fn fixed_table() -> PrefixTable<u64> {
    PrefixTable::from_pairs(
        (0..ELEMENTS).map(|i| (i, (0..10).map(|b| i & (1 << (9 - b)) != 0).collect())),
    )
    .unwrap()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let s = gen_zeta_data(1 << 16);

    for (name, table) in [("unary", unary_table()), ("fixed", fixed_table())] {
        assert!(table.is_complete());
        let bits = table.encode(&s).unwrap();
        println!("{name}: {} bits for {} elements", bits.len(), s.len());

        c.bench_function(&format!("encode {name}"), |b| {
            b.iter(|| black_box(table.encode(black_box(&s)).unwrap()))
        });

        c.bench_function(&format!("decode {name}"), |b| {
            b.iter(|| black_box(table.decode(black_box(&bits)).unwrap()))
        });
    }

    c.bench_function("build unary", |b| b.iter(|| black_box(unary_table())));
}

criterion_group! {
    name = benches;
    config = Criterion::default().warm_up_time(Duration::from_secs(1)).measurement_time(Duration::from_secs(3));
    targets = criterion_benchmark
}
criterion_main!(benches);
