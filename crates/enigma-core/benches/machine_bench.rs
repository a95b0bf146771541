//! Benchmarks for per-character conversion

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rand::Rng;

use enigma_core::{Alphabet, Machine, Permutation, Rotor};

fn enigma_i() -> Machine {
    let alpha = Arc::new(Alphabet::default());
    let wiring = |cycles: &str| Permutation::new(cycles, alpha.clone()).unwrap();
    let rotors = vec![
        Rotor::reflector(
            "B",
            wiring("(AY) (BR) (CU) (DH) (EQ) (FS) (GL) (IP) (JX) (KN) (MO) (TZ) (VW)"),
        )
        .unwrap(),
        Rotor::moving("I", wiring("(AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)"), "Q")
            .unwrap(),
        Rotor::moving("II", wiring("(FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)"), "E")
            .unwrap(),
        Rotor::moving("III", wiring("(ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)"), "V").unwrap(),
    ];

    let mut machine = Machine::new(alpha.clone(), 4, 3, rotors).unwrap();
    machine.insert_rotors(&["B", "I", "II", "III"]).unwrap();
    machine.set_rotors("AAA").unwrap();
    machine
        .set_plugboard(Permutation::new("(AQ) (BJ) (KZ) (MX)", alpha).unwrap())
        .unwrap();
    machine
}

fn random_message(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| (b'A' + rng.gen_range(0..26u8)) as char)
        .collect()
}

fn bench_convert_char(c: &mut Criterion) {
    let mut machine = enigma_i();

    c.bench_function("convert_char", |b| {
        b.iter(|| machine.convert_char(black_box('A')).unwrap())
    });
}

fn bench_convert_message_sizes(c: &mut Criterion) {
    let sizes = [64, 1024, 16384];

    let mut group = c.benchmark_group("convert_by_size");

    for size in sizes {
        let mut machine = enigma_i();
        let message = random_message(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_function(format!("{}_chars", size), |b| {
            b.iter(|| machine.convert(black_box(&message)).unwrap())
        });
    }

    group.finish();
}

fn bench_permutation_parse(c: &mut Criterion) {
    let alpha = Arc::new(Alphabet::default());

    c.bench_function("permutation_parse", |b| {
        b.iter(|| {
            Permutation::new(
                black_box("(AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)"),
                alpha.clone(),
            )
            .unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_convert_char,
    bench_convert_message_sizes,
    bench_permutation_parse,
);
criterion_main!(benches);
