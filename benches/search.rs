use border::{Automaton, FailureTable, Kmp};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn haystack() -> Vec<u8> {
    // Long runs of near misses keep the pattern cursor retreating.
    let mut text = b"aaaaaaaaab".repeat(10_000);
    text.extend_from_slice(b"aaaaaaaaaa");
    text
}

fn bench_failure_table(c: &mut Criterion) {
    let pattern = b"abaabaabaab".repeat(100);
    c.bench_function("failure_table", |b| b.iter(|| FailureTable::new(black_box(pattern.as_slice()))));
}

fn bench_kmp(c: &mut Criterion) {
    let text = haystack();
    let kmp = Kmp::new(b"aaaaaaaaaa");
    c.bench_function("kmp_find_iter", |b| b.iter(|| kmp.find_iter(black_box(&text)).count()));
}

fn bench_automaton(c: &mut Criterion) {
    let text = haystack();
    let patterns: Vec<Vec<u8>> = (1..=10).map(|n| b"a".repeat(n)).chain([b"ab".to_vec(), b"ba".to_vec()]).collect();
    let ac = Automaton::<u8>::new(&patterns).unwrap();
    c.bench_function("automaton_scan", |b| b.iter(|| ac.scan(black_box(&text)).count()));
}

criterion_group!(benches, bench_failure_table, bench_kmp, bench_automaton);
criterion_main!(benches);
