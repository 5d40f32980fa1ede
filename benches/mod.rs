use criterion::{criterion_group, criterion_main};

mod shell;

criterion_group!(
    benches,
    shell::bench_dispatch,
    shell::bench_output_buffer,
    shell::bench_tokenize_flood
);
criterion_main!(benches);
