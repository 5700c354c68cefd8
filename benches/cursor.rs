use criterion::{criterion_group, criterion_main, Criterion};
use rdjson::Cursor;
use std::fs;

fn scan(text: &str) -> usize {
    let mut cursor = Cursor::new(text);
    let mut count = 0;
    loop {
        cursor.skip_whitespace();
        if cursor.peek().is_none() {
            break count;
        }
        cursor.advance();
        count += 1;
    }
}

fn benchmark(c: &mut Criterion) {
    let text = fs::read_to_string("fixtures/json/valid/events.json").unwrap();
    c.bench_function("scan of events", |b| b.iter(|| scan(&text)));
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
