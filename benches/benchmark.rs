use cosmoseed::record::Record;
use criterion::{criterion_group, Criterion};

fn record_benchmark(c: &mut Criterion) {
    c.bench_function("record/generate", |b| b.iter(Record::generate));

    let record = Record::generate();
    c.bench_function("record/serialize", move |b| {
        b.iter(|| serde_json::to_value(&record).unwrap())
    });
}

criterion_group! {
    name = record;
    config = Criterion::default();
    targets = record_benchmark
}

fn main() {
    {
        record();
    }

    crate::Criterion::default()
        .configure_from_args()
        .final_summary();
}
