use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tableview::*;

const REGIONS: [&str; 5] = ["Africa", "Americas", "Asia", "Europe", "Oceania"];

fn make_dataset(size: usize) -> Dataset {
    (0..size)
        .map(|i| {
            Record::new()
                .with("name", format!("Country {:06}", (i * 7919) % size))
                .with("region", REGIONS[i % REGIONS.len()])
                .with("population", ((i * 104729) % 1_000_000) as i64)
        })
        .collect()
}

fn sorted_directives(column: &str) -> SortDirectives {
    let mut directives = SortDirectives::new([column]);
    directives.set(column, SortDirective::Ascending);
    directives
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_by_name");

    for size in [100, 1000, 10000].iter() {
        let dataset = make_dataset(*size);
        let directives = sorted_directives("name");

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| sort(black_box(&dataset), &directives));
        });
    }
    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_region");

    for size in [100, 1000, 10000].iter() {
        let dataset = make_dataset(*size);
        let mut filters = FilterValues::new(["region"]);
        filters.set("region", Some("euro".to_string()));

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| filter(black_box(&dataset), &filters));
        });
    }
    group.finish();
}

fn bench_paginate(c: &mut Criterion) {
    let mut group = c.benchmark_group("paginate");
    let config = PaginationConfig::default();

    for size in [100, 1000, 10000].iter() {
        let dataset = make_dataset(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| paginate(black_box(&dataset), black_box(size / 8 + 1), &config));
        });
    }
    group.finish();
}

fn bench_reducer_intents(c: &mut Criterion) {
    let mut group = c.benchmark_group("reducer_intents");

    for size in [100, 1000, 10000].iter() {
        let dataset = make_dataset(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let mut reducer = ViewReducer::with_dataset(ViewConfig::default(), dataset.clone());
                let _ = reducer.toggle_sort("name");
                let _ = reducer.set_filter("region", "asia");
                reducer.next_page();
                black_box(reducer.view().rows.len())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sort, bench_filter, bench_paginate, bench_reducer_intents);
criterion_main!(benches);
