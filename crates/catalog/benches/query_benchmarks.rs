use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use goodshop_catalog::{Catalog, CatalogQuery, CategoryFilter, Price, Product, SortOrder};

const CATEGORIES: [&str; 4] = ["shirts", "jackets", "pants", "skirts"];

fn synthetic_catalog(size: usize) -> Catalog {
    let products = (0..size)
        .map(|i| {
            let category = CATEGORIES[i % CATEGORIES.len()];
            Product::new(
                format!("Item {i} {category}"),
                format!("Synthetic {category} number {i}"),
                category,
                Price::from_cents(((i * 7919) % 20_000) as u64),
            )
            .unwrap()
        })
        .collect();
    Catalog::new(products)
}

/// One full query per keystroke: filter two categories, search, sort.
fn bench_interactive_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_query");
    let query = CatalogQuery::new(
        CategoryFilter::only(["pants", "skirts"]),
        "num",
        SortOrder::Descending,
    );

    for size in [100usize, 1_000, 10_000] {
        let catalog = synthetic_catalog(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("filter_search_sort", size), &catalog, |b, catalog| {
            b.iter(|| black_box(catalog.query(black_box(&query))).len());
        });
    }

    group.finish();
}

/// Unfiltered listing sorted by price, the widest result set.
fn bench_sort_only(c: &mut Criterion) {
    let catalog = synthetic_catalog(10_000);
    let query = CatalogQuery::new(CategoryFilter::All, "", SortOrder::Ascending);
    c.bench_function("catalog_query/sort_only_10000", |b| {
        b.iter(|| black_box(catalog.query(black_box(&query))).len());
    });
}

criterion_group!(benches, bench_interactive_query, bench_sort_only);
criterion_main!(benches);
