//! Streaming decoder benchmarks.
//!
//! Run with: `cargo bench --package gecko-bench`
//!
//! Compares decoding a full `/coins/markets` page element by element against
//! deserializing the same bytes in one call, across network-like chunk sizes.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use gecko_bench::{chunked, market_page};
use gecko_lib::{CoinsMarketItem, MAX_PER_PAGE, decode_array};
use std::hint::black_box;

fn decode_benchmark(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("tokio runtime");
    let page = market_page(MAX_PER_PAGE);
    let body = page.as_str();

    let mut group = c.benchmark_group("decode_page");
    group.throughput(Throughput::Bytes(body.len() as u64));

    for chunk_size in [512, 4096, 16384] {
        group.bench_with_input(
            BenchmarkId::new("streaming", chunk_size),
            &chunk_size,
            |b, &size| {
                b.to_async(&runtime).iter(|| async move {
                    let items: Vec<CoinsMarketItem> =
                        decode_array(chunked(body, size), MAX_PER_PAGE)
                            .await
                            .expect("valid page");
                    black_box(items)
                });
            },
        );
    }

    group.bench_function("buffered", |b| {
        b.iter(|| {
            let items: Vec<CoinsMarketItem> =
                serde_json::from_str(black_box(body)).expect("valid page");
            black_box(items)
        });
    });

    group.finish();
}

criterion_group!(benches, decode_benchmark);
criterion_main!(benches);
