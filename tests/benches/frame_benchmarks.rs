//! # Secure-Frames Benchmarks
//!
//! Hot paths of the messaging layer:
//!
//! | Path | Runs on |
//! |------|---------|
//! | Key namespacing | every `on`, `off`, `emit` |
//! | Origin validation | every delivery to an enforcing bus |
//! | Frame name parsing | every frame bootstrap |
//! | Dispatch | every message |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::json;
use sf_01_frame_lifecycle::FrameName;
use shared_bus::{
    handler, merchant_origin, namespaced_key, Bus, BusOptions, InMemoryDispatcher,
    OriginValidator,
};
use shared_types::events::INPUT_EVENT;
use shared_types::ChannelId;
use std::time::Duration;

const MERCHANT: &str = "https://shop.example.com:443/checkout?step=2";

fn bench_namespacing(c: &mut Criterion) {
    let mut group = c.benchmark_group("namespacing");
    let channel = ChannelId::generate();

    group.bench_function("namespaced_key", |b| {
        b.iter(|| black_box(namespaced_key(black_box(&channel), INPUT_EVENT)))
    });

    let name = format!("braintree-union-pay_{channel}?v=3.97.0");
    group.bench_function("frame_name_parse", |b| {
        b.iter(|| black_box(FrameName::parse(black_box(&name)).is_ok()))
    });

    group.finish();
}

fn bench_origin_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("origin-validation");

    for (label, sender) in [
        ("merchant", "https://shop.example.com"),
        ("processor", "https://assets.braintreegateway.com"),
        ("lookalike", "https://braintreegateway.com.evil.com"),
        ("foreign", "https://evil.example.com"),
    ] {
        group.bench_with_input(BenchmarkId::new("is_trusted", label), &sender, |b, sender| {
            b.iter(|| black_box(OriginValidator::is_trusted(sender, MERCHANT)))
        });
    }

    group.bench_function("merchant_origin", |b| {
        b.iter(|| black_box(merchant_origin(black_box(MERCHANT))))
    });

    group.finish();
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    group.measurement_time(Duration::from_secs(10));

    let runtime = tokio::runtime::Runtime::new().expect("runtime");

    for messages in [1u64, 100, 1_000] {
        group.throughput(Throughput::Elements(messages));
        group.bench_with_input(
            BenchmarkId::new("emit_and_deliver", messages),
            &messages,
            |b, &messages| {
                b.iter(|| {
                    runtime.block_on(async {
                        let dispatcher = InMemoryDispatcher::spawn();
                        let channel = ChannelId::generate();
                        let bus = Bus::new(
                            dispatcher.clone(),
                            BusOptions::new(channel.as_str())
                                .with_merchant_url(MERCHANT)
                                .with_origin("https://assets.braintreegateway.com"),
                        )
                        .expect("channel is set");
                        bus.on(INPUT_EVENT, handler(|message| {
                            black_box(message.payload());
                        }));

                        for i in 0..messages {
                            bus.emit(INPUT_EVENT, json!({"field": "number", "length": i}));
                        }
                        dispatcher.settle().await;
                    })
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_namespacing,
    bench_origin_validation,
    bench_dispatch
);
criterion_main!(benches);
