use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use serde_json::{Value as JsonValue, json};

use switchyard_events::{Event, Flow, FnLink, LinkPolicy, Router};

/// Router with `n` handlers, `n` subscribers and an `n`-link chain.
fn router_of_size(n: usize) -> (Router, Arc<AtomicUsize>) {
    let router = Router::default();
    let hits = Arc::new(AtomicUsize::new(0));

    for i in 0..n {
        router.register(format!("event-{i}"), |e: &Event| Some(e.payload().clone()));

        let counter = Arc::clone(&hits);
        router.subscribe(Arc::new(move |_: &Event| {
            counter.fetch_add(1, Ordering::Relaxed);
        }));

        let policy = if i == 0 {
            LinkPolicy::AcceptStopsChain
        } else {
            LinkPolicy::GateThenForward
        };
        router.append(
            FnLink::new(format!("link-{i}"), |e: &Event| !e.payload().is_null(), |_: &Event| Flow::Forward)
                .with_policy(policy),
        );
    }

    (router, hits)
}

fn bench_notify(c: &mut Criterion) {
    let mut group = c.benchmark_group("notify");
    for n in [1usize, 16, 256] {
        let (router, _) = router_of_size(n);
        let name = format!("event-{}", n / 2);
        group.bench_with_input(BenchmarkId::new("handled", n), &n, |b, _| {
            b.iter(|| black_box(router.notify(name.as_str(), json!("payload"))))
        });
        group.bench_with_input(BenchmarkId::new("unhandled", n), &n, |b, _| {
            b.iter(|| black_box(router.notify("missing", JsonValue::Null)))
        });
    }
    group.finish();
}

fn bench_publish(c: &mut Criterion) {
    let mut group = c.benchmark_group("publish");
    for n in [1usize, 16, 256] {
        let (router, _) = router_of_size(n);
        let event = Event::new("tick", json!("payload"));
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| black_box(router.publish(&event)))
        });
    }
    group.finish();
}

fn bench_route(c: &mut Criterion) {
    let mut group = c.benchmark_group("route");
    for n in [1usize, 16, 256] {
        let (router, _) = router_of_size(n);
        let event = Event::new("request", json!(["authorized"]));
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| black_box(router.route(&event)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_notify, bench_publish, bench_route);
criterion_main!(benches);
