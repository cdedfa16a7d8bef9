use bytes::Bytes;
use criterion::{criterion_group, criterion_main, Criterion};
use http::Method;
use routemux::{handler_fn, Handler, Request, ResponseWriter, Router};
use std::hint::black_box;

fn noop() -> impl Handler {
    handler_fn(|_req: &mut Request, _res: &mut ResponseWriter| Ok(()))
}

fn build_router(resources: usize) -> Router {
    let mut router = Router::new();
    for i in 0..resources {
        router.get(&format!("/r{i}"), noop()).ok();
        router.get(&format!("/r{i}/:id"), noop()).ok();
        router.post(&format!("/r{i}"), noop()).ok();
        router.delete(&format!("/r{i}/:id"), noop()).ok();
    }
    router.any("/health", noop()).ok();
    router
}

fn bench_resolve(c: &mut Criterion) {
    let router = build_router(50);
    c.bench_function("resolve_first_route", |b| {
        b.iter(|| router.resolve(black_box(&Method::GET), "", black_box("/r0")))
    });
    c.bench_function("resolve_last_param_route", |b| {
        b.iter(|| router.resolve(black_box(&Method::GET), "", black_box("/r49/12345")))
    });
    c.bench_function("resolve_any_tier", |b| {
        b.iter(|| router.resolve(black_box(&Method::PUT), "", black_box("/health")))
    });
    c.bench_function("resolve_miss", |b| {
        b.iter(|| router.resolve(black_box(&Method::GET), "", black_box("/missing/path")))
    });
}

fn bench_dispatch(c: &mut Criterion) {
    let router = build_router(50);
    c.bench_function("dispatch_with_query_merge", |b| {
        b.iter(|| {
            let mut req = http::Request::builder()
                .method(Method::GET)
                .uri("/r25/42?limit=10&sort=asc")
                .body(Bytes::new())
                .unwrap();
            let mut res = ResponseWriter::new();
            router.serve(&mut req, &mut res).unwrap();
            black_box(req.uri().query().map(str::len))
        })
    });
}

criterion_group!(benches, bench_resolve, bench_dispatch);
criterion_main!(benches);
