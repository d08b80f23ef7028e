//! Collector 벤치마크
//!
//! ObjectName 파싱/정규화와 요청 빌드 성능 측정

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rjmx_mapper::collector::{
    Attribute, GetRequestBuilder, JmxMapping, MBeanName, PostRequestBuilder, RequestBuilder,
};
use std::hint::black_box;

const NAMES: &[(&str, &str)] = &[
    ("simple", "java.lang:type=Memory"),
    ("gc", "java.lang:type=GarbageCollector,name=ConcurrentMarkSweep"),
    (
        "quoted",
        r#"Catalina:name=HttpRequest1,type=RequestProcessor,worker="http-nio-8080""#,
    ),
    ("escaped", "jboss.jmx:alias=jmx/rmi/RMIAdaptor/State"),
];

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("mbean_name");

    for (label, raw) in NAMES {
        group.bench_with_input(BenchmarkId::new("parse", label), raw, |b, raw| {
            b.iter(|| MBeanName::parse(black_box(raw)))
        });

        let parsed = MBeanName::parse(raw).expect("benchmark names are valid");
        group.bench_with_input(
            BenchmarkId::new("canonicalize_escaped", label),
            &parsed,
            |b, name| b.iter(|| name.canonicalize(black_box(true))),
        );
    }

    group.finish();
}

fn benchmark_build(c: &mut Criterion) {
    let mappings: Vec<JmxMapping> = (0..50)
        .map(|i| {
            JmxMapping::new(format!("com.example:type=Pool,name=pool-{}", i))
                .with_attribute(Attribute::new("ActiveCount").with_field("pool.active"))
                .with_attribute(Attribute::new("QueueSize").with_field("pool.queue"))
        })
        .collect();

    let mut group = c.benchmark_group("build_requests");

    group.bench_with_input(BenchmarkId::new("get", 50), &mappings, |b, m| {
        b.iter(|| GetRequestBuilder.compile(black_box(m)))
    });

    group.bench_with_input(BenchmarkId::new("post", 50), &mappings, |b, m| {
        b.iter(|| PostRequestBuilder.compile(black_box(m)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_parse, benchmark_build);
criterion_main!(benches);
