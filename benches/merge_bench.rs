use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fastresolve::dns::{merge, static_ip_resolver, AddressRecord, Family, FastResolver, ResolveOptions};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use tokio::runtime::Runtime;

fn records() -> (Vec<AddressRecord>, Vec<AddressRecord>) {
    let v4 = (0..8u8)
        .map(|i| AddressRecord::new(IpAddr::V4(Ipv4Addr::new(93, 184, 216, i)), Family::V4))
        .chain(std::iter::once(AddressRecord::new(
            IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            Family::V4,
        )))
        .collect();
    let v6 = (0..8u16)
        .map(|i| {
            AddressRecord::new(
                IpAddr::V6(Ipv6Addr::new(0x2606, 0x2800, 0x220, 1, 0, 0, 0, i)),
                Family::V6,
            )
        })
        .collect();
    (v4, v6)
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");
    let (v4, v6) = records();
    let one = ResolveOptions::new();
    let all = ResolveOptions::new().all(true);

    group.bench_function("preferred_address", |b| {
        b.iter(|| black_box(merge(v4.clone(), v6.clone(), &one)));
    });

    group.bench_function("all_records", |b| {
        b.iter(|| black_box(merge(v4.clone(), v6.clone(), &all)));
    });

    group.finish();
}

fn bench_literal_fast_path(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let resolver = rt.block_on(async { FastResolver::new() });
    let hosts = ["172.217.1.174", "10.121.254.81", "2001:db8::1", "example.com"];

    c.bench_function("static_ip_resolver_mixed", |b| {
        b.iter(|| {
            for host in &hosts {
                black_box(static_ip_resolver(host, &ResolveOptions::new()));
            }
        });
    });

    c.bench_function("resolve_literal", |b| {
        b.to_async(&rt).iter(|| async {
            black_box(
                resolver
                    .resolve(Some("172.217.1.174"), &ResolveOptions::new())
                    .await
                    .unwrap(),
            )
        });
    });
}

criterion_group!(benches, bench_merge, bench_literal_fast_path);
criterion_main!(benches);
