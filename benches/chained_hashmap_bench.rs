use chain_hashmap::{ChainedHashMap, MapConfig, OneAtATime, StdEq, StdHash};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("chained::insert");
    group.throughput(Throughput::Elements(10_000));
    // Starts at 101 buckets and doubles through every growth step.
    group.bench_function("fresh_10k_one_at_a_time", |b| {
        b.iter_batched(
            || ChainedHashMap::<String, u64, _, _>::new(OneAtATime, StdEq).unwrap(),
            |mut m| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    m.insert(key(x), i as u64).unwrap();
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function("fresh_10k_std_hash", |b| {
        b.iter_batched(
            || ChainedHashMap::<String, u64, StdHash, StdEq>::new(StdHash::default(), StdEq).unwrap(),
            |mut m| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    m.insert(key(x), i as u64).unwrap();
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    // Table already sized; measures chain insertion without growth.
    group.bench_function("presized_10k", |b| {
        b.iter_batched(
            || {
                ChainedHashMap::<String, u64, _, _>::with_config(
                    MapConfig::default().with_initial_buckets(32_768),
                    OneAtATime,
                    StdEq,
                )
                .unwrap()
            },
            |mut m| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    m.insert(key(x), i as u64).unwrap();
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_upsert(c: &mut Criterion) {
    c.bench_function("chained_upsert_existing", |b| {
        let mut m = ChainedHashMap::new(OneAtATime, StdEq).unwrap();
        let keys: Vec<_> = lcg(3).take(1_000).map(key).collect();
        for (i, k) in keys.iter().enumerate() {
            m.insert(k.clone(), i as u64).unwrap();
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap().clone();
            black_box(m.insert(k, 0).unwrap());
        })
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("chained_get_hit", |b| {
        let mut m = ChainedHashMap::new(OneAtATime, StdEq).unwrap();
        let keys: Vec<_> = lcg(7).take(20_000).map(key).collect();
        for (i, k) in keys.iter().enumerate() {
            m.insert(k.clone(), i as u64).unwrap();
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(m.get(k));
        })
    });
}

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("chained_get_miss", |b| {
        let mut m = ChainedHashMap::new(OneAtATime, StdEq).unwrap();
        for (i, x) in lcg(11).take(10_000).enumerate() {
            m.insert(key(x), i as u64).unwrap();
        }
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            // generate keys unlikely in map
            let k = key(miss.next().unwrap());
            black_box(m.get(&k));
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert, bench_upsert, bench_get_hit, bench_get_miss
}
criterion_main!(benches);
