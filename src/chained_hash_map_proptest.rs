#![cfg(test)]

// Property tests for ChainedHashMap kept inside the crate so they can check
// chain-level invariants through test-only accessors.

use crate::chained_hash_map::ChainedHashMap;
use crate::config::MapConfig;
use crate::strategy::{HashStrategy, OneAtATime, StdEq};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::HashMap;

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=24).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            3 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            1 => idx.clone().prop_map(OpI::Get),
            1 => prop_oneof![contains_pool, "[a-z]{0,5}"].prop_map(OpI::Contains),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn arb_config() -> impl Strategy<Value = MapConfig> {
    (1usize..=8, prop_oneof![Just(0.25), Just(0.5), Just(1.0), Just(2.0)]).prop_map(
        |(buckets, ratio)| {
            MapConfig::default()
                .with_initial_buckets(buckets)
                .with_max_fill_ratio(ratio)
        },
    )
}

// Invariants exercised after every operation:
// - get/contains parity with the model, including upsert-overwrites.
// - `len()` counts distinct keys only; overwrites never extend a chain.
// - Bucket count is the initial count times a power of two.
// - Every entry is reachable through exactly one chain (sum of chain
//   lengths equals `len()`), i.e. growth re-placed everything.
fn run_state_machine<H>(
    hasher: H,
    config: MapConfig,
    pool: Vec<String>,
    ops: Vec<OpI>,
) -> Result<(), TestCaseError>
where
    H: HashStrategy<String>,
{
    let mut sut: ChainedHashMap<String, i32, H, StdEq> =
        ChainedHashMap::with_config(config, hasher, StdEq).expect("valid config");
    let mut model: HashMap<String, i32> = HashMap::new();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = pool[i].clone();
                let prev = sut.insert(k.clone(), v).expect("small tables always allocate");
                prop_assert_eq!(prev, model.insert(k, v));
            }
            OpI::Get(i) => {
                prop_assert_eq!(sut.get(&pool[i]), model.get(&pool[i]));
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains_key(&s), model.contains_key(&s));
            }
            OpI::Mutate(i, d) => {
                let k = &pool[i];
                match (sut.get_mut(k), model.get_mut(k)) {
                    (Some(sv), Some(mv)) => {
                        *sv = sv.saturating_add(d);
                        *mv = mv.saturating_add(d);
                    }
                    (None, None) => {}
                    (s, m) => prop_assert!(false, "presence mismatch: {:?} vs {:?}", s, m),
                }
            }
        }

        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());

        let buckets = sut.bucket_count();
        prop_assert_eq!(buckets % config.initial_buckets, 0);
        prop_assert!((buckets / config.initial_buckets).is_power_of_two());

        let chained: usize = (0..buckets).map(|b| sut.chain_len(b)).sum();
        prop_assert_eq!(chained, sut.len());
    }

    for (k, v) in &model {
        prop_assert_eq!(sut.get(k), Some(v));
    }
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashMap with
// the default byte-span hash and tiny tables that grow repeatedly.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario(), config in arb_config()) {
        run_state_machine(OneAtATime, config, pool, ops)?;
    }
}

// Property: same invariants under heavy collisions (three distinct hashes),
// which stresses equality resolution along long chains.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario(), config in arb_config()) {
        let weak = |k: &String| (k.len() % 3) as u64;
        run_state_machine(weak, config, pool, ops)?;
    }
}
