#![allow(missing_docs)]

use std::collections::BTreeMap;

use nuon::primitives::skipmap::SkipMap;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Set(Vec<u8>, u32),
    Remove(Vec<u8>),
}

fn arb_key() -> impl Strategy<Value = Vec<u8>> {
    // Small alphabet so keys collide and share prefixes often.
    prop::collection::vec(prop::sample::select(vec![b'a', b'b', b':', b'0']), 0..5)
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (arb_key(), any::<u32>()).prop_map(|(k, v)| Op::Set(k, v)),
        1 => arb_key().prop_map(Op::Remove),
    ]
}

proptest! {
    #[test]
    fn behaves_like_an_ordered_map(
        ops in prop::collection::vec(arb_op(), 1..200),
        seed in any::<u64>(),
        levels in 1usize..=32,
    ) {
        let mut map = SkipMap::with_options(levels, Some(seed));
        let mut model = BTreeMap::new();

        for op in ops {
            match op {
                Op::Set(k, v) => {
                    let inserted = map.set(&k, v).unwrap();
                    prop_assert_eq!(inserted, model.insert(k.clone(), v).is_none());
                    prop_assert_eq!(map.get(&k), Some(&v));
                }
                Op::Remove(k) => {
                    prop_assert_eq!(map.remove(&k), model.remove(&k));
                    prop_assert_eq!(map.get(&k), None);
                }
            }
            prop_assert!(map.height() <= levels);
        }

        prop_assert_eq!(map.len(), model.len());
        let keys: Vec<&[u8]> = map.keys().collect();
        prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
        let got: Vec<(Vec<u8>, u32)> = map.iter().map(|(k, v)| (k.to_vec(), *v)).collect();
        let want: Vec<(Vec<u8>, u32)> = model.into_iter().collect();
        prop_assert_eq!(got, want);
    }

    #[test]
    fn replacing_keeps_iteration_position(
        keys in prop::collection::btree_set("[a-z]{1,6}", 1..40),
        pick in any::<prop::sample::Index>(),
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        let mut map = SkipMap::with_options(32, Some(9));
        for (i, k) in keys.iter().enumerate() {
            map.set(k.as_bytes(), i).unwrap();
        }
        let target = pick.get(&keys);
        prop_assert!(!map.set(target.as_bytes(), usize::MAX).unwrap());

        let order: Vec<&[u8]> = map.keys().collect();
        let expected: Vec<&[u8]> = keys.iter().map(|k| k.as_bytes()).collect();
        prop_assert_eq!(order, expected);
        prop_assert_eq!(map.get(target.as_bytes()), Some(&usize::MAX));
    }
}
