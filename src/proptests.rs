use super::*;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Deliberately not in code point order, so alphabet order is observable.
const CHARS: &str = "cab-";

fn alphabet() -> Arc<Alphabet> {
    Arc::new(Alphabet::new(CHARS).unwrap())
}

fn key_strategy() -> impl Strategy<Value = String> {
    "[-abc]{0,6}"
}

/// Queries may contain `x`, which is not declared.
fn query_strategy() -> impl Strategy<Value = String> {
    "[-abcx]{0,8}"
}

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    #[proptest(weight = 5)]
    Put(#[proptest(strategy = "key_strategy()")] String, u64),
    #[proptest(weight = 2)]
    Get(#[proptest(strategy = "query_strategy()")] String),
    #[proptest(weight = 2)]
    Prefix(
        #[proptest(strategy = "query_strategy()")] String,
        #[proptest(strategy = "prop::option::of(0usize..8)")] Option<usize>,
    ),
    #[proptest(weight = 1)]
    Longest(#[proptest(strategy = "query_strategy()")] String),
}

/// Enumeration order of the trie: lexicographic over alphabet indices.
fn sort_key(a: &Alphabet, key: &str) -> Vec<usize> {
    key.chars().map(|c| a.to_index(c)).collect()
}

fn model_prefix(a: &Alphabet, m: &BTreeMap<String, u64>, prefix: &str) -> Vec<String> {
    let mut keys: Vec<String> = m.keys().filter(|k| k.starts_with(prefix)).cloned().collect();
    keys.sort_by_key(|k| sort_key(a, k));
    keys
}

fn model_longest<'q>(m: &BTreeMap<String, u64>, query: &'q str) -> &'q str {
    m.keys()
        .filter(|k| query.starts_with(k.as_str()))
        .map(|k| &query[..k.len()])
        .max_by_key(|p| p.len())
        .unwrap_or("")
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(ops in prop::collection::vec(any::<Op>(), 0..=500)) {
        let a = alphabet();
        let mut t: SymbolMap<u64> = SymbolMap::new(Arc::clone(&a));
        let mut m: BTreeMap<String, u64> = BTreeMap::new();
        let mut nodes = 0;

        for op in ops {
            match op {
                Op::Put(key, value) => {
                    prop_assert_eq!(t.put(&key, value), m.insert(key, value));
                    prop_assert!(t.node_count() >= nodes, "trie shrank");
                    nodes = t.node_count();
                }
                Op::Get(key) => {
                    prop_assert_eq!(t.get(&key), m.get(&key));
                    prop_assert_eq!(t.contains_key(&key), m.contains_key(&key));
                }
                Op::Prefix(prefix, limit) => {
                    let all = t.keys_with_prefix(&prefix, None);
                    prop_assert_eq!(&all, &model_prefix(&a, &m, &prefix));

                    let limited = t.keys_with_prefix(&prefix, limit);
                    if let Some(limit) = limit {
                        prop_assert_eq!(limited.len(), limit.min(all.len()));
                    }
                    prop_assert_eq!(&limited[..], &all[..limited.len()]);
                }
                Op::Longest(query) => {
                    prop_assert_eq!(t.longest_prefix_of(&query), model_longest(&m, &query));
                }
            }

            prop_assert_eq!(t.len(), m.len());
        }

        let issues = t.verify_integrity();
        prop_assert!(issues.is_empty(), "integrity issues: {:?}", issues);
        prop_assert_eq!(t.keys_with_prefix("", None), model_prefix(&a, &m, ""));
    }

    #[test]
    fn prop_inserted_key_is_its_own_longest_prefix(
        keys in prop::collection::vec(key_strategy(), 1..50),
    ) {
        let mut t: SymbolMap<()> = SymbolMap::new(alphabet());
        for key in &keys {
            t.put(key, ());
        }
        for key in &keys {
            prop_assert_eq!(t.longest_prefix_of(key), key.as_str());
        }
    }

    #[test]
    fn prop_alphabet_round_trip(chars in prop::collection::btree_set(any::<char>(), 0..64)) {
        let declared: String = chars.iter().collect();
        let a = Alphabet::new(&declared).unwrap();
        prop_assert_eq!(a.radix(), chars.len());
        for c in &chars {
            let i = a.to_index(*c);
            prop_assert_eq!(a.to_char(i), *c);
            prop_assert_eq!(a.to_index(a.to_char(i)), i);
        }
        prop_assert!(a.is_valid(&declared));
        prop_assert!(a.is_valid(""));
    }
}

#[test]
fn random_dictionary_matches_model() {
    let a = Arc::new(Alphabet::new("ABCDEFGHIJKLMNOPQRSTUVWXYZ '-").unwrap());
    let declared: Vec<char> = a.chars().collect();
    let mut rng = StdRng::seed_from_u64(0x5eed);

    let mut t: SymbolMap<u64> = SymbolMap::new(Arc::clone(&a));
    let mut m: BTreeMap<String, u64> = BTreeMap::new();
    for offset in 0..5_000u64 {
        let len = rng.gen_range(1..10);
        let key: String = (0..len)
            .map(|_| declared[rng.gen_range(0..declared.len())])
            .collect();
        assert_eq!(t.put(&key, offset), m.insert(key, offset));
    }

    assert_eq!(t.len(), m.len());
    assert!(t.verify_integrity().is_empty());
    for (key, value) in &m {
        assert_eq!(t.get(key), Some(value));
    }
    let got: Vec<(String, u64)> = t.iter().map(|(k, v)| (k, *v)).collect();
    let mut expected: Vec<(String, u64)> = m.into_iter().collect();
    expected.sort_by_key(|(k, _)| sort_key(&a, k));
    assert_eq!(got, expected);
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

#[test]
fn exhaustive_insert_order_small_set() {
    let keys = ["a", "b", "c", "aa", "ab", "ba"];

    for_each_permutation(&keys, |perm| {
        let mut t: SymbolMap<usize> = SymbolMap::new(alphabet());
        for k in &perm {
            t.put(k, k.len());
        }

        assert!(t.verify_integrity().is_empty());
        assert_eq!(t.node_count(), 7);
        assert_eq!(
            t.keys_with_prefix("", None),
            vec!["c", "a", "aa", "ab", "b", "ba"]
        );
        assert_eq!(t.longest_prefix_of("abc"), "ab");
        assert_eq!(t.longest_prefix_of("-a"), "");
    });
}
