use llrb_collections::{Error, LlrbMap};
use proptest::prelude::*;
use std::collections::BTreeMap as StdMap;

mod common;
use common::*;

type U16Pairs = Vec<(u16, u16)>;

#[derive(Clone)]
struct Maps<K, V> {
    llrb_map: LlrbMap<K, V>,
    std_map: StdMap<K, V>,
}

impl<K, V> Maps<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    fn new(v: Vec<(K, V)>) -> Maps<K, V> {
        Maps {
            llrb_map: LlrbMap::from_iter(v.clone()),
            std_map: StdMap::from_iter(v),
        }
    }

    fn chk(&self)
    where
        K: Eq + std::fmt::Debug,
        V: Eq + std::fmt::Debug,
    {
        assert_eq!(self.llrb_map.len(), self.std_map.len());
        assert_eq_iters(self.llrb_map.iter(), self.std_map.iter());
        self.llrb_map.check().unwrap();
    }
}

fn check_build(v: U16Pairs) {
    Maps::new(v).chk();
}

fn check_insert(u: U16Pairs, v: U16Pairs) {
    let mut maps = Maps::new(u);

    for (k, x) in v {
        assert_eq!(maps.llrb_map.insert(k, x), maps.std_map.insert(k, x));
    }

    maps.chk();
}

fn check_remove(u: U16Pairs, v: Vec<u16>) {
    let mut maps = Maps::new(u);

    for k in v {
        assert_eq!(maps.llrb_map.remove(&k), maps.std_map.remove(&k));
        maps.llrb_map.check().unwrap();
    }

    maps.chk();
}

fn check_get(u: U16Pairs) {
    let maps = Maps::new(u);

    for k in 0..1024 {
        assert_eq!(
            maps.llrb_map.get(&k).ok(),
            maps.std_map.get(&k),
            "get({})",
            k
        );
        assert_eq!(maps.llrb_map.contains(&k), maps.std_map.contains_key(&k));
    }
}

fn check_min_max(u: U16Pairs) {
    let maps = Maps::new(u);

    let std_min = maps.std_map.keys().next();
    let std_max = maps.std_map.keys().next_back();
    assert_eq!(maps.llrb_map.min().ok(), std_min);
    assert_eq!(maps.llrb_map.max().ok(), std_max);

    if maps.std_map.is_empty() {
        assert_eq!(maps.llrb_map.min(), Err(Error::EmptyTree));
    }
}

fn check_remove_all_in_order((v, order): (Vec<u16>, Vec<u16>)) {
    let mut m: LlrbMap<_, _> = v.iter().map(|&k| (k, k)).collect();

    for k in order {
        m.remove(&k);
        m.check().unwrap();
        assert!(!m.contains(&k));
    }

    assert!(m.is_empty());
    assert_eq!(m.height(), 0);
}

fn check_height(v: Vec<u16>) {
    let m: LlrbMap<_, _> = v.into_iter().map(|k| (k, ())).collect();
    let bound = 2.0 * ((m.len() + 1) as f64).log2();
    assert!(m.height() as f64 <= bound);
}

fn check_string_keys(v: Vec<(String, u16)>) {
    let mut maps = Maps::new(v.clone());
    maps.chk();

    for (k, _) in v.iter().step_by(2) {
        assert_eq!(
            maps.llrb_map.remove(k.as_str()),
            maps.std_map.remove(k.as_str())
        );
    }

    maps.chk();
}

#[test]
fn test_clone_is_independent() {
    let m1 = LlrbMap::from([(1, "a"), (2, "b"), (3, "c")]);
    let mut m2 = m1.clone();
    m2.insert(4, "d");
    m2.remove(&1);

    assert!(m1.keys().copied().eq([1, 2, 3]));
    assert!(m2.keys().copied().eq([2, 3, 4]));
    assert_ne!(m1, m2);
}

#[test]
fn test_index() {
    let m = LlrbMap::from([(1, "a"), (2, "b")]);
    assert_eq!(m[&2], "b");
}

#[test]
#[should_panic]
fn test_index_absent() {
    let m = LlrbMap::from([(1, "a")]);
    let _ = m[&7];
}

proptest! {
    #[test]
    fn test_build(v in small_int_pairs()) {
        check_build(v);
    }

    #[test]
    fn test_insert(u in small_int_pairs(), v in small_int_pairs()) {
        check_insert(u, v);
    }

    #[test]
    fn test_remove(u in small_int_pairs(), v in small_ints()) {
        check_remove(u, v);
    }

    #[test]
    fn test_get(u in small_int_pairs()) {
        check_get(u);
    }

    #[test]
    fn test_min_max(u in small_int_pairs()) {
        check_min_max(u);
    }

    #[test]
    fn test_remove_all_in_order(vs in ints_and_shuffle()) {
        check_remove_all_in_order(vs);
    }

    #[test]
    fn test_height(v in small_ints()) {
        check_height(v);
    }

    #[test]
    fn test_string_keys(v in string_u16_pairs()) {
        check_string_keys(v);
    }
}
