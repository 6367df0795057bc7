use llrb_collections::{Error, LlrbSet};
use proptest::prelude::*;
use std::collections::BTreeSet as StdSet;

mod common;
use common::*;

#[derive(Clone, Debug)]
struct Sets<T> {
    llrb_set: LlrbSet<T>,
    std_set: StdSet<T>,
}

impl<T> Sets<T>
where
    T: Clone + Ord + std::fmt::Debug,
{
    fn new(v: Vec<T>) -> Sets<T> {
        Sets {
            llrb_set: LlrbSet::from_iter(v.clone()),
            std_set: StdSet::from_iter(v),
        }
    }

    fn chk(&self) {
        assert_eq!(self.llrb_set.len(), self.std_set.len());
        assert_eq_iters(self.llrb_set.iter(), self.std_set.iter());
        self.llrb_set.check().unwrap();
    }
}

fn check_insert(u: Vec<u16>, v: Vec<u16>) {
    let mut sets = Sets::new(u);

    for x in v {
        let expected = if sets.std_set.insert(x) {
            Ok(())
        } else {
            Err(Error::DuplicateKey)
        };
        assert_eq!(sets.llrb_set.insert(x), expected);
    }

    sets.chk();
}

fn check_remove(u: Vec<u16>, v: Vec<u16>) {
    let mut sets = Sets::new(u);

    for x in v {
        assert_eq!(sets.llrb_set.remove(&x), sets.std_set.remove(&x));
        sets.llrb_set.check().unwrap();
    }

    sets.chk();
}

fn check_get(u: Vec<u16>) {
    let sets = Sets::new(u);

    for x in 0..1024 {
        assert_eq!(sets.llrb_set.get(&x).ok(), sets.std_set.get(&x));
        assert_eq!(sets.llrb_set.contains(&x), sets.std_set.contains(&x));
    }

    assert_eq!(sets.llrb_set.min().ok(), sets.std_set.first());
    assert_eq!(sets.llrb_set.max().ok(), sets.std_set.last());
}

fn check_display(u: Vec<u16>) {
    let sets = Sets::new(u);
    let expected: Vec<String> = sets.std_set.iter().map(|x| format!("<{}>", x)).collect();
    assert_eq!(sets.llrb_set.to_string(), expected.join(" "));
}

#[test]
fn test_reference_scenario() {
    // the keys of the reference map scenario, inserted out of order
    let keys = [51, 2, 93, 42, 18, 99, 43, 74, 54];
    let mut sets = Sets::new(keys.to_vec());
    sets.chk();

    assert_eq!(sets.llrb_set.min(), Ok(&2));
    assert_eq!(sets.llrb_set.max(), Ok(&99));
    assert_eq!(sets.llrb_set.insert(74), Err(Error::DuplicateKey));

    for k in [54, 2, 99, 43, 18, 93, 51, 74, 42] {
        sets.llrb_set.remove(&k);
        sets.std_set.remove(&k);
        sets.chk();
    }

    assert_eq!(sets.llrb_set.max(), Err(Error::EmptyTree));
    assert_eq!(sets.llrb_set.get(&2), Err(Error::KeyNotFound));
}

proptest! {
    #[test]
    fn test_insert(u in small_ints(), v in small_ints()) {
        check_insert(u, v);
    }

    #[test]
    fn test_remove(u in small_ints(), v in small_ints()) {
        check_remove(u, v);
    }

    #[test]
    fn test_get(u in small_ints()) {
        check_get(u);
    }

    #[test]
    fn test_display(u in small_ints()) {
        check_display(u);
    }
}
