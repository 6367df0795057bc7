use proptest::prelude::*;

#[allow(dead_code)]
pub(super) fn assert_eq_iters<I: Iterator, J: Iterator<Item = I::Item>>(
    mut i: I,
    mut j: J,
) where
    I::Item: std::fmt::Debug + Eq, // same inferred for J::Item
{
    loop {
        match (i.next(), j.next()) {
            (None, None) => return,
            (a, b) => assert_eq!(a, b),
        }
    }
}

#[allow(dead_code)]
pub(super) type SmallIntPairs = Vec<(u16, u16)>;

#[allow(dead_code)]
pub(super) fn small_int_pairs() -> impl Strategy<Value = SmallIntPairs> {
    prop::collection::vec((0u16..1024u16, 0u16..1024u16), 0..512)
}

#[allow(dead_code)]
pub(super) fn small_ints() -> impl Strategy<Value = Vec<u16>> {
    prop::collection::vec(0u16..1024u16, 0..512)
}

#[allow(dead_code)]
pub(super) fn string_u16_pairs() -> impl Strategy<Value = Vec<(String, u16)>> {
    prop::collection::vec(("[a-z]{0,2}", 0u16..1024u16), 0..512)
}

/// An interleaving of inserts (`true`) and removes (`false`) over a narrow
/// key range, so that keys collide often.
#[allow(dead_code)]
pub(super) fn narrow_ops() -> impl Strategy<Value = Vec<(bool, u8, u16)>> {
    prop::collection::vec((any::<bool>(), 0u8..32, any::<u16>()), 0..512)
}

/// A vector together with one of its permutations.
#[allow(dead_code)]
pub(super) fn ints_and_shuffle() -> impl Strategy<Value = (Vec<u16>, Vec<u16>)> {
    small_ints().prop_flat_map(|v| {
        let shuffled = Just(v.clone()).prop_shuffle();
        (Just(v), shuffled)
    })
}
