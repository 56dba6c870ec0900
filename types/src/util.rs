use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// Rounds `i` up to a multiple of 4, or `None` if the result does not fit in an `i64`.
///
/// Division truncates towards zero, so negative inputs round towards zero
/// as well: `round_up_to_4(-5) == Some(0)`.
pub fn round_up_to_4(i: i64) -> Option<i64> {
    Some(i.checked_add(3)? / 4 * 4)
}

/// Sets `map[key]` to `value`, unless the map already holds a larger value there.
pub fn dict_set_max<K: Ord, V: Ord>(map: &mut BTreeMap<K, V>, key: K, value: V) {
    match map.entry(key) {
        Entry::Occupied(mut e) => {
            if value > *e.get() {
                e.insert(value);
            }
        }
        Entry::Vacant(e) => {
            e.insert(value);
        }
    }
}

#[test]
fn test_round_up_to_4() {
    assert_eq!(round_up_to_4(0), Some(0));
    assert_eq!(round_up_to_4(1), Some(4));
    assert_eq!(round_up_to_4(4), Some(4));
    assert_eq!(round_up_to_4(5), Some(8));
    assert_eq!(round_up_to_4(-5), Some(0));
    for i in 0..100 {
        let r = round_up_to_4(i).unwrap();
        assert_eq!(r % 4, 0);
        assert!(r >= i);
        assert!(r - i < 4);
        assert_eq!(round_up_to_4(r), Some(r));
    }
}

#[test]
fn test_round_up_to_4_limits() {
    let top = i64::MAX / 4 * 4;
    assert_eq!(round_up_to_4(top), Some(top));
    assert_eq!(round_up_to_4(top - 3), Some(top));
    for i in top + 1..=i64::MAX {
        assert_eq!(round_up_to_4(i), None);
    }
    assert_eq!(round_up_to_4(i64::MIN), Some(i64::MIN + 4));
}

#[test]
fn test_dict_set_max() {
    let mut m = BTreeMap::new();
    dict_set_max(&mut m, "a", 3);
    assert_eq!(m["a"], 3);
    dict_set_max(&mut m, "a", 7);
    assert_eq!(m["a"], 7);
    dict_set_max(&mut m, "a", 5);
    assert_eq!(m["a"], 7);
    dict_set_max(&mut m, "b", -1);
    assert_eq!(m["b"], -1);
    assert_eq!(m.len(), 2);
}
