//! Hash collections used by the item and kind registries.
//!
//! Item ids are toolkit-generated integers and kind names are short static
//! strings, so AHash is used in place of SipHash for every lookup table.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashmap_u64_keys() {
        let mut map = HashMap::new();
        map.insert(42u64, "window");
        map.insert(43u64, "button");
        assert_eq!(map.get(&42), Some(&"window"));
        assert_eq!(map.remove(&43), Some("button"));
        assert!(!map.contains_key(&43));
    }

    #[test]
    fn test_hashset_str_keys() {
        let mut set = HashSet::new();
        set.insert("label");
        assert!(set.contains("label"));
        assert!(!set.contains("width"));
    }
}
