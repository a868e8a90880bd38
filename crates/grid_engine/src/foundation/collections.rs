//! Specialized collection types

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Generational key of an entity slot inside the scene registry.
    ///
    /// A key taken before the entity was destroyed never resolves to a
    /// different entity that later reuses the slot.
    pub struct EntityKey;
}

/// Handle-based map using slot map for stable references
pub type HandleMap<T> = SlotMap<EntityKey, T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_key_does_not_alias_reused_slot() {
        let mut map: HandleMap<&str> = HandleMap::with_key();
        let first = map.insert("first");
        map.remove(first);
        let second = map.insert("second");

        assert!(map.get(first).is_none());
        assert_eq!(map.get(second), Some(&"second"));
    }
}
