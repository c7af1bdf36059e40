use serde::{Deserialize, Serialize};

/// Raw reference to a record in the registry. May dangle, and may name a
/// record that is not an item; resolve it with [`crate::registry::Registry::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordRef(pub u32);

/// A resolved, constructible item. Cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

/// Identifies a keyword (item tag or crafting station) in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct KeywordId(pub u32);

/// Identifies a recipe in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecipeId(pub u32);

impl ItemId {
    /// The record reference this item was resolved from.
    pub fn record_ref(self) -> RecordRef {
        RecordRef(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_id_equality() {
        let a = ItemId(0);
        let b = ItemId(0);
        let c = ItemId(1);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn item_id_maps_back_to_record_ref() {
        assert_eq!(ItemId(7).record_ref(), RecordRef(7));
    }

    #[test]
    fn ids_are_ordered() {
        let mut ids = vec![ItemId(3), ItemId(1), ItemId(2)];
        ids.sort();
        assert_eq!(ids, vec![ItemId(1), ItemId(2), ItemId(3)]);
    }

    #[test]
    fn ids_are_hashable() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(KeywordId(0), "CraftingSmelter");
        map.insert(KeywordId(1), "CraftingSmithingForge");
        assert_eq!(map[&KeywordId(0)], "CraftingSmelter");
    }
}
