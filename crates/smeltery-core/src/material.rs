//! Basic and rare material sets.
//!
//! Both sets only ever grow. An item is in at most one of them: seeds listed
//! in both lists stay basic, and [`MaterialSets::promote`] refuses items that
//! already carry a tier.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::candidate::IngredientSet;
use crate::id::{ItemId, RecordRef};
use crate::registry::Registry;

/// Raw-material tier. An item without a tier is unclassified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Basic,
    Rare,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialSets {
    basic: BTreeSet<ItemId>,
    rare: BTreeSet<ItemId>,
    /// Seeds that were listed as both basic and rare.
    overlap: Vec<ItemId>,
}

impl MaterialSets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from already-resolved items.
    pub fn from_items(
        basic: impl IntoIterator<Item = ItemId>,
        rare: impl IntoIterator<Item = ItemId>,
    ) -> Self {
        let basic: BTreeSet<ItemId> = basic.into_iter().collect();
        let mut rare_set = BTreeSet::new();
        let mut overlap = Vec::new();
        for item in rare {
            if basic.contains(&item) {
                if !overlap.contains(&item) {
                    overlap.push(item);
                }
            } else {
                rare_set.insert(item);
            }
        }
        Self {
            basic,
            rare: rare_set,
            overlap,
        }
    }

    /// Seed from raw references. References that do not resolve to an item
    /// are skipped.
    pub fn from_refs(
        registry: &Registry,
        basic: impl IntoIterator<Item = RecordRef>,
        rare: impl IntoIterator<Item = RecordRef>,
    ) -> Self {
        let resolve = |r: RecordRef, list: &'static str| {
            let item = registry.resolve(r);
            if item.is_none() {
                warn!(record = r.0, list, "seed material does not resolve to an item, skipping");
            }
            item
        };
        let basic: Vec<ItemId> = basic.into_iter().filter_map(|r| resolve(r, "basic")).collect();
        let rare: Vec<ItemId> = rare.into_iter().filter_map(|r| resolve(r, "rare")).collect();

        let sets = Self::from_items(basic, rare);
        for item in &sets.overlap {
            warn!(item = item.0, "seed material listed as both basic and rare, keeping basic");
        }
        sets
    }

    pub fn tier(&self, item: ItemId) -> Option<Tier> {
        if self.basic.contains(&item) {
            Some(Tier::Basic)
        } else if self.rare.contains(&item) {
            Some(Tier::Rare)
        } else {
            None
        }
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.tier(item).is_some()
    }

    pub fn is_basic(&self, item: ItemId) -> bool {
        self.basic.contains(&item)
    }

    /// True if every ingredient is basic.
    pub fn covers_basic(&self, ingredients: &IngredientSet) -> bool {
        ingredients.is_subset(&self.basic)
    }

    /// True if every ingredient is basic or rare.
    pub fn covers_classified(&self, ingredients: &IngredientSet) -> bool {
        ingredients.iter().all(|i| self.contains(*i))
    }

    /// Add an unclassified item to a tier. Returns `false`, leaving the sets
    /// untouched, if the item is already basic or rare.
    pub fn promote(&mut self, item: ItemId, tier: Tier) -> bool {
        if self.contains(item) {
            return false;
        }
        match tier {
            Tier::Basic => self.basic.insert(item),
            Tier::Rare => self.rare.insert(item),
        }
    }

    pub fn basic(&self) -> &BTreeSet<ItemId> {
        &self.basic
    }

    pub fn rare(&self) -> &BTreeSet<ItemId> {
        &self.rare
    }

    pub fn overlap(&self) -> &[ItemId] {
        &self.overlap
    }

    pub fn len(&self) -> usize {
        self.basic.len() + self.rare.len()
    }

    pub fn is_empty(&self) -> bool {
        self.basic.is_empty() && self.rare.is_empty()
    }
}
