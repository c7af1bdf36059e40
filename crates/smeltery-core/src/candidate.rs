//! Candidate recipe grouping.
//!
//! Every result-eligible, in-scope recipe whose result is itself consumed as
//! an ingredient contributes one alternative ingredient set for that result.
//! Alternatives are kept minimal: for one result, no stored set is a strict
//! superset of another, and no two stored sets are equal.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::ClassifierConfig;
use crate::filter::RecipeScan;
use crate::id::{ItemId, RecordRef};
use crate::registry::Registry;

/// The ingredients of one recipe, deduplicated.
pub type IngredientSet = BTreeSet<ItemId>;

/// Result item -> minimal alternative ingredient sets. Iterates in ascending
/// item order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateIndex {
    entries: BTreeMap<ItemId, Vec<IngredientSet>>,
}

impl CandidateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer one alternative for `result`.
    ///
    /// Rejected if an existing alternative is a subset of (or equal to)
    /// `ingredients`. When accepted, existing alternatives that are strict
    /// supersets of `ingredients` are dropped. Returns whether the set was
    /// stored.
    pub fn insert(&mut self, result: ItemId, ingredients: IngredientSet) -> bool {
        let alternatives = self.entries.entry(result).or_default();
        if alternatives.iter().any(|existing| existing.is_subset(&ingredients)) {
            return false;
        }
        alternatives.retain(|existing| !ingredients.is_subset(existing));
        alternatives.push(ingredients);
        true
    }

    pub fn get(&self, result: ItemId) -> Option<&[IngredientSet]> {
        self.entries.get(&result).map(Vec::as_slice)
    }

    pub fn remove(&mut self, result: ItemId) -> Option<Vec<IngredientSet>> {
        self.entries.remove(&result)
    }

    pub fn contains(&self, result: ItemId) -> bool {
        self.entries.contains_key(&result)
    }

    /// Snapshot of the results currently in the index, ascending.
    pub fn results(&self) -> Vec<ItemId> {
        self.entries.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &[IngredientSet])> {
        self.entries.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    /// Number of distinct results.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of stored alternatives across all results.
    pub fn alternative_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

/// Output of [`group_candidates`].
#[derive(Debug, Clone, Default)]
pub struct CandidateGrouping {
    pub index: CandidateIndex,
    /// In-scope recipes crafted at a result-eligible station, whether or not
    /// their result turned out to be an intermediate item.
    pub candidate_recipes: usize,
}

/// Collect the ingredients of a recipe as resolved items. Unresolvable
/// references are skipped; keyword and seed filters do not apply here.
pub fn ingredient_set(registry: &Registry, ingredients: &[RecordRef]) -> IngredientSet {
    ingredients
        .iter()
        .filter_map(|r| registry.resolve(*r))
        .collect()
}

/// Build the candidate index from a recipe scan.
pub fn group_candidates(
    registry: &Registry,
    scan: &RecipeScan,
    config: &ClassifierConfig,
) -> CandidateGrouping {
    let mut grouping = CandidateGrouping::default();

    for &id in &scan.in_scope {
        let Some(recipe) = registry.get_recipe(id) else {
            continue;
        };
        if !config.is_result_station(recipe.station) {
            continue;
        }
        grouping.candidate_recipes += 1;

        let Some(result) = registry.resolve(recipe.result) else {
            continue;
        };
        if !scan.ingredients.contains(&result) {
            continue;
        }

        grouping
            .index
            .insert(result, ingredient_set(registry, &recipe.ingredients));
    }

    grouping
}
