//! Recipe filter and ingredient collector.
//!
//! Selects the recipes that can matter for classification and gathers the
//! universe of ingredient items those recipes consume.

use std::collections::BTreeSet;

use crate::config::ClassifierConfig;
use crate::id::{ItemId, RecipeId};
use crate::material::MaterialSets;
use crate::registry::Registry;

/// Output of [`scan_recipes`].
#[derive(Debug, Clone, Default)]
pub struct RecipeScan {
    /// Recipes crafted at an allowed station whose result is not yet a
    /// material, in registration order. A result that does not resolve is
    /// never a material, so its recipe stays in scope.
    pub in_scope: Vec<RecipeId>,
    /// Distinct unclassified items consumed by in-scope recipes, minus any
    /// item carrying a forbidden keyword.
    pub ingredients: BTreeSet<ItemId>,
}

/// Scan every recipe in the registry.
///
/// Ingredient references that do not resolve are skipped. A recipe whose
/// result does not resolve is still in scope and its ingredients still count;
/// only the grouper needs the result as an item.
pub fn scan_recipes(
    registry: &Registry,
    materials: &MaterialSets,
    config: &ClassifierConfig,
) -> RecipeScan {
    let mut scan = RecipeScan::default();
    let forbidden = config.forbidden_ingredient_keywords();

    for (id, recipe) in registry.recipes() {
        if !config.is_allowed_station(recipe.station) {
            continue;
        }
        if registry
            .resolve(recipe.result)
            .is_some_and(|result| materials.contains(result))
        {
            continue;
        }

        for &ingredient in &recipe.ingredients {
            let Some(item) = registry.resolve(ingredient) else {
                continue;
            };
            if registry.has_any_keyword(item, forbidden) || materials.contains(item) {
                continue;
            }
            scan.ingredients.insert(item);
        }

        scan.in_scope.push(id);
    }

    scan
}
