//! End-to-end classification over one registry snapshot.
//!
//! scan -> group -> fixed point. Emission is left to the caller so that the
//! report can be inspected before anything is written.

use tracing::info;

use crate::candidate::{CandidateIndex, group_candidates};
use crate::classifier::{Classification, Promotion, classify_candidates};
use crate::config::ClassifierConfig;
use crate::filter::scan_recipes;
use crate::id::ItemId;
use crate::material::MaterialSets;
use crate::registry::Registry;

/// Outcome of [`classify`], with the diagnostic counts from each stage.
#[derive(Debug, Clone)]
pub struct ClassificationReport {
    pub classification: Classification,
    /// Recipes at an allowed station whose result was not yet a material.
    pub in_scope_recipes: usize,
    /// In-scope recipes at a result-eligible station.
    pub candidate_recipes: usize,
    /// Distinct unclassified, non-forbidden ingredients of in-scope recipes.
    pub ingredient_universe: usize,
    /// Distinct intermediate results considered by the fixed point.
    pub candidate_outputs: usize,
    /// Intermediate results that never qualified for either tier.
    pub unclassified: CandidateIndex,
    /// Seed materials plus everything promoted.
    pub materials: MaterialSets,
}

impl ClassificationReport {
    pub fn newly_basic(&self) -> &[ItemId] {
        &self.classification.newly_basic
    }

    pub fn newly_rare(&self) -> &[ItemId] {
        &self.classification.newly_rare
    }

    pub fn promotions(&self) -> &[Promotion] {
        &self.classification.promotions
    }

    pub fn passes(&self) -> u32 {
        self.classification.passes
    }
}

/// Classify every intermediate item reachable from the seed materials.
pub fn classify(
    registry: &Registry,
    seeds: MaterialSets,
    config: &ClassifierConfig,
) -> ClassificationReport {
    let mut materials = seeds;

    info!("building a list of candidate recipes and the ingredients in use");
    let scan = scan_recipes(registry, &materials, config);

    let grouping = group_candidates(registry, &scan, config);
    info!(
        in_scope = scan.in_scope.len(),
        candidates = grouping.candidate_recipes,
        ingredients = scan.ingredients.len(),
        "found candidate recipes and candidate ingredients"
    );

    let mut index = grouping.index;
    let candidate_outputs = index.len();
    info!(
        outputs = candidate_outputs,
        alternatives = index.alternative_count(),
        "grouped recipes by intermediate result"
    );

    let classification = classify_candidates(&mut index, &mut materials);
    info!(
        basic = classification.newly_basic.len(),
        rare = classification.newly_rare.len(),
        passes = classification.passes,
        unclassified = index.len(),
        "classification reached a fixed point"
    );

    ClassificationReport {
        classification,
        in_scope_recipes: scan.in_scope.len(),
        candidate_recipes: grouping.candidate_recipes,
        ingredient_universe: scan.ingredients.len(),
        candidate_outputs,
        unclassified: index,
        materials,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Tier;
    use crate::test_utils::*;

    #[test]
    fn steel_becomes_basic_and_sword_is_ignored() {
        let mut f = Fixture::new();
        let iron = f.item("iron_ingot");
        f.item("silver_ingot");
        let steel = f.item("steel_ingot");
        let sword = f.item("steel_sword");
        f.recipe("steel", steel, &[iron], FORGE);
        f.recipe("sword", sword, &[steel], FORGE);
        let (reg, mats, cfg) = f.build(&["iron_ingot"], &["silver_ingot"]);

        let report = classify(&reg, mats, &cfg);
        assert_eq!(report.newly_basic(), &[reg.resolve(steel).unwrap()]);
        assert!(report.newly_rare().is_empty());
        assert_eq!(report.materials.tier(reg.resolve(sword).unwrap()), None);
        assert_eq!(report.candidate_outputs, 1);
        assert_eq!(report.in_scope_recipes, 2);
        assert_eq!(report.ingredient_universe, 1);
    }

    #[test]
    fn alloy_becomes_rare() {
        let mut f = Fixture::new();
        let iron = f.item("iron_ingot");
        let silver = f.item("silver_ingot");
        let alloy = f.item("alloy");
        let blade = f.item("alloy_blade");
        f.recipe("alloy", alloy, &[iron, silver], FORGE);
        f.recipe("blade", blade, &[alloy], FORGE);
        let (reg, mats, cfg) = f.build(&["iron_ingot"], &["silver_ingot"]);

        let report = classify(&reg, mats, &cfg);
        assert!(report.newly_basic().is_empty());
        assert_eq!(report.newly_rare(), &[reg.resolve(alloy).unwrap()]);
        assert_eq!(report.promotions()[0].tier, Tier::Rare);
    }

    #[test]
    fn nothing_to_classify_is_a_valid_outcome() {
        let mut f = Fixture::new();
        f.item("iron_ingot");
        let (reg, mats, cfg) = f.build(&["iron_ingot"], &[]);

        let report = classify(&reg, mats, &cfg);
        assert!(report.classification.is_empty());
        assert_eq!(report.passes(), 1);
        assert!(report.unclassified.is_empty());
        assert_eq!(report.materials.len(), 1);
    }

    #[test]
    fn unclassified_outputs_are_reported() {
        let mut f = Fixture::new();
        let ebony = f.item("ebony_ore");
        let ingot = f.item("ebony_ingot");
        let sword = f.item("ebony_sword");
        f.recipe("ebony", ingot, &[ebony], SMELTER);
        f.recipe("sword", sword, &[ingot], FORGE);
        let (reg, mats, cfg) = f.build(&[], &[]);

        let report = classify(&reg, mats, &cfg);
        assert!(report.classification.is_empty());
        assert_eq!(report.unclassified.results(), vec![reg.resolve(ingot).unwrap()]);
    }
}
