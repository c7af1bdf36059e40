//! Property-based tests for the classifier.
//!
//! Uses proptest to generate synthetic catalogs and candidate insertion
//! sequences, then verifies the structural invariants of a run.

use std::collections::BTreeSet;

use proptest::prelude::*;
use smeltery_core::candidate::{CandidateIndex, IngredientSet, group_candidates};
use smeltery_core::filter::scan_recipes;
use smeltery_core::id::ItemId;
use smeltery_core::material::Tier;
use smeltery_core::pipeline::classify;
use smeltery_core::test_utils::*;

// ===========================================================================
// Generators
// ===========================================================================

fn arb_shape() -> impl Strategy<Value = CatalogShape> {
    (3..30usize, 1..40usize, 0..10usize, 1..4usize, 1..5usize).prop_map(
        |(raw, intermediates, finished, recipes_per_item, max_ingredients)| CatalogShape {
            raw,
            intermediates,
            finished,
            recipes_per_item,
            max_ingredients,
        },
    )
}

fn arb_ingredient_set() -> impl Strategy<Value = IngredientSet> {
    proptest::collection::btree_set((0..8u32).prop_map(ItemId), 0..5)
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Seeds are never removed, and nothing promoted was already a seed.
    #[test]
    fn materials_only_grow(seed in any::<u64>(), shape in arb_shape()) {
        let (reg, seeds, cfg) = synthetic_catalog(seed, shape);
        let report = classify(&reg, seeds.clone(), &cfg);

        prop_assert!(report.materials.basic().is_superset(seeds.basic()));
        prop_assert!(report.materials.rare().is_superset(seeds.rare()));
        for item in report.newly_basic().iter().chain(report.newly_rare()) {
            prop_assert!(!seeds.contains(*item), "{:?} was already seeded", item);
        }
    }

    /// No item is promoted into both tiers, or twice.
    #[test]
    fn new_tiers_are_disjoint(seed in any::<u64>(), shape in arb_shape()) {
        let (reg, seeds, cfg) = synthetic_catalog(seed, shape);
        let report = classify(&reg, seeds, &cfg);

        let basic: BTreeSet<_> = report.newly_basic().iter().copied().collect();
        let rare: BTreeSet<_> = report.newly_rare().iter().copied().collect();
        prop_assert_eq!(basic.len(), report.newly_basic().len());
        prop_assert_eq!(rare.len(), report.newly_rare().len());
        prop_assert!(basic.is_disjoint(&rare));
    }

    /// Running again on the post-run state finds nothing new.
    #[test]
    fn classification_is_idempotent(seed in any::<u64>(), shape in arb_shape()) {
        let (reg, seeds, cfg) = synthetic_catalog(seed, shape);
        let first = classify(&reg, seeds, &cfg);
        let second = classify(&reg, first.materials.clone(), &cfg);

        prop_assert!(second.classification.is_empty());
        prop_assert_eq!(second.materials, first.materials);
    }

    /// Replaying the promotions in order, every justification was covered
    /// at the moment it was used, and is a grouped alternative of its item.
    #[test]
    fn every_promotion_is_justified(seed in any::<u64>(), shape in arb_shape()) {
        let (reg, seeds, cfg) = synthetic_catalog(seed, shape);
        let scan = scan_recipes(&reg, &seeds, &cfg);
        let grouping = group_candidates(&reg, &scan, &cfg);
        let report = classify(&reg, seeds.clone(), &cfg);

        let mut replay = seeds;
        for p in report.promotions() {
            let alternatives = grouping.index.get(p.item).unwrap_or(&[]);
            prop_assert!(alternatives.contains(&p.justification));
            match p.tier {
                Tier::Basic => prop_assert!(replay.covers_basic(&p.justification)),
                Tier::Rare => {
                    prop_assert!(replay.covers_classified(&p.justification));
                    // Basic is preferred: no alternative was entirely basic.
                    prop_assert!(!alternatives.iter().any(|a| replay.covers_basic(a)));
                }
            }
            prop_assert!(replay.promote(p.item, p.tier));
        }
        prop_assert_eq!(replay, report.materials);
    }

    /// The set of classified items is the least fixed point of "some
    /// alternative is entirely classified", whatever the pass order.
    #[test]
    fn classified_set_matches_reference_closure(seed in any::<u64>(), shape in arb_shape()) {
        let (reg, seeds, cfg) = synthetic_catalog(seed, shape);
        let scan = scan_recipes(&reg, &seeds, &cfg);
        let index = group_candidates(&reg, &scan, &cfg).index;

        let mut classified: BTreeSet<ItemId> =
            seeds.basic().iter().chain(seeds.rare()).copied().collect();
        loop {
            let before = classified.len();
            for (item, alternatives) in index.iter() {
                if alternatives.iter().any(|a| a.is_subset(&classified)) {
                    classified.insert(item);
                }
            }
            if classified.len() == before {
                break;
            }
        }

        let report = classify(&reg, seeds, &cfg);
        let actual: BTreeSet<ItemId> = report
            .materials
            .basic()
            .iter()
            .chain(report.materials.rare())
            .copied()
            .collect();
        prop_assert_eq!(actual, classified);
    }

    /// Two runs over the same snapshot agree exactly.
    #[test]
    fn classification_is_deterministic(seed in any::<u64>(), shape in arb_shape()) {
        let (reg, seeds, cfg) = synthetic_catalog(seed, shape);
        let a = classify(&reg, seeds.clone(), &cfg);
        let b = classify(&reg, seeds, &cfg);
        prop_assert_eq!(a.classification, b.classification);
    }

    /// After any insertion sequence, no stored alternative contains another.
    #[test]
    fn candidate_alternatives_stay_minimal(
        inserts in proptest::collection::vec((0..3u32, arb_ingredient_set()), 0..40)
    ) {
        let mut index = CandidateIndex::new();
        for (result, set) in &inserts {
            index.insert(ItemId(*result), set.clone());
        }

        for (_, alternatives) in index.iter() {
            for (i, a) in alternatives.iter().enumerate() {
                for (j, b) in alternatives.iter().enumerate() {
                    if i != j {
                        prop_assert!(!a.is_subset(b), "{:?} is contained in {:?}", a, b);
                    }
                }
            }
        }

        // Every offered set is covered by some retained alternative.
        for (result, set) in &inserts {
            let alternatives = index.get(ItemId(*result)).unwrap_or(&[]);
            prop_assert!(alternatives.iter().any(|a| a.is_subset(set)));
        }
    }
}
