//! Fixed-point tier classification.
//!
//! Each candidate result is an OR over its alternative ingredient sets, and
//! each alternative is an AND over its ingredients. Passes repeat over the
//! candidate index until one pass promotes nothing. Within a pass a result is
//! promoted to basic if some alternative is entirely basic, otherwise to rare
//! if some alternative is entirely basic or rare. Promotions are visible to
//! the rest of the same pass.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::candidate::{CandidateIndex, IngredientSet};
use crate::id::ItemId;
use crate::material::{MaterialSets, Tier};

/// One classification decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Promotion {
    pub item: ItemId,
    pub tier: Tier,
    /// 1-indexed pass in which the promotion happened.
    pub pass: u32,
    /// The alternative that qualified the item.
    pub justification: IngredientSet,
}

/// Everything the classifier decided, in promotion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub newly_basic: Vec<ItemId>,
    pub newly_rare: Vec<ItemId>,
    pub promotions: Vec<Promotion>,
    /// Passes executed, including the final pass that promoted nothing.
    pub passes: u32,
}

impl Classification {
    pub fn is_empty(&self) -> bool {
        self.promotions.is_empty()
    }
}

/// Run the fixed point. Promoted results are removed from `index` and added
/// to `materials`; results that never qualify stay in `index`.
pub fn classify_candidates(index: &mut CandidateIndex, materials: &mut MaterialSets) -> Classification {
    let mut out = Classification::default();

    loop {
        out.passes += 1;
        let pass = out.passes;
        let mut changed = false;

        for result in index.results() {
            let Some((tier, justification)) = index
                .get(result)
                .and_then(|alternatives| qualify(alternatives, materials))
            else {
                continue;
            };

            index.remove(result);
            if !materials.promote(result, tier) {
                // Already classified by another route; nothing to record.
                continue;
            }
            changed = true;
            debug!(item = result.0, ?tier, pass, "promoted");

            match tier {
                Tier::Basic => out.newly_basic.push(result),
                Tier::Rare => out.newly_rare.push(result),
            }
            out.promotions.push(Promotion {
                item: result,
                tier,
                pass,
                justification,
            });
        }

        if !changed {
            return out;
        }
    }
}

/// Pick the tier an output qualifies for, basic first.
fn qualify(alternatives: &[IngredientSet], materials: &MaterialSets) -> Option<(Tier, IngredientSet)> {
    if let Some(set) = alternatives.iter().find(|s| materials.covers_basic(s)) {
        return Some((Tier::Basic, set.clone()));
    }
    alternatives
        .iter()
        .find(|s| materials.covers_classified(s))
        .map(|set| (Tier::Rare, set.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[u32]) -> IngredientSet {
        items.iter().map(|&i| ItemId(i)).collect()
    }

    fn index(entries: &[(u32, &[&[u32]])]) -> CandidateIndex {
        let mut index = CandidateIndex::new();
        for (result, alternatives) in entries {
            for alt in *alternatives {
                index.insert(ItemId(*result), set(alt));
            }
        }
        index
    }

    #[test]
    fn single_basic_ingredient_promotes_to_basic() {
        let mut idx = index(&[(10, &[&[0]])]);
        let mut mats = MaterialSets::from_items([ItemId(0)], []);
        let out = classify_candidates(&mut idx, &mut mats);
        assert_eq!(out.newly_basic, vec![ItemId(10)]);
        assert!(out.newly_rare.is_empty());
        assert!(idx.is_empty());
        assert_eq!(mats.tier(ItemId(10)), Some(Tier::Basic));
    }

    #[test]
    fn mixed_ingredients_promote_to_rare() {
        let mut idx = index(&[(10, &[&[0, 1]])]);
        let mut mats = MaterialSets::from_items([ItemId(0)], [ItemId(1)]);
        let out = classify_candidates(&mut idx, &mut mats);
        assert!(out.newly_basic.is_empty());
        assert_eq!(out.newly_rare, vec![ItemId(10)]);
    }

    #[test]
    fn basic_wins_when_both_qualify() {
        // One all-rare alternative and one all-basic alternative.
        let mut idx = index(&[(10, &[&[1], &[0]])]);
        let mut mats = MaterialSets::from_items([ItemId(0)], [ItemId(1)]);
        let out = classify_candidates(&mut idx, &mut mats);
        assert_eq!(out.newly_basic, vec![ItemId(10)]);
        assert_eq!(out.promotions[0].justification, set(&[0]));
    }

    #[test]
    fn promotions_chain_through_passes() {
        // 12 needs 11, 11 needs 10, 10 needs seed 0. Ascending order lets the
        // whole chain resolve in the first pass.
        let mut idx = index(&[(10, &[&[0]]), (11, &[&[10]]), (12, &[&[11]])]);
        let mut mats = MaterialSets::from_items([ItemId(0)], []);
        let out = classify_candidates(&mut idx, &mut mats);
        assert_eq!(out.newly_basic, vec![ItemId(10), ItemId(11), ItemId(12)]);
        assert_eq!(out.passes, 2);
    }

    #[test]
    fn reverse_chain_needs_more_passes() {
        let mut idx = index(&[(10, &[&[11]]), (11, &[&[12]]), (12, &[&[0]])]);
        let mut mats = MaterialSets::from_items([ItemId(0)], []);
        let out = classify_candidates(&mut idx, &mut mats);
        assert_eq!(out.newly_basic, vec![ItemId(12), ItemId(11), ItemId(10)]);
        assert_eq!(out.passes, 4);
        let passes: Vec<u32> = out.promotions.iter().map(|p| p.pass).collect();
        assert_eq!(passes, vec![1, 2, 3]);
    }

    #[test]
    fn rare_propagates_downstream() {
        // 10 = basic + rare -> rare; 11 = 10 + basic -> rare.
        let mut idx = index(&[(10, &[&[0, 1]]), (11, &[&[10, 0]])]);
        let mut mats = MaterialSets::from_items([ItemId(0)], [ItemId(1)]);
        let out = classify_candidates(&mut idx, &mut mats);
        assert_eq!(out.newly_rare, vec![ItemId(10), ItemId(11)]);
    }

    #[test]
    fn unreachable_outputs_stay_in_index() {
        let mut idx = index(&[(10, &[&[5]]), (11, &[&[10]]), (12, &[&[0]])]);
        let mut mats = MaterialSets::from_items([ItemId(0)], []);
        let out = classify_candidates(&mut idx, &mut mats);
        assert_eq!(out.newly_basic, vec![ItemId(12)]);
        assert_eq!(idx.results(), vec![ItemId(10), ItemId(11)]);
        assert!(!mats.contains(ItemId(10)));
    }

    #[test]
    fn cycles_without_a_seeded_entry_never_promote() {
        let mut idx = index(&[(10, &[&[11]]), (11, &[&[10]])]);
        let mut mats = MaterialSets::from_items([ItemId(0)], []);
        let out = classify_candidates(&mut idx, &mut mats);
        assert!(out.is_empty());
        assert_eq!(out.passes, 1);
        assert_eq!(idx.len(), 2);
    }

    #[test]
    fn empty_alternative_is_basic() {
        let mut idx = index(&[(10, &[&[]])]);
        let mut mats = MaterialSets::new();
        let out = classify_candidates(&mut idx, &mut mats);
        assert_eq!(out.newly_basic, vec![ItemId(10)]);
    }

    #[test]
    fn already_classified_result_is_dropped_silently() {
        let mut idx = index(&[(10, &[&[0]])]);
        let mut mats = MaterialSets::from_items([ItemId(0)], [ItemId(10)]);
        let out = classify_candidates(&mut idx, &mut mats);
        assert!(out.is_empty());
        assert!(idx.is_empty());
        assert_eq!(mats.tier(ItemId(10)), Some(Tier::Rare));
    }

    #[test]
    fn empty_index_takes_one_pass() {
        let mut idx = CandidateIndex::new();
        let mut mats = MaterialSets::new();
        let out = classify_candidates(&mut idx, &mut mats);
        assert!(out.is_empty());
        assert_eq!(out.passes, 1);
    }
}
