//! Shared test helpers for unit tests, integration tests, and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests, integration tests, and benchmarks (via the
//! `test-utils` feature).

use crate::config::ClassifierConfig;
use crate::id::*;
use crate::material::MaterialSets;
use crate::registry::{RecordKind, Registry, RegistryBuilder};

// ===========================================================================
// Keyword names
// ===========================================================================

pub const ARMOR_TABLE: &str = "CraftingSmithingArmorTable";
pub const FORGE: &str = "CraftingSmithingForge";
pub const SHARPENING_WHEEL: &str = "CraftingSmithingSharpeningWheel";
pub const TANNING_RACK: &str = "CraftingTanningRack";
pub const SKYFORGE: &str = "CraftingSmithingSkyforge";
pub const SMELTER: &str = "CraftingSmelter";
/// A station that is not allowed by the smithing configuration.
pub const COOKING_POT: &str = "CraftingCookpot";

pub const JEWELRY_EXPENSIVE: &str = "JewelryExpensive";
pub const VENDOR_ITEM_ARROW: &str = "VendorItemArrow";

pub const ALLOWED_STATIONS: [&str; 6] = [
    ARMOR_TABLE,
    FORGE,
    SHARPENING_WHEEL,
    TANNING_RACK,
    SKYFORGE,
    SMELTER,
];
pub const RESULT_STATIONS: [&str; 3] = [FORGE, TANNING_RACK, SMELTER];
pub const FORBIDDEN_KEYWORDS: [&str; 2] = [JEWELRY_EXPENSIVE, VENDOR_ITEM_ARROW];

/// The smithing configuration, resolved against `registry`. Keywords the
/// registry does not know are left out.
pub fn smithing_config(registry: &Registry) -> ClassifierConfig {
    let ids = |names: &[&str]| -> Vec<KeywordId> {
        names.iter().filter_map(|n| registry.keyword_id(n)).collect()
    };
    ClassifierConfig::new(
        ids(&ALLOWED_STATIONS),
        ids(&RESULT_STATIONS),
        ids(&FORBIDDEN_KEYWORDS),
    )
    .unwrap()
}

// ===========================================================================
// Fixture
// ===========================================================================

/// Registry builder preloaded with the smithing keywords.
pub struct Fixture {
    pub builder: RegistryBuilder,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    pub fn new() -> Self {
        let mut builder = RegistryBuilder::new();
        for name in ALLOWED_STATIONS
            .iter()
            .chain(FORBIDDEN_KEYWORDS.iter())
            .chain([COOKING_POT].iter())
        {
            builder.register_keyword(name);
        }
        Self { builder }
    }

    pub fn item(&mut self, name: &str) -> RecordRef {
        self.builder.register_item(name, vec![])
    }

    pub fn tagged_item(&mut self, name: &str, keywords: &[&str]) -> RecordRef {
        let keywords = keywords
            .iter()
            .map(|k| self.builder.register_keyword(k))
            .collect();
        self.builder.register_item(name, keywords)
    }

    /// A record that never resolves to an item.
    pub fn other(&mut self, name: &str) -> RecordRef {
        self.builder.register_record(name, RecordKind::Other, vec![])
    }

    pub fn recipe(
        &mut self,
        name: &str,
        result: RecordRef,
        ingredients: &[RecordRef],
        station: &str,
    ) -> RecipeId {
        let station = self.builder.register_keyword(station);
        self.builder
            .register_recipe(name, result, ingredients.to_vec(), station)
    }

    /// Build the registry, seed the material sets by name, and resolve the
    /// smithing configuration.
    pub fn build(self, basic: &[&str], rare: &[&str]) -> (Registry, MaterialSets, ClassifierConfig) {
        let registry = self.builder.build().unwrap();
        let refs = |names: &[&str]| -> Vec<RecordRef> {
            names
                .iter()
                .map(|n| {
                    registry
                        .record_ref(n)
                        .unwrap_or_else(|| panic!("unknown seed material '{n}'"))
                })
                .collect()
        };
        let materials = MaterialSets::from_refs(&registry, refs(basic), refs(rare));
        let config = smithing_config(&registry);
        (registry, materials, config)
    }
}

// ===========================================================================
// Synthetic catalogs
// ===========================================================================

/// SplitMix64, for reproducible synthetic catalogs.
#[derive(Debug, Clone)]
pub struct CatalogRng {
    state: u64,
}

impl CatalogRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `0..bound`. `bound` must be non-zero.
    pub fn below(&mut self, bound: usize) -> usize {
        (self.next_u64() % bound as u64) as usize
    }
}

/// Shape of a synthetic catalog.
#[derive(Debug, Clone, Copy)]
pub struct CatalogShape {
    pub raw: usize,
    pub intermediates: usize,
    pub finished: usize,
    /// Upper bound on recipes per intermediate item.
    pub recipes_per_item: usize,
    /// Upper bound on ingredients per recipe.
    pub max_ingredients: usize,
}

/// Build a layered catalog: raw items (a third seeded basic, a sixth seeded
/// rare), intermediates crafted from raw items and other intermediates (so
/// some chains loop back), and finished goods crafted from intermediates.
pub fn synthetic_catalog(
    seed: u64,
    shape: CatalogShape,
) -> (Registry, MaterialSets, ClassifierConfig) {
    let mut rng = CatalogRng::new(seed);
    let mut f = Fixture::new();

    let raw: Vec<RecordRef> = (0..shape.raw).map(|i| f.item(&format!("raw_{i}"))).collect();
    let mids: Vec<RecordRef> = (0..shape.intermediates)
        .map(|i| f.item(&format!("mid_{i}")))
        .collect();
    let goods: Vec<RecordRef> = (0..shape.finished)
        .map(|i| f.item(&format!("good_{i}")))
        .collect();

    let pool: Vec<RecordRef> = raw.iter().chain(mids.iter()).copied().collect();
    let pick = |rng: &mut CatalogRng, from: &[RecordRef]| -> Vec<RecordRef> {
        let n = 1 + rng.below(shape.max_ingredients.max(1));
        (0..n).map(|_| from[rng.below(from.len())]).collect()
    };

    let mut recipe_no = 0usize;
    for &mid in &mids {
        let count = 1 + rng.below(shape.recipes_per_item.max(1));
        for _ in 0..count {
            let ingredients = pick(&mut rng, &pool);
            let station = ALLOWED_STATIONS[rng.below(ALLOWED_STATIONS.len())];
            f.recipe(&format!("recipe_{recipe_no}"), mid, &ingredients, station);
            recipe_no += 1;
        }
    }
    if !mids.is_empty() {
        for &good in &goods {
            let ingredients = pick(&mut rng, &mids);
            f.recipe(&format!("recipe_{recipe_no}"), good, &ingredients, FORGE);
            recipe_no += 1;
        }
    }

    let basic: Vec<String> = (0..shape.raw / 3).map(|i| format!("raw_{i}")).collect();
    let rare: Vec<String> = (shape.raw / 3..shape.raw / 2)
        .map(|i| format!("raw_{i}"))
        .collect();
    let basic: Vec<&str> = basic.iter().map(String::as_str).collect();
    let rare: Vec<&str> = rare.iter().map(String::as_str).collect();
    f.build(&basic, &rare)
}
