//! Serde data file structs for crafting catalogs.
//!
//! These structs define the on-disk format for records, recipes, material
//! lists, and the classifier configuration. They are deserialized from RON,
//! JSON, or TOML data files and then resolved into core types by the loader.

use serde::{Deserialize, Serialize};

// ===========================================================================
// Records
// ===========================================================================

/// A record definition in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordData {
    pub name: String,
    #[serde(default)]
    pub kind: RecordKindData,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Whether a record is a constructible item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKindData {
    #[default]
    Constructible,
    Other,
}

// ===========================================================================
// Recipes
// ===========================================================================

/// A recipe definition in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeData {
    pub name: String,
    pub result: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    pub station: String,
}

// ===========================================================================
// Material lists
// ===========================================================================

/// The persisted basic and rare material lists, by record name.
///
/// Also the write-back format, so it round-trips through every format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialListData {
    #[serde(default)]
    pub basic: Vec<String>,
    #[serde(default)]
    pub rare: Vec<String>,
}

// ===========================================================================
// Classifier configuration
// ===========================================================================

/// Keyword names configuring the classifier. Omitted fields take the
/// smithing defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClassifierData {
    #[serde(default = "default_allowed_stations")]
    pub allowed_stations: Vec<String>,
    #[serde(default = "default_result_stations")]
    pub result_stations: Vec<String>,
    #[serde(default = "default_forbidden_keywords")]
    pub forbidden_ingredient_keywords: Vec<String>,
}

impl Default for ClassifierData {
    fn default() -> Self {
        Self {
            allowed_stations: default_allowed_stations(),
            result_stations: default_result_stations(),
            forbidden_ingredient_keywords: default_forbidden_keywords(),
        }
    }
}

fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn default_allowed_stations() -> Vec<String> {
    strings(&[
        "CraftingSmithingArmorTable",
        "CraftingSmithingForge",
        "CraftingSmithingSharpeningWheel",
        "CraftingTanningRack",
        "CraftingSmithingSkyforge",
        "CraftingSmelter",
    ])
}

fn default_result_stations() -> Vec<String> {
    strings(&[
        "CraftingSmithingForge",
        "CraftingTanningRack",
        "CraftingSmelter",
    ])
}

fn default_forbidden_keywords() -> Vec<String> {
    strings(&["JewelryExpensive", "VendorItemArrow"])
}

// ===========================================================================
// TOML wrappers (TOML does not support top-level arrays)
// ===========================================================================

/// Wrapper for a list of records in TOML format.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlRecords {
    pub records: Vec<RecordData>,
}

/// Wrapper for a list of recipes in TOML format.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlRecipes {
    pub recipes: Vec<RecipeData>,
}

// ===========================================================================
// Tests
// ===========================================================================
