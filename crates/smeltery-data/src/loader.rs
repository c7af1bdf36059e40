//! Resolution pipeline: reads data files, resolves name references, builds
//! the registry and the seed material sets.
//!
//! Provides format detection (RON/JSON/TOML), file discovery, and
//! deserialization helpers used by [`load_dataset`] and the material list
//! writer.

use serde::de::DeserializeOwned;
use smeltery_core::config::{ClassifierConfig, ConfigError};
use smeltery_core::id::{RecipeId, RecordRef};
use smeltery_core::material::MaterialSets;
use smeltery_core::registry::{RecordKind, Registry, RegistryBuilder, RegistryError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::{load_classifier_data, resolve_classifier_config};
use crate::schema::{MaterialListData, RecipeData, RecordData, RecordKindData};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur during data loading and write-back.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// A required data file was not found in the given directory.
    #[error("required file '{file}' not found in {dir}")]
    MissingRequired { file: &'static str, dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A name reference could not be resolved.
    #[error("unresolved {expected_kind} reference '{name}' in {file}")]
    UnresolvedRef {
        file: PathBuf,
        name: String,
        expected_kind: &'static str,
    },

    /// A duplicate name was found.
    #[error("duplicate name '{name}' in {file}")]
    DuplicateName { file: PathBuf, name: String },

    /// Writing a file back failed to serialize.
    #[error("serialize error for {file}: {detail}")]
    Serialize { file: PathBuf, detail: String },

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Scan a directory for a data file with the given base name (without extension).
///
/// Looks for `{base_name}.ron`, `{base_name}.toml`, and `{base_name}.json`.
/// Returns `Ok(None)` if no file is found, or `Err(ConflictingFormats)` if
/// multiple formats exist for the same base name.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let mut found: Option<PathBuf> = None;

    for ext in ["ron", "toml", "json"] {
        let candidate = dir.join(format!("{base_name}.{ext}"));
        if !candidate.exists() {
            continue;
        }
        if let Some(existing) = found {
            return Err(DataLoadError::ConflictingFormats {
                a: existing,
                b: candidate,
            });
        }
        found = Some(candidate);
    }

    Ok(found)
}

/// Like [`find_data_file`], but returns an error if no file is found.
pub fn require_data_file(dir: &Path, base_name: &'static str) -> Result<PathBuf, DataLoadError> {
    find_data_file(dir, base_name)?.ok_or_else(|| DataLoadError::MissingRequired {
        file: base_name,
        dir: dir.to_path_buf(),
    })
}

// ===========================================================================
// Deserialization
// ===========================================================================

fn parse_error(path: &Path, e: impl std::fmt::Display) -> DataLoadError {
    DataLoadError::Parse {
        file: path.to_path_buf(),
        detail: e.to_string(),
    }
}

/// Read a file and deserialize it according to its format (detected from extension).
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        Format::Ron => ron::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Json => serde_json::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Toml => toml::from_str(&content).map_err(|e| parse_error(path, e)),
    }
}

/// Deserialize a list from a file. For TOML files, extracts the array at the
/// given `toml_key` from a top-level table. For RON and JSON, deserializes
/// directly as `Vec<T>`.
pub fn deserialize_list<T: DeserializeOwned>(
    path: &Path,
    toml_key: &str,
) -> Result<Vec<T>, DataLoadError> {
    if detect_format(path)? != Format::Toml {
        return deserialize_file(path);
    }

    let content = std::fs::read_to_string(path)?;
    let table: toml::Value = toml::from_str(&content).map_err(|e| parse_error(path, e))?;
    let array = table
        .get(toml_key)
        .ok_or_else(|| parse_error(path, format!("missing key '{toml_key}' in TOML file")))?
        .clone();
    array
        .try_into()
        .map_err(|e: toml::de::Error| parse_error(path, e))
}

// ===========================================================================
// Name resolution helpers
// ===========================================================================

/// Look up a name in a map, returning an `UnresolvedRef` error if not found.
pub fn resolve_name<'a, V>(
    map: &'a HashMap<String, V>,
    name: &str,
    file: &Path,
    expected_kind: &'static str,
) -> Result<&'a V, DataLoadError> {
    map.get(name).ok_or_else(|| DataLoadError::UnresolvedRef {
        file: file.to_path_buf(),
        name: name.to_string(),
        expected_kind,
    })
}

/// Check whether a name already exists in a map, returning a `DuplicateName`
/// error if so.
pub fn check_duplicate<V>(
    map: &HashMap<String, V>,
    name: &str,
    file: &Path,
) -> Result<(), DataLoadError> {
    if map.contains_key(name) {
        Err(DataLoadError::DuplicateName {
            file: file.to_path_buf(),
            name: name.to_string(),
        })
    } else {
        Ok(())
    }
}

// ===========================================================================
// Dataset loading
// ===========================================================================

/// Everything one classification run needs, loaded from a data directory.
#[derive(Debug)]
pub struct Dataset {
    pub registry: Registry,
    pub seeds: MaterialSets,
    pub config: ClassifierConfig,
    /// Where the material lists were read from, for write-back.
    pub materials_path: PathBuf,
}

/// Load `records.*`, `recipes.*`, `materials.*`, and the optional
/// `classifier.*` from `dir`.
pub fn load_dataset(dir: &Path) -> Result<Dataset, DataLoadError> {
    let records_path = require_data_file(dir, "records")?;
    let recipes_path = require_data_file(dir, "recipes")?;
    let materials_path = require_data_file(dir, "materials")?;

    let mut builder = RegistryBuilder::new();

    // Records first: recipes and material lists refer to them by name.
    let mut records: HashMap<String, RecordRef> = HashMap::new();
    for record in deserialize_list::<RecordData>(&records_path, "records")? {
        check_duplicate(&records, &record.name, &records_path)?;
        let keywords = record
            .keywords
            .iter()
            .map(|k| builder.register_keyword(k))
            .collect();
        let kind = match record.kind {
            RecordKindData::Constructible => RecordKind::Constructible,
            RecordKindData::Other => RecordKind::Other,
        };
        let r = builder.register_record(&record.name, kind, keywords);
        records.insert(record.name, r);
    }

    let mut recipes: HashMap<String, RecipeId> = HashMap::new();
    for recipe in deserialize_list::<RecipeData>(&recipes_path, "recipes")? {
        check_duplicate(&recipes, &recipe.name, &recipes_path)?;
        let result = *resolve_name(&records, &recipe.result, &recipes_path, "record")?;
        let ingredients = recipe
            .ingredients
            .iter()
            .map(|name| resolve_name(&records, name, &recipes_path, "record").copied())
            .collect::<Result<Vec<_>, _>>()?;
        let station = builder.register_keyword(&recipe.station);
        let id = builder.register_recipe(&recipe.name, result, ingredients, station);
        recipes.insert(recipe.name, id);
    }

    let classifier = load_classifier_data(dir)?;
    let config = resolve_classifier_config(&mut builder, &classifier)?;
    let registry = builder.build()?;

    let lists: MaterialListData = deserialize_file(&materials_path)?;
    let seed_refs = |names: &[String]| -> Result<Vec<RecordRef>, DataLoadError> {
        names
            .iter()
            .map(|name| resolve_name(&records, name, &materials_path, "record").copied())
            .collect()
    };
    let seeds = MaterialSets::from_refs(&registry, seed_refs(&lists.basic)?, seed_refs(&lists.rare)?);

    info!(
        dir = %dir.display(),
        records = registry.record_count(),
        recipes = registry.recipe_count(),
        basic = seeds.basic().len(),
        rare = seeds.rare().len(),
        "loaded dataset"
    );

    Ok(Dataset {
        registry,
        seeds,
        config,
        materials_path,
    })
}

// ===========================================================================
// Tests
// ===========================================================================
