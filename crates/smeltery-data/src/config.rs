//! Classifier configuration with resolved keyword IDs.
//!
//! Keyword names from `classifier.*` (or the smithing defaults when the file
//! is absent) are interned into the registry builder, so a configured
//! station that no recipe uses still resolves and simply matches nothing.

use std::path::Path;

use smeltery_core::config::ClassifierConfig;
use smeltery_core::id::KeywordId;
use smeltery_core::registry::RegistryBuilder;
use tracing::debug;

use crate::loader::{DataLoadError, deserialize_file, find_data_file};
use crate::schema::ClassifierData;

/// Read `classifier.*` from `dir`, falling back to the defaults.
pub fn load_classifier_data(dir: &Path) -> Result<ClassifierData, DataLoadError> {
    match find_data_file(dir, "classifier")? {
        Some(path) => {
            debug!(file = %path.display(), "reading classifier configuration");
            deserialize_file(&path)
        }
        None => {
            debug!("no classifier configuration, using smithing defaults");
            Ok(ClassifierData::default())
        }
    }
}

/// Intern the configured keywords and build the [`ClassifierConfig`].
pub fn resolve_classifier_config(
    builder: &mut RegistryBuilder,
    data: &ClassifierData,
) -> Result<ClassifierConfig, DataLoadError> {
    let mut intern = |names: &[String]| -> Vec<KeywordId> {
        names.iter().map(|n| builder.register_keyword(n)).collect()
    };
    let allowed = intern(&data.allowed_stations);
    let result = intern(&data.result_stations);
    let forbidden = intern(&data.forbidden_ingredient_keywords);

    Ok(ClassifierConfig::new(allowed, result, forbidden)?)
}
