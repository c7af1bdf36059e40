//! Append-only write-back of the persisted material lists.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use smeltery_core::emit::MaterialSink;
use smeltery_core::id::ItemId;
use smeltery_core::material::Tier;
use smeltery_core::registry::Registry;
use tracing::{debug, info};

use crate::loader::{DataLoadError, Format, deserialize_file, detect_format};
use crate::schema::MaterialListData;

/// A `materials.*` file opened for appending newly classified items.
///
/// Item IDs are written by record name. Existing entries are never removed
/// or reordered, and a name already present in a list is not added again.
/// Nothing touches the disk until [`MaterialListFile::save`].
#[derive(Debug)]
pub struct MaterialListFile<'r> {
    registry: &'r Registry,
    path: PathBuf,
    format: Format,
    lists: MaterialListData,
    dirty: bool,
}

impl<'r> MaterialListFile<'r> {
    /// Read the current lists at `path`.
    pub fn open(path: impl Into<PathBuf>, registry: &'r Registry) -> Result<Self, DataLoadError> {
        let path = path.into();
        let format = detect_format(&path)?;
        let lists = deserialize_file(&path)?;
        Ok(Self {
            registry,
            path,
            format,
            lists,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lists(&self) -> &MaterialListData {
        &self.lists
    }

    /// Whether anything was appended since opening.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the lists back in the format they were read in. A no-op when
    /// nothing was appended.
    pub fn save(&mut self) -> Result<(), DataLoadError> {
        if !self.dirty {
            debug!(file = %self.path.display(), "material lists unchanged, not writing");
            return Ok(());
        }

        let text = serialize_lists(&self.lists, self.format)
            .map_err(|detail| DataLoadError::Serialize {
                file: self.path.clone(),
                detail,
            })?;
        std::fs::write(&self.path, text)?;
        self.dirty = false;

        info!(
            file = %self.path.display(),
            basic = self.lists.basic.len(),
            rare = self.lists.rare.len(),
            "saved material lists"
        );
        Ok(())
    }
}

impl MaterialSink for MaterialListFile<'_> {
    type Error = DataLoadError;

    fn append(&mut self, tier: Tier, items: &[ItemId]) -> Result<(), DataLoadError> {
        let list = match tier {
            Tier::Basic => &mut self.lists.basic,
            Tier::Rare => &mut self.lists.rare,
        };
        let mut present: HashSet<String> = list.iter().cloned().collect();

        for &item in items {
            let Some(name) = self.registry.item_name(item) else {
                return Err(DataLoadError::UnresolvedRef {
                    file: self.path.clone(),
                    name: format!("{item:?}"),
                    expected_kind: "item",
                });
            };
            if present.insert(name.to_string()) {
                list.push(name.to_string());
                self.dirty = true;
            }
        }
        Ok(())
    }
}

fn serialize_lists(lists: &MaterialListData, format: Format) -> Result<String, String> {
    match format {
        Format::Ron => ron::ser::to_string_pretty(lists, ron::ser::PrettyConfig::default())
            .map_err(|e| e.to_string()),
        Format::Json => serde_json::to_string_pretty(lists).map_err(|e| e.to_string()),
        Format::Toml => toml::to_string_pretty(lists).map_err(|e| e.to_string()),
    }
}
