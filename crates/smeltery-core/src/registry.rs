use crate::id::*;
use std::collections::{HashMap, HashSet};

/// What kind of record a [`RecordRef`] points at. Only constructible records
/// resolve to items; everything else (leveled lists, spells, ...) is kept so
/// that recipes can reference it, but never takes part in classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordKind {
    #[default]
    Constructible,
    Other,
}

/// A record definition in the registry.
#[derive(Debug, Clone)]
pub struct RecordDef {
    pub name: String,
    pub kind: RecordKind,
    pub keywords: Vec<KeywordId>,
}

/// A crafting recipe: one result, any number of ingredients, and the station
/// keyword of the workbench it is crafted at.
#[derive(Debug, Clone)]
pub struct RecipeDef {
    pub name: String,
    pub result: RecordRef,
    pub ingredients: Vec<RecordRef>,
    pub station: KeywordId,
}

/// Builder for constructing an immutable Registry.
/// Three-phase lifecycle: registration -> mutation -> finalization.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    records: Vec<RecordDef>,
    record_name_to_ref: HashMap<String, RecordRef>,
    keywords: Vec<String>,
    keyword_name_to_id: HashMap<String, KeywordId>,
    recipes: Vec<RecipeDef>,
    recipe_name_to_id: HashMap<String, RecipeId>,
    duplicate: Option<String>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Phase 1: Register a keyword. Registering the same name twice returns
    /// the existing ID.
    pub fn register_keyword(&mut self, name: &str) -> KeywordId {
        if let Some(id) = self.keyword_name_to_id.get(name) {
            return *id;
        }
        let id = KeywordId(self.keywords.len() as u32);
        self.keywords.push(name.to_string());
        self.keyword_name_to_id.insert(name.to_string(), id);
        id
    }

    /// Phase 1: Register a record. Returns its reference.
    pub fn register_record(
        &mut self,
        name: &str,
        kind: RecordKind,
        keywords: Vec<KeywordId>,
    ) -> RecordRef {
        let id = RecordRef(self.records.len() as u32);
        self.records.push(RecordDef {
            name: name.to_string(),
            kind,
            keywords,
        });
        if self.record_name_to_ref.insert(name.to_string(), id).is_some() {
            self.duplicate.get_or_insert_with(|| name.to_string());
        }
        id
    }

    /// Phase 1: Register a constructible item with the given keywords.
    pub fn register_item(&mut self, name: &str, keywords: Vec<KeywordId>) -> RecordRef {
        self.register_record(name, RecordKind::Constructible, keywords)
    }

    /// Phase 1: Register a recipe. Returns its ID.
    pub fn register_recipe(
        &mut self,
        name: &str,
        result: RecordRef,
        ingredients: Vec<RecordRef>,
        station: KeywordId,
    ) -> RecipeId {
        let id = RecipeId(self.recipes.len() as u32);
        self.recipes.push(RecipeDef {
            name: name.to_string(),
            result,
            ingredients,
            station,
        });
        if self.recipe_name_to_id.insert(name.to_string(), id).is_some() {
            self.duplicate.get_or_insert_with(|| name.to_string());
        }
        id
    }

    /// Phase 2: Mutate an existing recipe by name.
    ///
    /// Hosts use this to patch definitions between loading and `build()`,
    /// e.g. moving a recipe to another station.
    pub fn mutate_recipe<F>(&mut self, name: &str, f: F) -> Result<(), RegistryError>
    where
        F: FnOnce(&mut RecipeDef),
    {
        let id = self
            .recipe_name_to_id
            .get(name)
            .ok_or(RegistryError::NotFound(name.to_string()))?;
        f(&mut self.recipes[id.0 as usize]);
        Ok(())
    }

    /// Phase 2: Mutate an existing record by name.
    pub fn mutate_record<F>(&mut self, name: &str, f: F) -> Result<(), RegistryError>
    where
        F: FnOnce(&mut RecordDef),
    {
        let id = self
            .record_name_to_ref
            .get(name)
            .ok_or(RegistryError::NotFound(name.to_string()))?;
        f(&mut self.records[id.0 as usize]);
        Ok(())
    }

    /// Lookup a record reference by name.
    pub fn record_ref(&self, name: &str) -> Option<RecordRef> {
        self.record_name_to_ref.get(name).copied()
    }

    /// Lookup keyword ID by name.
    pub fn keyword_id(&self, name: &str) -> Option<KeywordId> {
        self.keyword_name_to_id.get(name).copied()
    }

    /// Lookup recipe ID by name.
    pub fn recipe_id(&self, name: &str) -> Option<RecipeId> {
        self.recipe_name_to_id.get(name).copied()
    }

    /// Phase 3: Finalize and build the immutable registry.
    ///
    /// Keyword references must exist. Record references inside recipes are
    /// not checked: a dangling reference simply never resolves.
    pub fn build(self) -> Result<Registry, RegistryError> {
        if let Some(name) = self.duplicate {
            return Err(RegistryError::DuplicateName(name));
        }

        let keyword_count = self.keywords.len();
        let known = |k: KeywordId| (k.0 as usize) < keyword_count;

        for record in &self.records {
            if let Some(bad) = record.keywords.iter().find(|k| !known(**k)) {
                return Err(RegistryError::UnknownKeyword(*bad));
            }
        }
        for recipe in &self.recipes {
            if !known(recipe.station) {
                return Err(RegistryError::UnknownKeyword(recipe.station));
            }
        }

        Ok(Registry {
            records: self.records,
            record_name_to_ref: self.record_name_to_ref,
            keywords: self.keywords,
            keyword_name_to_id: self.keyword_name_to_id,
            recipes: self.recipes,
            recipe_name_to_id: self.recipe_name_to_id,
        })
    }
}

/// Immutable registry. Frozen after build(). Thread-safe to share.
#[derive(Debug)]
pub struct Registry {
    records: Vec<RecordDef>,
    record_name_to_ref: HashMap<String, RecordRef>,
    keywords: Vec<String>,
    keyword_name_to_id: HashMap<String, KeywordId>,
    recipes: Vec<RecipeDef>,
    recipe_name_to_id: HashMap<String, RecipeId>,
}

impl Registry {
    /// Resolve a raw reference to an item. Returns `None` for dangling
    /// references and for records that are not constructible.
    pub fn resolve(&self, r: RecordRef) -> Option<ItemId> {
        match self.records.get(r.0 as usize) {
            Some(record) if record.kind == RecordKind::Constructible => Some(ItemId(r.0)),
            _ => None,
        }
    }

    pub fn get_record(&self, r: RecordRef) -> Option<&RecordDef> {
        self.records.get(r.0 as usize)
    }

    pub fn get_recipe(&self, id: RecipeId) -> Option<&RecipeDef> {
        self.recipes.get(id.0 as usize)
    }

    /// All recipes in registration order.
    pub fn recipes(&self) -> impl Iterator<Item = (RecipeId, &RecipeDef)> {
        self.recipes
            .iter()
            .enumerate()
            .map(|(i, r)| (RecipeId(i as u32), r))
    }

    pub fn record_ref(&self, name: &str) -> Option<RecordRef> {
        self.record_name_to_ref.get(name).copied()
    }

    /// Lookup a record by name and resolve it to an item.
    pub fn item_id(&self, name: &str) -> Option<ItemId> {
        self.record_ref(name).and_then(|r| self.resolve(r))
    }

    pub fn record_name(&self, r: RecordRef) -> Option<&str> {
        self.get_record(r).map(|rec| rec.name.as_str())
    }

    pub fn item_name(&self, id: ItemId) -> Option<&str> {
        self.record_name(id.record_ref())
    }

    pub fn keyword_id(&self, name: &str) -> Option<KeywordId> {
        self.keyword_name_to_id.get(name).copied()
    }

    pub fn keyword_name(&self, id: KeywordId) -> Option<&str> {
        self.keywords.get(id.0 as usize).map(String::as_str)
    }

    pub fn recipe_id(&self, name: &str) -> Option<RecipeId> {
        self.recipe_name_to_id.get(name).copied()
    }

    /// True if the item carries at least one of the given keywords.
    pub fn has_any_keyword(&self, id: ItemId, keywords: &HashSet<KeywordId>) -> bool {
        self.get_record(id.record_ref())
            .map(|r| r.keywords.iter().any(|k| keywords.contains(k)))
            .unwrap_or(false)
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }

    pub fn recipe_count(&self) -> usize {
        self.recipes.len()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("unknown keyword reference: {0:?}")]
    UnknownKeyword(KeywordId),
    #[error("duplicate name: {0}")]
    DuplicateName(String),
}
