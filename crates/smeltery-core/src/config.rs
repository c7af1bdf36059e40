//! Immutable classifier configuration: which crafting stations count, which
//! of those may produce new materials, and which ingredient keywords keep an
//! item out of the ingredient universe.

use std::collections::HashSet;

use crate::id::KeywordId;

#[derive(Debug, Clone, Default)]
pub struct ClassifierConfig {
    allowed_stations: HashSet<KeywordId>,
    result_stations: HashSet<KeywordId>,
    forbidden_ingredient_keywords: HashSet<KeywordId>,
}

impl ClassifierConfig {
    /// Build a configuration. Every result-eligible station must also be an
    /// allowed station.
    pub fn new(
        allowed_stations: impl IntoIterator<Item = KeywordId>,
        result_stations: impl IntoIterator<Item = KeywordId>,
        forbidden_ingredient_keywords: impl IntoIterator<Item = KeywordId>,
    ) -> Result<Self, ConfigError> {
        let allowed_stations: HashSet<_> = allowed_stations.into_iter().collect();
        let result_stations: HashSet<_> = result_stations.into_iter().collect();

        let mut stray: Vec<_> = result_stations.difference(&allowed_stations).copied().collect();
        stray.sort();
        if let Some(station) = stray.first() {
            return Err(ConfigError::ResultStationNotAllowed(*station));
        }

        Ok(Self {
            allowed_stations,
            result_stations,
            forbidden_ingredient_keywords: forbidden_ingredient_keywords.into_iter().collect(),
        })
    }

    pub fn is_allowed_station(&self, station: KeywordId) -> bool {
        self.allowed_stations.contains(&station)
    }

    pub fn is_result_station(&self, station: KeywordId) -> bool {
        self.result_stations.contains(&station)
    }

    pub fn allowed_stations(&self) -> &HashSet<KeywordId> {
        &self.allowed_stations
    }

    pub fn result_stations(&self) -> &HashSet<KeywordId> {
        &self.result_stations
    }

    pub fn forbidden_ingredient_keywords(&self) -> &HashSet<KeywordId> {
        &self.forbidden_ingredient_keywords
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("result station {0:?} is not an allowed station")]
    ResultStationNotAllowed(KeywordId),
}
