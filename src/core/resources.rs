//! Engine preferences model
//!
//! The preferences dialog edits an ordered list of [`EngineDefinition`]s. The
//! list is persisted as a JSON object keyed by engine name:
//!
//! ```json
//! {
//!   "engines": {
//!     "Stockfish": { "name": "Stockfish", "filepath": "/usr/bin/stockfish" }
//!   }
//! }
//! ```
//!
//! Entries are restored in document order, so a save/load cycle keeps the
//! order the user arranged them in.

use super::error::PreferencesError;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Everything needed to locate an external engine executable
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Reflect)]
pub struct EngineDefinition {
    pub name: String,
    pub filepath: String,
}

impl EngineDefinition {
    pub fn new(name: impl Into<String>, filepath: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filepath: filepath.into(),
        }
    }
}

/// Resource holding the configured engines, in display order
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Reflect)]
#[reflect(Resource)]
pub struct EnginePreferences {
    #[serde(default, with = "engines_by_name")]
    engines: Vec<EngineDefinition>,
}

impl EnginePreferences {
    pub fn engines(&self) -> &[EngineDefinition] {
        &self.engines
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&EngineDefinition> {
        self.engines.iter().find(|engine| engine.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Append an engine. Names are the persistence key, so they must be
    /// non-empty and unique.
    pub fn add(&mut self, engine: EngineDefinition) -> Result<(), PreferencesError> {
        validate_name(&engine.name)?;
        if self.contains(&engine.name) {
            return Err(PreferencesError::DuplicateName(engine.name));
        }
        self.engines.push(engine);
        Ok(())
    }

    /// Remove the engine called `name`, returning it. Unknown names are a no-op.
    pub fn remove(&mut self, name: &str) -> Option<EngineDefinition> {
        let index = self.engines.iter().position(|engine| engine.name == name)?;
        Some(self.engines.remove(index))
    }

    /// Overwrite the engine called `name` in place, keeping its position
    pub fn replace(&mut self, name: &str, engine: EngineDefinition) -> Result<(), PreferencesError> {
        validate_name(&engine.name)?;
        let index = self
            .engines
            .iter()
            .position(|existing| existing.name == name)
            .ok_or_else(|| PreferencesError::UnknownEngine(name.to_string()))?;
        if engine.name != name && self.contains(&engine.name) {
            return Err(PreferencesError::DuplicateName(engine.name));
        }
        self.engines[index] = engine;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

fn validate_name(name: &str) -> Result<(), PreferencesError> {
    if name.trim().is_empty() {
        Err(PreferencesError::EmptyName)
    } else {
        Ok(())
    }
}

/// Serializes the engine list as a map keyed by name, preserving order
mod engines_by_name {
    use super::{validate_name, EngineDefinition};
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(engines: &[EngineDefinition], serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(engines.len()))?;
        for engine in engines {
            map.serialize_entry(&engine.name, engine)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<EngineDefinition>, D::Error> {
        struct EnginesVisitor;

        impl<'de> Visitor<'de> for EnginesVisitor {
            type Value = Vec<EngineDefinition>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of engine names to engine definitions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut engines: Vec<EngineDefinition> = Vec::with_capacity(map.size_hint().unwrap_or(0));
                // The inner object is authoritative; the key only mirrors its name
                while let Some((key, engine)) = map.next_entry::<String, EngineDefinition>()? {
                    if validate_name(&engine.name).is_err() {
                        tracing::warn!("[SETTINGS] Skipping engine `{}` with an empty name", key);
                        continue;
                    }
                    if engines.iter().any(|known| known.name == engine.name) {
                        tracing::warn!("[SETTINGS] Skipping duplicate engine `{}` (key `{}`)", engine.name, key);
                        continue;
                    }
                    engines.push(engine);
                }
                Ok(engines)
            }
        }

        deserializer.deserialize_map(EnginesVisitor)
    }
}
