//! Map model: locations, the map descriptor, and boundary validation.
//!
//! A `MapDescriptor` is the data handed over by whatever provides the map
//! geometry (usually a JSON file). It is immutable once loaded: the renderer
//! and the selection controllers only read it. Location order is significant,
//! it defines both drawing order and keyboard navigation order.
//!
//! Validation lives here, at the loading boundary. Everything downstream
//! assumes a well-formed descriptor.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::consts::FALLBACK_ID_PREFIX;

/// Error returned when a map descriptor cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// The input is not valid JSON or does not match the descriptor shape.
    #[error("invalid map JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// `viewBox` is empty.
    #[error("map viewBox is empty")]
    EmptyViewBox,
    /// `locations` is empty.
    #[error("map has no locations")]
    NoLocations,
    /// A location has an empty `path`.
    #[error("location {index} has an empty path")]
    EmptyPath { index: usize },
}

/// One selectable region of the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// SVG path data. Opaque to this crate.
    pub path: String,
    /// Display name, used as the default accessible label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Stable identifier. A positional one is synthesized when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Location {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), name: None, id: None }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// The whole map: frame, ordered locations and an optional accessible name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDescriptor {
    /// SVG `viewBox` of the map frame.
    #[serde(rename = "viewBox")]
    pub view_box: String,
    /// Locations in drawing and navigation order.
    pub locations: Vec<Location>,
    /// Accessible name of the whole map.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl MapDescriptor {
    #[must_use]
    pub fn new(view_box: impl Into<String>, locations: Vec<Location>) -> Self {
        Self { view_box: view_box.into(), locations, label: None }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Parse and validate a descriptor from JSON.
    ///
    /// # Errors
    ///
    /// Returns `MapError::Json` for malformed input, or the first validation
    /// failure reported by [`MapDescriptor::validate`].
    pub fn from_json(json: &str) -> Result<Self, MapError> {
        let map: Self = serde_json::from_str(json)?;
        map.validate()?;
        Ok(map)
    }

    /// Check the required fields.
    ///
    /// # Errors
    ///
    /// Returns the first missing piece: empty `viewBox`, no locations, or a
    /// location with an empty `path`.
    pub fn validate(&self) -> Result<(), MapError> {
        if self.view_box.trim().is_empty() {
            return Err(MapError::EmptyViewBox);
        }
        if self.locations.is_empty() {
            return Err(MapError::NoLocations);
        }
        if let Some(index) = self.locations.iter().position(|loc| loc.path.trim().is_empty()) {
            return Err(MapError::EmptyPath { index });
        }
        Ok(())
    }

    /// Resolved identifiers for every location, in map order.
    ///
    /// Explicit ids are kept as-is (duplicates included). Locations without
    /// an id get `location-{index}`, suffixed with `-{n}` when that string is
    /// already taken, so synthesized ids never collide within one map.
    #[must_use]
    pub fn location_ids(&self) -> Vec<String> {
        let taken: HashSet<&str> = self.locations.iter().filter_map(|loc| loc.id.as_deref()).collect();
        let mut synthesized: HashSet<String> = HashSet::new();
        let mut ids = Vec::with_capacity(self.locations.len());

        for (index, loc) in self.locations.iter().enumerate() {
            if let Some(id) = &loc.id {
                ids.push(id.clone());
                continue;
            }
            let base = format!("{FALLBACK_ID_PREFIX}{index}");
            let mut candidate = base.clone();
            let mut n = 1;
            while taken.contains(candidate.as_str()) || synthesized.contains(&candidate) {
                candidate = format!("{base}-{n}");
                n += 1;
            }
            synthesized.insert(candidate.clone());
            ids.push(candidate);
        }
        ids
    }
}
