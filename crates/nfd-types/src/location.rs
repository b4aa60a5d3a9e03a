//! Static location table

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Location details handed to blueprint templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationEntry {
    /// Address of the central site serving this location
    #[serde(default)]
    pub central: Option<String>,
    /// Address local to this location
    #[serde(default)]
    pub local: Option<String>,
}

/// Resolved location information for one event
///
/// `central` comes from the table's "central" entry, `local` from the
/// entry named by the event's location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub central: Option<LocationEntry>,
    pub local: LocationEntry,
}

/// Static table of supported locations, loaded once at startup
///
/// Read-only after construction; every request gets its own resolved
/// `LocationInfo` snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationMap {
    entries: BTreeMap<String, LocationEntry>,
}

impl LocationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a location table from its JSON serialization
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn insert(&mut self, name: impl Into<String>, entry: LocationEntry) {
        self.entries.insert(name.into(), entry);
    }

    /// Whether `location` is a supported location
    pub fn contains(&self, location: &str) -> bool {
        self.entries.contains_key(location)
    }

    /// Resolve `location` into the info templates render against
    pub fn resolve(&self, location: &str) -> Option<LocationInfo> {
        self.entries.get(location).map(|local| LocationInfo {
            central: self.entries.get("central").cloned(),
            local: local.clone(),
        })
    }
}
