use std::{collections::BTreeSet, sync::Arc};

use crate::model::{Location, LocationSettings};

/// Read-only lookup from (country, city) to configured coordinates.
///
/// Cloning is cheap; clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct LocationCatalog {
    entries: Arc<[LocationSettings]>,
}

impl LocationCatalog {
    pub fn new(entries: Vec<LocationSettings>) -> Self {
        Self { entries: entries.into() }
    }

    /// First configured entry matching `location` exactly, if any.
    ///
    /// Duplicate entries are not an error; the earliest one wins.
    pub fn resolve(&self, location: &Location) -> Option<&LocationSettings> {
        self.entries.iter().find(|entry| entry.matches(location))
    }

    /// Distinct countries, sorted.
    pub fn countries(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|entry| entry.country.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Cities configured for `country`, sorted.
    pub fn cities(&self, country: &str) -> Vec<&str> {
        let mut cities: Vec<&str> = self
            .entries
            .iter()
            .filter(|entry| entry.country == country)
            .map(|entry| entry.city.as_str())
            .collect();
        cities.sort_unstable();
        cities
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<LocationSettings>> for LocationCatalog {
    fn from(entries: Vec<LocationSettings>) -> Self {
        Self::new(entries)
    }
}
