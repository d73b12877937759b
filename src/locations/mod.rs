/// Static table of forecast locations
use crate::domain::Location;
use std::collections::HashMap;

const KNOWN_LOCATIONS: &[(&str, f64, f64)] = &[
    ("Solntsevo", 55.6371, 37.3913),
    ("Moscow", 55.7558, 37.6173),
    ("Vnukovo", 55.6042, 37.2867),
];

/// Read-only name to coordinates lookup, built once at startup
#[derive(Debug, Clone)]
pub struct LocationTable {
    entries: HashMap<String, Location>,
}

impl LocationTable {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Location)>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(n, l)| (n.into(), l)).collect(),
        }
    }

    /// The locations the service ships with
    pub fn builtin() -> Self {
        Self::new(KNOWN_LOCATIONS.iter().map(|&(name, latitude, longitude)| {
            (
                name,
                Location {
                    latitude,
                    longitude,
                },
            )
        }))
    }

    pub fn resolve(&self, name: &str) -> Option<&Location> {
        self.entries.get(name)
    }

    /// Known names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
