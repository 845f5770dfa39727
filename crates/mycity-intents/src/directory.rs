//! TOML-backed city directory.
//!
//! A [`CityDirectory`] answers every city service from a static file:
//!
//! ```toml
//! [[alerts]]
//! title = "Street cleaning"
//! detail = "Street cleaning is suspended for the holiday"
//!
//! [[addresses]]
//! address = "46 Everdean St"
//! trash_days = ["Wednesday"]
//!
//! [addresses.parking]
//! name = "Everdean Street lot"
//! location = "Everdean Street and Neponset Avenue"
//! distance_miles = 0.4
//! ```
//!
//! Addresses are matched loosely: case, punctuation, street-suffix spelling
//! and a trailing "Boston, MA 02122" do not matter.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{IntentError, Result};
use crate::services::{Alert, AlertFeed, ParkingLocator, ParkingLot, TrashSchedule};

/// Street suffixes folded onto their usual abbreviation.
const SUFFIXES: &[(&str, &str)] = &[
    ("street", "st"),
    ("avenue", "ave"),
    ("road", "rd"),
    ("boulevard", "blvd"),
    ("drive", "dr"),
    ("place", "pl"),
    ("square", "sq"),
    ("court", "ct"),
    ("terrace", "ter"),
    ("lane", "ln"),
    ("highway", "hwy"),
];

/// Trailing tokens that name the city rather than the street address.
const CITY_TOKENS: &[&str] = &["boston", "ma", "massachusetts", "usa"];

// ---------------------------------------------------------------------------
// File schema
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct DirectoryFile {
    #[serde(default)]
    alerts: Vec<Alert>,
    #[serde(default)]
    addresses: Vec<AddressEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct AddressEntry {
    address: String,
    #[serde(default)]
    trash_days: Vec<String>,
    #[serde(default)]
    parking: Option<ParkingLot>,
}

// ---------------------------------------------------------------------------
// CityDirectory
// ---------------------------------------------------------------------------

/// Static city data indexed by normalized address.
#[derive(Debug, Default)]
pub struct CityDirectory {
    alerts: Vec<Alert>,
    addresses: HashMap<String, AddressEntry>,
}

impl CityDirectory {
    /// Parse a directory from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: DirectoryFile = toml::from_str(content)?;

        let mut addresses = HashMap::with_capacity(file.addresses.len());
        for entry in file.addresses {
            let key = normalize_address(&entry.address);
            if addresses.insert(key.clone(), entry).is_some() {
                tracing::warn!(address = %key, "duplicate directory entry, keeping the last one");
            }
        }

        tracing::debug!(
            addresses = addresses.len(),
            alerts = file.alerts.len(),
            "city directory loaded"
        );

        Ok(Self {
            alerts: file.alerts,
            addresses,
        })
    }

    /// Load a directory from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| IntentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Number of known addresses.
    pub fn address_count(&self) -> usize {
        self.addresses.len()
    }

    fn entry(&self, address: &str) -> Option<&AddressEntry> {
        self.addresses.get(&normalize_address(address))
    }
}

impl TrashSchedule for CityDirectory {
    fn pickup_days(&self, address: &str) -> Result<Option<Vec<String>>> {
        Ok(self
            .entry(address)
            .filter(|e| !e.trash_days.is_empty())
            .map(|e| e.trash_days.clone()))
    }
}

impl ParkingLocator for CityDirectory {
    fn nearest_parking(&self, address: &str) -> Result<Option<ParkingLot>> {
        Ok(self.entry(address).and_then(|e| e.parking.clone()))
    }
}

impl AlertFeed for CityDirectory {
    fn current_alerts(&self) -> Result<Vec<Alert>> {
        Ok(self.alerts.clone())
    }
}

/// Reduce an address to a lookup key.
///
/// `"46 Everdean Street, Boston, MA 02122"` and `"46 everdean st"` both
/// become `"46 everdean st"`.
pub fn normalize_address(address: &str) -> String {
    let cleaned: String = address
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect();

    let mut tokens: Vec<&str> = cleaned
        .split_whitespace()
        .map(|t| {
            SUFFIXES
                .iter()
                .find(|(long, _)| *long == t)
                .map_or(t, |(_, short)| *short)
        })
        .collect();

    while let Some(last) = tokens.last() {
        let is_zip = last.len() == 5 && last.chars().all(|c| c.is_ascii_digit());
        if (is_zip || CITY_TOKENS.contains(last)) && tokens.len() > 1 {
            tokens.pop();
        } else {
            break;
        }
    }

    tokens.join(" ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
