//! City service seams.
//!
//! Each intent that needs city data talks to a trait object rather than a
//! concrete data source, so the TOML-backed [`crate::CityDirectory`] can be
//! swapped for a live feed without touching the handlers.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;

// ---------------------------------------------------------------------------
// Supporting types
// ---------------------------------------------------------------------------

/// A snow emergency parking lot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingLot {
    /// Lot name as it should be spoken.
    pub name: String,
    /// Street location of the lot.
    pub location: String,
    /// Distance from the user's address.
    pub distance_miles: f64,
}

/// A city service alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub title: String,
    pub detail: String,
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Trash and recycling pickup schedule.
pub trait TrashSchedule: Send + Sync {
    /// Pickup days for `address`, or `None` if the address is unknown.
    fn pickup_days(&self, address: &str) -> Result<Option<Vec<String>>>;
}

/// Snow emergency parking lookup.
pub trait ParkingLocator: Send + Sync {
    /// The closest lot to `address`, or `None` if nothing is known nearby.
    fn nearest_parking(&self, address: &str) -> Result<Option<ParkingLot>>;
}

/// Source of current city-wide alerts.
pub trait AlertFeed: Send + Sync {
    fn current_alerts(&self) -> Result<Vec<Alert>>;
}

/// The set of services the core intents depend on.
#[derive(Clone)]
pub struct CityServices {
    pub trash: Arc<dyn TrashSchedule>,
    pub parking: Arc<dyn ParkingLocator>,
    pub alerts: Arc<dyn AlertFeed>,
}

impl CityServices {
    /// Use one value for every service.
    pub fn from_shared<S>(source: Arc<S>) -> Self
    where
        S: TrashSchedule + ParkingLocator + AlertFeed + 'static,
    {
        Self {
            trash: source.clone(),
            parking: source.clone(),
            alerts: source,
        }
    }
}

impl std::fmt::Debug for CityServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CityServices").finish_non_exhaustive()
    }
}
