//! Intent handlers for the MyCity voice skill.
//!
//! This crate provides:
//!
//! - **Handlers**: address lookup, city alerts, trash day, snow emergency
//!   parking and the unhandled-utterance fallback via [`handlers`].
//! - **Service seams**: [`services::TrashSchedule`],
//!   [`services::ParkingLocator`] and [`services::AlertFeed`].
//! - **City directory**: a TOML-backed implementation of every service via
//!   [`directory::CityDirectory`].
//! - **Registration**: [`register_core_intents`] and [`default_registry`].

pub mod directory;
pub mod error;
pub mod handlers;
pub mod services;
pub mod speech;

use mycity_kernel::{IntentRegistry, Precondition, RegistryBuilder};

pub use directory::CityDirectory;
pub use error::{IntentError, Result};
pub use handlers::{AlertsHandler, SnowParkingHandler, TrashDayHandler};
pub use services::{Alert, AlertFeed, CityServices, ParkingLocator, ParkingLot, TrashSchedule};

/// Register the core skill intents on `builder`.
///
/// Address-optional intents come first, then the ones that need an address.
pub fn register_core_intents(builder: &mut RegistryBuilder, services: CityServices) -> Result<()> {
    builder.register(handlers::GET_ADDRESS_INTENT, Precondition::None, handlers::get_address)?;
    builder.register(
        handlers::GET_ALERTS_INTENT,
        Precondition::None,
        AlertsHandler::new(services.alerts),
    )?;
    builder.register(handlers::UNHANDLED_INTENT, Precondition::None, handlers::unhandled)?;
    builder.register(
        handlers::TRASH_DAY_INTENT,
        Precondition::RequiresAddress,
        TrashDayHandler::new(services.trash),
    )?;
    builder.register(
        handlers::SNOW_PARKING_INTENT,
        Precondition::RequiresAddress,
        SnowParkingHandler::new(services.parking),
    )?;
    Ok(())
}

/// Build the full skill registry: core intents followed by the platform
/// built-ins.
pub fn default_registry(services: CityServices) -> Result<IntentRegistry> {
    let mut builder = IntentRegistry::builder();
    register_core_intents(&mut builder, services)?;
    builder.register_builtin_intents()?;
    Ok(builder.build())
}
