//! Intent registry.
//!
//! Maps intent names to their handlers.  Each registration is tagged with a
//! [`Precondition`] telling the dispatcher whether the intent needs a stored
//! address before it can run.
//!
//! The registry is assembled once through a [`RegistryBuilder`] and is
//! read-only afterwards; there is no way to add or remove intents while the
//! dispatcher is serving requests.
//!
//! # Example
//!
//! ```rust
//! # use mycity_kernel::registry::{IntentRegistry, Precondition};
//! # use mycity_kernel::{Request, Response, HandlerResult};
//! fn hello(request: &mut Request) -> HandlerResult {
//!     Ok(Response::with_attributes(request.session_attributes.clone()).speech("Hello!"))
//! }
//!
//! let mut builder = IntentRegistry::builder();
//! builder.register("HelloIntent", Precondition::None, hello).unwrap();
//! builder.register_builtin_intents().unwrap();
//! let registry = builder.build();
//!
//! assert!(registry.contains("HelloIntent"));
//! assert!(registry.contains("AMAZON.HelpIntent"));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{BoxError, KernelError, Result};
use crate::model::{Request, Response};
use crate::responses;

/// Intent handled by the dispatcher itself; it can never be registered.
pub const SET_ADDRESS_INTENT: &str = "SetAddressIntent";

pub const HELP_INTENT: &str = "AMAZON.HelpIntent";
pub const STOP_INTENT: &str = "AMAZON.StopIntent";
pub const CANCEL_INTENT: &str = "AMAZON.CancelIntent";

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// What a handler returns: one response, or one error to propagate.
pub type HandlerResult = std::result::Result<Response, BoxError>;

/// Business logic for a single intent.
///
/// Handlers may read and write the request's session attributes and call
/// external services.  Expected "not found" outcomes should be phrased as
/// speech in the response rather than returned as errors.
pub trait IntentHandler: Send + Sync {
    fn handle(&self, request: &mut Request) -> HandlerResult;
}

impl<F> IntentHandler for F
where
    F: Fn(&mut Request) -> HandlerResult + Send + Sync,
{
    fn handle(&self, request: &mut Request) -> HandlerResult {
        self(request)
    }
}

/// What must hold before an intent's handler may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precondition {
    /// The handler runs with or without a stored address.
    None,
    /// The handler needs the user's address in the session.
    RequiresAddress,
}

impl fmt::Display for Precondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::RequiresAddress => write!(f, "requires_address"),
        }
    }
}

/// A single entry in the registry.
pub struct Registration {
    pub name: String,
    pub precondition: Precondition,
    handler: Arc<dyn IntentHandler>,
}

impl Registration {
    /// Invoke the handler.
    pub fn invoke(&self, request: &mut Request) -> HandlerResult {
        self.handler.handle(request)
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("precondition", &self.precondition)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Collects registrations before the registry is frozen.
#[derive(Default)]
pub struct RegistryBuilder {
    entries: Vec<Registration>,
}

impl RegistryBuilder {
    /// Register `handler` under `name`.
    ///
    /// Fails if `name` is already registered (under either precondition) or
    /// is [`SET_ADDRESS_INTENT`].
    pub fn register<H>(
        &mut self,
        name: impl Into<String>,
        precondition: Precondition,
        handler: H,
    ) -> Result<()>
    where
        H: IntentHandler + 'static,
    {
        let name = name.into();

        if name == SET_ADDRESS_INTENT {
            return Err(KernelError::ReservedIntent { intent: name });
        }
        if self.entries.iter().any(|e| e.name == name) {
            return Err(KernelError::DuplicateIntent { intent: name });
        }

        tracing::debug!(intent = %name, precondition = %precondition, "intent registered");

        self.entries.push(Registration {
            name,
            precondition,
            handler: Arc::new(handler),
        });
        Ok(())
    }

    /// Append the platform built-in intents: help, stop and cancel.
    pub fn register_builtin_intents(&mut self) -> Result<()> {
        self.register(HELP_INTENT, Precondition::None, help_intent)?;
        self.register(STOP_INTENT, Precondition::None, goodbye_intent)?;
        self.register(CANCEL_INTENT, Precondition::None, goodbye_intent)?;
        Ok(())
    }

    /// Freeze the registrations into an [`IntentRegistry`].
    #[must_use]
    pub fn build(self) -> IntentRegistry {
        let index = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.name.clone(), i))
            .collect();

        tracing::info!(count = self.entries.len(), "intent registry built");

        IntentRegistry {
            entries: self.entries,
            index,
        }
    }
}

fn help_intent(request: &mut Request) -> HandlerResult {
    Ok(responses::welcome(request))
}

fn goodbye_intent(request: &mut Request) -> HandlerResult {
    Ok(responses::goodbye(request))
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Immutable table of registered intents.
pub struct IntentRegistry {
    /// Registrations in the order they were added.
    entries: Vec<Registration>,
    /// Intent name to position in `entries`.
    index: HashMap<String, usize>,
}

impl IntentRegistry {
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Look up the registration for `name`.
    pub fn lookup(&self, name: &str) -> Option<&Registration> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterate over registrations in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Registration> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for IntentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
