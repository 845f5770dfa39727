//! MyCity intent router.
//!
//! This crate is the core of the MyCity voice skill.  It takes a normalized
//! voice-platform request, decides which intent the user wants, makes sure the
//! user's address is known when the intent needs it, and returns a normalized
//! spoken response:
//!
//! - **[`dispatcher`]** -- Routes launch, intent and session-ended requests,
//!   including the `SetAddressIntent` redirect.
//! - **[`registry`]** -- Immutable intent table with per-intent address
//!   preconditions.
//! - **[`dialog`]** -- The two-state "ask for address, then resume" machine.
//! - **[`session`]** -- Typed access to session attributes and their
//!   well-known keys.
//! - **[`responses`]** -- Welcome, goodbye and address response builders.
//! - **[`observer`]** -- Injected observability hook, `tracing` by default.
//! - **[`platform`]** -- Alexa-style JSON event and reply envelope.
//! - **[`error`]** -- Unified kernel error types via [`thiserror`].

pub mod dialog;
pub mod dispatcher;
pub mod error;
pub mod model;
pub mod observer;
pub mod platform;
pub mod registry;
pub mod responses;
pub mod session;

// Re-export the most commonly used types at the crate root for convenience.
pub use dialog::{AddressStep, DialogState};
pub use dispatcher::Dispatcher;
pub use error::{BoxError, KernelError, Result};
pub use model::{Request, RequestType, Response};
pub use observer::{DispatchObserver, TracingObserver};
pub use platform::{PlatformEvent, PlatformReply, parse_event, render_reply};
pub use registry::{
    HandlerResult, IntentHandler, IntentRegistry, Precondition, Registration, RegistryBuilder,
};
pub use session::SessionAttributes;
