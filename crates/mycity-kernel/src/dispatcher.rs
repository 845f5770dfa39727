//! Request dispatcher.
//!
//! The dispatcher is the single entry point for a normalized request.  It
//! branches on the request type, and for intent requests:
//!
//! 1. Handles `SetAddressIntent` itself: stores the address and either
//!    resumes the intent that prompted for it (rewriting the request's
//!    intent name) or confirms the address.
//! 2. Looks the (possibly resumed) intent up in the [`IntentRegistry`].
//! 3. Enforces [`Precondition::RequiresAddress`] by prompting for an address
//!    and recording which intent is waiting on it.
//! 4. Invokes the handler and returns its response, or its error, unchanged.
//!
//! Unknown intents and unknown request types are hard errors.
//!
//! # Example
//!
//! ```rust
//! # use mycity_kernel::{Dispatcher, IntentRegistry, Request};
//! let mut builder = IntentRegistry::builder();
//! builder.register_builtin_intents().unwrap();
//! let dispatcher = Dispatcher::new(builder.build());
//!
//! let response = dispatcher.execute(Request::launch().new_session(true)).unwrap();
//! assert_eq!(response.card_title.as_deref(), Some("Welcome"));
//! ```

use std::sync::Arc;

use crate::dialog::{AddressStep, DialogState};
use crate::error::{KernelError, Result};
use crate::model::{Request, RequestType, Response};
use crate::observer::{DispatchObserver, TracingObserver};
use crate::registry::{IntentRegistry, Precondition, SET_ADDRESS_INTENT};
use crate::responses;

/// Routes requests to intent handlers.
pub struct Dispatcher {
    registry: IntentRegistry,
    observer: Arc<dyn DispatchObserver>,
    /// When set, requests addressed to any other skill are rejected.
    application_id: Option<String>,
}

impl Dispatcher {
    /// Create a dispatcher over `registry` that logs through `tracing`.
    #[must_use]
    pub fn new(registry: IntentRegistry) -> Self {
        Self {
            registry,
            observer: Arc::new(TracingObserver),
            application_id: None,
        }
    }

    /// Replace the observability hook.
    pub fn with_observer(mut self, observer: Arc<dyn DispatchObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Only accept requests addressed to `application_id`.
    pub fn with_application_id(mut self, application_id: impl Into<String>) -> Self {
        self.application_id = Some(application_id.into());
        self
    }

    pub fn registry(&self) -> &IntentRegistry {
        &self.registry
    }

    /// Dispatch one request and return one response.
    pub fn execute(&self, mut request: Request) -> Result<Response> {
        self.verify_application(&request)?;

        if request.is_new_session {
            self.observer.session_started(&request);
        }

        match request.request_type.clone() {
            RequestType::Launch => {
                self.observer.launch(&request);
                Ok(responses::welcome(&request))
            }
            RequestType::Intent => self.on_intent(&mut request),
            RequestType::SessionEnded => {
                self.observer.session_ended(&request);
                Ok(Response::default())
            }
            RequestType::Other(request_type) => {
                Err(KernelError::UnsupportedRequestType { request_type })
            }
        }
    }

    // -- Private helpers ----------------------------------------------------

    fn verify_application(&self, request: &Request) -> Result<()> {
        let Some(expected) = &self.application_id else {
            return Ok(());
        };
        if request.application_id.as_deref() == Some(expected.as_str()) {
            return Ok(());
        }
        tracing::warn!(
            request_id = %request.request_id,
            application_id = ?request.application_id,
            "rejecting request for another application"
        );
        Err(KernelError::InvalidApplicationId {
            application_id: request.application_id.clone(),
        })
    }

    fn on_intent(&self, request: &mut Request) -> Result<Response> {
        let received = request
            .intent_name
            .clone()
            .ok_or(KernelError::MissingIntentName)?;
        self.observer.intent_received(request, &received);

        let intent = if received == SET_ADDRESS_INTENT {
            request.store_address_from_slot();
            match DialogState::take(&mut request.session_attributes).on_address_set() {
                AddressStep::Redirect(intent) => {
                    self.observer.address_redirect(request, &intent);
                    request.intent_name = Some(intent.clone());
                    intent
                }
                AddressStep::Confirm => return Ok(responses::address_confirmation(request)),
            }
        } else {
            received
        };

        self.route(&intent, request)
    }

    fn route(&self, intent: &str, request: &mut Request) -> Result<Response> {
        let registration =
            self.registry
                .lookup(intent)
                .ok_or_else(|| KernelError::InvalidIntent {
                    intent: intent.to_string(),
                })?;

        if registration.precondition == Precondition::RequiresAddress
            && !request.session_attributes.has_address()
        {
            DialogState::prompt_for_address(&mut request.session_attributes, intent);
            self.observer.address_prompted(request, intent);
            return Ok(responses::address_prompt(request));
        }

        registration.invoke(request).map_err(KernelError::Handler)
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .field("application_id", &self.application_id)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
