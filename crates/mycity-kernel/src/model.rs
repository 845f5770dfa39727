//! Normalized request and response models.
//!
//! A [`Request`] is produced by a transport adapter (see [`crate::platform`])
//! from a voice-platform event.  It is mutable for the lifetime of one
//! request/response cycle: handlers may read and write its
//! [`SessionAttributes`].  A [`Response`] carries the spoken output plus a
//! copy of the attributes the platform should persist for the next turn.

use std::collections::HashMap;
use std::fmt;

use crate::session::{ADDRESS_SLOT, SessionAttributes};

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// The kind of platform request being dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RequestType {
    /// The user opened the skill without asking for anything.
    Launch,
    /// The user asked for a specific intent.
    Intent,
    /// The platform closed the session.
    SessionEnded,
    /// Any request type the router does not know how to handle.
    Other(String),
}

impl RequestType {
    /// Map a platform request type string onto a [`RequestType`].
    pub fn from_platform(kind: &str) -> Self {
        match kind {
            "LaunchRequest" => Self::Launch,
            "IntentRequest" => Self::Intent,
            "SessionEndedRequest" => Self::SessionEnded,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Launch => write!(f, "LaunchRequest"),
            Self::Intent => write!(f, "IntentRequest"),
            Self::SessionEnded => write!(f, "SessionEndedRequest"),
            Self::Other(kind) => write!(f, "{kind}"),
        }
    }
}

/// A normalized voice-platform request.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub request_type: RequestType,
    /// Present only for [`RequestType::Intent`].
    pub intent_name: Option<String>,
    /// Slot values keyed by slot name.  Slots the user did not fill are absent.
    pub slots: HashMap<String, String>,
    pub session_id: String,
    pub request_id: String,
    /// The skill the platform addressed this request to.
    pub application_id: Option<String>,
    pub is_new_session: bool,
    pub session_attributes: SessionAttributes,
}

impl Request {
    fn with_type(request_type: RequestType, intent_name: Option<String>) -> Self {
        Self {
            request_type,
            intent_name,
            slots: HashMap::new(),
            session_id: String::new(),
            request_id: String::new(),
            application_id: None,
            is_new_session: false,
            session_attributes: SessionAttributes::new(),
        }
    }

    /// A launch request.
    #[must_use]
    pub fn launch() -> Self {
        Self::with_type(RequestType::Launch, None)
    }

    /// An intent request for `name`.
    #[must_use]
    pub fn intent(name: impl Into<String>) -> Self {
        Self::with_type(RequestType::Intent, Some(name.into()))
    }

    /// A session-ended request.
    #[must_use]
    pub fn session_ended() -> Self {
        Self::with_type(RequestType::SessionEnded, None)
    }

    /// Set the session and request identifiers.
    pub fn with_ids(mut self, session_id: impl Into<String>, request_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self.request_id = request_id.into();
        self
    }

    pub fn with_application_id(mut self, application_id: impl Into<String>) -> Self {
        self.application_id = Some(application_id.into());
        self
    }

    /// Mark the request as the first of a new session.
    pub fn new_session(mut self, is_new: bool) -> Self {
        self.is_new_session = is_new;
        self
    }

    pub fn with_slot(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.slots.insert(name.into(), value.into());
        self
    }

    /// Replace the session attributes.
    pub fn with_attributes(mut self, attributes: SessionAttributes) -> Self {
        self.session_attributes = attributes;
        self
    }

    /// Return the value of a filled slot.
    pub fn slot(&self, name: &str) -> Option<&str> {
        self.slots.get(name).map(String::as_str)
    }

    /// Store the spoken address slot into the session attributes.
    ///
    /// Leaves the session untouched when the slot is missing or blank, and
    /// returns whether an address was stored.
    pub fn store_address_from_slot(&mut self) -> bool {
        let Some(address) = self.slot(ADDRESS_SLOT).map(str::trim) else {
            return false;
        };
        if address.is_empty() {
            return false;
        }
        let address = address.to_string();
        tracing::debug!(session_id = %self.session_id, address = %address, "address stored in session");
        self.session_attributes.set_address(address);
        true
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// A normalized spoken response.
///
/// [`Response::default`] is the empty response returned when a session ends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    pub output_speech: Option<String>,
    pub reprompt_text: Option<String>,
    pub card_title: Option<String>,
    /// Attributes the platform should send back with the next request.
    pub session_attributes: SessionAttributes,
    pub should_end_session: bool,
}

impl Response {
    /// Start a response that carries `attributes` through to the next turn.
    #[must_use]
    pub fn with_attributes(attributes: SessionAttributes) -> Self {
        Self {
            session_attributes: attributes,
            ..Self::default()
        }
    }

    pub fn card_title(mut self, title: impl Into<String>) -> Self {
        self.card_title = Some(title.into());
        self
    }

    pub fn speech(mut self, text: impl Into<String>) -> Self {
        self.output_speech = Some(text.into());
        self
    }

    pub fn reprompt(mut self, text: impl Into<String>) -> Self {
        self.reprompt_text = Some(text.into());
        self
    }

    pub fn end_session(mut self, end: bool) -> Self {
        self.should_end_session = end;
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
