//! Fixed response builders.
//!
//! These are pure functions of the incoming request: they copy the session
//! attributes through unchanged and fill in fixed card and speech text.

use crate::model::{Request, Response};

pub const WELCOME_CARD_TITLE: &str = "Welcome";
pub const WELCOME_SPEECH: &str =
    "Welcome to the Boston Public Services skill. How can I help you? ";
pub const WELCOME_REPROMPT: &str = "For example, you can tell me your address by saying, \
                                    \"my address is\" followed by your address.";

pub const GOODBYE_CARD_TITLE: &str = "Boston Public Services - Thanks";
pub const GOODBYE_SPEECH: &str =
    "Thank you for using the Boston Public Services skill. See you next time!";

pub const ADDRESS_CARD_TITLE: &str = "Address";
pub const ADDRESS_UNKNOWN_SPEECH: &str = "I'm not sure what your address is. \
                                          You can tell me your address by saying, \
                                          \"my address is\" followed by your address.";

/// Response for launch requests and `AMAZON.HelpIntent`.
pub fn welcome(request: &Request) -> Response {
    Response::with_attributes(request.session_attributes.clone())
        .card_title(WELCOME_CARD_TITLE)
        .speech(WELCOME_SPEECH)
        .reprompt(WELCOME_REPROMPT)
        .end_session(false)
}

/// Response for `AMAZON.StopIntent` and `AMAZON.CancelIntent`.
pub fn goodbye(request: &Request) -> Response {
    Response::with_attributes(request.session_attributes.clone())
        .card_title(GOODBYE_CARD_TITLE)
        .speech(GOODBYE_SPEECH)
        .end_session(true)
}

/// Tell the user which address is stored, or how to set one.
pub fn address_confirmation(request: &Request) -> Response {
    let speech = match request.session_attributes.address() {
        Some(address) => format!("Your address is {address}."),
        None => ADDRESS_UNKNOWN_SPEECH.to_string(),
    };

    Response::with_attributes(request.session_attributes.clone())
        .card_title(ADDRESS_CARD_TITLE)
        .speech(speech)
        .end_session(false)
}

/// Ask the user for their address.
///
/// The caller is responsible for recording which intent is waiting on the
/// answer before building this response, so the marker is carried along.
pub fn address_prompt(request: &Request) -> Response {
    Response::with_attributes(request.session_attributes.clone())
        .card_title(ADDRESS_CARD_TITLE)
        .speech(ADDRESS_UNKNOWN_SPEECH)
        .reprompt(ADDRESS_UNKNOWN_SPEECH)
        .end_session(false)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
