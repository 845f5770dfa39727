//! Voice-platform JSON envelope.
//!
//! Converts Alexa-style request events into normalized [`Request`]s and
//! normalized [`Response`]s back into the platform's reply format.  Only the
//! fields the router uses are modelled; everything else in the event is
//! ignored during deserialization.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Request, RequestType, Response};
use crate::session::SessionAttributes;

/// Reply envelope version.
pub const REPLY_VERSION: &str = "1.0";

// ---------------------------------------------------------------------------
// Inbound event
// ---------------------------------------------------------------------------

/// A request event as delivered by the voice platform.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlatformEvent {
    #[serde(default)]
    pub session: PlatformSession,
    pub request: PlatformRequest,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSession {
    #[serde(default)]
    pub new: bool,
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub application: Option<PlatformApplication>,
    #[serde(default)]
    pub attributes: Option<SessionAttributes>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformApplication {
    pub application_id: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformRequest {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub intent: Option<PlatformIntent>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlatformIntent {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, PlatformSlot>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlatformSlot {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
}

impl PlatformEvent {
    /// Normalize the event into a [`Request`].
    ///
    /// Slots the user did not fill are dropped.
    pub fn into_request(self) -> Request {
        let request_type = RequestType::from_platform(&self.request.kind);

        let (intent_name, slots) = match self.request.intent {
            Some(intent) if request_type == RequestType::Intent => {
                let slots = intent
                    .slots
                    .into_iter()
                    .filter_map(|(key, slot)| slot.value.map(|value| (key, value)))
                    .collect();
                (Some(intent.name), slots)
            }
            _ => (None, HashMap::new()),
        };

        Request {
            request_type,
            intent_name,
            slots,
            session_id: self.session.session_id,
            request_id: self.request.request_id,
            application_id: self.session.application.map(|a| a.application_id),
            is_new_session: self.session.new,
            session_attributes: self.session.attributes.unwrap_or_default(),
        }
    }
}

/// Parse a platform event from JSON.
pub fn parse_event(json: &str) -> Result<Request> {
    let event: PlatformEvent = serde_json::from_str(json)?;
    Ok(event.into_request())
}

// ---------------------------------------------------------------------------
// Outbound reply
// ---------------------------------------------------------------------------

/// A reply in the voice platform's format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformReply {
    pub version: String,
    pub session_attributes: SessionAttributes,
    pub response: PlatformResponseBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformResponseBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    pub should_end_session: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

impl OutputSpeech {
    fn plain(text: String) -> Self {
        Self {
            kind: "PlainText".into(),
            text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

impl From<Response> for PlatformReply {
    fn from(response: Response) -> Self {
        let card = response.card_title.map(|title| Card {
            kind: "Simple".into(),
            title,
            content: response.output_speech.clone().unwrap_or_default(),
        });

        Self {
            version: REPLY_VERSION.into(),
            session_attributes: response.session_attributes,
            response: PlatformResponseBody {
                output_speech: response.output_speech.map(OutputSpeech::plain),
                card,
                reprompt: response.reprompt_text.map(|text| Reprompt {
                    output_speech: OutputSpeech::plain(text),
                }),
                should_end_session: response.should_end_session,
            },
        }
    }
}

/// Render a response as platform reply JSON.
pub fn render_reply(response: &Response) -> Result<String> {
    let reply = PlatformReply::from(response.clone());
    Ok(serde_json::to_string_pretty(&reply)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
