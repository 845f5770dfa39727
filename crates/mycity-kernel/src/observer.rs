//! Dispatch observability hook.
//!
//! The dispatcher reports lifecycle events through an injected
//! [`DispatchObserver`] instead of writing to stdout.  [`TracingObserver`] is
//! the default and turns each event into a structured `tracing` record.

use crate::model::Request;

/// Receives dispatcher lifecycle events.  Every method defaults to a no-op.
pub trait DispatchObserver: Send + Sync {
    /// The request is the first of a new session.
    fn session_started(&self, _request: &Request) {}

    /// The user opened the skill.
    fn launch(&self, _request: &Request) {}

    /// An intent request is about to be routed.
    fn intent_received(&self, _request: &Request, _intent: &str) {}

    /// `SetAddressIntent` resumed the intent that prompted for an address.
    fn address_redirect(&self, _request: &Request, _intent: &str) {}

    /// An address-required intent arrived without an address.
    fn address_prompted(&self, _request: &Request, _intent: &str) {}

    /// The platform closed the session.
    fn session_ended(&self, _request: &Request) {}
}

/// Observer that emits `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl DispatchObserver for TracingObserver {
    fn session_started(&self, request: &Request) {
        tracing::info!(
            request_id = %request.request_id,
            session_id = %request.session_id,
            "session started"
        );
    }

    fn launch(&self, request: &Request) {
        tracing::info!(
            request_id = %request.request_id,
            session_id = %request.session_id,
            "launch request"
        );
    }

    fn intent_received(&self, request: &Request, intent: &str) {
        tracing::info!(
            request_id = %request.request_id,
            session_id = %request.session_id,
            intent = %intent,
            "intent request"
        );
    }

    fn address_redirect(&self, request: &Request, intent: &str) {
        tracing::info!(
            session_id = %request.session_id,
            intent = %intent,
            "address set after prompt, redirecting"
        );
    }

    fn address_prompted(&self, request: &Request, intent: &str) {
        tracing::debug!(
            session_id = %request.session_id,
            intent = %intent,
            "no address in session, prompting"
        );
    }

    fn session_ended(&self, request: &Request) {
        tracing::info!(
            request_id = %request.request_id,
            session_id = %request.session_id,
            "session ended"
        );
    }
}
