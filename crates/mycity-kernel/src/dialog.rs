//! Two-state address dialog.
//!
//! When an address-required intent arrives before the user has told us their
//! address, the dispatcher asks for it and remembers the intent.  The next
//! `SetAddressIntent` then resumes that intent instead of just confirming the
//! address.  The state lives entirely in the session attributes, so it
//! survives the round-trip through the voice platform.
//!
//! ```text
//!   AwaitingIntent ──(address-required intent, no address)──▶ AwaitingAddressThenRedirect
//!         ▲                                                              │
//!         └──────────────────────(SetAddressIntent)──────────────────────┘
//! ```

use crate::session::SessionAttributes;

/// Where the address dialog currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogState {
    /// No intent is waiting on an address.
    AwaitingIntent,
    /// `intent` asked for an address and should run once one is set.
    AwaitingAddressThenRedirect { intent: String },
}

/// What `SetAddressIntent` should do after storing the address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressStep {
    /// Resume the intent that prompted for the address.
    Redirect(String),
    /// Nothing was waiting; confirm the address back to the user.
    Confirm,
}

impl DialogState {
    /// Inspect the dialog state without consuming it.
    pub fn current(attrs: &SessionAttributes) -> Self {
        match attrs.prompted_from_intent() {
            Some(intent) => Self::AwaitingAddressThenRedirect {
                intent: intent.to_string(),
            },
            None => Self::AwaitingIntent,
        }
    }

    /// Consume the dialog state, deleting the prompted-from marker.
    pub fn take(attrs: &mut SessionAttributes) -> Self {
        match attrs.take_prompted_from_intent() {
            Some(intent) => Self::AwaitingAddressThenRedirect { intent },
            None => Self::AwaitingIntent,
        }
    }

    /// Transition into [`DialogState::AwaitingAddressThenRedirect`] for
    /// `intent`.
    pub fn prompt_for_address(attrs: &mut SessionAttributes, intent: &str) -> Self {
        attrs.set_prompted_from_intent(intent);
        Self::AwaitingAddressThenRedirect {
            intent: intent.to_string(),
        }
    }

    /// Decide the next step once an address has been supplied.
    pub fn on_address_set(self) -> AddressStep {
        match self {
            Self::AwaitingAddressThenRedirect { intent } => AddressStep::Redirect(intent),
            Self::AwaitingIntent => AddressStep::Confirm,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ADDRESS_PROMPTED_FROM_INTENT_KEY;

    #[test]
    fn empty_session_awaits_intent() {
        let attrs = SessionAttributes::new();
        assert_eq!(DialogState::current(&attrs), DialogState::AwaitingIntent);
        assert_eq!(DialogState::AwaitingIntent.on_address_set(), AddressStep::Confirm);
    }

    #[test]
    fn prompt_then_take_redirects_once() {
        let mut attrs = SessionAttributes::new();
        let state = DialogState::prompt_for_address(&mut attrs, "SnowParkingIntent");
        assert_eq!(DialogState::current(&attrs), state);

        let taken = DialogState::take(&mut attrs);
        assert_eq!(
            taken.on_address_set(),
            AddressStep::Redirect("SnowParkingIntent".into())
        );
        assert!(!attrs.contains_key(ADDRESS_PROMPTED_FROM_INTENT_KEY));

        // The marker is single-use.
        assert_eq!(DialogState::take(&mut attrs), DialogState::AwaitingIntent);
    }

    #[test]
    fn current_does_not_consume() {
        let mut attrs = SessionAttributes::new();
        attrs.set_prompted_from_intent("TrashDayIntent");

        let _ = DialogState::current(&attrs);
        assert_eq!(attrs.prompted_from_intent(), Some("TrashDayIntent"));
    }
}
