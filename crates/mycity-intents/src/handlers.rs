//! Core intent handlers.
//!
//! Every handler copies the session attributes into its response, uses the
//! intent name as the card title and keeps the session open.  Unknown
//! addresses and failed service lookups are answered with speech; handlers
//! only return `Err` for failures the user cannot do anything about.

use std::sync::Arc;

use mycity_kernel::{BoxError, HandlerResult, IntentHandler, Request, Response, responses};

use crate::services::{AlertFeed, ParkingLocator, TrashSchedule};
use crate::speech::{SERVICE_UNAVAILABLE_SPEECH, spoken_list};

pub const GET_ADDRESS_INTENT: &str = "GetAddressIntent";
pub const GET_ALERTS_INTENT: &str = "GetAlertsIntent";
pub const UNHANDLED_INTENT: &str = "UnhandledIntent";
pub const TRASH_DAY_INTENT: &str = "TrashDayIntent";
pub const SNOW_PARKING_INTENT: &str = "SnowParkingIntent";

pub const NO_ALERTS_SPEECH: &str =
    "There are no alerts. City of Boston services are running on their normal schedule.";
pub const UNHANDLED_SPEECH: &str = "I'm not sure what you're asking me. Please ask again.";
pub const TRASH_NOT_FOUND_SPEECH: &str =
    "I can't seem to find your trash schedule. Please check that your address is in Boston.";
pub const PARKING_NOT_FOUND_SPEECH: &str =
    "I can't seem to find snow emergency parking near your address.";

fn reply(request: &Request, title: &str, speech: impl Into<String>) -> Response {
    Response::with_attributes(request.session_attributes.clone())
        .card_title(title)
        .speech(speech)
        .end_session(false)
}

/// The stored address.  Address-required intents are only invoked once the
/// dispatcher has checked for one.
fn stored_address<'a>(request: &'a Request, intent: &str) -> Result<&'a str, BoxError> {
    request
        .session_attributes
        .address()
        .ok_or_else(|| format!("{intent} invoked without a stored address").into())
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// `GetAddressIntent`: tell the user which address is stored.
pub fn get_address(request: &mut Request) -> HandlerResult {
    Ok(responses::address_confirmation(request))
}

// ---------------------------------------------------------------------------
// Unhandled
// ---------------------------------------------------------------------------

/// `UnhandledIntent`: the platform could not match the utterance.
pub fn unhandled(request: &mut Request) -> HandlerResult {
    Ok(reply(request, UNHANDLED_INTENT, UNHANDLED_SPEECH))
}

// ---------------------------------------------------------------------------
// Alerts
// ---------------------------------------------------------------------------

/// `GetAlertsIntent`: read out current city alerts.
pub struct AlertsHandler {
    feed: Arc<dyn AlertFeed>,
}

impl AlertsHandler {
    pub fn new(feed: Arc<dyn AlertFeed>) -> Self {
        Self { feed }
    }
}

impl IntentHandler for AlertsHandler {
    fn handle(&self, request: &mut Request) -> HandlerResult {
        let speech = match self.feed.current_alerts() {
            Ok(alerts) if alerts.is_empty() => NO_ALERTS_SPEECH.to_string(),
            Ok(alerts) => {
                let mut speech = String::from("Here are the current alerts. ");
                for alert in &alerts {
                    speech.push_str(&format!("{}: {}. ", alert.title, alert.detail));
                }
                speech.trim_end().to_string()
            }
            Err(e) => {
                tracing::warn!(error = %e, "alert feed unavailable");
                SERVICE_UNAVAILABLE_SPEECH.to_string()
            }
        };
        Ok(reply(request, GET_ALERTS_INTENT, speech))
    }
}

// ---------------------------------------------------------------------------
// Trash day
// ---------------------------------------------------------------------------

/// `TrashDayIntent`: when is trash picked up at the stored address.
pub struct TrashDayHandler {
    schedule: Arc<dyn TrashSchedule>,
}

impl TrashDayHandler {
    pub fn new(schedule: Arc<dyn TrashSchedule>) -> Self {
        Self { schedule }
    }
}

impl IntentHandler for TrashDayHandler {
    fn handle(&self, request: &mut Request) -> HandlerResult {
        let address = stored_address(request, TRASH_DAY_INTENT)?;

        let speech = match self.schedule.pickup_days(address) {
            Ok(Some(days)) => {
                format!("Trash and recycling is picked up on {}.", spoken_list(&days))
            }
            Ok(None) => {
                tracing::debug!(address = %address, "no trash schedule for address");
                TRASH_NOT_FOUND_SPEECH.to_string()
            }
            Err(e) => {
                tracing::warn!(address = %address, error = %e, "trash schedule unavailable");
                SERVICE_UNAVAILABLE_SPEECH.to_string()
            }
        };
        Ok(reply(request, TRASH_DAY_INTENT, speech))
    }
}

// ---------------------------------------------------------------------------
// Snow parking
// ---------------------------------------------------------------------------

/// `SnowParkingIntent`: the nearest snow emergency parking lot.
pub struct SnowParkingHandler {
    locator: Arc<dyn ParkingLocator>,
}

impl SnowParkingHandler {
    pub fn new(locator: Arc<dyn ParkingLocator>) -> Self {
        Self { locator }
    }
}

impl IntentHandler for SnowParkingHandler {
    fn handle(&self, request: &mut Request) -> HandlerResult {
        let address = stored_address(request, SNOW_PARKING_INTENT)?;

        let speech = match self.locator.nearest_parking(address) {
            Ok(Some(lot)) => format!(
                "The closest snow emergency parking location is {} at {}. It is {:.1} miles away.",
                lot.name, lot.location, lot.distance_miles
            ),
            Ok(None) => PARKING_NOT_FOUND_SPEECH.to_string(),
            Err(e) => {
                tracing::warn!(address = %address, error = %e, "parking lookup unavailable");
                SERVICE_UNAVAILABLE_SPEECH.to_string()
            }
        };
        Ok(reply(request, SNOW_PARKING_INTENT, speech))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{IntentError, Result};
    use crate::services::{Alert, ParkingLot};

    struct Fixed {
        days: Option<Vec<String>>,
        lot: Option<ParkingLot>,
        alerts: Vec<Alert>,
    }

    impl TrashSchedule for Fixed {
        fn pickup_days(&self, _address: &str) -> Result<Option<Vec<String>>> {
            Ok(self.days.clone())
        }
    }

    impl ParkingLocator for Fixed {
        fn nearest_parking(&self, _address: &str) -> Result<Option<ParkingLot>> {
            Ok(self.lot.clone())
        }
    }

    impl AlertFeed for Fixed {
        fn current_alerts(&self) -> Result<Vec<Alert>> {
            Ok(self.alerts.clone())
        }
    }

    struct Down;

    impl TrashSchedule for Down {
        fn pickup_days(&self, _address: &str) -> Result<Option<Vec<String>>> {
            Err(IntentError::Lookup {
                service: "trash",
                reason: "timeout".into(),
            })
        }
    }

    impl AlertFeed for Down {
        fn current_alerts(&self) -> Result<Vec<Alert>> {
            Err(IntentError::Lookup {
                service: "alerts",
                reason: "503".into(),
            })
        }
    }

    fn empty() -> Fixed {
        Fixed {
            days: None,
            lot: None,
            alerts: Vec::new(),
        }
    }

    fn with_address() -> Request {
        let mut request = Request::intent(TRASH_DAY_INTENT);
        request.session_attributes.set_address("46 Everdean St");
        request
    }

    fn speech(response: &Response) -> &str {
        response.output_speech.as_deref().unwrap_or_default()
    }

    #[test]
    fn trash_days_are_spoken() {
        let handler = TrashDayHandler::new(Arc::new(Fixed {
            days: Some(vec!["Monday".into(), "Thursday".into()]),
            ..empty()
        }));
        let response = handler.handle(&mut with_address()).unwrap();

        assert_eq!(speech(&response), "Trash and recycling is picked up on Monday and Thursday.");
        assert_eq!(response.card_title.as_deref(), Some(TRASH_DAY_INTENT));
        assert_eq!(response.session_attributes.address(), Some("46 Everdean St"));
        assert!(!response.should_end_session);
    }

    #[test]
    fn unknown_trash_address_is_spoken_not_raised() {
        let handler = TrashDayHandler::new(Arc::new(empty()));
        let response = handler.handle(&mut with_address()).unwrap();
        assert_eq!(speech(&response), TRASH_NOT_FOUND_SPEECH);
    }

    #[test]
    fn trash_service_failure_falls_back_to_apology() {
        let handler = TrashDayHandler::new(Arc::new(Down));
        let response = handler.handle(&mut with_address()).unwrap();
        assert_eq!(speech(&response), SERVICE_UNAVAILABLE_SPEECH);
    }

    #[test]
    fn snow_parking_reports_nearest_lot() {
        let handler = SnowParkingHandler::new(Arc::new(Fixed {
            lot: Some(ParkingLot {
                name: "Everdean Street lot".into(),
                location: "Everdean Street and Neponset Avenue".into(),
                distance_miles: 0.42,
            }),
            ..empty()
        }));
        let response = handler.handle(&mut with_address()).unwrap();
        assert_eq!(
            speech(&response),
            "The closest snow emergency parking location is Everdean Street lot at \
             Everdean Street and Neponset Avenue. It is 0.4 miles away."
        );
    }

    #[test]
    fn snow_parking_without_lot() {
        let handler = SnowParkingHandler::new(Arc::new(empty()));
        let response = handler.handle(&mut with_address()).unwrap();
        assert_eq!(speech(&response), PARKING_NOT_FOUND_SPEECH);
    }

    #[test]
    fn handlers_called_without_address_fail() {
        let handler = SnowParkingHandler::new(Arc::new(empty()));
        let err = handler
            .handle(&mut Request::intent(SNOW_PARKING_INTENT))
            .unwrap_err();
        assert_eq!(err.to_string(), "SnowParkingIntent invoked without a stored address");
    }

    #[test]
    fn alerts_are_read_in_order() {
        let handler = AlertsHandler::new(Arc::new(Fixed {
            alerts: vec![
                Alert {
                    title: "Parking ban".into(),
                    detail: "A snow emergency is in effect".into(),
                },
                Alert {
                    title: "Trash".into(),
                    detail: "Pickup is delayed one day".into(),
                },
            ],
            ..empty()
        }));
        let response = handler.handle(&mut Request::intent(GET_ALERTS_INTENT)).unwrap();
        assert_eq!(
            speech(&response),
            "Here are the current alerts. Parking ban: A snow emergency is in effect. \
             Trash: Pickup is delayed one day."
        );
    }

    #[test]
    fn no_alerts_and_failed_feed() {
        let response = AlertsHandler::new(Arc::new(empty()))
            .handle(&mut Request::intent(GET_ALERTS_INTENT))
            .unwrap();
        assert_eq!(speech(&response), NO_ALERTS_SPEECH);

        let response = AlertsHandler::new(Arc::new(Down))
            .handle(&mut Request::intent(GET_ALERTS_INTENT))
            .unwrap();
        assert_eq!(speech(&response), SERVICE_UNAVAILABLE_SPEECH);
    }

    #[test]
    fn unhandled_asks_again() {
        let response = unhandled(&mut Request::intent(UNHANDLED_INTENT)).unwrap();
        assert_eq!(speech(&response), UNHANDLED_SPEECH);
        assert!(!response.should_end_session);
    }

    #[test]
    fn get_address_reads_session() {
        let mut request = with_address();
        let response = get_address(&mut request).unwrap();
        assert_eq!(speech(&response), "Your address is 46 Everdean St.");
    }
}
