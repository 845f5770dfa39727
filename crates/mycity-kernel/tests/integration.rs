//! Integration tests for the mycity-kernel crate.
//!
//! These tests drive the dispatcher through its public API, both with
//! hand-built requests and with platform JSON fixtures.

use mycity_kernel::registry::{CANCEL_INTENT, HELP_INTENT, STOP_INTENT};
use mycity_kernel::responses::{GOODBYE_SPEECH, WELCOME_SPEECH};
use mycity_kernel::session::{ADDRESS_PROMPTED_FROM_INTENT_KEY, ADDRESS_SLOT};
use mycity_kernel::{
    Dispatcher, HandlerResult, IntentRegistry, KernelError, PlatformReply, Precondition,
    Request, Response, SessionAttributes, parse_event, render_reply,
};

const APPLICATION_ID: &str = "amzn1.ask.skill.boston-public-services";

fn trash_day(request: &mut Request) -> HandlerResult {
    let address = request.session_attributes.address().unwrap_or_default().to_string();
    Ok(Response::with_attributes(request.session_attributes.clone())
        .card_title("TrashDayIntent")
        .speech(format!("Trash at {address} is picked up on Wednesday.")))
}

fn snow_parking(request: &mut Request) -> HandlerResult {
    Ok(Response::with_attributes(request.session_attributes.clone())
        .card_title("SnowParkingIntent")
        .speech("Park at the Everdean lot."))
}

fn alerts(request: &mut Request) -> HandlerResult {
    Ok(Response::with_attributes(request.session_attributes.clone())
        .card_title("GetAlertsIntent")
        .speech("There are no alerts."))
}

fn dispatcher() -> Dispatcher {
    let mut builder = IntentRegistry::builder();
    builder.register("GetAlertsIntent", Precondition::None, alerts).unwrap();
    builder
        .register("TrashDayIntent", Precondition::RequiresAddress, trash_day)
        .unwrap();
    builder
        .register("SnowParkingIntent", Precondition::RequiresAddress, snow_parking)
        .unwrap();
    builder.register_builtin_intents().unwrap();
    Dispatcher::new(builder.build()).with_application_id(APPLICATION_ID)
}

fn session_with(pairs: &[(&str, &str)]) -> SessionAttributes {
    let mut attrs = SessionAttributes::new();
    for (k, v) in pairs {
        attrs.insert(*k, *v);
    }
    attrs
}

fn intent(name: &str) -> Request {
    Request::intent(name).with_application_id(APPLICATION_ID)
}

// ═══════════════════════════════════════════════════════════════════════
//  Routing properties
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn unregistered_intents_are_invalid() {
    let dispatcher = dispatcher();
    for name in ["OrderPizzaIntent", "trashdayintent", "", "AMAZON.FallbackIntent"] {
        let result = dispatcher.execute(intent(name));
        assert!(
            matches!(result, Err(KernelError::InvalidIntent { .. })),
            "{name:?} should be invalid"
        );
    }
}

#[test]
fn every_address_required_intent_prompts_without_address() {
    let dispatcher = dispatcher();
    for name in ["TrashDayIntent", "SnowParkingIntent"] {
        let response = dispatcher.execute(intent(name)).unwrap();
        assert_eq!(response.session_attributes.prompted_from_intent(), Some(name));
        assert!(!response.should_end_session);
    }
}

#[test]
fn redirect_round_trip_matches_direct_dispatch() {
    let dispatcher = dispatcher();

    let redirected = dispatcher
        .execute(
            intent("SetAddressIntent")
                .with_slot(ADDRESS_SLOT, "46 Everdean St")
                .with_attributes(session_with(&[(ADDRESS_PROMPTED_FROM_INTENT_KEY, "TrashDayIntent")])),
        )
        .unwrap();

    let direct = dispatcher
        .execute(
            intent("TrashDayIntent")
                .with_attributes(session_with(&[("currentAddress", "46 Everdean St")])),
        )
        .unwrap();

    assert_eq!(redirected, direct);
    assert!(
        !redirected
            .session_attributes
            .contains_key(ADDRESS_PROMPTED_FROM_INTENT_KEY)
    );
}

#[test]
fn help_is_independent_of_session_contents() {
    let dispatcher = dispatcher();
    let sessions = [
        SessionAttributes::new(),
        session_with(&[("currentAddress", "46 Everdean St")]),
        session_with(&[(ADDRESS_PROMPTED_FROM_INTENT_KEY, "TrashDayIntent"), ("other", "x")]),
    ];

    for attrs in sessions {
        let response = dispatcher
            .execute(intent(HELP_INTENT).with_attributes(attrs.clone()))
            .unwrap();
        assert_eq!(response.output_speech.as_deref(), Some(WELCOME_SPEECH));
        assert!(!response.should_end_session);
        assert_eq!(response.session_attributes, attrs);
    }
}

#[test]
fn stop_and_cancel_end_the_session() {
    let dispatcher = dispatcher();
    for name in [STOP_INTENT, CANCEL_INTENT] {
        let response = dispatcher
            .execute(intent(name).with_attributes(session_with(&[("currentAddress", "x")])))
            .unwrap();
        assert_eq!(response.output_speech.as_deref(), Some(GOODBYE_SPEECH));
        assert!(response.should_end_session);
    }
}

#[test]
fn address_optional_intent_runs_without_address() {
    let response = dispatcher().execute(intent("GetAlertsIntent")).unwrap();
    assert_eq!(response.output_speech.as_deref(), Some("There are no alerts."));
    assert!(response.session_attributes.is_empty());
}

// ═══════════════════════════════════════════════════════════════════════
//  Platform fixtures
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn launch_fixture_end_to_end() {
    let request = parse_event(include_str!("fixtures/launch.json")).unwrap();
    assert!(request.is_new_session);

    let response = dispatcher().execute(request).unwrap();
    assert_eq!(response.card_title.as_deref(), Some("Welcome"));
    assert!(
        response
            .output_speech
            .as_deref()
            .is_some_and(|s| s.starts_with("Welcome to the Boston Public Services skill."))
    );
    assert!(!response.should_end_session);
}

#[test]
fn prompt_then_set_address_through_json() {
    let dispatcher = dispatcher();

    let prompt = dispatcher
        .execute(parse_event(include_str!("fixtures/trash_day.json")).unwrap())
        .unwrap();
    let reply: serde_json::Value = serde_json::from_str(&render_reply(&prompt).unwrap()).unwrap();
    assert_eq!(
        reply["sessionAttributes"][ADDRESS_PROMPTED_FROM_INTENT_KEY],
        "TrashDayIntent"
    );
    assert_eq!(reply["response"]["shouldEndSession"], false);

    let answer = dispatcher
        .execute(parse_event(include_str!("fixtures/set_address.json")).unwrap())
        .unwrap();
    let reply = PlatformReply::from(answer);
    assert_eq!(
        reply.response.output_speech.map(|s| s.text).as_deref(),
        Some("Trash at 46 Everdean Street is picked up on Wednesday.")
    );
    assert_eq!(reply.session_attributes.address(), Some("46 Everdean Street"));
    assert!(
        !reply
            .session_attributes
            .contains_key(ADDRESS_PROMPTED_FROM_INTENT_KEY)
    );
}

#[test]
fn foreign_application_is_rejected() {
    let json = include_str!("fixtures/launch.json").replace(APPLICATION_ID, "amzn1.ask.skill.other");
    let result = dispatcher().execute(parse_event(&json).unwrap());
    assert!(matches!(result, Err(KernelError::InvalidApplicationId { .. })));
}
