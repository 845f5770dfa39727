//! Helpers for building spoken text.

/// Spoken when a city service lookup fails.
pub const SERVICE_UNAVAILABLE_SPEECH: &str =
    "Sorry, I'm having trouble reaching that city service right now. Please try again later.";

/// Join items as a spoken English list.
///
/// `["Monday"]` -> `"Monday"`, `["Monday", "Thursday"]` -> `"Monday and
/// Thursday"`, three or more use a serial comma.
pub fn spoken_list(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        [rest @ .., last] => format!("{}, and {last}", rest.join(", ")),
    }
}
