//! Line-oriented session simulator.
//!
//! Each input line is one turn of a single voice session:
//!
//! ```text
//! launch
//! TrashDayIntent
//! SetAddressIntent Address=46 Everdean St
//! AMAZON.StopIntent
//! end
//! ```
//!
//! Session attributes returned by one turn are sent with the next, the same
//! way the voice platform round-trips them.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use mycity_kernel::{Dispatcher, Request, Response, SessionAttributes};
use tracing::{info, warn};

/// One parsed input line.
#[derive(Debug, PartialEq, Eq)]
pub enum Turn {
    Launch,
    End,
    Quit,
    Intent {
        name: String,
        slot: Option<(String, String)>,
    },
}

/// Parse one line of chat input.  Blank lines yield `None`.
pub fn parse_turn(line: &str) -> Result<Option<Turn>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let turn = match line {
        "launch" => Turn::Launch,
        "end" => Turn::End,
        "quit" | "exit" => Turn::Quit,
        _ => {
            let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
            let rest = rest.trim();
            let slot = if rest.is_empty() {
                None
            } else {
                let Some((slot, value)) = rest.split_once('=') else {
                    bail!("expected Slot=value after the intent name, got `{rest}`");
                };
                Some((slot.trim().to_string(), value.trim().to_string()))
            };
            Turn::Intent {
                name: name.to_string(),
                slot,
            }
        }
    };
    Ok(Some(turn))
}

/// A simulated session carried across turns.
pub struct ChatSession<'a> {
    dispatcher: &'a Dispatcher,
    application_id: Option<String>,
    attributes: SessionAttributes,
    turn: u32,
}

impl<'a> ChatSession<'a> {
    pub fn new(dispatcher: &'a Dispatcher, application_id: Option<String>) -> Self {
        Self {
            dispatcher,
            application_id,
            attributes: SessionAttributes::new(),
            turn: 0,
        }
    }

    pub fn attributes(&self) -> &SessionAttributes {
        &self.attributes
    }

    /// Dispatch one turn and carry its session attributes forward.
    ///
    /// Returns `None` for [`Turn::Quit`].
    pub fn step(&mut self, turn: Turn) -> Result<Option<Response>> {
        let request = match turn {
            Turn::Quit => return Ok(None),
            Turn::Launch => Request::launch(),
            Turn::End => Request::session_ended(),
            Turn::Intent { name, slot } => {
                let request = Request::intent(name);
                match slot {
                    Some((slot, value)) => request.with_slot(slot, value),
                    None => request,
                }
            }
        };

        self.turn += 1;
        let mut request = request
            .with_ids("chat-session", format!("chat-request-{}", self.turn))
            .new_session(self.turn == 1)
            .with_attributes(self.attributes.clone());
        request.application_id = self.application_id.clone();

        let ended = request.request_type == mycity_kernel::RequestType::SessionEnded;
        let response = self.dispatcher.execute(request)?;

        if ended || response.should_end_session {
            self.attributes = SessionAttributes::new();
            self.turn = 0;
        } else {
            self.attributes = response.session_attributes.clone();
        }
        Ok(Some(response))
    }
}

/// Run the REPL over `input`, writing spoken output to `output`.
pub fn run(
    dispatcher: &Dispatcher,
    application_id: Option<String>,
    input: impl BufRead,
    mut output: impl Write,
) -> Result<()> {
    let mut session = ChatSession::new(dispatcher, application_id);

    for line in input.lines() {
        let line = line.context("failed to read input")?;

        let turn = match parse_turn(&line) {
            Ok(Some(turn)) => turn,
            Ok(None) => continue,
            Err(e) => {
                writeln!(output, "  ! {e}")?;
                continue;
            }
        };

        match session.step(turn) {
            Ok(Some(response)) => {
                if let Some(title) = &response.card_title {
                    writeln!(output, "  [{title}]")?;
                }
                if let Some(speech) = &response.output_speech {
                    writeln!(output, "  {speech}")?;
                }
                if response.should_end_session {
                    writeln!(output, "  (session ended)")?;
                }
                tracing::debug!(attributes = session.attributes().len(), "turn complete");
            }
            Ok(None) => {
                info!("user requested exit");
                break;
            }
            Err(e) => {
                warn!(error = %e, "turn failed");
                writeln!(output, "  ! {e}")?;
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
