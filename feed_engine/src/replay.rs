//! Script replay: parse command lines, apply them to the coordinator, write responses.
//!
//! Output is one line per `get_data`: `kind,subscriber,instrument,price,secondary`
//! with six decimals, or `kind,subscriber,instrument,invalid_request` when refused.
//! Non-finite values print as `nan`, `inf` and `-inf`.
//! The JSON format writes the same `Response` as one serde_json object per line.
use std::fmt;
use std::io::{BufRead, Write};

use feed_common::{Action, Command, InstrumentRef, OutputFormat, ParserError, Result};
use log::{debug, info, warn};
use serde::Serialize;

use crate::model::access_coordinator::{AccessCoordinator, Rejection};
use crate::model::snapshot::InstrumentSnapshot;

/// Marker written in place of the snapshot for a refused `get_data`.
pub const INVALID_REQUEST: &str = "invalid_request";

/// Outcome of a `get_data` line, as written to the output stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    /// Kind token exactly as it appeared on the request line.
    pub kind: String,
    /// Subscriber that asked.
    pub subscriber_id: String,
    /// Requested instrument, echoed as written when it did not parse.
    #[serde(flatten)]
    pub instrument: InstrumentRef,
    /// Snapshot on success, `None` for `invalid_request`.
    pub snapshot: Option<InstrumentSnapshot>,
}

impl Response {
    /// Encode the response to JSON bytes.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, ParserError> {
        let json = serde_json::to_vec(self)?;
        Ok(json)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},", self.kind, self.subscriber_id, self.instrument)?;
        match &self.snapshot {
            Some(snapshot) => write!(
                f,
                "{},{}",
                Fixed6(snapshot.last_traded_price),
                Fixed6(snapshot.secondary.value())
            ),
            None => f.write_str(INVALID_REQUEST),
        }
    }
}

/// Six-decimal fixed rendering with lowercase `nan`.
struct Fixed6(f64);

impl fmt::Display for Fixed6 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_nan() {
            f.write_str("nan")
        } else {
            write!(f, "{:.6}", self.0)
        }
    }
}

/// Counters collected over one replay run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Lines read from the script, header and blanks included.
    pub lines_read: usize,
    /// Commands parsed and applied.
    pub commands_applied: usize,
    /// Malformed lines that were skipped.
    pub lines_skipped: usize,
    /// Responses written to the output stream.
    pub responses_written: usize,
    /// Commands refused by the coordinator.
    pub rejections: usize,
}

impl fmt::Display for ReplaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} lines read, {} commands applied, {} skipped, {} responses, {} rejections",
            self.lines_read,
            self.commands_applied,
            self.lines_skipped,
            self.responses_written,
            self.rejections
        )
    }
}

/// Replays a command script against an `AccessCoordinator`.
///
/// Commands are processed strictly one at a time. Malformed lines are logged and
/// skipped; only I/O or encoding failures on the output abort a run.
pub struct ScriptReplayer<W: Write> {
    coordinator: AccessCoordinator,
    sink: W,
    format: OutputFormat,
    summary: ReplaySummary,
}

impl<W: Write> ScriptReplayer<W> {
    /// Create a replayer writing responses to `sink` in `format`.
    pub fn new(coordinator: AccessCoordinator, sink: W, format: OutputFormat) -> Self {
        Self {
            coordinator,
            sink,
            format,
            summary: ReplaySummary::default(),
        }
    }

    /// Read every command from `reader` and apply it.
    ///
    /// If the first non-empty line is a bare count, at most that many following
    /// lines are processed.
    pub fn run<R: BufRead>(&mut self, reader: R) -> Result<ReplaySummary> {
        let mut header_seen = false;
        let mut remaining: Option<usize> = None;

        for (index, line_result) in reader.lines().enumerate() {
            if remaining == Some(0) {
                debug!("Command count reached, ignoring the rest of the script");
                break;
            }
            let line = line_result?;
            self.summary.lines_read += 1;
            let trimmed = line.trim();

            if !header_seen {
                if trimmed.is_empty() {
                    continue;
                }
                header_seen = true;
                if let Ok(count) = trimmed.parse::<usize>() {
                    info!("Script header announces {} commands", count);
                    remaining = Some(count);
                    continue;
                }
            }

            if let Some(left) = remaining.as_mut() {
                *left -= 1;
            }

            if trimmed.is_empty() {
                continue;
            }

            match trimmed.parse::<Command>() {
                Ok(command) => {
                    if let Some(response) = self.apply(command) {
                        self.write_response(&response)?;
                    }
                }
                Err(e) => {
                    warn!("Skipping line {}: {}", index + 1, e);
                    self.summary.lines_skipped += 1;
                }
            }
        }

        self.sink.flush()?;
        Ok(self.summary)
    }

    /// Apply one command; returns the response to emit, if any.
    ///
    /// Only `get_data` produces a response, including one naming an unusable
    /// instrument. Rejected `subscribe`, publish and unknown actions are silent;
    /// an unknown action still binds the subscriber's kind on first mention.
    pub fn apply(&mut self, command: Command) -> Option<Response> {
        self.summary.commands_applied += 1;
        match command {
            Command::Publish {
                instrument_id,
                price,
                secondary,
            } => {
                if !self.coordinator.publish(instrument_id, price, secondary) {
                    debug!("Publish refused for instrument {}", instrument_id);
                    self.summary.rejections += 1;
                }
                None
            }
            Command::Subscriber {
                kind_tag,
                subscriber_id,
                action,
                instrument,
            } => match action {
                Some(Action::Subscribe) => {
                    let outcome = match instrument.id {
                        Some(id) => self.coordinator.subscribe(&kind_tag, &subscriber_id, id),
                        None => Err(self.reject_instrument(&kind_tag, &subscriber_id, &instrument)),
                    };
                    if let Err(rejection) = outcome {
                        debug!("Subscribe refused: {}", rejection);
                        self.summary.rejections += 1;
                    }
                    None
                }
                Some(Action::GetData) => {
                    let outcome = match instrument.id {
                        Some(id) => self.coordinator.request_data(&kind_tag, &subscriber_id, id),
                        None => Err(self.reject_instrument(&kind_tag, &subscriber_id, &instrument)),
                    };
                    let snapshot = match outcome {
                        Ok(snapshot) => Some(snapshot),
                        Err(rejection) => {
                            debug!("get_data refused: {}", rejection);
                            self.summary.rejections += 1;
                            None
                        }
                    };
                    Some(Response {
                        kind: kind_tag,
                        subscriber_id,
                        instrument,
                        snapshot,
                    })
                }
                None => {
                    warn!("Unknown action for subscriber {}, nothing requested", subscriber_id);
                    if let Err(rejection) = self.coordinator.register(&kind_tag, &subscriber_id) {
                        debug!("Registration refused: {}", rejection);
                    }
                    self.summary.rejections += 1;
                    None
                }
            },
        }
    }

    /// Still binds the subscriber on first mention; a kind mismatch takes
    /// precedence over the unusable instrument.
    fn reject_instrument(&mut self, kind_tag: &str, subscriber_id: &str, instrument: &InstrumentRef) -> Rejection {
        match self.coordinator.register(kind_tag, subscriber_id) {
            Ok(_) => Rejection::UnparsedInstrument(instrument.token.clone()),
            Err(rejection) => rejection,
        }
    }

    /// Coordinator state after the commands applied so far.
    pub fn coordinator(&self) -> &AccessCoordinator {
        &self.coordinator
    }

    /// Consume the replayer and return the output sink.
    pub fn into_sink(self) -> W {
        self.sink
    }

    fn write_response(&mut self, response: &Response) -> Result<()> {
        match self.format {
            OutputFormat::Csv => writeln!(self.sink, "{}", response)?,
            OutputFormat::Json => {
                let data = response.to_json_bytes()?;
                self.sink.write_all(&data)?;
                self.sink.write_all(b"\n")?;
            }
        }
        self.summary.responses_written += 1;
        Ok(())
    }
}
