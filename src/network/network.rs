use std::fmt;
use std::io::{self, BufRead, BufReader};
use std::net::TcpStream;
use std::thread::{self, Builder, JoinHandle};
use std::time::Duration;

use crate::config::NetworkConfig;
use crate::shared::Snapshot;
use crossbeam_channel as cbc;
use log::{debug, error, info, warn};
use serde::Deserialize;

#[derive(Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    data: serde_json::Value,
}

#[derive(Debug)]
pub enum DecodeError {
    Envelope(serde_json::Error),
    Payload(serde_json::Error),
}

#[derive(Debug, PartialEq)]
pub enum PumpEnd {
    StreamClosed,
    ConsumerGone,
}

/**
 * Receives simulation snapshots from the server.
 *
 * The push channel is a single TCP connection carrying one JSON envelope
 * per line, `{"event": <name>, "data": <payload>}`. Envelopes for the
 * subscribed event are decoded into `Snapshot`s and forwarded in arrival
 * order on `snapshot_tx`; other events are ignored. Lines that fail to
 * decode are logged and dropped without affecting the connection.
 *
 * # StateReceiver
 * Handle to the receiver thread.
 *
 * # Constructor arguments
 * - `config`:          Network configuration settings.
 * - `snapshot_tx`:     Sender for forwarding decoded snapshots.
 *
 * When the connection ends the receiver reconnects after `retry_delay`.
 * After `max_retries` consecutive failed connects (0 = never give up) the
 * thread exits and drops `snapshot_tx`, which the consumer observes as a
 * disconnect.
 */
pub struct StateReceiver {
    pub thread: JoinHandle<()>,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Envelope(e) => write!(f, "bad envelope: {}", e),
            DecodeError::Payload(e) => write!(f, "bad snapshot payload: {}", e),
        }
    }
}

impl std::error::Error for DecodeError {}

/// `Ok(None)` for blank lines and envelopes of other events.
pub fn decode_message(line: &str, event: &str) -> Result<Option<Snapshot>, DecodeError> {
    if line.trim().is_empty() {
        return Ok(None);
    }
    let envelope: Envelope = serde_json::from_str(line).map_err(DecodeError::Envelope)?;
    if envelope.event != event {
        debug!("Ignoring event {:?}", envelope.event);
        return Ok(None);
    }
    serde_json::from_value(envelope.data)
        .map(Some)
        .map_err(DecodeError::Payload)
}

/// Forwards every snapshot read from `reader` until the stream ends or
/// nobody is listening any more.
pub fn pump<R: BufRead>(mut reader: R, event: &str, snapshot_tx: &cbc::Sender<Snapshot>) -> PumpEnd {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => return PumpEnd::StreamClosed,
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!("Error reading from server: {}", e);
                return PumpEnd::StreamClosed;
            }
        }

        // Encoding errors only cost the line they occur on
        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim_end_matches(&['\n', '\r'][..]),
            Err(e) => {
                warn!("Received line that is not UTF-8: {}", e);
                continue;
            }
        };

        match decode_message(line, event) {
            Ok(Some(snapshot)) => {
                if snapshot_tx.send(snapshot).is_err() {
                    return PumpEnd::ConsumerGone;
                }
            }
            Ok(None) => {}
            Err(e) => warn!("Received bad message: {}", e),
        }
    }
}

impl StateReceiver {
    pub fn new(config: &NetworkConfig, snapshot_tx: cbc::Sender<Snapshot>) -> io::Result<StateReceiver> {
        let config = config.clone();

        // Thread for receiving snapshots. Snapshots are forwarded to the controller
        let state_rx_thread = Builder::new().name("state_rx".into());
        let thread = state_rx_thread.spawn(move || run(&config, snapshot_tx))?;

        Ok(StateReceiver { thread })
    }
}

fn run(config: &NetworkConfig, snapshot_tx: cbc::Sender<Snapshot>) {
    let retry_delay = Duration::from_millis(config.retry_delay);
    let mut failed_attempts: u32 = 0;

    loop {
        match TcpStream::connect(&config.server_address) {
            Ok(stream) => {
                failed_attempts = 0;
                info!("Connected to {}", config.server_address);
                match pump(BufReader::new(stream), &config.event, &snapshot_tx) {
                    PumpEnd::ConsumerGone => return,
                    PumpEnd::StreamClosed => warn!("Connection to {} closed", config.server_address),
                }
            }
            Err(e) => {
                failed_attempts += 1;
                warn!(
                    "Failed to connect to {} (attempt {}): {}",
                    config.server_address, failed_attempts, e
                );
                if config.max_retries != 0 && failed_attempts >= config.max_retries {
                    error!("Giving up on {} after {} attempts", config.server_address, failed_attempts);
                    return;
                }
            }
        }
        thread::sleep(retry_delay);
    }
}
