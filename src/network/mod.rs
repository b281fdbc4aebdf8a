pub mod network;

pub use network::{decode_message, pump, DecodeError, PumpEnd, StateReceiver};
