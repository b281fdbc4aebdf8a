/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::fmt;
use std::io;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::render::Frame;

pub mod grid;
pub mod memory;
pub mod terminal;

pub use grid::{Cell, CellGrid};
pub use memory::{MemorySlots, RecordingSurface};
pub use terminal::{TerminalSlots, TerminalSurface};

/***************************************/
/*               Traits                */
/***************************************/

/// A fixed-size raster the renderer's frames are presented on.
pub trait Surface {
    /// Pixel width and height. Queried once at startup.
    fn size(&self) -> (f64, f64);

    /// Replaces whatever is on the surface with `frame`. On error the
    /// previously presented frame stays visible.
    fn present(&mut self, frame: &Frame) -> Result<(), DisplayError>;
}

/// Named text-bearing elements of the host, written by identifier.
pub trait TextSlots {
    fn has_slot(&self, id: &str) -> bool;
    fn write_slot(&mut self, id: &str, text: &str) -> Result<(), DisplayError>;
}

/***************************************/
/*               Errors                */
/***************************************/
#[derive(Debug)]
pub enum DisplayError {
    Io(io::Error),
    Encode(serde_json::Error),
    TooSmall { needed: (u16, u16), available: (u16, u16) },
    UnknownSlot(String),
}

#[derive(Debug, PartialEq)]
pub enum SlotError {
    Missing(String),
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::Io(e) => write!(f, "display I/O failed: {}", e),
            DisplayError::Encode(e) => write!(f, "failed to encode frame: {}", e),
            DisplayError::TooSmall { needed, available } => write!(
                f,
                "terminal is {}x{} cells but the surface needs {}x{}",
                available.0, available.1, needed.0, needed.1
            ),
            DisplayError::UnknownSlot(id) => write!(f, "no display slot named {:?}", id),
        }
    }
}

impl std::error::Error for DisplayError {}

impl From<io::Error> for DisplayError {
    fn from(e: io::Error) -> Self {
        DisplayError::Io(e)
    }
}

impl From<serde_json::Error> for DisplayError {
    fn from(e: serde_json::Error) -> Self {
        DisplayError::Encode(e)
    }
}

impl fmt::Display for SlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotError::Missing(id) => write!(f, "display slot {:?} is not configured", id),
        }
    }
}

impl std::error::Error for SlotError {}
