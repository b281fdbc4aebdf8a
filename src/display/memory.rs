/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::debug;
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/***************************************/
/*           Local modules             */
/***************************************/
use super::{DisplayError, Surface, TextSlots};
use crate::render::Frame;

/**
 * Headless surface. Keeps the last presented frame in memory and, when a
 * dump file is set, appends every frame to it as one JSON line.
 */
pub struct RecordingSurface {
    width: f64,
    height: f64,
    last: Option<Frame>,
    presented: u64,
    dump: Option<BufWriter<File>>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> RecordingSurface {
        RecordingSurface {
            width,
            height,
            last: None,
            presented: 0,
            dump: None,
        }
    }

    pub fn with_dump<P: AsRef<Path>>(width: f64, height: f64, path: P) -> io::Result<RecordingSurface> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut surface = RecordingSurface::new(width, height);
        surface.dump = Some(BufWriter::new(file));
        Ok(surface)
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.last.as_ref()
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn present(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        if let Some(dump) = self.dump.as_mut() {
            serde_json::to_writer(&mut *dump, frame)?;
            dump.write_all(b"\n")?;
            dump.flush()?;
        }
        self.last = Some(frame.clone());
        self.presented += 1;
        Ok(())
    }
}

/// Headless text slots. Values are kept per identifier and logged.
#[derive(Debug, Default)]
pub struct MemorySlots {
    values: BTreeMap<String, Option<String>>,
}

impl MemorySlots {
    pub fn new<I, S>(ids: I) -> MemorySlots
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MemorySlots {
            values: ids.into_iter().map(|id| (id.into(), None)).collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.values.get(id).and_then(|value| value.as_deref())
    }
}

impl TextSlots for MemorySlots {
    fn has_slot(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    fn write_slot(&mut self, id: &str, text: &str) -> Result<(), DisplayError> {
        match self.values.get_mut(id) {
            Some(value) => {
                debug!("{} = {}", id, text);
                *value = Some(text.to_string());
                Ok(())
            }
            None => Err(DisplayError::UnknownSlot(id.to_string())),
        }
    }
}
