/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, error, info, warn};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::display::{Surface, TextSlots};
use crate::render::{Renderer, StatsUpdater};
use crate::shared::Snapshot;

/***************************************/
/*               Enums                 */
/***************************************/
enum Event {
    NewSnapshot(Snapshot),
    Disconnected,
    Terminate,
}

/***************************************/
/*             Public API              */
/***************************************/

/**
 * Owns the current snapshot and drives the render pipeline.
 *
 * Each snapshot replaces the previous one and is rendered immediately and
 * completely. A frame that fails to build or present is dropped and the
 * surface keeps showing the last good frame; the next snapshot supersedes
 * it.
 *
 * # Fields
 * - `renderer`:         Snapshot to display-list mapping.
 * - `surface`:          Where frames are presented.
 * - `stats`:            Writes aggregate stats into the text slots.
 * - `current`:          The last received snapshot.
 * - `frames_rendered`:  Frames presented successfully.
 * - `frames_failed`:    Frames dropped because of a render or display error.
 * - `snapshot_rx`:      Receives snapshots from the network thread.
 * - `terminate_rx`:     Stops `run`.
 */
pub struct Controller<S: Surface, T: TextSlots> {
    renderer: Renderer,
    surface: S,
    stats: StatsUpdater<T>,
    current: Option<Snapshot>,
    frames_rendered: u64,
    frames_failed: u64,

    // Channels
    snapshot_rx: cbc::Receiver<Snapshot>,
    terminate_rx: cbc::Receiver<()>,
}

impl<S: Surface, T: TextSlots> Controller<S, T> {
    pub fn new(
        renderer: Renderer,
        surface: S,
        stats: StatsUpdater<T>,
        snapshot_rx: cbc::Receiver<Snapshot>,
        terminate_rx: cbc::Receiver<()>,
    ) -> Controller<S, T> {
        Controller {
            renderer,
            surface,
            stats,
            current: None,
            frames_rendered: 0,
            frames_failed: 0,
            snapshot_rx,
            terminate_rx,
        }
    }

    pub fn run(&mut self) {
        // Main loop
        loop {
            match self.wait_for_event() {
                Event::NewSnapshot(snapshot) => self.on_update(snapshot),
                Event::Disconnected => {
                    error!("Snapshot channel closed, stopping");
                    break;
                }
                Event::Terminate => {
                    info!("Terminating");
                    break;
                }
            }
        }
        info!(
            "Rendered {} frames, dropped {}",
            self.frames_rendered, self.frames_failed
        );
    }

    /// Stores `snapshot` as the current state and renders it.
    pub fn on_update(&mut self, snapshot: Snapshot) {
        self.current = Some(snapshot);
        self.render();
    }

    /// Renders the current snapshot. Returns whether a new frame was
    /// presented.
    pub fn render(&mut self) -> bool {
        let snapshot = match self.current.as_ref() {
            Some(snapshot) => snapshot,
            None => return false,
        };

        let frame = match self.renderer.render(snapshot) {
            Ok(frame) => frame,
            Err(e) => {
                error!("Dropping frame: {}", e);
                self.frames_failed += 1;
                return false;
            }
        };

        if let Err(e) = self.surface.present(&frame) {
            error!("Failed to present frame: {}", e);
            self.frames_failed += 1;
            return false;
        }
        self.frames_rendered += 1;
        debug!("Presented frame {} ({} commands)", self.frames_rendered, frame.commands.len());

        if let Err(e) = self.stats.update(snapshot.stats.as_ref()) {
            warn!("Failed to update stats: {}", e);
        }
        true
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.current.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn slots(&self) -> &T {
        self.stats.slots()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn frames_failed(&self) -> u64 {
        self.frames_failed
    }

    fn wait_for_event(&self) -> Event {
        cbc::select! {
            // Handling new snapshot
            recv(self.snapshot_rx) -> snapshot => {
                match snapshot {
                    Ok(snapshot) => Event::NewSnapshot(snapshot),
                    Err(_) => Event::Disconnected,
                }
            },

            recv(self.terminate_rx) -> _ => {
                Event::Terminate
            }
        }
    }
}
