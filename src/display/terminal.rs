/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossterm::style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::{cursor, execute, queue, terminal};
use log::warn;
use std::io::{stdout, Stdout, Write};

/***************************************/
/*           Local modules             */
/***************************************/
use super::grid::CellGrid;
use super::{DisplayError, Surface, TextSlots};
use crate::config::{DisplayConfig, SlotConfig};
use crate::render::frame::Color;
use crate::render::{Frame, Layout};

fn term_color(color: Color) -> style::Color {
    style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/**
 * Presents frames on the terminal's alternate screen.
 *
 * The pixel surface is mapped onto a fixed grid of character cells in the
 * top-left corner. The screen is restored when the surface is dropped.
 *
 * # Fields
 * - `stdout`:       Terminal handle.
 * - `width`, `height`:  Pixel size of the surface.
 * - `cell_width`, `cell_height`:  Pixels covered by one character cell.
 */
pub struct TerminalSurface {
    stdout: Stdout,
    width: f64,
    height: f64,
    cell_width: f64,
    cell_height: f64,
}

impl TerminalSurface {
    /// Fails when the terminal cannot hold the grid plus `reserved_rows`
    /// lines underneath it.
    pub fn new(config: &DisplayConfig, layout: &Layout, reserved_rows: u16) -> Result<TerminalSurface, DisplayError> {
        let (cols, rows) = CellGrid::dimensions(layout.width, layout.height, config.cell_width, config.cell_height);
        let available = terminal::size()?;
        let needed = (cols, rows.saturating_add(reserved_rows));
        if available.0 < needed.0 || available.1 < needed.1 {
            return Err(DisplayError::TooSmall { needed, available });
        }

        let mut stdout = stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All)
        )?;

        Ok(TerminalSurface {
            stdout,
            width: layout.width,
            height: layout.height,
            cell_width: config.cell_width,
            cell_height: config.cell_height,
        })
    }
}

impl Surface for TerminalSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn present(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        // Rasterize fully before touching the screen
        let grid = CellGrid::rasterize(frame, self.cell_width, self.cell_height);

        for row in 0..grid.rows() {
            queue!(self.stdout, cursor::MoveTo(0, row))?;
            let mut colors = None;
            for col in 0..grid.cols() {
                let cell = match grid.cell(col, row) {
                    Some(cell) => cell,
                    None => continue,
                };
                if colors != Some((cell.fg, cell.bg)) {
                    queue!(
                        self.stdout,
                        SetForegroundColor(term_color(cell.fg)),
                        SetBackgroundColor(term_color(cell.bg))
                    )?;
                    colors = Some((cell.fg, cell.bg));
                }
                queue!(self.stdout, Print(cell.ch))?;
            }
        }
        queue!(self.stdout, ResetColor)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        if let Err(e) = execute!(self.stdout, ResetColor, cursor::Show, terminal::LeaveAlternateScreen) {
            warn!("Failed to restore terminal: {}", e);
        }
    }
}

/**
 * Stats slots printed as `label: value` lines below the surface grid,
 * one line per configured slot in configuration order.
 */
pub struct TerminalSlots {
    stdout: Stdout,
    first_row: u16,
    slots: Vec<SlotConfig>,
}

impl TerminalSlots {
    pub fn new(slots: &[SlotConfig], first_row: u16) -> TerminalSlots {
        TerminalSlots {
            stdout: stdout(),
            first_row,
            slots: slots.to_vec(),
        }
    }

    /// Slot lines start one blank line below a grid of `grid_rows` rows.
    pub fn under_grid(slots: &[SlotConfig], grid_rows: u16) -> TerminalSlots {
        TerminalSlots::new(slots, grid_rows.saturating_add(1))
    }

    /// Terminal rows taken up by the slot lines and the blank line above them.
    pub fn reserved_rows(slots: &[SlotConfig]) -> u16 {
        u16::try_from(slots.len()).unwrap_or(u16::MAX).saturating_add(1)
    }

    pub fn row(&self, index: usize) -> u16 {
        let index = u16::try_from(index).unwrap_or(u16::MAX);
        self.first_row.saturating_add(index)
    }
}

impl TextSlots for TerminalSlots {
    fn has_slot(&self, id: &str) -> bool {
        self.slots.iter().any(|slot| slot.id == id)
    }

    fn write_slot(&mut self, id: &str, text: &str) -> Result<(), DisplayError> {
        let (index, slot) = self
            .slots
            .iter()
            .enumerate()
            .find(|(_, slot)| slot.id == id)
            .ok_or_else(|| DisplayError::UnknownSlot(id.to_string()))?;

        let row = self.row(index);
        let line = format!("{}: {}", slot.label, text);
        queue!(
            self.stdout,
            cursor::MoveTo(0, row),
            terminal::Clear(terminal::ClearType::UntilNewLine),
            Print(line)
        )?;
        self.stdout.flush()?;
        Ok(())
    }
}
