use crate::render::frame::{Baseline, Color, DrawCommand, Frame, Point, Rect, TextAlign};
use crate::render::palette;

const HORIZONTAL: char = '─';
const VERTICAL: char = '│';
const CROSSING: char = '┼';
const SLANTED: char = '·';
const UP: char = '▲';
const DOWN: char = '▼';
const DOT: char = '●';

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            ch: ' ',
            fg: palette::FLOOR_TEXT,
            bg: palette::BACKGROUND,
        }
    }
}

/**
 * Character-cell rasterization of a frame.
 *
 * Each cell covers `cell_width` x `cell_height` pixels. Lines become
 * box-drawing glyphs, filled rectangles become background color, small
 * shapes become a single glyph at their center and text is written one
 * character per cell.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct CellGrid {
    cols: u16,
    rows: u16,
    cell_width: f64,
    cell_height: f64,
    cells: Vec<Cell>,
}

impl CellGrid {
    pub fn new(cols: u16, rows: u16, cell_width: f64, cell_height: f64) -> CellGrid {
        CellGrid {
            cols,
            rows,
            cell_width,
            cell_height,
            cells: vec![Cell::default(); cols as usize * rows as usize],
        }
    }

    /// Grid dimensions for a surface of `width` x `height` pixels.
    pub fn dimensions(width: f64, height: f64, cell_width: f64, cell_height: f64) -> (u16, u16) {
        let cols = (width / cell_width).floor().clamp(1.0, u16::MAX as f64) as u16;
        let rows = (height / cell_height).floor().clamp(1.0, u16::MAX as f64) as u16;
        (cols, rows)
    }

    pub fn rasterize(frame: &Frame, cell_width: f64, cell_height: f64) -> CellGrid {
        let (cols, rows) = CellGrid::dimensions(frame.width, frame.height, cell_width, cell_height);
        let mut grid = CellGrid::new(cols, rows, cell_width, cell_height);
        for command in &frame.commands {
            grid.apply(command);
        }
        grid
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cell(&self, col: u16, row: u16) -> Option<&Cell> {
        if col < self.cols && row < self.rows {
            self.cells.get(row as usize * self.cols as usize + col as usize)
        } else {
            None
        }
    }

    pub fn row_text(&self, row: u16) -> String {
        (0..self.cols).filter_map(|col| self.cell(col, row)).map(|c| c.ch).collect()
    }

    pub fn apply(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Clear { color } => {
                for cell in self.cells.iter_mut() {
                    *cell = Cell {
                        ch: ' ',
                        fg: *color,
                        bg: *color,
                    };
                }
            }
            DrawCommand::Line { from, to, color, .. } => self.line(*from, *to, *color),
            DrawCommand::RoundedRect { rect, fill, .. } => self.fill_rect(rect, *fill),
            DrawCommand::Triangle { points, fill } => {
                let top = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
                let apexes = points.iter().filter(|p| p.y == top).count();
                let glyph = if apexes == 1 { UP } else { DOWN };
                let center = Point::new(
                    points.iter().map(|p| p.x).sum::<f64>() / 3.0,
                    points.iter().map(|p| p.y).sum::<f64>() / 3.0,
                );
                self.glyph(center, glyph, *fill);
            }
            DrawCommand::Circle { center, fill, .. } => self.glyph(*center, DOT, *fill),
            DrawCommand::Text {
                text,
                at,
                color,
                align,
                baseline,
                ..
            } => self.text(text, *at, *color, *align, *baseline),
        }
    }

    fn col_of(&self, x: f64) -> Option<u16> {
        let col = (x / self.cell_width).floor();
        (col >= 0.0 && col < self.cols as f64).then(|| col as u16)
    }

    fn row_of(&self, y: f64) -> Option<u16> {
        let row = (y / self.cell_height).floor();
        (row >= 0.0 && row < self.rows as f64).then(|| row as u16)
    }

    // Lines on the surface edge still land on the outermost cell
    fn clamped_col(&self, x: f64) -> u16 {
        (x / self.cell_width).floor().clamp(0.0, (self.cols - 1) as f64) as u16
    }

    fn clamped_row(&self, y: f64) -> u16 {
        (y / self.cell_height).floor().clamp(0.0, (self.rows - 1) as f64) as u16
    }

    fn cell_mut(&mut self, col: u16, row: u16) -> Option<&mut Cell> {
        if col < self.cols && row < self.rows {
            self.cells.get_mut(row as usize * self.cols as usize + col as usize)
        } else {
            None
        }
    }

    fn stroke(&mut self, col: u16, row: u16, ch: char, color: Color) {
        if let Some(cell) = self.cell_mut(col, row) {
            cell.ch = match (cell.ch, ch) {
                (HORIZONTAL, VERTICAL) | (VERTICAL, HORIZONTAL) | (CROSSING, _) => CROSSING,
                _ => ch,
            };
            cell.fg = color;
        }
    }

    fn line(&mut self, from: Point, to: Point, color: Color) {
        if from.y == to.y {
            let row = self.clamped_row(from.y);
            let (c0, c1) = (self.clamped_col(from.x.min(to.x)), self.clamped_col(from.x.max(to.x)));
            for col in c0..=c1 {
                self.stroke(col, row, HORIZONTAL, color);
            }
        } else if from.x == to.x {
            let col = self.clamped_col(from.x);
            let (r0, r1) = (self.clamped_row(from.y.min(to.y)), self.clamped_row(from.y.max(to.y)));
            for row in r0..=r1 {
                self.stroke(col, row, VERTICAL, color);
            }
        } else {
            let dx = (to.x - from.x) / self.cell_width;
            let dy = (to.y - from.y) / self.cell_height;
            let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
            for step in 0..=steps {
                let t = step as f64 / steps as f64;
                let p = Point::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t);
                if let (Some(col), Some(row)) = (self.col_of(p.x), self.row_of(p.y)) {
                    self.stroke(col, row, SLANTED, color);
                }
            }
        }
    }

    /// Fills every cell whose center lies inside `rect`, or the cell under
    /// the rect's center when it is smaller than a cell.
    fn fill_rect(&mut self, rect: &Rect, color: Color) {
        let mut filled = false;
        for row in 0..self.rows {
            let cy = (row as f64 + 0.5) * self.cell_height;
            if cy < rect.y || cy > rect.y + rect.height {
                continue;
            }
            for col in 0..self.cols {
                let cx = (col as f64 + 0.5) * self.cell_width;
                if cx < rect.x || cx > rect.x + rect.width {
                    continue;
                }
                if let Some(cell) = self.cell_mut(col, row) {
                    cell.ch = ' ';
                    cell.bg = color;
                    filled = true;
                }
            }
        }

        if !filled {
            if let (Some(col), Some(row)) = (self.col_of(rect.center_x()), self.row_of(rect.center_y())) {
                if let Some(cell) = self.cell_mut(col, row) {
                    cell.ch = ' ';
                    cell.bg = color;
                }
            }
        }
    }

    fn glyph(&mut self, at: Point, ch: char, color: Color) {
        if let (Some(col), Some(row)) = (self.col_of(at.x), self.row_of(at.y)) {
            if let Some(cell) = self.cell_mut(col, row) {
                cell.ch = ch;
                cell.fg = color;
            }
        }
    }

    fn text(&mut self, text: &str, at: Point, color: Color, align: TextAlign, baseline: Baseline) {
        let len = text.chars().count() as f64;
        let start_x = match align {
            TextAlign::Left => at.x,
            TextAlign::Center => at.x - len * self.cell_width / 2.0,
        };
        let y = match baseline {
            // Text sits on top of the baseline
            Baseline::Bottom => at.y - 1.0,
            Baseline::Middle => at.y,
        };
        let row = match self.row_of(y) {
            Some(row) => row,
            None => return,
        };

        let start_col = (start_x / self.cell_width).round() as i64;
        for (i, ch) in text.chars().enumerate() {
            let col = start_col + i as i64;
            if col < 0 || col >= self.cols as i64 {
                continue;
            }
            if let Some(cell) = self.cell_mut(col as u16, row) {
                cell.ch = ch;
                cell.fg = color;
            }
        }
    }
}
