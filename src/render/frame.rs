/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Serialize;
use std::fmt;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// 24-bit RGB color, serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Baseline {
    Bottom,
    Middle,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub size: f64,
    pub bold: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear {
        color: Color,
    },
    Line {
        from: Point,
        to: Point,
        color: Color,
        width: f64,
    },
    RoundedRect {
        rect: Rect,
        radius: f64,
        fill: Color,
        stroke: Option<Color>,
        stroke_width: f64,
    },
    Triangle {
        points: [Point; 3],
        fill: Color,
    },
    Circle {
        center: Point,
        radius: f64,
        fill: Color,
    },
    Text {
        text: String,
        at: Point,
        color: Color,
        font: Font,
        align: TextAlign,
        baseline: Baseline,
    },
}

/// One complete redraw of the surface, in painter's order.
#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub commands: Vec<DrawCommand>,
}

#[derive(Debug, PartialEq)]
pub enum RenderError {
    NonFinite { command: usize },
}

/***************************************/
/*             Public API              */
/***************************************/
impl Point {
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Rect {
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl DrawCommand {
    fn is_finite(&self) -> bool {
        match self {
            DrawCommand::Clear { .. } => true,
            DrawCommand::Line { from, to, width, .. } => from.is_finite() && to.is_finite() && width.is_finite(),
            DrawCommand::RoundedRect { rect, radius, stroke_width, .. } => {
                rect.is_finite() && radius.is_finite() && stroke_width.is_finite()
            }
            DrawCommand::Triangle { points, .. } => points.iter().all(Point::is_finite),
            DrawCommand::Circle { center, radius, .. } => center.is_finite() && radius.is_finite(),
            DrawCommand::Text { at, font, .. } => at.is_finite() && font.size.is_finite(),
        }
    }
}

impl Frame {
    pub fn new(width: f64, height: f64) -> Frame {
        Frame {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// A frame with a non-finite coordinate is never presented.
    pub fn validate(&self) -> Result<(), RenderError> {
        match self.commands.iter().position(|c| !c.is_finite()) {
            Some(command) => Err(RenderError::NonFinite { command }),
            None => Ok(()),
        }
    }

    #[cfg(test)]
    pub(crate) fn circles_filled(&self, color: Color) -> Vec<Point> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Circle { center, fill, .. } if *fill == color => Some(*center),
                _ => None,
            })
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::NonFinite { command } => {
                write!(f, "draw command #{} has a non-finite coordinate", command)
            }
        }
    }
}

impl std::error::Error for RenderError {}
