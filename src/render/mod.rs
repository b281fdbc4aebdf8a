pub mod frame;
pub mod geometry;
pub mod palette;
pub mod renderer;
pub mod stats;
mod render_tests;

pub use frame::{DrawCommand, Frame, RenderError};
pub use geometry::Layout;
pub use renderer::Renderer;
pub use stats::{format_stats, StatsText, StatsUpdater};
