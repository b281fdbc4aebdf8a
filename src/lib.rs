pub mod config;
pub mod controller;
pub mod display;
pub mod network;
pub mod render;
pub mod shared;

pub use config::Config;
pub use controller::Controller;
pub use render::{Layout, Renderer};
pub use shared::Snapshot;
