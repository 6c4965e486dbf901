pub mod config;
pub mod core;
pub mod render;
pub mod types;
pub mod ui;

pub use crate::core::{Body, Simulation};
pub use crate::types::{BodySnapshot, SimStats, Vector2, VectorError};
