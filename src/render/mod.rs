// Graph export of the matrix structure

pub mod config;
pub mod graph;

pub use config::{Palette, RenderConfig, TagStyle};
pub use graph::{to_dot, GraphRenderer};
