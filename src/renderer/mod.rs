//! Rendering module
//!
//! `build_frame` turns a game snapshot into colored quads; `RenderState` uploads
//! them through a WebGPU pipeline.

pub mod frame;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use frame::build_frame;
pub use pipeline::{RenderError, RenderState};
pub use vertex::Vertex;
