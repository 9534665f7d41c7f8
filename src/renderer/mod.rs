//! WebGPU rendering module
//!
//! The scene is rebuilt as a flat triangle list every frame and drawn with a
//! single pass-through pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_frame;
pub use vertex::Vertex;
