//! WebGPU rendering module
//!
//! The scene is a flat list of colored triangles rebuilt every frame from the
//! simulation bodies.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::scene;
pub use vertex::Vertex;
