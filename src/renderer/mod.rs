//! WebGPU rendering module
//!
//! The scene is tessellated on the CPU into flat-colored triangles each
//! frame and drawn with a single pipeline. Rendering only reads the world.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState};
pub use scene::build_scene;
pub use shapes::ShapeBatch;
pub use vertex::Vertex;
