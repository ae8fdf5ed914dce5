//! Interactive Bezier curve editor.
//!
//! The core turns control points into sampled curves and into ribbon meshes
//! that an extrusion stage widens to a constant on-screen thickness. The
//! egui frontend in `main.rs` is one consumer of that geometry.

pub mod bernstein;
pub mod camera;
pub mod curve;
pub mod error;
pub mod extrude;
pub mod import;
pub mod input;
pub mod options;
pub mod render;
pub mod ribbon;
pub mod scene;

pub use camera::Camera2D;
pub use curve::{Curve, CurveGeometry};
pub use error::{EditError, ImportError};
pub use input::{EditorContext, EditorState, InputEvent};
pub use options::EditorOptions;
pub use scene::{HandleRef, Scene};
