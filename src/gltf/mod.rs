//! Minimal glTF 2.0 reader for the portfolio model.
//!
//! Only the binary container (`.glb`), triangle meshes, node transforms,
//! base-color materials with embedded textures, and TRS animation
//! channels are understood; that is everything the viewer consumes.

mod document;
mod glb;
mod primitives;

pub use document::{Document, TargetPath};
pub use glb::GlbFile;
pub use primitives::AccessorReader;
