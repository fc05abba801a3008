mod mixer;
#[allow(clippy::module_inception)]
mod scene;

pub use mixer::Mixer;
pub use scene::{Aabb, Channel, ChannelValues, Clip, Scene, SceneMesh, SceneNode, SceneTexture};
