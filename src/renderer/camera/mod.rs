mod path;
mod state;

pub use path::{ABOUT_CAMERA_PATH, CameraPath, Waypoint};
pub use state::CameraState;
