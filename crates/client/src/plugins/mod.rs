//! Client plugins, one per concern.

pub mod camera_plugin;
pub mod flow_plugin;
pub mod hand_plugin;
pub mod overlay_plugin;
pub mod tree_plugin;
pub mod wish_plugin;

pub use camera_plugin::OrbitCameraPlugin;
pub use flow_plugin::GameFlowPlugin;
pub use hand_plugin::HandTrackingPlugin;
pub use overlay_plugin::OverlayPlugin;
pub use tree_plugin::TreePlugin;
pub use wish_plugin::WishPlugin;
