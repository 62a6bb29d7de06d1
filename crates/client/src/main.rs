//! Golden Evergreen - gesture-driven interactive tree experience
//!
//! Thousands of foliage points and weighted ornament instances interpolate
//! between a dispersed chaos sphere and an assembled cone, steered by hand
//! gestures and crowned by an LLM-granted wish.
//!
//! ## Plugins
//! - TreePlugin: populations, per-frame assembly animator, star topper, scene
//! - HandTrackingPlugin: detector thread bridge, gesture + bias signals
//! - OrbitCameraPlugin: orbit camera with hand view-bias and auto-rotation
//! - GameFlowPlugin: game mode state machine wiring
//! - WishPlugin: async wish requests with the fallback contract
//! - OverlayPlugin: egui overlay (title, wish input, granted blessing)

mod plugins;

use bevy::prelude::*;
use bevy::window::WindowResolution;
use evergreen_common::{GameMode, TreeStyle};
use plugins::{
    GameFlowPlugin, HandTrackingPlugin, OrbitCameraPlugin, OverlayPlugin, TreePlugin, WishPlugin,
};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Golden Evergreen".to_string(),
                resolution: WindowResolution::new(1920, 1080),
                present_mode: bevy::window::PresentMode::Fifo, // VSync
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::srgb_u8(0x01, 0x1a, 0x0d)))
        .insert_resource(TreeStyle::default())
        .init_state::<GameMode>()
        .add_plugins(TreePlugin)
        // No detector wired by default: the experience degrades gracefully
        // to UI-only control when no camera/landmark model is attached.
        .add_plugins(HandTrackingPlugin::default())
        .add_plugins(OrbitCameraPlugin)
        .add_plugins(GameFlowPlugin)
        .add_plugins(WishPlugin)
        .add_plugins(OverlayPlugin)
        .run();
}
