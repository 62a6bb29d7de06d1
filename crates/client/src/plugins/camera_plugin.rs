//! Orbit Camera Plugin
//!
//! Spherical orbit around the tree with three drivers, priority-ordered:
//! hand view-bias (when outside the tight dead-zone), ambient auto-rotation
//! (assembled only, hand inside the loose dead-zone), and scroll-wheel zoom.
//! The two dead-zone thresholds live in `evergreen_common::view` and are
//! intentionally distinct.

use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::post_process::bloom::Bloom;
use bevy::render::view::Hdr;
use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use evergreen_common::view::{auto_rotate_allowed, bias_targets, damp_angle, overrides_camera};
use evergreen_common::{GameMode, TreeStyle};
use std::f32::consts::PI;

#[derive(Default)]
pub struct OrbitCameraPlugin;

impl Plugin for OrbitCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera)
            .add_systems(Update, run_orbit_camera);
    }
}

/// Orbit camera controller state
#[derive(Component)]
pub struct OrbitCamera {
    /// Enables this controller when `true`.
    pub enabled: bool,
    /// Indicates if the angles have been initialized from the transform.
    pub initialized: bool,
    /// Orbital azimuth around the focus, radians
    pub azimuth: f32,
    /// Polar angle from straight up, radians
    pub polar: f32,
    /// Distance from the focus point
    pub distance: f32,
    /// Zoom speed per scroll line
    pub zoom_speed: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            enabled: true,
            initialized: false,
            azimuth: 0.0,
            polar: PI / 2.2,
            distance: 20.0,
            zoom_speed: 1.0,
        }
    }
}

fn spawn_camera(mut commands: Commands, style: Res<TreeStyle>) {
    commands.spawn((
        Camera3d::default(),
        Hdr,
        Tonemapping::AcesFitted,
        Bloom::NATURAL,
        Transform::from_xyz(0.0, 4.0, 20.0).looking_at(style.camera_focus, Vec3::Y),
        OrbitCamera::default(),
    ));
}

fn run_orbit_camera(
    time: Res<Time>,
    style: Res<TreeStyle>,
    mode: Res<State<GameMode>>,
    bias: Res<super::hand_plugin::HandBias>,
    mut mouse_wheel_events: MessageReader<MouseWheel>,
    mut query: Query<(&mut Transform, &mut OrbitCamera), With<Camera>>,
) {
    let dt = time.delta_secs();

    let Ok((mut transform, mut camera)) = query.single_mut() else {
        return;
    };

    if !camera.initialized {
        let offset = transform.translation - style.camera_focus;
        camera.distance = offset
            .length()
            .clamp(style.min_distance, style.max_distance);
        camera.azimuth = offset.x.atan2(offset.z);
        camera.polar = (offset.y / offset.length().max(1e-6)).acos();
        camera.initialized = true;
    }
    if !camera.enabled {
        return;
    }

    // Scroll wheel zoom
    let mut scroll = 0.0;
    for event in mouse_wheel_events.read() {
        let amount = match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y / 16.0,
        };
        scroll += amount;
    }
    camera.distance = (camera.distance - scroll * camera.zoom_speed)
        .clamp(style.min_distance, style.max_distance);

    let hand = bias.0;
    if overrides_camera(hand) {
        let (target_azimuth, target_polar) = bias_targets(hand);
        camera.azimuth = damp_angle(camera.azimuth, target_azimuth, dt);
        camera.polar = damp_angle(camera.polar, target_polar, dt);
    } else if auto_rotate_allowed(*mode.get(), hand.x) {
        camera.azimuth += style.auto_rotate_speed * dt;
    }

    // The controller never exceeds the configured bounds.
    camera.polar = camera.polar.clamp(style.min_polar, style.max_polar);

    let offset = Vec3::new(
        camera.polar.sin() * camera.azimuth.sin(),
        camera.polar.cos(),
        camera.polar.sin() * camera.azimuth.cos(),
    ) * camera.distance;
    transform.translation = style.camera_focus + offset;
    transform.look_at(style.camera_focus, Vec3::Y);
}
