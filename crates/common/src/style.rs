//! # Tree Style
//!
//! Process-wide immutable configuration for the tree simulation. Built once
//! at startup and handed to every consumer read-only; nothing mutates it at
//! runtime.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Geometry, population and motion constants for the whole experience.
#[derive(Resource, Clone, Debug, Serialize, Deserialize)]
pub struct TreeStyle {
    // === GEOMETRY ===
    /// Cone height of the assembled tree
    pub tree_height: f32,
    /// Cone radius at the base
    pub base_radius: f32,
    /// Vertical offset applied to every cone sample (base sits below origin)
    pub y_offset: f32,
    /// Radius of the dispersed sphere for foliage
    pub foliage_chaos_radius: f32,
    /// Radius of the dispersed sphere for ornaments
    pub ornament_chaos_radius: f32,
    /// Ornament targets use the cone radius scaled by this, pushing them
    /// toward the outer edge relative to foliage
    pub ornament_radius_bias: f32,

    // === POPULATIONS ===
    /// Number of foliage points
    pub foliage_count: usize,

    // === MOTION ===
    /// Foliage interpolation rate while assembling
    pub foliage_form_rate: f32,
    /// Foliage interpolation rate while dispersing
    pub foliage_disperse_rate: f32,
    /// Ornament base rate, divided by the class weight
    pub ornament_base_rate: f32,
    /// Lower bound on the ornament rate, whatever the weight
    pub ornament_min_rate: f32,
    /// Upper bound on the ornament rate, whatever the weight
    pub ornament_max_rate: f32,
    /// Amplitude of the idle bob applied to assembled ornaments
    pub bob_amplitude: f32,
    /// Idle spin rates (x, y) superimposed on ornament rotation phases
    pub spin_rate: Vec2,

    // === FLOW ===
    /// Delay between Forming and Interactive, seconds
    pub forming_delay: f32,

    // === STAR TOPPER ===
    /// World height of the star topper
    pub star_height: f32,
    /// Star idle spin, radians per second
    pub star_spin_rate: f32,
    /// Star idle bob amplitude
    pub star_bob_amplitude: f32,

    // === CAMERA ===
    /// Orbit focus point
    pub camera_focus: Vec3,
    /// Orbit distance bounds
    pub min_distance: f32,
    pub max_distance: f32,
    /// Polar angle bounds enforced by the camera controller
    pub min_polar: f32,
    pub max_polar: f32,
    /// Ambient auto-rotation, radians per second
    pub auto_rotate_speed: f32,
}

impl Default for TreeStyle {
    fn default() -> Self {
        Self {
            tree_height: 16.0,
            base_radius: 6.0,
            y_offset: -5.0,
            foliage_chaos_radius: 25.0,
            ornament_chaos_radius: 30.0,
            ornament_radius_bias: 1.1,

            foliage_count: 12_000,

            foliage_form_rate: 2.5,
            foliage_disperse_rate: 1.0,
            ornament_base_rate: 2.0,
            ornament_min_rate: 0.1,
            ornament_max_rate: 5.0,
            bob_amplitude: 0.005,
            spin_rate: Vec2::new(0.2, 0.5),

            forming_delay: 1.0,

            star_height: 16.0 - 4.2,
            star_spin_rate: 0.5,
            star_bob_amplitude: 0.1,

            camera_focus: Vec3::new(0.0, 3.0, 0.0),
            min_distance: 10.0,
            max_distance: 30.0,
            min_polar: PI / 3.0,
            max_polar: PI / 1.5,
            auto_rotate_speed: 0.05,
        }
    }
}
