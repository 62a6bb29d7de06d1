//! # View Bias
//!
//! Pure math for biasing the orbit camera with the continuous hand signal.
//! The two dead-zone thresholds intentionally differ: between 0.05 and 0.1
//! on the X axis neither the hand bias nor the ambient auto-rotation drives
//! the camera. That hysteresis band keeps the handoff between the two from
//! flickering; do not collapse the constants.

use crate::mode::GameMode;
use bevy::prelude::*;
use std::f32::consts::PI;

/// Hand displacement above which the bias overrides the camera angles.
pub const HAND_OVERRIDE_DEADZONE: f32 = 0.05;

/// Hand displacement above which ambient auto-rotation is suppressed.
pub const AUTO_ROTATE_DEADZONE: f32 = 0.1;

/// Exponential damping rate for the bias override.
pub const BIAS_DAMP_RATE: f32 = 2.0;

/// Target orbital angles for a hand signal: X sweeps the azimuth across
/// +/- 60 degrees, Y tilts the polar angle +/- 30 degrees around horizontal.
pub fn bias_targets(bias: Vec2) -> (f32, f32) {
    let azimuth = bias.x * (PI / 3.0);
    let polar = PI / 2.0 - bias.y * (PI / 6.0);
    (azimuth, polar)
}

/// Whether the hand signal is far enough from neutral to drive the camera.
pub fn overrides_camera(bias: Vec2) -> bool {
    bias.x.abs() > HAND_OVERRIDE_DEADZONE || bias.y.abs() > HAND_OVERRIDE_DEADZONE
}

/// Ambient auto-rotation runs only once assembled and only while the hand
/// sits inside the looser dead-zone.
pub fn auto_rotate_allowed(mode: GameMode, bias_x: f32) -> bool {
    mode != GameMode::Intro && bias_x.abs() < AUTO_ROTATE_DEADZONE
}

/// One damped step of `current` toward `target`. The factor is clamped like
/// the animator's, so a stalled frame cannot overshoot.
pub fn damp_angle(current: f32, target: f32, delta_time: f32) -> f32 {
    let f = (BIAS_DAMP_RATE * delta_time).clamp(0.0, 1.0);
    current + (target - current) * f
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_hand_defers_to_ambient() {
        assert!(!overrides_camera(Vec2::ZERO));
        assert!(auto_rotate_allowed(GameMode::Interactive, 0.0));
    }

    #[test]
    fn test_thresholds_are_independent() {
        // Inside both dead-zones: ambient rotation only.
        assert!(!overrides_camera(Vec2::new(0.03, 0.0)));
        assert!(auto_rotate_allowed(GameMode::Interactive, 0.03));
        // Between the two thresholds: the bias has taken over but the
        // looser auto-rotate gate has not yet released.
        assert!(overrides_camera(Vec2::new(0.07, 0.0)));
        assert!(auto_rotate_allowed(GameMode::Interactive, 0.07));
        // Past the looser threshold: bias only.
        assert!(overrides_camera(Vec2::new(0.12, 0.0)));
        assert!(!auto_rotate_allowed(GameMode::Interactive, 0.12));
    }

    #[test]
    fn test_auto_rotate_suppressed_in_intro() {
        assert!(!auto_rotate_allowed(GameMode::Intro, 0.0));
    }

    #[test]
    fn test_bias_targets_ranges() {
        let (az, pol) = bias_targets(Vec2::new(1.0, 1.0));
        assert!((az - PI / 3.0).abs() < 1e-6);
        assert!((pol - (PI / 2.0 - PI / 6.0)).abs() < 1e-6);
        let (az, pol) = bias_targets(Vec2::ZERO);
        assert_eq!(az, 0.0);
        assert!((pol - PI / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_damp_angle_clamped() {
        // Huge delta lands exactly on target, no overshoot.
        assert_eq!(damp_angle(0.0, 1.0, 100.0), 1.0);
        // Zero delta is the identity.
        assert_eq!(damp_angle(0.3, 1.0, 0.0), 0.3);
        // Small step moves strictly toward the target.
        let stepped = damp_angle(0.0, 1.0, 0.016);
        assert!(stepped > 0.0 && stepped < 1.0);
    }
}
