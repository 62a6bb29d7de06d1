//! # Assembly Animator
//!
//! The per-frame pass that pulls every element toward whichever endpoint the
//! game mode has made active. Runs once per rendered frame over the whole
//! population store; the only writer of the `current` columns.
//!
//! The interpolation is exponential decay: `f = clamp(rate * dt, 0, 1)`,
//! `current = lerp(current, destination, f)`. Clamping `f` makes the step
//! safe for arbitrarily large `dt` (tab stalls): the position lands exactly
//! on the destination instead of overshooting, and stays finite.

use crate::population::{FoliagePopulation, OrnamentPopulation};
use crate::style::TreeStyle;
use bevy::prelude::*;

/// Exponential-decay interpolation factor, clamped so a huge `dt` snaps to
/// the destination rather than flying past it.
pub fn lerp_factor(rate: f32, delta_time: f32) -> f32 {
    (rate * delta_time).clamp(0.0, 1.0)
}

/// Interpolation rate for an ornament class: inversely related to weight,
/// bounded so extreme weights neither stall nor teleport.
pub fn ornament_rate(weight: f32, style: &TreeStyle) -> f32 {
    (style.ornament_base_rate / weight).clamp(style.ornament_min_rate, style.ornament_max_rate)
}

fn step_column(current: &mut [Vec3], chaos: &[Vec3], target: &[Vec3], assembled: bool, f: f32) {
    for i in 0..current.len() {
        let destination = if assembled { target[i] } else { chaos[i] };
        current[i] = current[i].lerp(destination, f);
    }
}

/// Advance the foliage one frame. Rate is mode-dependent: assembling is
/// faster than dispersing.
pub fn step_foliage(
    foliage: &mut FoliagePopulation,
    assembled: bool,
    delta_time: f32,
    style: &TreeStyle,
) {
    let rate = if assembled {
        style.foliage_form_rate
    } else {
        style.foliage_disperse_rate
    };
    let f = lerp_factor(rate, delta_time);
    let (current, chaos, target) = foliage.columns_mut();
    step_column(current, chaos, target, assembled, f);
}

/// Advance one ornament class one frame, rate scaled by the class weight.
pub fn step_ornaments(
    ornaments: &mut OrnamentPopulation,
    assembled: bool,
    delta_time: f32,
    style: &TreeStyle,
) {
    let f = lerp_factor(ornament_rate(ornaments.weight(), style), delta_time);
    let (current, chaos, target) = ornaments.columns_mut();
    step_column(current, chaos, target, assembled, f);
}

// ============================================================================
// Presentation offsets
// ============================================================================
//
// These are recomputed fresh from elapsed time every frame and added at draw
// time only. They never feed back into the stored positions, so they cannot
// accumulate drift.

/// Idle floating bob for an assembled ornament.
pub fn bob_offset(elapsed: f32, index: usize, style: &TreeStyle) -> f32 {
    (elapsed + index as f32).sin() * style.bob_amplitude
}

/// Render rotation for an ornament: its fixed phase plus a slow idle spin.
pub fn spin_rotation(phase: Vec3, elapsed: f32, style: &TreeStyle) -> Quat {
    Quat::from_euler(
        EulerRot::XYZ,
        phase.x + elapsed * style.spin_rate.x,
        phase.y + elapsed * style.spin_rate.y,
        phase.z,
    )
}

/// Per-point sparkle brightness in [0, 1], derived from the fixed sparkle
/// phase. Flat glint above the pulse threshold, dim shimmer below.
pub fn sparkle_brightness(sparkle_phase: f32, elapsed: f32) -> f32 {
    let pulse = (elapsed * 2.0 + sparkle_phase * 10.0).sin();
    if pulse > 0.8 {
        1.0
    } else {
        0.35 + 0.15 * pulse
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::OrnamentClass;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_foliage(seed: u64, count: usize) -> (FoliagePopulation, TreeStyle) {
        let style = TreeStyle::default();
        let mut rng = StdRng::seed_from_u64(seed);
        (FoliagePopulation::generate(&mut rng, count, &style), style)
    }

    #[test]
    fn test_zero_delta_is_identity() {
        let (mut pop, style) = small_foliage(1, 32);
        let before = pop.current().to_vec();
        step_foliage(&mut pop, true, 0.0, &style);
        assert_eq!(pop.current(), &before[..]);
    }

    #[test]
    fn test_distance_decreases_monotonically() {
        let (mut pop, style) = small_foliage(2, 32);
        let mut last: Vec<f32> = pop
            .current()
            .iter()
            .zip(pop.target())
            .map(|(c, t)| c.distance(*t))
            .collect();
        for _ in 0..200 {
            step_foliage(&mut pop, true, 0.016, &style);
            let next: Vec<f32> = pop
                .current()
                .iter()
                .zip(pop.target())
                .map(|(c, t)| c.distance(*t))
                .collect();
            for (n, l) in next.iter().zip(&last) {
                assert!(n <= l, "distance to target grew: {n} > {l}");
            }
            last = next;
        }
    }

    #[test]
    fn test_huge_delta_snaps_without_overshoot() {
        let (mut pop, style) = small_foliage(3, 100);
        step_foliage(&mut pop, true, 1000.0, &style);
        for (c, t) in pop.current().iter().zip(pop.target()) {
            assert!(c.is_finite());
            assert!(c.distance(*t) < 1e-4);
        }
    }

    #[test]
    fn test_converges_under_cumulative_time() {
        let (mut pop, style) = small_foliage(4, 32);
        for _ in 0..2000 {
            step_foliage(&mut pop, true, 0.016, &style);
        }
        for (c, t) in pop.current().iter().zip(pop.target()) {
            assert!(c.distance(*t) < 1e-3);
        }
    }

    #[test]
    fn test_dispersal_returns_to_chaos() {
        let (mut pop, style) = small_foliage(5, 32);
        for _ in 0..2000 {
            step_foliage(&mut pop, true, 0.016, &style);
        }
        for _ in 0..4000 {
            step_foliage(&mut pop, false, 0.016, &style);
        }
        for (c, ch) in pop.current().iter().zip(pop.chaos()) {
            assert!(c.distance(*ch) < 1e-2);
        }
    }

    #[test]
    fn test_heavier_ornaments_converge_slower() {
        let style = TreeStyle::default();
        let mut rng = StdRng::seed_from_u64(6);
        let mut gift = OrnamentPopulation::generate(&mut rng, OrnamentClass::Gift, &style);
        let mut glow = OrnamentPopulation::generate(&mut rng, OrnamentClass::Glow, &style);
        for _ in 0..30 {
            step_ornaments(&mut gift, true, 0.016, &style);
            step_ornaments(&mut glow, true, 0.016, &style);
        }
        let frac = |pop: &OrnamentPopulation| {
            pop.current()
                .iter()
                .zip(pop.chaos())
                .zip(pop.target())
                .map(|((c, ch), t)| 1.0 - c.distance(*t) / ch.distance(*t).max(1e-6))
                .sum::<f32>()
                / pop.len() as f32
        };
        assert!(frac(&glow) > frac(&gift));
    }

    #[test]
    fn test_ornament_rate_bounded() {
        let style = TreeStyle::default();
        assert_eq!(ornament_rate(f32::MAX, &style), style.ornament_min_rate);
        assert_eq!(ornament_rate(1e-6, &style), style.ornament_max_rate);
        assert!((ornament_rate(2.0, &style) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_presentation_offsets_are_pure() {
        let style = TreeStyle::default();
        let a = bob_offset(1.25, 7, &style);
        let b = bob_offset(1.25, 7, &style);
        assert_eq!(a, b);
        assert!(a.abs() <= style.bob_amplitude);
        let phase = Vec3::new(0.4, 1.1, 2.0);
        assert_eq!(
            spin_rotation(phase, 3.0, &style),
            spin_rotation(phase, 3.0, &style)
        );
        for t in [0.0_f32, 0.5, 10.0, 1000.0] {
            let s = sparkle_brightness(0.3, t);
            assert!((0.0..=1.0).contains(&s));
        }
    }
}
