//! # Spatial Distribution Generator
//!
//! Pure sampling functions for the two endpoint distributions: a uniform-by-
//! volume sphere (the dispersed "chaos" cloud) and a uniform-by-area filled
//! cone (the assembled tree). Called only at population-construction time.

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

/// Sample a point uniformly **by volume** inside a sphere of `radius`.
///
/// The radial coordinate uses an inverse-cube-root scaling; linear scaling
/// would cluster points around the center.
pub fn sphere_sample(rng: &mut impl Rng, radius: f32) -> Vec3 {
    let u: f32 = rng.gen();
    let v: f32 = rng.gen();
    let theta = TAU * u;
    let phi = (2.0 * v - 1.0).acos();
    let r = rng.gen::<f32>().cbrt() * radius;
    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

/// Sample a point uniformly **by area** across the filled cross-sections of
/// a right cone, wide base at the bottom.
///
/// `h` is drawn uniformly along the axis and measured down from the tip, so
/// the disc radius at the slice grows linearly with `h` and the output Y is
/// `height - h` (plus `y_offset`): widest slice lowest. The radial position
/// within the disc uses square-root scaling (uniform by area, not by
/// radius).
pub fn cone_sample(rng: &mut impl Rng, height: f32, max_radius: f32, y_offset: f32) -> Vec3 {
    let h = rng.gen::<f32>() * height;
    let slice_radius = (h / height) * max_radius;
    let angle = rng.gen::<f32>() * TAU;
    let rad = rng.gen::<f32>().sqrt() * slice_radius;
    Vec3::new(
        rad * angle.cos(),
        height - h + y_offset,
        rad * angle.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SAMPLES: usize = 20_000;

    #[test]
    fn test_sphere_samples_inside_radius() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..SAMPLES {
            let p = sphere_sample(&mut rng, 25.0);
            assert!(p.length() <= 25.0 + 1e-4);
        }
    }

    #[test]
    fn test_sphere_radial_distribution_uniform_by_volume() {
        // r^3 / R^3 should be uniform on [0, 1): a 10-bin histogram of it
        // stays near SAMPLES / 10 per bin, while a histogram of r itself
        // piles up in the outer bins.
        let mut rng = StdRng::seed_from_u64(11);
        let mut cubed_bins = [0usize; 10];
        let mut linear_bins = [0usize; 10];
        for _ in 0..SAMPLES {
            let r = sphere_sample(&mut rng, 1.0).length();
            cubed_bins[((r.powi(3) * 10.0) as usize).min(9)] += 1;
            linear_bins[((r * 10.0) as usize).min(9)] += 1;
        }
        let expected = SAMPLES as f32 / 10.0;
        for count in cubed_bins {
            assert!(
                (count as f32 - expected).abs() < expected * 0.15,
                "r^3 histogram not uniform: {cubed_bins:?}"
            );
        }
        // Sanity check that the raw radius is *not* uniform.
        assert!(linear_bins[9] > linear_bins[0] * 5);
    }

    #[test]
    fn test_cone_samples_within_lateral_bound() {
        let mut rng = StdRng::seed_from_u64(3);
        let (height, max_radius, y_offset) = (16.0, 6.0, -5.0);
        for _ in 0..SAMPLES {
            let p = cone_sample(&mut rng, height, max_radius, y_offset);
            let y = p.y - y_offset;
            assert!((0.0..=height + 1e-4).contains(&y));
            // Radius allowed at this height: wide at the bottom.
            let allowed = (1.0 - y / height) * max_radius;
            let radial = (p.x * p.x + p.z * p.z).sqrt();
            assert!(radial <= allowed + 1e-3, "radial {radial} > allowed {allowed}");
        }
    }

    #[test]
    fn test_cone_slice_uniform_by_area() {
        // Within a height slice, (radial / slice_radius)^2 should be uniform.
        let mut rng = StdRng::seed_from_u64(5);
        let (height, max_radius) = (16.0, 6.0);
        let mut bins = [0usize; 8];
        let mut n = 0usize;
        for _ in 0..200_000 {
            let p = cone_sample(&mut rng, height, max_radius, 0.0);
            let y = p.y;
            // Keep a band near the base where the disc is wide.
            if !(1.0..3.0).contains(&y) {
                continue;
            }
            let slice_radius = (1.0 - y / height) * max_radius;
            let frac = ((p.x * p.x + p.z * p.z).sqrt() / slice_radius).min(1.0);
            bins[((frac * frac * 8.0) as usize).min(7)] += 1;
            n += 1;
        }
        let expected = n as f32 / 8.0;
        for count in bins {
            assert!(
                (count as f32 - expected).abs() < expected * 0.2,
                "radial^2 histogram not uniform: {bins:?}"
            );
        }
    }
}
