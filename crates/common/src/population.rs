//! # Entity Population Store
//!
//! Attribute-of-arrays storage for every animated element. Each element keeps
//! two fixed endpoints (chaos / target), assigned exactly once at generation,
//! and one mutable current position owned by the animator. Consumers read
//! flat slices; only `animator` writes.
//!
//! ## Table of Contents
//! 1. **FoliagePopulation** - the point-cloud needles
//! 2. **OrnamentClass** - five weighted ornament classes
//! 3. **OrnamentPopulation** - one homogeneous instanced class

use crate::sampling::{cone_sample, sphere_sample};
use crate::style::TreeStyle;
use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::PI;

// ============================================================================
// Foliage
// ============================================================================

/// The foliage point cloud: thousands of needles interpolating between a
/// dispersed sphere and the assembled cone.
#[derive(Debug, Clone)]
pub struct FoliagePopulation {
    chaos: Vec<Vec3>,
    target: Vec<Vec3>,
    current: Vec<Vec3>,
    scale: Vec<f32>,
    sparkle_phase: Vec<f32>,
}

impl FoliagePopulation {
    /// Generate `count` elements. Every element starts at its chaos position.
    pub fn generate(rng: &mut impl Rng, count: usize, style: &TreeStyle) -> Self {
        let mut chaos = Vec::with_capacity(count);
        let mut target = Vec::with_capacity(count);
        let mut scale = Vec::with_capacity(count);
        let mut sparkle_phase = Vec::with_capacity(count);

        for _ in 0..count {
            chaos.push(sphere_sample(rng, style.foliage_chaos_radius));
            target.push(cone_sample(
                rng,
                style.tree_height,
                style.base_radius,
                style.y_offset,
            ));
            scale.push(rng.gen::<f32>() * 0.5 + 0.5);
            sparkle_phase.push(rng.gen::<f32>());
        }

        let current = chaos.clone();
        Self {
            chaos,
            target,
            current,
            scale,
            sparkle_phase,
        }
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    pub fn chaos(&self) -> &[Vec3] {
        &self.chaos
    }

    pub fn target(&self) -> &[Vec3] {
        &self.target
    }

    /// Current positions, valid to read only after the animator pass.
    pub fn current(&self) -> &[Vec3] {
        &self.current
    }

    pub fn scale(&self) -> &[f32] {
        &self.scale
    }

    pub fn sparkle_phase(&self) -> &[f32] {
        &self.sparkle_phase
    }

    /// Single-writer column plus its two read-only endpoints, split-borrowed
    /// for the animator pass.
    pub(crate) fn columns_mut(&mut self) -> (&mut [Vec3], &[Vec3], &[Vec3]) {
        (&mut self.current, &self.chaos, &self.target)
    }
}

// ============================================================================
// Ornament classes
// ============================================================================

/// The five ornament classes. Weight is fixed per class, so it is strictly
/// positive by construction and never validated at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrnamentClass {
    /// Heavy wrapped gift boxes
    Gift,
    /// Polished gold balls
    GoldBall,
    /// Emerald glass balls
    EmeraldBall,
    /// Rose gold balls
    RoseGoldBall,
    /// Feather-light glowing points
    Glow,
}

impl OrnamentClass {
    pub const ALL: [OrnamentClass; 5] = [
        OrnamentClass::Gift,
        OrnamentClass::GoldBall,
        OrnamentClass::EmeraldBall,
        OrnamentClass::RoseGoldBall,
        OrnamentClass::Glow,
    ];

    /// Convergence weight: heavier classes settle onto the tree more slowly.
    pub fn weight(self) -> f32 {
        match self {
            OrnamentClass::Gift => 2.5,
            OrnamentClass::GoldBall => 1.0,
            OrnamentClass::EmeraldBall => 1.2,
            OrnamentClass::RoseGoldBall => 1.1,
            OrnamentClass::Glow => 0.2,
        }
    }

    /// Population size per class.
    pub fn count(self) -> usize {
        match self {
            OrnamentClass::Gift => 30,
            OrnamentClass::GoldBall | OrnamentClass::EmeraldBall | OrnamentClass::RoseGoldBall => {
                60
            }
            OrnamentClass::Glow => 300,
        }
    }
}

// ============================================================================
// Ornament population
// ============================================================================

/// One homogeneous ornament class: every element shares the class weight and
/// mesh, and carries its own endpoints and fixed rotation phase.
#[derive(Debug, Clone)]
pub struct OrnamentPopulation {
    class: OrnamentClass,
    chaos: Vec<Vec3>,
    target: Vec<Vec3>,
    current: Vec<Vec3>,
    rotation_phase: Vec<Vec3>,
}

impl OrnamentPopulation {
    /// Generate the class population. Targets are biased toward the cone's
    /// outer edge relative to the foliage.
    pub fn generate(rng: &mut impl Rng, class: OrnamentClass, style: &TreeStyle) -> Self {
        let count = class.count();
        let mut chaos = Vec::with_capacity(count);
        let mut target = Vec::with_capacity(count);
        let mut rotation_phase = Vec::with_capacity(count);

        for _ in 0..count {
            chaos.push(sphere_sample(rng, style.ornament_chaos_radius));
            target.push(cone_sample(
                rng,
                style.tree_height,
                style.base_radius * style.ornament_radius_bias,
                style.y_offset,
            ));
            rotation_phase.push(Vec3::new(
                rng.gen::<f32>() * PI,
                rng.gen::<f32>() * PI,
                rng.gen::<f32>() * PI,
            ));
        }

        let current = chaos.clone();
        Self {
            class,
            chaos,
            target,
            current,
            rotation_phase,
        }
    }

    pub fn class(&self) -> OrnamentClass {
        self.class
    }

    pub fn weight(&self) -> f32 {
        self.class.weight()
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    pub fn chaos(&self) -> &[Vec3] {
        &self.chaos
    }

    pub fn target(&self) -> &[Vec3] {
        &self.target
    }

    /// Current positions, valid to read only after the animator pass.
    pub fn current(&self) -> &[Vec3] {
        &self.current
    }

    pub fn rotation_phase(&self) -> &[Vec3] {
        &self.rotation_phase
    }

    /// Single-writer column plus its two read-only endpoints, split-borrowed
    /// for the animator pass.
    pub(crate) fn columns_mut(&mut self) -> (&mut [Vec3], &[Vec3], &[Vec3]) {
        (&mut self.current, &self.chaos, &self.target)
    }
}
