//! Tree Plugin
//!
//! Owns the element populations and runs the per-frame assembly pass.
//! Write-then-read ordering is enforced with an explicit chain: the animator
//! is the only writer of the `current` columns, and the sync systems that
//! copy positions into render state run strictly after it, so the renderer
//! only ever sees a fully updated snapshot.
//!
//! ## Table of Contents
//! 1. **setup_tree** - generate populations, meshes, materials, lights
//! 2. **step_assembly** - the animator pass (single writer)
//! 3. **sync_foliage / sync_ornaments** - snapshot into render state
//! 4. **animate_star** - star topper lifecycle

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;
use evergreen_common::animator::{bob_offset, sparkle_brightness, spin_rotation};
use evergreen_common::{
    step_foliage, step_ornaments, FoliagePopulation, GameMode, OrnamentClass, OrnamentPopulation,
    TreeStyle,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub struct TreePlugin;

impl Plugin for TreePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_tree).add_systems(
            Update,
            (
                step_assembly,
                (sync_foliage, sync_ornaments, animate_star),
            )
                .chain(),
        );
    }
}

// ============================================================================
// Resources & components
// ============================================================================

/// The whole element population store. Only `step_assembly` mutates it.
#[derive(Resource)]
pub struct TreePopulations {
    pub foliage: FoliagePopulation,
    pub ornaments: Vec<OrnamentPopulation>,
}

/// Handle to the foliage point-cloud mesh whose buffers are rewritten each
/// frame from the population snapshot.
#[derive(Resource)]
struct FoliageMesh(Handle<Mesh>);

/// Index of an ornament entity into its population's columns.
#[derive(Component)]
struct OrnamentRef {
    set: usize,
    index: usize,
}

/// The singleton topper. No chaos endpoint: it only appears, idles and
/// disappears with the assembled predicate.
#[derive(Component)]
pub struct StarTopper;

// Signature palette.
const GOLD: Color = Color::srgb_u8(0xff, 0xd7, 0x00);
const ROSE_GOLD: Color = Color::srgb_u8(0xe0, 0xbf, 0xb8);
const BURGUNDY: Color = Color::srgb_u8(0x72, 0x0e, 0x1e);
const EMERALD: Color = Color::srgb_u8(0x00, 0x42, 0x25);
const WARM_GLOW: Color = Color::srgb_u8(0xff, 0xfe, 0xb0);
const NEEDLE_BASE: Vec3 = Vec3::new(0.004, 0.169, 0.082);
const NEEDLE_GOLD: Vec3 = Vec3::new(1.0, 0.843, 0.0);

fn emissive(color: Color, intensity: f32) -> LinearRgba {
    color.to_linear() * intensity
}

// ============================================================================
// Setup
// ============================================================================

fn setup_tree(
    mut commands: Commands,
    style: Res<TreeStyle>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut rng = StdRng::from_entropy();

    let foliage = FoliagePopulation::generate(&mut rng, style.foliage_count, &style);
    let ornaments: Vec<OrnamentPopulation> = OrnamentClass::ALL
        .iter()
        .map(|&class| OrnamentPopulation::generate(&mut rng, class, &style))
        .collect();

    // Foliage: one point-list mesh, position + color columns rewritten per
    // frame from the population snapshot.
    let mut mesh = Mesh::new(
        PrimitiveTopology::PointList,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    );
    let positions: Vec<[f32; 3]> = foliage.current().iter().map(|p| p.to_array()).collect();
    let colors = vec![[0.0, 0.0, 0.0, 1.0]; foliage.len()];
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
    let foliage_mesh = meshes.add(mesh);
    let foliage_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        ..default()
    });
    commands.spawn((
        Mesh3d(foliage_mesh.clone()),
        MeshMaterial3d(foliage_material),
    ));
    commands.insert_resource(FoliageMesh(foliage_mesh));

    // Ornaments: one entity per instance, mesh and material shared per class.
    let gift_mesh = meshes.add(Cuboid::new(0.6, 0.6, 0.6));
    let ball_mesh = meshes.add(Sphere::new(0.3));
    let glow_mesh = meshes.add(Sphere::new(0.1));

    let gift_material = materials.add(StandardMaterial {
        base_color: BURGUNDY,
        perceptual_roughness: 0.9,
        metallic: 0.1,
        emissive: emissive(Color::srgb_u8(0x2b, 0x00, 0x05), 0.1),
        ..default()
    });
    let gold_material = materials.add(StandardMaterial {
        base_color: GOLD,
        metallic: 1.0,
        perceptual_roughness: 0.15,
        emissive: emissive(Color::srgb_u8(0xaa, 0x88, 0x00), 0.2),
        ..default()
    });
    let emerald_material = materials.add(StandardMaterial {
        base_color: EMERALD,
        metallic: 0.1,
        perceptual_roughness: 0.05,
        specular_transmission: 0.6,
        thickness: 1.0,
        ior: 1.5,
        emissive: emissive(Color::srgb_u8(0x00, 0x1a, 0x0a), 0.2),
        ..default()
    });
    let rose_gold_material = materials.add(StandardMaterial {
        base_color: ROSE_GOLD,
        metallic: 0.9,
        perceptual_roughness: 0.2,
        emissive: emissive(Color::srgb_u8(0x5c, 0x2e, 0x2e), 0.1),
        ..default()
    });
    let glow_material = materials.add(StandardMaterial {
        base_color: WARM_GLOW,
        emissive: emissive(WARM_GLOW, 2.0),
        unlit: true,
        ..default()
    });

    for (set, population) in ornaments.iter().enumerate() {
        let (mesh, material) = match population.class() {
            OrnamentClass::Gift => (&gift_mesh, &gift_material),
            OrnamentClass::GoldBall => (&ball_mesh, &gold_material),
            OrnamentClass::EmeraldBall => (&ball_mesh, &emerald_material),
            OrnamentClass::RoseGoldBall => (&ball_mesh, &rose_gold_material),
            OrnamentClass::Glow => (&glow_mesh, &glow_material),
        };
        for (index, &chaos) in population.chaos().iter().enumerate() {
            commands.spawn((
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material.clone()),
                Transform::from_translation(chaos),
                OrnamentRef { set, index },
            ));
        }
    }

    commands.insert_resource(TreePopulations { foliage, ornaments });

    // Star topper, hidden until the tree assembles.
    let star_material = materials.add(StandardMaterial {
        base_color: GOLD,
        emissive: emissive(GOLD, 4.0),
        perceptual_roughness: 0.1,
        metallic: 1.0,
        cull_mode: None,
        ..default()
    });
    commands
        .spawn((
            Mesh3d(meshes.add(star_mesh(0.8, 0.4))),
            MeshMaterial3d(star_material),
            Transform::from_xyz(0.0, style.star_height, 0.0).with_scale(Vec3::ZERO),
            Visibility::Hidden,
            StarTopper,
        ))
        .with_children(|parent| {
            parent.spawn(PointLight {
                intensity: 100_000.0,
                color: GOLD,
                range: 10.0,
                ..default()
            });
        });

    spawn_scene_dressing(&mut commands, &mut meshes, &mut materials, &style);
}

/// Cinematic dressing: warm key, emerald fill, pink rim, dark mirror floor.
fn spawn_scene_dressing(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    style: &TreeStyle,
) {
    commands.insert_resource(GlobalAmbientLight {
        color: Color::srgb_u8(0x00, 0x1a, 0x0a),
        brightness: 60.0,
        ..default()
    });

    // Key light, warm gold
    commands.spawn((
        SpotLight {
            intensity: 8_000_000.0,
            color: GOLD,
            outer_angle: 0.25,
            inner_angle: 0.0,
            shadows_enabled: true,
            range: 80.0,
            ..default()
        },
        Transform::from_xyz(15.0, 20.0, 15.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    // Fill light, cool emerald
    commands.spawn((
        SpotLight {
            intensity: 5_000_000.0,
            color: Color::srgb_u8(0x00, 0x66, 0x33),
            outer_angle: 0.4,
            inner_angle: 0.0,
            range: 80.0,
            ..default()
        },
        Transform::from_xyz(-15.0, 10.0, -15.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    // Rim light, soft pink
    commands.spawn((
        SpotLight {
            intensity: 4_000_000.0,
            color: Color::srgb_u8(0xff, 0xc4, 0xd6),
            outer_angle: 0.6,
            inner_angle: 0.0,
            range: 80.0,
            ..default()
        },
        Transform::from_xyz(0.0, 10.0, -20.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Reflective floor just under the cone base
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(100.0, 100.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(0x00, 0x09, 0x05),
            perceptual_roughness: 0.1,
            metallic: 0.8,
            ..default()
        })),
        Transform::from_xyz(0.0, style.y_offset - 0.1, 0.0),
    ));
}

/// Flat five-pointed star fan, extruded look left to the emissive bloom.
fn star_mesh(outer_radius: f32, inner_radius: f32) -> Mesh {
    let points = 5;
    let step = std::f32::consts::PI / points as f32;

    let mut positions = vec![[0.0, 0.0, 0.0]];
    for i in 0..(2 * points) {
        let r = if i % 2 == 0 { outer_radius } else { inner_radius };
        let a = i as f32 * step;
        positions.push([a.sin() * r, a.cos() * r, 0.0]);
    }
    let count = positions.len() as u32;

    let mut indices = Vec::new();
    for i in 1..count {
        let next = if i == count - 1 { 1 } else { i + 1 };
        indices.extend_from_slice(&[0, next, i]);
    }

    let normals = vec![[0.0, 0.0, 1.0]; count as usize];
    let uvs = vec![[0.5, 0.5]; count as usize];

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

// ============================================================================
// Per-frame systems
// ============================================================================

/// The animator pass. Sole writer of every `current` column.
fn step_assembly(
    time: Res<Time>,
    style: Res<TreeStyle>,
    mode: Res<State<GameMode>>,
    mut populations: ResMut<TreePopulations>,
) {
    let dt = time.delta_secs();
    let assembled = mode.get().is_assembled();

    step_foliage(&mut populations.foliage, assembled, dt, &style);
    for ornaments in &mut populations.ornaments {
        step_ornaments(ornaments, assembled, dt, &style);
    }
}

/// Copy the foliage snapshot into the point-cloud mesh. Sparkle and scale
/// modulate the per-point color toward gold.
fn sync_foliage(
    time: Res<Time>,
    populations: Res<TreePopulations>,
    foliage_mesh: Res<FoliageMesh>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    let Some(mesh) = meshes.get_mut(&foliage_mesh.0) else {
        return;
    };
    let elapsed = time.elapsed_secs();
    let foliage = &populations.foliage;

    let positions: Vec<[f32; 3]> = foliage.current().iter().map(|p| p.to_array()).collect();
    let colors: Vec<[f32; 4]> = foliage
        .sparkle_phase()
        .iter()
        .zip(foliage.scale())
        .map(|(&phase, &scale)| {
            let glint = sparkle_brightness(phase, elapsed);
            let rgb = NEEDLE_BASE.lerp(NEEDLE_GOLD, glint * 0.6) * (0.5 + 0.5 * scale);
            [rgb.x, rgb.y, rgb.z, 1.0]
        })
        .collect();

    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
}

/// Copy ornament snapshots into entity transforms, adding the draw-time-only
/// bob and spin offsets.
fn sync_ornaments(
    time: Res<Time>,
    style: Res<TreeStyle>,
    mode: Res<State<GameMode>>,
    populations: Res<TreePopulations>,
    mut query: Query<(&OrnamentRef, &mut Transform)>,
) {
    let elapsed = time.elapsed_secs();
    let assembled = mode.get().is_assembled();

    for (ornament, mut transform) in &mut query {
        let population = &populations.ornaments[ornament.set];
        let mut position = population.current()[ornament.index];
        if assembled {
            position.y += bob_offset(elapsed, ornament.index, &style);
        }
        transform.translation = position;
        transform.rotation =
            spin_rotation(population.rotation_phase()[ornament.index], elapsed, &style);
    }
}

/// Star topper lifecycle: visible, spinning and bobbing only while the tree
/// is assembled.
fn animate_star(
    time: Res<Time>,
    style: Res<TreeStyle>,
    mode: Res<State<GameMode>>,
    mut query: Query<(&mut Transform, &mut Visibility), With<StarTopper>>,
) {
    let assembled = mode.get().is_assembled();
    let elapsed = time.elapsed_secs();

    for (mut transform, mut visibility) in &mut query {
        if assembled {
            *visibility = Visibility::Inherited;
            transform.scale = Vec3::ONE;
            transform.rotation = Quat::from_rotation_y(elapsed * style.star_spin_rate);
            transform.translation.y = style.star_height + elapsed.sin() * style.star_bob_amplitude;
        } else {
            *visibility = Visibility::Hidden;
            transform.scale = Vec3::ZERO;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_mesh_is_a_closed_fan() {
        let mesh = star_mesh(0.8, 0.4);
        let positions = mesh
            .attribute(Mesh::ATTRIBUTE_POSITION)
            .and_then(|a| a.as_float3())
            .unwrap();
        // Center plus 10 perimeter vertices, alternating outer/inner radius.
        assert_eq!(positions.len(), 11);
        for (i, p) in positions.iter().enumerate().skip(1) {
            let r = (p[0] * p[0] + p[1] * p[1]).sqrt();
            let expected = if (i - 1) % 2 == 0 { 0.8 } else { 0.4 };
            assert!((r - expected).abs() < 1e-5);
        }
        // One triangle per perimeter vertex, wrapping back to the first.
        match mesh.indices().unwrap() {
            Indices::U32(indices) => assert_eq!(indices.len(), 30),
            other => panic!("unexpected index format: {other:?}"),
        }
    }
}
