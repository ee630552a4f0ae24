//! Scene setup system
//!
//! Spawns the camera, lights, the die with its pips, and the two text
//! widgets.

use bevy::prelude::*;

use crate::dice3d::meshes::{create_d6, pip_positions, PIP_RADIUS};
use crate::dice3d::roll::{FaceValue, RollController};
use crate::dice3d::types::*;

/// Main setup system - initializes the 3D scene and UI
pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    controller: Res<RollController>,
) {
    let rig = CameraRig::default();
    commands.spawn((
        Camera3d::default(),
        rig.projection(),
        rig.transform(),
        AmbientLight {
            color: Color::WHITE,
            brightness: 400.0,
            ..default()
        },
        MainCamera,
    ));

    // Key light front-right-top, weak fill from the opposite corner.
    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            ..default()
        },
        Transform::from_xyz(5.0, 5.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 2500.0,
            ..default()
        },
        Transform::from_xyz(-5.0, -5.0, -5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        PointLight {
            intensity: 200_000.0,
            range: 20.0,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 5.0),
    ));

    let die = Die::default();
    spawn_die(
        &mut commands,
        &mut meshes,
        &mut materials,
        die,
        controller.current_orientation().to_quat(),
    );

    spawn_ui(&mut commands, controller.current_face());
}

/// Spawn the cube with a disc child for every pip.
pub fn spawn_die(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    die: Die,
    rotation: Quat,
) -> Entity {
    let (mesh, face_normals) = create_d6(die.edge);

    let body = materials.add(StandardMaterial {
        base_color: palette::DIE_BODY,
        perceptual_roughness: 0.4,
        ..default()
    });
    let pip_material = materials.add(StandardMaterial {
        base_color: palette::PIP,
        perceptual_roughness: 0.6,
        ..default()
    });
    let pip_mesh = meshes.add(Cylinder::new(die.edge * PIP_RADIUS, die.edge * 0.02));

    commands
        .spawn((
            Mesh3d(meshes.add(mesh)),
            MeshMaterial3d(body),
            Transform::from_rotation(rotation),
            die,
        ))
        .with_children(|parent| {
            for (normal, value) in face_normals {
                let Some(face) = FaceValue::new(value as u8) else {
                    continue;
                };
                let facing = Quat::from_rotation_arc(Vec3::Y, normal);
                for position in pip_positions(normal, face, die.edge) {
                    parent.spawn((
                        Mesh3d(pip_mesh.clone()),
                        MeshMaterial3d(pip_material.clone()),
                        Transform::from_translation(position).with_rotation(facing),
                        DiePip { face },
                    ));
                }
            }
        })
        .id()
}

fn spawn_ui(commands: &mut Commands, face: FaceValue) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            top: Val::Px(48.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(face.to_string()),
                TextFont {
                    font_size: 72.0,
                    ..default()
                },
                TextColor(palette::SCORE),
                ScoreText,
            ));
        });

    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(48.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(IDLE_INSTRUCTION),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(palette::INSTRUCTION),
                InstructionText,
            ));
        });
}
