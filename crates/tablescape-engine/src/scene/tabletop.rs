//! The table, two chairs, plates and mugs composition.

use glam::Vec3;

use crate::coords::{ColorRgba, Transform};
use crate::device::PrimitiveKind;
use crate::lighting::{DirectionalLight, LightRig, PointLight};

use super::{CompositionList, MaterialDef, SceneObject, TextureSource};

/// Texture files, relative to the texture root, in slot order.
pub fn textures() -> Vec<TextureSource> {
    vec![
        TextureSource::new("Floor.jpg", "floor"),
        TextureSource::new("Leg.jpg", "leg"),
        TextureSource::new("Tabletop.jpg", "tabletop"),
        TextureSource::new("Plate.jpg", "plate"),
        TextureSource::new("Mug.jpg", "mug"),
    ]
}

pub fn materials() -> Vec<MaterialDef> {
    vec![
        // Grayish highlight.
        MaterialDef::new("gravel", Vec3::splat(0.502), Vec3::splat(0.502), 20.0),
        MaterialDef::new("metal", Vec3::ZERO, Vec3::splat(0.78), 85.0),
        // Reddish brown highlight.
        MaterialDef::new("wood", Vec3::new(0.3, 0.25, 0.24), Vec3::new(0.66, 0.26, 0.18), 80.0),
        MaterialDef::new("porcelain", Vec3::splat(0.96), Vec3::splat(0.78), 80.0),
        MaterialDef::new("glass", Vec3::ONE, Vec3::splat(0.21), 95.0),
    ]
}

/// Dim white key light plus three yellow point lights: one above the
/// table and one to each side.
pub fn lights() -> LightRig {
    let side = |x: f32| PointLight {
        position: Vec3::new(x, 0.0, 10.0),
        ambient: Vec3::ZERO,
        diffuse: Vec3::new(0.2, 0.2, 0.0),
        specular: Vec3::new(1.0, 1.0, 0.0),
        active: true,
    };

    LightRig {
        directional: Some(DirectionalLight {
            direction: Vec3::new(-6.0, 5.0, 5.0),
            ambient: Vec3::splat(0.4),
            diffuse: Vec3::splat(0.6),
            specular: Vec3::ZERO,
            active: true,
        }),
        points: vec![
            PointLight {
                position: Vec3::new(0.0, 15.0, -8.0),
                ambient: Vec3::new(0.03, 0.03, 0.0),
                diffuse: Vec3::new(0.4, 0.4, 0.0),
                specular: Vec3::new(1.0, 1.0, 0.0),
                active: true,
            },
            side(5.0),
            side(-5.0),
        ],
    }
}

/// Every primitive kind the composition draws.
pub fn meshes() -> Vec<PrimitiveKind> {
    vec![
        PrimitiveKind::Plane,
        PrimitiveKind::Box,
        PrimitiveKind::TaperedCylinder,
        PrimitiveKind::Cylinder,
        PrimitiveKind::Torus,
    ]
}

fn t(scale: [f32; 3], rotation: [f32; 3], position: [f32; 3]) -> Transform {
    Transform::new(Vec3::from(scale), Vec3::from(rotation), Vec3::from(position))
}

const UPRIGHT: [f32; 3] = [0.0, 0.0, 90.0];
const ACROSS: [f32; 3] = [0.0, 90.0, 0.0];
const FLAT: [f32; 3] = [0.0, 0.0, 0.0];

fn metal_box(label: &str, transform: Transform) -> SceneObject {
    SceneObject::new(label, PrimitiveKind::Box, transform)
        .color(ColorRgba::blue())
        .texture("leg")
        .material("metal")
}

/// One chair on the side of the table given by `side` (+1 right, -1 left).
fn chair(list: &mut CompositionList, side: f32) {
    let x = |v: f32| v * side;
    let leg = [5.0, 0.7, 0.5];

    for (px, py, pz) in [(8.0, 1.0, 2.0), (2.0, 1.0, 2.0), (8.0, 5.0, 2.0), (2.0, 1.0, -2.0), (8.0, 1.0, -2.0), (8.0, 5.0, -2.0)] {
        list.push(metal_box("chair leg", t(leg, UPRIGHT, [x(px), py, pz])));
    }
    for z in [-2.0, 2.0] {
        list.push(metal_box("chair guard", t([6.0, 0.3, 0.3], FLAT, [x(5.0), 1.5, z])));
    }
    for z in [-2.0, 2.0] {
        list.push(metal_box("upper chair guard", t([6.5, 0.7, 0.5], FLAT, [x(4.9), 3.5, z])));
    }
    list.push(
        SceneObject::new("chair seat", PrimitiveKind::Box, t([6.5, 0.7, 3.5], FLAT, [x(5.0), 3.5, 0.0]))
            .color(ColorRgba::blue())
            .texture("tabletop")
            .material("wood"),
    );
    for y in [4.5, 5.5, 6.5] {
        list.push(metal_box("chair back bar", t([4.0, 0.7, 0.5], ACROSS, [x(8.0), y, 0.0])));
    }
}

/// The full composition in draw order.
///
/// The coffee surfaces name no texture or material; under the persistent
/// state policy they inherit the previous draw's material.
pub fn composition() -> CompositionList {
    let mut list = CompositionList::new();

    list.push(
        SceneObject::new("floor", PrimitiveKind::Plane, t([20.0, 1.0, 10.0], FLAT, [0.0, 0.0, 0.0]))
            .texture("floor")
            .material("gravel"),
    );

    for (px, pz) in [(3.0, 3.0), (-3.0, 3.0), (-3.0, -3.0), (3.0, -3.0)] {
        list.push(
            SceneObject::new("table leg", PrimitiveKind::Box, t([5.0, 0.7, 0.5], UPRIGHT, [px, 1.5, pz]))
                .color(ColorRgba::red())
                .texture("leg")
                .material("metal"),
        );
    }

    list.push(
        SceneObject::new("tabletop", PrimitiveKind::Box, t([8.0, 1.0, 7.0], FLAT, [0.0, 4.5, 0.0]))
            .color(ColorRgba::blue())
            .texture("tabletop")
            .material("wood"),
    );

    chair(&mut list, 1.0);
    chair(&mut list, -1.0);

    for px in [-2.0, 2.0] {
        list.push(
            SceneObject::new("plate", PrimitiveKind::TaperedCylinder, t([1.0, -0.4, 0.5], FLAT, [px, 5.4, 0.0]))
                .color(ColorRgba::blue())
                .texture("plate")
                .material("porcelain"),
        );
    }

    for px in [1.0, -1.0] {
        list.push(
            SceneObject::new("coffee", PrimitiveKind::Cylinder, t([0.3, 0.02, 0.2], FLAT, [px, 5.68, -1.0]))
                .color(ColorRgba::blue()),
        );
        list.push(
            SceneObject::new("mug", PrimitiveKind::Cylinder, t([0.3, 0.7, 0.2], FLAT, [px, 5.0, -1.0]))
                .color(ColorRgba::blue())
                .texture("mug")
                .material("glass"),
        );
    }

    for px in [-1.3, 1.3] {
        list.push(
            SceneObject::new("mug handle", PrimitiveKind::Torus, t([0.09, 0.25, 0.1], FLAT, [px, 5.35, -1.0]))
                .color(ColorRgba::red())
                .texture("mug")
                .material("glass"),
        );
    }

    list
}
