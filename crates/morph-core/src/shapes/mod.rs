/// Procedural shape generators.
///
/// A closed set of named shapes, each a pure function of
/// `(index, total, radius)`. Silhouettes and geometric primitives are two
/// skins over the same registry; the dispatcher absorbs degenerate inputs.
pub mod dispatcher;
pub mod primitives;
pub mod silhouettes;

use glam::Vec3;

pub use dispatcher::{fill_targets, target_for};

use primitives::*;
use silhouettes::*;

/// Generator signature shared by every shape.
pub type PositionFn = fn(usize, usize, f32) -> Vec3;

/// A named generator.
pub struct ShapeDescriptor {
    pub name: &'static str,
    pub position: PositionFn,
}

/// Registry, in `ShapeKind` discriminant order.
pub static SHAPES: [ShapeDescriptor; 11] = [
    ShapeDescriptor { name: "sphere", position: shape_sphere },
    ShapeDescriptor { name: "globe", position: shape_globe },
    ShapeDescriptor { name: "mobile", position: shape_mobile },
    ShapeDescriptor { name: "pen", position: shape_pen },
    ShapeDescriptor { name: "gear", position: shape_gear },
    ShapeDescriptor { name: "trolley", position: shape_trolley },
    ShapeDescriptor { name: "cloud", position: shape_cloud },
    ShapeDescriptor { name: "cube", position: shape_cube },
    ShapeDescriptor { name: "torus", position: shape_torus },
    ShapeDescriptor { name: "helix", position: shape_helix },
    ShapeDescriptor { name: "octahedron", position: shape_octahedron },
];

#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum ShapeKind {
    #[default]
    Sphere = 0,
    Globe = 1,
    Mobile = 2,
    Pen = 3,
    Gear = 4,
    Trolley = 5,
    Cloud = 6,
    Cube = 7,
    Torus = 8,
    Helix = 9,
    Octahedron = 10,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 11] = [
        ShapeKind::Sphere,
        ShapeKind::Globe,
        ShapeKind::Mobile,
        ShapeKind::Pen,
        ShapeKind::Gear,
        ShapeKind::Trolley,
        ShapeKind::Cloud,
        ShapeKind::Cube,
        ShapeKind::Torus,
        ShapeKind::Helix,
        ShapeKind::Octahedron,
    ];

    pub fn descriptor(self) -> &'static ShapeDescriptor {
        &SHAPES[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Strict lookup by name (case-insensitive, with a couple of aliases).
    pub fn parse(name: &str) -> Option<ShapeKind> {
        let name = name.trim().to_ascii_lowercase();
        let name = match name.as_str() {
            "phone" => "mobile",
            "cart" => "trolley",
            other => other,
        };
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }

    /// Lookup that falls back to the sphere for unknown names.
    pub fn from_name(name: &str) -> ShapeKind {
        Self::parse(name).unwrap_or_else(|| {
            log::warn!("unknown shape {name:?}, falling back to sphere");
            ShapeKind::Sphere
        })
    }

    /// Point `index` of `total` on this shape at `radius`.
    pub fn position(self, index: usize, total: usize, radius: f32) -> Vec3 {
        target_for(self, index, total, radius)
    }
}

/// Morph order of the silhouette skin.
pub const SILHOUETTE_SEQUENCE: [ShapeKind; 7] = [
    ShapeKind::Sphere,
    ShapeKind::Globe,
    ShapeKind::Mobile,
    ShapeKind::Pen,
    ShapeKind::Gear,
    ShapeKind::Trolley,
    ShapeKind::Cloud,
];

/// Morph order of the geometric skin.
pub const GEOMETRIC_SEQUENCE: [ShapeKind; 5] = [
    ShapeKind::Sphere,
    ShapeKind::Cube,
    ShapeKind::Torus,
    ShapeKind::Helix,
    ShapeKind::Octahedron,
];
