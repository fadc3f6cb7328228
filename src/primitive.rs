//! Parametric solid primitives carried by `PRIM` chunks.

use crate::types::Vector3;

/// A single vertex of a facet-group contour: a world-space position paired
/// with its shading normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacetVertex {
    pub position: Vector3,
    pub normal: Vector3,
}

/// A closed loop of vertices: the outer boundary of a patch, or a hole.
pub type Contour = Vec<FacetVertex>;

/// One or more contours (outer boundary plus holes) sharing a surface.
pub type Patch = Vec<Contour>;

/// A tagged parametric solid, exactly as dispatched by `primitiveKind` 1..11
/// in a `PRIM` chunk body.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Kind 1. Field order matches the authoritative binary layout, not the
    /// prose documented in the upstream comments (see DESIGN.md).
    Pyramid {
        xbottom: f32,
        ybottom: f32,
        xtop: f32,
        ytop: f32,
        xoffset: f32,
        yoffset: f32,
        height: f32,
    },
    /// Kind 2. Full side lengths.
    Box { lx: f32, ly: f32, lz: f32 },
    /// Kind 3.
    RectangularTorus {
        rinside: f32,
        routside: f32,
        height: f32,
        angle: f32,
    },
    /// Kind 4.
    CircularTorus {
        rinside: f32,
        routside: f32,
        angle: f32,
    },
    /// Kind 5. `diameter` is the full bowl opening, `radius` the polar
    /// semi-axis.
    EllipticalDish { diameter: f32, radius: f32 },
    /// Kind 6. `height` is the sagitta.
    SphericalDish { diameter: f32, height: f32 },
    /// Kind 7. Oblique frustum. `offset_normals` are the four trailing
    /// floats the reference format carries but never tessellates; preserved
    /// for forward compatibility only.
    Snout {
        dbottom: f32,
        dtop: f32,
        height: f32,
        xoffset: f32,
        yoffset: f32,
        offset_normals: [f32; 4],
    },
    /// Kind 8.
    Cylinder { radius: f32, height: f32 },
    /// Kind 9.
    Sphere { diameter: f32 },
    /// Kind 10. A 1-D segment along local x.
    Line { startx: f32, endx: f32 },
    /// Kind 11. Nested patches of contours of (position, normal) vertices.
    FacetGroup { patches: Vec<Patch> },
}

impl Primitive {
    /// The 1..=11 wire kind for this variant, as used in error messages and
    /// per-kind counters.
    pub fn kind(&self) -> u32 {
        match self {
            Primitive::Pyramid { .. } => 1,
            Primitive::Box { .. } => 2,
            Primitive::RectangularTorus { .. } => 3,
            Primitive::CircularTorus { .. } => 4,
            Primitive::EllipticalDish { .. } => 5,
            Primitive::SphericalDish { .. } => 6,
            Primitive::Snout { .. } => 7,
            Primitive::Cylinder { .. } => 8,
            Primitive::Sphere { .. } => 9,
            Primitive::Line { .. } => 10,
            Primitive::FacetGroup { .. } => 11,
        }
    }
}
