//! Parametric-primitive and facet-group tessellation.
//!
//! Each builder is grounded directly on the reference mesh-helper
//! implementation's per-primitive recipe; see DESIGN.md for the mapping.

mod boxes;
mod circular_torus;
mod cylinder;
mod elliptical_dish;
mod facet_group;
mod polygon;
mod pyramid;
mod rectangular_torus;
mod snout;
mod sphere;
mod spherical_dish;

use crate::config::TessellationOptions;
use crate::mesh::Mesh;
use crate::primitive::Primitive;

/// Converts one parametric solid (or facet group) into an indexed triangle
/// mesh. `Line` has no tessellation — a degenerate 1-D segment is drawn
/// directly by consumers that care about it, not meshed.
pub fn tessellate(primitive: &Primitive, opts: TessellationOptions) -> Option<Mesh> {
    Some(match primitive {
        Primitive::Pyramid {
            xbottom,
            ybottom,
            xtop,
            ytop,
            xoffset,
            yoffset,
            height,
        } => pyramid::tessellate_pyramid(
            *xbottom, *ybottom, *xtop, *ytop, *xoffset, *yoffset, *height,
        ),
        Primitive::Box { lx, ly, lz } => boxes::tessellate_box(*lx, *ly, *lz),
        Primitive::RectangularTorus {
            rinside,
            routside,
            height,
            angle,
        } => rectangular_torus::tessellate_rectangular_torus(
            *rinside, *routside, *height, *angle, opts,
        ),
        Primitive::CircularTorus {
            rinside,
            routside,
            angle,
        } => circular_torus::tessellate_circular_torus(*rinside, *routside, *angle, opts),
        Primitive::EllipticalDish { diameter, radius } => {
            elliptical_dish::tessellate_elliptical_dish(*diameter, *radius, opts)
        }
        Primitive::SphericalDish { diameter, height } => {
            spherical_dish::tessellate_spherical_dish(*diameter, *height, opts)
        }
        Primitive::Snout {
            dbottom,
            dtop,
            height,
            xoffset,
            yoffset,
            ..
        } => snout::tessellate_snout(*dbottom, *dtop, *height, *xoffset, *yoffset, opts),
        Primitive::Cylinder { radius, height } => {
            cylinder::tessellate_cylinder(*radius, *height, opts)
        }
        Primitive::Sphere { diameter } => sphere::tessellate_sphere(*diameter, opts.min_sides),
        Primitive::Line { .. } => return None,
        Primitive::FacetGroup { patches } => facet_group::tessellate_facet_group(patches),
    })
}

/// Tessellates a batch of primitives collected from a parse (e.g. one
/// model's worth of `PRIM` events) across all available cores. Downstream
/// of the parser, not part of it — the core parse itself stays
/// single-threaded per the streaming contract.
pub fn tessellate_many(primitives: &[Primitive], opts: TessellationOptions) -> Vec<Option<Mesh>> {
    use rayon::prelude::*;
    primitives
        .par_iter()
        .map(|p| tessellate(p, opts))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_has_no_mesh() {
        let prim = Primitive::Line {
            startx: 0.0,
            endx: 1.0,
        };
        assert!(tessellate(&prim, TessellationOptions::default()).is_none());
    }

    #[test]
    fn test_tessellate_many_preserves_order() {
        let prims = vec![
            Primitive::Box {
                lx: 1.0,
                ly: 1.0,
                lz: 1.0,
            },
            Primitive::Sphere { diameter: 2.0 },
            Primitive::Line {
                startx: 0.0,
                endx: 1.0,
            },
        ];
        let meshes = tessellate_many(&prims, TessellationOptions::default());
        assert_eq!(meshes.len(), 3);
        assert!(meshes[0].is_some());
        assert!(meshes[1].is_some());
        assert!(meshes[2].is_none());
    }

    #[test]
    fn test_box_tessellates() {
        let prim = Primitive::Box {
            lx: 1.0,
            ly: 1.0,
            lz: 1.0,
        };
        let mesh = tessellate(&prim, TessellationOptions::default()).unwrap();
        assert!(mesh.is_valid());
        assert_eq!(mesh.triangle_count(), 12);
    }

    #[test]
    fn test_all_solids_produce_valid_meshes() {
        let opts = TessellationOptions::default();
        let solids = vec![
            Primitive::Pyramid {
                xbottom: 2.0,
                ybottom: 2.0,
                xtop: 1.0,
                ytop: 1.0,
                xoffset: 0.0,
                yoffset: 0.0,
                height: 2.0,
            },
            Primitive::RectangularTorus {
                rinside: 1.0,
                routside: 2.0,
                height: 1.0,
                angle: std::f32::consts::FRAC_PI_2,
            },
            Primitive::CircularTorus {
                rinside: 0.5,
                routside: 1.0,
                angle: std::f32::consts::TAU,
            },
            Primitive::EllipticalDish {
                diameter: 2.0,
                radius: 1.0,
            },
            Primitive::SphericalDish {
                diameter: 2.0,
                height: 0.5,
            },
            Primitive::Snout {
                dbottom: 2.0,
                dtop: 1.0,
                height: 2.0,
                xoffset: 0.1,
                yoffset: 0.0,
                offset_normals: [0.0; 4],
            },
            Primitive::Cylinder {
                radius: 1.0,
                height: 2.0,
            },
            Primitive::Sphere { diameter: 2.0 },
        ];
        for solid in solids {
            let mesh = tessellate(&solid, opts).unwrap();
            assert!(mesh.is_valid(), "{:?} produced an invalid mesh", solid);
            assert!(mesh.triangle_count() > 0, "{:?} produced no triangles", solid);
        }
    }
}
