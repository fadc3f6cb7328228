//! Spherical dish tessellation: a cap cut from a sphere by its sagitta.

use crate::config::TessellationOptions;
use crate::mesh::Mesh;
use crate::tessellate::sphere::tessellate_sphere;
use crate::types::Vector3;
use std::f32::consts::{FRAC_PI_2, TAU};

pub(crate) fn tessellate_spherical_dish(
    diameter: f32,
    height: f32,
    opts: TessellationOptions,
) -> Mesh {
    if height >= diameter {
        // The cap is a hemisphere or larger: delegate entirely to the
        // sphere builder rather than special-case the degenerate cone.
        return tessellate_sphere(diameter, opts.min_sides);
    }

    let dish_radius = diameter * 0.5;
    let radius = (dish_radius * dish_radius + height * height) / (2.0 * height);
    let start_theta = (1.0 - height / radius).asin();

    let sides = opts.side_count(TAU, radius).max(1) as usize;
    let csides = opts.side_count(TAU, dish_radius).max(1) as usize;

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    for lat in 0..=sides {
        let theta = start_theta + (FRAC_PI_2 - start_theta) * lat as f32 / sides as f32;
        let (sin_t, cos_t) = theta.sin_cos();
        for lon in 0..=csides {
            let phi = TAU * lon as f32 / csides as f32;
            let (sin_p, cos_p) = phi.sin_cos();
            let n = Vector3::new(cos_t * cos_p, cos_t * sin_p, sin_t);
            positions.push(n.scaled(radius) - Vector3::new(0.0, 0.0, radius - height));
            normals.push(n);
        }
    }
    let apex_idx = positions.len() as u32;
    positions.push(Vector3::new(0.0, 0.0, height));
    normals.push(Vector3::new(0.0, 0.0, 1.0));

    let mut position_index = Vec::new();
    let mut normal_index = Vec::new();
    for lat in 0..sides {
        for lon in 0..csides {
            let first = (lat * (csides + 1) + lon) as u32;
            let second = first + csides as u32 + 1;
            if lat + 1 == sides {
                position_index.extend([first, apex_idx, first + 1]);
                normal_index.extend([first, apex_idx, first + 1]);
            } else {
                position_index.extend([first, second, first + 1]);
                position_index.extend([second, second + 1, first + 1]);
                normal_index.extend([first, second, first + 1]);
                normal_index.extend([second, second + 1, first + 1]);
            }
        }
    }

    Mesh {
        positions,
        normals,
        position_index,
        normal_index,
    }
}
