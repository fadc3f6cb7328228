//! Elliptical dish tessellation: a quarter-ellipse revolved about z.

use crate::config::TessellationOptions;
use crate::mesh::Mesh;
use crate::types::Vector3;
use std::f32::consts::{FRAC_PI_2, TAU};

pub(crate) fn tessellate_elliptical_dish(
    diameter: f32,
    radius: f32,
    opts: TessellationOptions,
) -> Mesh {
    let dish_radius = diameter * 0.5;
    let second_radius = radius;
    let sides = opts
        .side_count(TAU, second_radius)
        .max(opts.min_sides / 2)
        .max(1) as usize;
    let csides = opts.side_count(TAU, dish_radius).max(1) as usize;

    let mut positions = Vec::with_capacity((sides + 1) * (csides + 1) + 1);
    let mut normals = Vec::with_capacity(positions.capacity());
    for lat in 0..=sides {
        let theta = FRAC_PI_2 * lat as f32 / sides as f32;
        let (sin_t, cos_t) = theta.sin_cos();
        for lon in 0..=csides {
            let phi = TAU * lon as f32 / csides as f32;
            let (sin_p, cos_p) = phi.sin_cos();
            let x = dish_radius * cos_t * cos_p;
            let y = dish_radius * cos_t * sin_p;
            let z = second_radius * sin_t;
            positions.push(Vector3::new(x, y, z));
            // Gradient of x^2/a^2 + y^2/a^2 + z^2/b^2 = 1.
            let n = Vector3::new(
                cos_t * cos_p / dish_radius,
                cos_t * sin_p / dish_radius,
                sin_t / second_radius,
            )
            .normalized();
            normals.push(n);
        }
    }
    let apex_idx = positions.len() as u32;
    positions.push(Vector3::new(0.0, 0.0, second_radius));
    normals.push(Vector3::new(0.0, 0.0, 1.0));

    let mut position_index = Vec::new();
    let mut normal_index = Vec::new();
    for lat in 0..sides {
        for lon in 0..csides {
            let first = (lat * (csides + 1) + lon) as u32;
            let second = first + csides as u32 + 1;
            if lat + 1 == sides {
                // Last ring degenerates toward the apex vertex.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elliptical_dish_is_valid() {
        let opts = TessellationOptions::default();
        let mesh = tessellate_elliptical_dish(2.0, 1.0, opts);
        assert!(mesh.is_valid());
        assert!(mesh.triangle_count() > 0);
    }

    #[test]
    fn test_elliptical_dish_base_radius() {
        let opts = TessellationOptions::default();
        let mesh = tessellate_elliptical_dish(2.0, 1.0, opts);
        let base = &mesh.positions[0];
        assert!((base.length() - 1.0).abs() < 1e-4);
    }
}
