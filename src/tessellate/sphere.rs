//! UV sphere tessellation.

use crate::mesh::Mesh;
use crate::types::Vector3;
use std::f32::consts::PI;

pub(crate) fn tessellate_sphere(diameter: f32, min_sides: u32) -> Mesh {
    let radius = diameter * 0.5;
    let sides = min_sides.max(8) as usize;

    let mut positions = Vec::with_capacity((sides + 1) * (sides + 1));
    for x in 0..=sides {
        let theta = x as f32 * PI / sides as f32;
        let (sin_t, cos_t) = theta.sin_cos();
        for y in 0..=sides {
            let phi = y as f32 * 2.0 * PI / sides as f32;
            let (sin_p, cos_p) = phi.sin_cos();
            let v = Vector3::new(-cos_p * sin_t, -cos_t, -sin_p * sin_t);
            positions.push(v.scaled(radius));
        }
    }
    let normals: Vec<Vector3> = positions.iter().map(|p| p.scaled(1.0 / radius)).collect();

    let mut position_index = Vec::new();
    for i in 0..sides {
        for j in 0..sides {
            let first = (i * (sides + 1) + j) as u32;
            let second = first + sides as u32 + 1;
            position_index.extend([first, second, first + 1]);
            position_index.extend([second, second + 1, first + 1]);
        }
    }
    let normal_index = position_index.clone();

    Mesh {
        positions,
        normals,
        position_index,
        normal_index,
    }
}
