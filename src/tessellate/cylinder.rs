//! Cylinder tessellation: an open tube, no end caps (matches the reference
//! cylinder builder, which relies on an enclosing snout/dish for closure).

use crate::config::TessellationOptions;
use crate::mesh::Mesh;
use crate::types::Vector3;
use std::f32::consts::TAU;

pub(crate) fn tessellate_cylinder(radius: f32, height: f32, opts: TessellationOptions) -> Mesh {
    let sides = opts.side_count(TAU, radius) as usize;
    let half = height * 0.5;

    let mut positions = Vec::with_capacity(sides * 2);
    let mut normals = Vec::with_capacity(sides);
    for i in 0..sides {
        let theta = TAU * i as f32 / sides as f32;
        let (s, c) = theta.sin_cos();
        positions.push(Vector3::new(c * radius, s * radius, -half));
        positions.push(Vector3::new(c * radius, s * radius, half));
        normals.push(Vector3::new(c, s, 0.0));
    }

    let mut position_index = Vec::with_capacity(sides * 6);
    let mut normal_index = Vec::with_capacity(sides * 6);
    for i in 0..sides {
        let next = (i + 1) % sides;
        let bottom0 = (2 * i) as u32;
        let top0 = (2 * i + 1) as u32;
        let bottom1 = (2 * next) as u32;
        let top1 = (2 * next + 1) as u32;
        position_index.extend([bottom0, bottom1, top1, top1, top0, bottom0]);
        let n0 = i as u32;
        let n1 = next as u32;
        normal_index.extend([n0, n1, n1, n1, n0, n0]);
    }

    Mesh {
        positions,
        normals,
        position_index,
        normal_index,
    }
}
