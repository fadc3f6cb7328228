//! Snout (oblique frustum of a cone) tessellation.

use crate::config::TessellationOptions;
use crate::mesh::Mesh;
use crate::types::Vector3;
use std::f32::consts::TAU;

#[allow(clippy::too_many_arguments)]
pub(crate) fn tessellate_snout(
    dbottom: f32,
    dtop: f32,
    height: f32,
    xoffset: f32,
    yoffset: f32,
    opts: TessellationOptions,
) -> Mesh {
    let rbottom = dbottom * 0.5;
    let rtop = dtop * 0.5;
    let sides = opts.side_count(TAU, rbottom.max(rtop)) as usize;
    let half = height * 0.5;

    // Horizontal displacement of the top ring relative to the bottom,
    // projected over height, used to slant the side normals.
    let dh = if height > 0.0 {
        ((xoffset * xoffset + yoffset * yoffset).sqrt()) / height
    } else {
        0.0
    };

    let mut positions = Vec::with_capacity(sides * 2);
    let mut normals = Vec::with_capacity(sides);
    for i in 0..sides {
        let theta = TAU * i as f32 / sides as f32;
        let (s, c) = theta.sin_cos();
        positions.push(Vector3::new(c * rbottom, s * rbottom, -half));
        positions.push(Vector3::new(
            xoffset + c * rtop,
            yoffset + s * rtop,
            half,
        ));
        let n = if height > 0.0 {
            Vector3::new(c, s, dh).normalized()
        } else {
            Vector3::new(0.0, 0.0, 1.0)
        };
        normals.push(n);
    }

    let mut position_index = Vec::new();
    let mut normal_index = Vec::new();
    for i in 0..sides {
        let next = (i + 1) % sides;
        let b0 = (2 * i) as u32;
        let t0 = (2 * i + 1) as u32;
        let b1 = (2 * next) as u32;
        let t1 = (2 * next + 1) as u32;
        position_index.extend([b0, b1, t1, t1, t0, b0]);
        let n0 = i as u32;
        let n1 = next as u32;
        normal_index.extend([n0, n1, n1, n1, n0, n0]);
    }

    // Two end-cap fans sharing one centre vertex each, with a flat normal
    // along the local z axis (down for the bottom, up for the top).
    let bottom_center = positions.len() as u32;
    positions.push(Vector3::new(0.0, 0.0, -half));
    let bottom_normal = normals.len() as u32;
    normals.push(Vector3::new(0.0, 0.0, -1.0));
    for i in 0..sides {
        let next = (i + 1) % sides;
        position_index.extend([bottom_center, (2 * next) as u32, (2 * i) as u32]);
        normal_index.extend([bottom_normal, bottom_normal, bottom_normal]);
    }

    let top_center = positions.len() as u32;
    positions.push(Vector3::new(xoffset, yoffset, half));
    let top_normal = normals.len() as u32;
    normals.push(Vector3::new(0.0, 0.0, 1.0));
    for i in 0..sides {
        let next = (i + 1) % sides;
        position_index.extend([top_center, (2 * i + 1) as u32, (2 * next + 1) as u32]);
        normal_index.extend([top_normal, top_normal, top_normal]);
    }

    Mesh {
        positions,
        normals,
        position_index,
        normal_index,
    }
}
