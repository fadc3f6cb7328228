//! Rectangular-cross-section torus (an arc of rectangular duct) tessellation.

use crate::config::TessellationOptions;
use crate::mesh::Mesh;
use crate::types::Vector3;

pub(crate) fn tessellate_rectangular_torus(
    rinside: f32,
    routside: f32,
    height: f32,
    angle: f32,
    opts: TessellationOptions,
) -> Mesh {
    let sides = opts.side_count(angle, routside) as usize;
    let half = height * 0.5;

    // Normal table: two end-cap normals (index 0, 1) followed by one
    // (cos, sin, 0) / (-cos, -sin, 0) pair per angular step — indices
    // 2+2i (outer) and 2+2i+1 (inner).
    let mut normals = vec![Vector3::new(0.0, 0.0, -1.0), Vector3::new(0.0, 0.0, 1.0)];
    let mut positions = Vec::with_capacity((sides + 1) * 4);
    for i in 0..=sides {
        let theta = angle * i as f32 / sides as f32;
        let (s, c) = theta.sin_cos();
        normals.push(Vector3::new(c, s, 0.0));
        normals.push(Vector3::new(-c, -s, 0.0));
        // inner-bottom, outer-bottom, outer-top, inner-top
        positions.push(Vector3::new(c * rinside, s * rinside, -half));
        positions.push(Vector3::new(c * routside, s * routside, -half));
        positions.push(Vector3::new(c * routside, s * routside, half));
        positions.push(Vector3::new(c * rinside, s * rinside, half));
    }

    let mut position_index = Vec::new();
    let mut normal_index = Vec::new();
    for i in 0..sides {
        let p0 = (i * 4) as u32;
        let p1 = ((i + 1) * 4) as u32;
        let outer_n0 = (2 + i * 2) as u32;
        let outer_n1 = (2 + (i + 1) * 2) as u32;
        let inner_n0 = outer_n0 + 1;
        let inner_n1 = outer_n1 + 1;

        // Inner wall strip (points 0 and 3 of each ring).
        position_index.extend([p0, p0 + 3, p1 + 3, p1 + 3, p1, p0]);
        normal_index.extend([inner_n0, inner_n0, inner_n1, inner_n1, inner_n1, inner_n0]);

        // Outer wall strip (points 1 and 2 of each ring).
        position_index.extend([p0 + 1, p1 + 1, p1 + 2, p1 + 2, p0 + 2, p0 + 1]);
        normal_index.extend([outer_n0, outer_n1, outer_n1, outer_n1, outer_n0, outer_n0]);

        // Bottom wall strip (z=-half, points 0 and 1).
        position_index.extend([p0, p1, p1 + 1, p1 + 1, p0 + 1, p0]);
        normal_index.extend([0, 0, 0, 0, 0, 0]);

        // Top wall strip (z=+half, points 2 and 3).
        position_index.extend([p0 + 3, p0 + 2, p1 + 2, p1 + 2, p1 + 3, p0 + 3]);
        normal_index.extend([1, 1, 1, 1, 1, 1]);
    }

    // End caps at theta=0 and theta=angle.
    let last = (sides * 4) as u32;
    let end0_normal_idx = normals.len() as u32;
    normals.push(Vector3::new(0.0, -1.0, 0.0));
    let end1_normal_idx = normals.len() as u32;
    normals.push(Vector3::new(-angle.sin(), angle.cos(), 0.0));

    position_index.extend([0, 1, 2, 2, 3, 0]);
    normal_index.extend([end0_normal_idx; 6]);
    position_index.extend([last, last + 3, last + 2, last + 2, last + 1, last]);
    normal_index.extend([end1_normal_idx; 6]);

    Mesh {
        positions,
        normals,
        position_index,
        normal_index,
    }
}
