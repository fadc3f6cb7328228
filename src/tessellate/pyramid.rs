//! Pyramid (frustum) tessellation: a possibly-degenerate 8-corner solid.

use crate::mesh::Mesh;
use crate::types::Vector3;

/// Corner order, matching the reference template: 4 bottom corners at
/// z=-height/2 scaled by (xbottom, ybottom), then 4 top corners at
/// z=+height/2 scaled by (xtop, ytop) and shifted by (xoffset, yoffset).
#[allow(clippy::too_many_arguments)]
pub(crate) fn tessellate_pyramid(
    xbottom: f32,
    ybottom: f32,
    xtop: f32,
    ytop: f32,
    xoffset: f32,
    yoffset: f32,
    height: f32,
) -> Mesh {
    let hb = height * -0.5;
    let ht = height * 0.5;
    let (xb, yb) = (xbottom * 0.5, ybottom * 0.5);
    let (xt, yt) = (xtop * 0.5, ytop * 0.5);

    let positions = vec![
        Vector3::new(-xb, -yb, hb),
        Vector3::new(xb, -yb, hb),
        Vector3::new(xb, yb, hb),
        Vector3::new(-xb, yb, hb),
        Vector3::new(xoffset - xt, yoffset - yt, ht),
        Vector3::new(xoffset + xt, yoffset - yt, ht),
        Vector3::new(xoffset + xt, yoffset + yt, ht),
        Vector3::new(xoffset - xt, yoffset + yt, ht),
    ];

    let mut out = Mesh::new();
    out.positions = positions.clone();

    // Four side quads (bottom[i], bottom[i+1], top[i+1], top[i]) and two cap
    // quads (bottom face, top face), each split into 2 triangles and each
    // triangle's flat normal computed on the fly; degenerate triangles (two
    // exactly-equal corners, which happens whenever one end of the frustum
    // collapses to a point) are skipped entirely.
    let side_quads = [
        [0usize, 1, 5, 4],
        [1, 2, 6, 5],
        [2, 3, 7, 6],
        [3, 0, 4, 7],
    ];
    for quad in side_quads {
        push_quad(&mut out, &positions, quad);
    }
    push_quad(&mut out, &positions, [3, 2, 1, 0]);
    push_quad(&mut out, &positions, [4, 5, 6, 7]);

    out
}

fn push_quad(mesh: &mut Mesh, positions: &[Vector3], quad: [usize; 4]) {
    push_triangle(mesh, positions, [quad[0], quad[1], quad[2]]);
    push_triangle(mesh, positions, [quad[2], quad[3], quad[0]]);
}

fn push_triangle(mesh: &mut Mesh, positions: &[Vector3], tri: [usize; 3]) {
    let [a, b, c] = tri;
    if positions[a].exact_eq(&positions[b])
        || positions[b].exact_eq(&positions[c])
        || positions[a].exact_eq(&positions[c])
    {
        return;
    }
    let normal = (positions[b] - positions[a])
        .cross(&(positions[c] - positions[a]))
        .normalized();
    let normal_idx = mesh.normals.len() as u32;
    mesh.normals.push(normal);
    mesh.position_index
        .extend([a as u32, b as u32, c as u32]);
    mesh.normal_index.extend([normal_idx, normal_idx, normal_idx]);
}
