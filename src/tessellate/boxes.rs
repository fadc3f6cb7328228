//! Box tessellation: a fixed 24-vertex, 12-triangle unit cube scaled per axis.

use crate::mesh::Mesh;
use crate::types::Vector3;

/// Unit-cube corners, 4 per face, in the same order as `FACE_NORMALS`.
#[rustfmt::skip]
const CUBE_POSITIONS: [f32; 24 * 3] = [
    // -x
    -1.0, -1.0, -1.0,  -1.0, -1.0,  1.0,  -1.0,  1.0,  1.0,  -1.0,  1.0, -1.0,
    // +x
     1.0, -1.0, -1.0,   1.0,  1.0, -1.0,   1.0,  1.0,  1.0,   1.0, -1.0,  1.0,
    // -y
    -1.0, -1.0, -1.0,   1.0, -1.0, -1.0,   1.0, -1.0,  1.0,  -1.0, -1.0,  1.0,
    // +y
    -1.0,  1.0, -1.0,  -1.0,  1.0,  1.0,   1.0,  1.0,  1.0,   1.0,  1.0, -1.0,
    // -z
    -1.0, -1.0, -1.0,  -1.0,  1.0, -1.0,   1.0,  1.0, -1.0,   1.0, -1.0, -1.0,
    // +z
    -1.0, -1.0,  1.0,   1.0, -1.0,  1.0,   1.0,  1.0,  1.0,  -1.0,  1.0,  1.0,
];

#[rustfmt::skip]
const FACE_NORMALS: [f32; 6 * 3] = [
    -1.0, 0.0, 0.0,
     1.0, 0.0, 0.0,
     0.0, -1.0, 0.0,
     0.0, 1.0, 0.0,
     0.0, 0.0, -1.0,
     0.0, 0.0, 1.0,
];

#[rustfmt::skip]
const CUBE_INDEX: [u32; 36] = [
    0, 1, 2, 2, 3, 0,
    4, 7, 5, 5, 7, 6,
    8, 9, 10, 10, 11, 8,
    12, 14, 13, 14, 12, 15,
    16, 17, 18, 18, 19, 16,
    20, 22, 21, 22, 20, 23,
];

/// Builds a box mesh with full side lengths `(lx, ly, lz)`.
pub(crate) fn tessellate_box(lx: f32, ly: f32, lz: f32) -> Mesh {
    let half = Vector3::new(lx * 0.5, ly * 0.5, lz * 0.5);
    let positions = (0..24)
        .map(|i| {
            Vector3::new(
                CUBE_POSITIONS[i * 3] * half.x,
                CUBE_POSITIONS[i * 3 + 1] * half.y,
                CUBE_POSITIONS[i * 3 + 2] * half.z,
            )
        })
        .collect();
    let normals = (0..6)
        .flat_map(|face| std::iter::repeat(face).take(4))
        .map(|face| {
            Vector3::new(
                FACE_NORMALS[face * 3],
                FACE_NORMALS[face * 3 + 1],
                FACE_NORMALS[face * 3 + 2],
            )
        })
        .collect();
    let position_index = CUBE_INDEX.to_vec();
    let normal_index = CUBE_INDEX
        .iter()
        .map(|&i| i / 4)
        .collect::<Vec<u32>>();

    Mesh {
        positions,
        normals,
        position_index,
        normal_index,
    }
}
