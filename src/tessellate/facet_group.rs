//! Facet-group tessellation: dedup vertices exactly, then triangulate each
//! patch's contours.

use std::hash::BuildHasherDefault;

use ahash::AHasher;
use indexmap::IndexMap;

use crate::mesh::Mesh;
use crate::primitive::Patch;
use crate::tessellate::polygon::tessellate_patch;
use crate::types::Vector3;

type VertexKey = (u32, u32, u32, u32, u32, u32);
type VertexMap = IndexMap<VertexKey, u32, BuildHasherDefault<AHasher>>;

fn vertex_key(position: Vector3, normal: Vector3) -> VertexKey {
    (
        position.x.to_bits(),
        position.y.to_bits(),
        position.z.to_bits(),
        normal.x.to_bits(),
        normal.y.to_bits(),
        normal.z.to_bits(),
    )
}

pub(crate) fn tessellate_facet_group(patches: &[Patch]) -> Mesh {
    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut seen: VertexMap = VertexMap::default();

    fn dedup(
        seen: &mut VertexMap,
        positions: &mut Vec<Vector3>,
        normals: &mut Vec<Vector3>,
        position: Vector3,
        normal: Vector3,
    ) -> u32 {
        *seen.entry(vertex_key(position, normal)).or_insert_with(|| {
            let idx = positions.len() as u32;
            positions.push(position);
            normals.push(normal);
            idx
        })
    }

    let mut position_index = Vec::new();

    for patch in patches {
        let vertex_index: Vec<Vec<u32>> = patch
            .iter()
            .map(|contour| {
                contour
                    .iter()
                    .map(|v| dedup(&mut seen, &mut positions, &mut normals, v.position, v.normal))
                    .collect()
            })
            .collect();
        let result = tessellate_patch(patch, &vertex_index);
        for p in result.extra_positions {
            positions.push(p);
        }
        for n in result.extra_normals {
            normals.push(n);
        }
        position_index.extend(result.triangles);
    }

    Mesh {
        positions,
        normals,
        position_index,
        normal_index: Vec::new(),
    }
}
