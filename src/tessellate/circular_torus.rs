//! Circular-cross-section torus (an arc of pipe) tessellation.
//!
//! The normal at a vertex directly reuses that vertex's position index
//! rather than a separately-computed table, which only gives the correct
//! shading when `tsides == csides`; this matches the reference builder and
//! is preserved rather than fixed (see DESIGN.md).

use crate::config::TessellationOptions;
use crate::mesh::Mesh;
use crate::types::Vector3;
use std::f32::consts::TAU;

pub(crate) fn tessellate_circular_torus(
    rinside: f32,
    routside: f32,
    angle: f32,
    opts: TessellationOptions,
) -> Mesh {
    let rcenter = (routside + rinside) * 0.5;
    let rtube = (routside - rinside) * 0.5;
    let tsides = opts.side_count(angle, rinside).max(1) as usize;
    let csides = opts.side_count(TAU, routside).max(1) as usize;

    let mut positions = Vec::with_capacity((tsides + 1) * (csides + 1));
    for t in 0..=tsides {
        let theta = angle * t as f32 / tsides as f32;
        let (s, c) = theta.sin_cos();
        for u in 0..=csides {
            let phi = TAU * u as f32 / csides as f32;
            let (sn, cs) = phi.sin_cos();
            let radial = rcenter + rtube * cs;
            positions.push(Vector3::new(radial * c, radial * s, rtube * sn));
        }
    }
    // Normal index aliases position index directly (documented limitation).
    let normals = positions.clone();

    let mut position_index = Vec::new();
    for t in 0..tsides {
        for u in 0..csides {
            let first = (t * (csides + 1) + u) as u32;
            let second = first + csides as u32 + 1;
            position_index.extend([first, second, first + 1]);
            position_index.extend([second, second + 1, first + 1]);
        }
    }
    let normal_index = position_index.clone();

    let mut mesh = Mesh {
        positions,
        normals,
        position_index,
        normal_index,
    };

    // Flat end caps at theta=0 and theta=angle, centred on the pipe axis.
    let cap_center = |theta: f32| {
        let (s, c) = theta.sin_cos();
        Vector3::new(rcenter * c, rcenter * s, 0.0)
    };
    append_end_cap(&mut mesh, 0, csides, cap_center(0.0));
    let last_ring = tsides * (csides + 1);
    append_end_cap(&mut mesh, last_ring, csides, cap_center(angle));

    mesh
}

fn append_end_cap(mesh: &mut Mesh, ring_start: usize, csides: usize, center: Vector3) {
    let center_idx = mesh.positions.len() as u32;
    mesh.positions.push(center);
    mesh.normals.push(center);
    for u in 0..csides {
        let a = (ring_start + u) as u32;
        let b = (ring_start + u + 1) as u32;
        mesh.position_index.extend([center_idx, a, b]);
        mesh.normal_index.extend([center_idx, a, b]);
    }
}
