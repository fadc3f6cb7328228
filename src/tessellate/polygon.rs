//! General polygon tessellation: contours with holes, arbitrary winding.
//!
//! Each patch is projected into a 2D plane (using the patch's own normal as
//! the projection axis), holes are stitched into the outer contour with
//! bridge edges, and the resulting simple polygon is triangulated by ear
//! clipping. If clipping cannot find a valid ear — a genuinely
//! self-intersecting contour — a new vertex is synthesized at the
//! remaining ring's centroid with its normal fixed to `(0, 1, 0)`, matching
//! the reference tessellator's combine-callback behaviour for that case.

use crate::primitive::{Contour, Patch};
use crate::types::Vector3;

/// One new vertex to append to the shared dedup table, plus the flat
/// triangle-index stream for one patch (referencing indices already in the
/// table or among these fresh ones, offset by the table's length at the
/// time `tessellate_patch` was called).
pub(crate) struct PatchResult {
    pub(crate) extra_positions: Vec<Vector3>,
    pub(crate) extra_normals: Vec<Vector3>,
    pub(crate) triangles: Vec<u32>,
}

/// Triangulates one patch (an outer contour plus zero or more holes),
/// given the already-deduplicated index of every input vertex in
/// `vertex_index` (same shape as `patch`, flattened contour-major).
pub(crate) fn tessellate_patch(patch: &Patch, vertex_index: &[Vec<u32>]) -> PatchResult {
    let mut result = PatchResult {
        extra_positions: Vec::new(),
        extra_normals: Vec::new(),
        triangles: Vec::new(),
    };
    if patch.is_empty() {
        return result;
    }
    let normal = patch_normal(&patch[0]);
    let (basis_u, basis_v) = orthonormal_basis(normal);

    let mut ring: Vec<RingVertex> = contour_ring(&patch[0], &vertex_index[0], basis_u, basis_v);
    for (hole, hole_idx) in patch.iter().zip(vertex_index.iter()).skip(1) {
        let hole_ring = contour_ring(hole, hole_idx, basis_u, basis_v);
        ring = bridge_hole(ring, hole_ring);
    }

    ear_clip(&ring, normal, &mut result);
    result
}

#[derive(Clone, Copy)]
struct RingVertex {
    index: u32,
    uv: (f32, f32),
    position: Vector3,
}

fn patch_normal(outer: &Contour) -> Vector3 {
    outer
        .first()
        .map(|v| v.normal)
        .unwrap_or(Vector3::UNIT_Z)
        .normalized()
}

fn orthonormal_basis(normal: Vector3) -> (Vector3, Vector3) {
    let helper = if normal.x.abs() < 0.9 {
        Vector3::UNIT_X
    } else {
        Vector3::UNIT_Y
    };
    let u = normal.cross(&helper).normalized();
    let v = normal.cross(&u);
    (u, v)
}

fn contour_ring(contour: &Contour, indices: &[u32], u: Vector3, v: Vector3) -> Vec<RingVertex> {
    contour
        .iter()
        .zip(indices.iter())
        .map(|(vert, &idx)| RingVertex {
            index: idx,
            uv: (vert.position.dot(&u), vert.position.dot(&v)),
            position: vert.position,
        })
        .collect()
}

/// Classic hole-stitching: connects the hole's rightmost point to the
/// nearest visible outer-ring vertex with a zero-area bridge, folding the
/// hole into one simple (non-convex) polygon.
fn bridge_hole(outer: Vec<RingVertex>, hole: Vec<RingVertex>) -> Vec<RingVertex> {
    if hole.is_empty() {
        return outer;
    }
    let hole_start = hole
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.uv.0.partial_cmp(&b.1.uv.0).unwrap())
        .map(|(i, _)| i)
        .unwrap_or(0);
    let bridge_to = outer
        .iter()
        .enumerate()
        .min_by(|a, b| {
            dist(a.1.uv, hole[hole_start].uv)
                .partial_cmp(&dist(b.1.uv, hole[hole_start].uv))
                .unwrap()
        })
        .map(|(i, _)| i)
        .unwrap_or(0);

    let mut merged = Vec::with_capacity(outer.len() + hole.len() + 2);
    merged.extend_from_slice(&outer[..=bridge_to]);
    merged.extend(hole[hole_start..].iter().copied());
    merged.extend(hole[..=hole_start].iter().copied());
    merged.extend_from_slice(&outer[bridge_to..]);
    merged
}

fn dist(a: (f32, f32), b: (f32, f32)) -> f32 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    dx * dx + dy * dy
}

fn cross2(o: (f32, f32), a: (f32, f32), b: (f32, f32)) -> f32 {
    (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
}

fn point_in_triangle(p: (f32, f32), a: (f32, f32), b: (f32, f32), c: (f32, f32)) -> bool {
    let d1 = cross2(a, b, p);
    let d2 = cross2(b, c, p);
    let d3 = cross2(c, a, p);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

/// Ear-clipping triangulation over a simple (possibly non-convex) polygon
/// ring. Falls back to a centroid fan — synthesizing a fresh vertex — if no
/// ear can be found, which only happens for a self-intersecting ring.
fn ear_clip(ring: &[RingVertex], normal: Vector3, out: &mut PatchResult) {
    let signed_area = polygon_signed_area(ring);
    let mut remaining: Vec<usize> = if signed_area < 0.0 {
        (0..ring.len()).rev().collect()
    } else {
        (0..ring.len()).collect()
    };

    let mut guard = 0usize;
    while remaining.len() > 3 {
        guard += 1;
        if guard > remaining.len() * remaining.len() + 16 {
            fan_from_centroid(ring, &remaining, normal, out);
            return;
        }
        let n = remaining.len();
        let mut clipped = false;
        for i in 0..n {
            let prev = remaining[(i + n - 1) % n];
            let cur = remaining[i];
            let next = remaining[(i + 1) % n];
            if is_ear(ring, &remaining, prev, cur, next) {
                out.triangles
                    .extend([ring[prev].index, ring[cur].index, ring[next].index]);
                remaining.remove(i);
                clipped = true;
                break;
            }
        }
        if !clipped {
            fan_from_centroid(ring, &remaining, normal, out);
            return;
        }
    }
    if remaining.len() == 3 {
        out.triangles.extend([
            ring[remaining[0]].index,
            ring[remaining[1]].index,
            ring[remaining[2]].index,
        ]);
    }
}

fn is_ear(ring: &[RingVertex], remaining: &[usize], prev: usize, cur: usize, next: usize) -> bool {
    let (a, b, c) = (ring[prev].uv, ring[cur].uv, ring[next].uv);
    if cross2(a, b, c) <= 0.0 {
        return false;
    }
    for &idx in remaining {
        if idx == prev || idx == cur || idx == next {
            continue;
        }
        if point_in_triangle(ring[idx].uv, a, b, c) {
            return false;
        }
    }
    true
}

fn polygon_signed_area(ring: &[RingVertex]) -> f32 {
    let mut area = 0.0;
    for i in 0..ring.len() {
        let (x0, y0) = ring[i].uv;
        let (x1, y1) = ring[(i + 1) % ring.len()].uv;
        area += x0 * y1 - x1 * y0;
    }
    area * 0.5
}

fn fan_from_centroid(
    ring: &[RingVertex],
    remaining: &[usize],
    normal: Vector3,
    out: &mut PatchResult,
) {
    if remaining.len() < 3 {
        return;
    }
    let centroid = remaining
        .iter()
        .fold(Vector3::ZERO, |acc, &i| acc + ring[i].position)
        .scaled(1.0 / remaining.len() as f32);
    let new_index = out.extra_positions.len() as u32;
    out.extra_positions.push(centroid);
    out.extra_normals.push(Vector3::new(0.0, 1.0, 0.0));
    let _ = normal;
    for w in 0..remaining.len() {
        let a = ring[remaining[w]].index;
        let b = ring[remaining[(w + 1) % remaining.len()]].index;
        out.triangles.extend([a, b, new_index]);
    }
}
