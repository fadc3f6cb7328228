//! Parser and tessellator configuration surfaces.

use crate::types::Vector3;

/// Controls for the container parser.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// If set, only sub-trees whose root group name matches exactly are
    /// traversed; groups outside any match are skipped entirely.
    pub object_name: Option<String>,
    /// If set, overrides every group's reported material id with this
    /// palette index.
    pub forced_color: Option<u32>,
    /// Uniform scale applied to every group translation and to the 3x3
    /// basis of every leaf matrix. Does not touch leaf translations.
    pub scale: f32,
    /// Skip opening and scanning the `.att` side-car file even if present.
    pub ignore_attributes: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            object_name: None,
            forced_color: None,
            scale: 1.0,
            ignore_attributes: false,
        }
    }
}

/// Controls for the primitive-to-mesh tessellator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TessellationOptions {
    /// Target world-space length of a side/segment. Smaller values produce
    /// finer meshes; segment counts are rounded up, never truncated, so the
    /// rendered side is never longer than this.
    pub max_side_size: f32,
    /// Floor on the number of segments around any revolved axis.
    pub min_sides: u32,
}

impl Default for TessellationOptions {
    fn default() -> Self {
        TessellationOptions {
            max_side_size: 1.0,
            min_sides: 8,
        }
    }
}

impl TessellationOptions {
    /// Number of segments for a revolve spanning `angle` radians at
    /// `radius`: `max(min_sides, ceil(angle * radius / max_side_size))`.
    pub(crate) fn side_count(&self, angle: f32, radius: f32) -> u32 {
        let raw = (angle * radius / self.max_side_size).ceil() as u32;
        raw.max(self.min_sides)
    }
}

/// Scales a group-local translation by `scale`. Leaf-matrix translations are
/// never scaled; only this per-group vector and each leaf's 3x3 basis are.
pub(crate) fn scale_translation(v: Vector3, scale: f32) -> Vector3 {
    v.scaled(scale)
}
