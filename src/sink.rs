//! The event sink contract: the interface the container parser writes to.
//!
//! No implementation ships in this crate — consumers that want a document
//! tree, a mesh cache, or a streaming writer to some external format
//! implement `EventSink` themselves. All methods have no-op default bodies
//! so an implementor only overrides what it cares about.

use crate::palette::Rgba;
use crate::primitive::Patch;
use crate::types::{Matrix3x4, Vector3};

/// Visitor invoked by the container parser in strict depth-first order
/// matching the binary layout.
pub trait EventSink {
    /// Start of the overall parse.
    fn start_document(&mut self) {}
    /// End of the overall parse.
    fn end_document(&mut self) {}

    /// Start of the `HEAD` chunk.
    fn start_header(
        &mut self,
        _banner: &str,
        _file_note: &str,
        _date: &str,
        _user: &str,
        _encoding: &str,
    ) {
    }
    /// End of the `HEAD` chunk.
    fn end_header(&mut self) {}

    /// Start of the `MODL` chunk.
    fn start_model(&mut self, _project_name: &str, _name: &str) {}
    /// End of the `MODL` chunk.
    fn end_model(&mut self) {}

    /// Start of a `CNTB` group. `translation` is already in metres.
    fn start_group(&mut self, _name: &str, _translation: Vector3, _material_id: u32) {}
    /// End of the matching `CNTE`.
    fn end_group(&mut self) {}

    /// Start of an attribute block for the current group, if present.
    fn start_metadata(&mut self) {}
    /// End of the attribute block.
    fn end_metadata(&mut self) {}
    /// A single `key:=value` attribute pair.
    fn start_metadata_pair(&mut self, _key: &str, _value: &str) {}
    /// End of one attribute pair.
    fn end_metadata_pair(&mut self) {}

    fn create_pyramid(
        &mut self,
        _matrix: Matrix3x4,
        _xbottom: f32,
        _ybottom: f32,
        _xtop: f32,
        _ytop: f32,
        _xoffset: f32,
        _yoffset: f32,
        _height: f32,
    ) {
    }
    fn create_box(&mut self, _matrix: Matrix3x4, _lx: f32, _ly: f32, _lz: f32) {}
    fn create_rectangular_torus(
        &mut self,
        _matrix: Matrix3x4,
        _rinside: f32,
        _routside: f32,
        _height: f32,
        _angle: f32,
    ) {
    }
    fn create_circular_torus(
        &mut self,
        _matrix: Matrix3x4,
        _rinside: f32,
        _routside: f32,
        _angle: f32,
    ) {
    }
    fn create_elliptical_dish(&mut self, _matrix: Matrix3x4, _diameter: f32, _radius: f32) {}
    fn create_spherical_dish(&mut self, _matrix: Matrix3x4, _diameter: f32, _height: f32) {}
    #[allow(clippy::too_many_arguments)]
    fn create_snout(
        &mut self,
        _matrix: Matrix3x4,
        _dbottom: f32,
        _dtop: f32,
        _height: f32,
        _xoffset: f32,
        _yoffset: f32,
        _offset_normals: [f32; 4],
    ) {
    }
    fn create_cylinder(&mut self, _matrix: Matrix3x4, _radius: f32, _height: f32) {}
    fn create_sphere(&mut self, _matrix: Matrix3x4, _diameter: f32) {}

    /// Start of a `Line` leaf (a degenerate 1-D segment along local x).
    fn start_line(&mut self, _matrix: Matrix3x4, _startx: f32, _endx: f32) {}
    fn end_line(&mut self) {}

    /// Start of a facet group leaf.
    fn start_facet_group(&mut self, _matrix: Matrix3x4, _patches: &[Patch]) {}
    fn end_facet_group(&mut self) {}

    /// A `COLR` chunk updating the shared palette.
    fn update_color_palette(&mut self, _index: u32, _color: Rgba) {}
}
