//! The container parser: a pushdown automaton over chunk identifiers that
//! drives an [`EventSink`].

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::debug;

use crate::config::ParseOptions;
use crate::error::{PlantModelError, Result};
use crate::primitive::{FacetVertex, Patch};
use crate::reader::attribute_reader::AttributeReader;
use crate::reader::chunk_reader::ChunkReader;
use crate::sink::EventSink;
use crate::types::Vector3;

/// Translations in the stream are millimetres; the public API is metres.
const MM_TO_M: f32 = 0.001;

/// Streaming parser for one PlantModel binary file or buffer.
///
/// Owns the group stack, the current attribute-reader cursor, and the last
/// error encountered. Lives for exactly one `read_file`/`read_buffer` call.
pub struct PlantModelReader<R> {
    chunk: ChunkReader<R>,
    opts: ParseOptions,
    attributes: Option<AttributeReader<File>>,
    object_found: u32,
    group_active: Vec<bool>,
    last_error: Option<PlantModelError>,
}

impl<R: Read> PlantModelReader<R> {
    /// Wraps an already-open stream. Attribute side-car lookup is only
    /// available via [`PlantModelReader::read_file`], since it needs a path.
    pub fn new(inner: R, opts: ParseOptions) -> Self {
        // Top-level primitives (declared directly in the model body, outside
        // any group) are never covered by a CNTB/CNTE pair, so the filter
        // counter needs a head start of 1 when no filter narrows them out.
        let object_found = if opts.object_name.is_none() { 1 } else { 0 };
        PlantModelReader {
            chunk: ChunkReader::new(inner),
            opts,
            attributes: None,
            object_found,
            group_active: Vec::new(),
            last_error: None,
        }
    }

    /// The error recorded by the most recent failed parse, if any.
    pub fn last_error(&self) -> Option<&PlantModelError> {
        self.last_error.as_ref()
    }

    /// Parses the whole stream, emitting events to `sink`.
    pub fn parse(&mut self, sink: &mut dyn EventSink) -> Result<()> {
        match self.parse_inner(sink) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.last_error = Some(clone_error(&e));
                Err(e)
            }
        }
    }

    fn parse_inner(&mut self, sink: &mut dyn EventSink) -> Result<()> {
        sink.start_document();
        self.expect_identifier("HEAD", &["HEAD"])?;
        self.read_header(sink)?;
        self.expect_identifier("MODL", &["MODL"])?;
        self.read_model(sink)?;
        self.expect_identifier("END", &["END"])?;
        sink.end_document();
        Ok(())
    }

    fn expect_identifier(&mut self, wanted: &str, expected: &[&str]) -> Result<()> {
        let id = if self.chunk.offset() == 0 {
            self.chunk.resync()?
        } else {
            self.chunk.read_identifier()?
        };
        if id != wanted {
            return Err(PlantModelError::UnexpectedIdentifier {
                expected: expected.iter().map(|s| s.to_string()).collect(),
                found: id,
            });
        }
        Ok(())
    }

    fn read_header(&mut self, sink: &mut dyn EventSink) -> Result<()> {
        self.chunk.skip_words(2)?;
        let version = self.chunk.read_u32()?;
        let banner = self.chunk.read_string()?;
        let file_note = self.chunk.read_string()?;
        let date = self.chunk.read_string()?;
        let user = self.chunk.read_string()?;
        let encoding = if version >= 2 {
            let raw = self.chunk.read_string()?;
            if raw.eq_ignore_ascii_case("Unicode UTF-8") {
                "UTF-8".to_string()
            } else {
                raw
            }
        } else {
            "UTF-8".to_string()
        };
        self.chunk.set_encoding(&encoding);
        sink.start_header(&banner, &file_note, &date, &user, &encoding);
        sink.end_header();
        Ok(())
    }

    fn read_model(&mut self, sink: &mut dyn EventSink) -> Result<()> {
        self.chunk.skip_words(2)?;
        let _version = self.chunk.read_u32()?;
        let project_name = self.chunk.read_string()?;
        let name = self.chunk.read_string()?;
        sink.start_model(&project_name, &name);
        self.read_model_body(sink)?;
        sink.end_model();
        Ok(())
    }

    /// Reads the `(group | primitive | color)* END` sequence at model scope.
    /// A `CNTE` here has no matching `CNTB` and is rejected.
    fn read_model_body(&mut self, sink: &mut dyn EventSink) -> Result<()> {
        loop {
            let id = self.chunk.read_identifier()?;
            match id.as_str() {
                "CNTB" => self.read_group(sink)?,
                "PRIM" => self.read_primitive(sink)?,
                "COLR" => self.read_color(sink)?,
                "END" => return Ok(()),
                other => {
                    return Err(PlantModelError::UnexpectedIdentifier {
                        expected: vec!["CNTB".into(), "PRIM".into(), "COLR".into(), "END".into()],
                        found: other.to_string(),
                    })
                }
            }
        }
    }

    /// Reads the same `(group | primitive | color)*` sequence inside a
    /// group, terminated by `CNTE` rather than `END`.
    fn read_group_body(&mut self, sink: &mut dyn EventSink) -> Result<()> {
        loop {
            let id = self.chunk.read_identifier()?;
            match id.as_str() {
                "CNTB" => self.read_group(sink)?,
                "PRIM" => self.read_primitive(sink)?,
                "COLR" => self.read_color(sink)?,
                "CNTE" => {
                    self.chunk.skip_words(3)?;
                    return Ok(());
                }
                other => {
                    return Err(PlantModelError::UnexpectedIdentifier {
                        expected: vec!["CNTB".into(), "PRIM".into(), "COLR".into(), "CNTE".into()],
                        found: other.to_string(),
                    })
                }
            }
        }
    }

    fn read_group(&mut self, sink: &mut dyn EventSink) -> Result<()> {
        self.chunk.skip_words(2)?;
        let _version = self.chunk.read_u32()?;
        let name = self.chunk.read_string()?;
        let translation_mm = self.chunk.read_vec3()?;
        let material_id = self.chunk.read_u32()?;

        let active = self.object_found > 0 || self.matches_filter(&name);
        if active {
            self.object_found += 1;
        }
        self.group_active.push(active);

        let translation = translation_mm.scaled(MM_TO_M * self.opts.scale);
        let reported_material = self.opts.forced_color.unwrap_or(material_id);

        if active {
            sink.start_group(&name, translation, reported_material);
        }

        if let Some(pairs) = self
            .attributes
            .as_mut()
            .and_then(|attr| attr.block_for(&name))
        {
            if active && !pairs.is_empty() {
                sink.start_metadata();
                for pair in &pairs {
                    sink.start_metadata_pair(&pair.key, &pair.value);
                    sink.end_metadata_pair();
                }
                sink.end_metadata();
            }
        }

        self.read_group_body(sink)?;

        if self.group_active.pop().unwrap_or(false) {
            self.object_found -= 1;
        }
        if active {
            sink.end_group();
        }
        Ok(())
    }

    fn matches_filter(&self, name: &str) -> bool {
        match &self.opts.object_name {
            None => true,
            Some(filter) => filter == name,
        }
    }

    fn is_emitting(&self) -> bool {
        self.object_found > 0
    }

    fn read_color(&mut self, sink: &mut dyn EventSink) -> Result<()> {
        self.chunk.skip_words(2)?;
        let _version = self.chunk.read_u32()?;
        let index = self.chunk.read_u32()?;
        let [r, g, b, a] = self.chunk.read_rgba()?;
        sink.update_color_palette(index, crate::palette::Rgba { r, g, b, a });
        Ok(())
    }

    fn read_primitive(&mut self, sink: &mut dyn EventSink) -> Result<()> {
        self.chunk.skip_words(2)?;
        let _version = self.chunk.read_u32()?;
        let kind = self.chunk.read_u32()?;
        let mut matrix = self.chunk.read_matrix()?;
        self.chunk.skip_words(6)?;
        matrix.scale_basis(self.opts.scale);

        let emit = self.is_emitting();
        match kind {
            1 => {
                let v: Vec<f32> = self.read_floats(7)?;
                if emit {
                    sink.create_pyramid(matrix, v[0], v[1], v[2], v[3], v[4], v[5], v[6]);
                }
            }
            2 => {
                let v = self.read_floats(3)?;
                if emit {
                    sink.create_box(matrix, v[0], v[1], v[2]);
                }
            }
            3 => {
                let v = self.read_floats(4)?;
                if emit {
                    sink.create_rectangular_torus(matrix, v[0], v[1], v[2], v[3]);
                }
            }
            4 => {
                let v = self.read_floats(3)?;
                if emit {
                    sink.create_circular_torus(matrix, v[0], v[1], v[2]);
                }
            }
            5 => {
                let v = self.read_floats(2)?;
                if emit {
                    sink.create_elliptical_dish(matrix, v[0], v[1]);
                }
            }
            6 => {
                let v = self.read_floats(2)?;
                if emit {
                    sink.create_spherical_dish(matrix, v[0], v[1]);
                }
            }
            7 => {
                let v = self.read_floats(9)?;
                if emit {
                    sink.create_snout(
                        matrix,
                        v[0],
                        v[1],
                        v[2],
                        v[3],
                        v[4],
                        [v[5], v[6], v[7], v[8]],
                    );
                }
            }
            8 => {
                let v = self.read_floats(2)?;
                if emit {
                    sink.create_cylinder(matrix, v[0], v[1]);
                }
            }
            9 => {
                let v = self.read_floats(1)?;
                if emit {
                    sink.create_sphere(matrix, v[0]);
                }
            }
            10 => {
                let v = self.read_floats(2)?;
                if emit {
                    sink.start_line(matrix, v[0], v[1]);
                    sink.end_line();
                }
            }
            11 => {
                let patches = self.read_facet_group()?;
                if emit {
                    sink.start_facet_group(matrix, &patches);
                    sink.end_facet_group();
                }
            }
            other => return Err(PlantModelError::UnknownPrimitiveKind(other)),
        }
        Ok(())
    }

    fn read_floats(&mut self, n: usize) -> Result<Vec<f32>> {
        (0..n).map(|_| self.chunk.read_f32()).collect()
    }

    fn read_facet_group(&mut self) -> Result<Vec<Patch>> {
        let npatches = self.chunk.read_u32()?;
        let mut patches = Vec::with_capacity(npatches as usize);
        for _ in 0..npatches {
            let ncontours = self.chunk.read_u32()?;
            let mut contours = Vec::with_capacity(ncontours as usize);
            for _ in 0..ncontours {
                let nverts = self.chunk.read_u32()?;
                let mut contour = Vec::with_capacity(nverts as usize);
                for _ in 0..nverts {
                    let position = self.chunk.read_vec3()?;
                    let normal = self.chunk.read_vec3()?;
                    contour.push(FacetVertex { position, normal });
                }
                contours.push(contour);
            }
            patches.push(contours);
        }
        Ok(patches)
    }
}

impl PlantModelReader<BufReader<File>> {
    /// Opens `path`, and if attributes aren't disabled, its `.att` side-car.
    pub fn read_file(path: &Path, opts: ParseOptions, sink: &mut dyn EventSink) -> Result<()> {
        let file = File::open(path)?;
        let mut reader = PlantModelReader::new(BufReader::new(file), opts.clone());
        if !opts.ignore_attributes {
            reader.attributes = AttributeReader::open_sidecar(path);
            if reader.attributes.is_none() {
                debug!(path = %path.display(), "no attribute side-car found");
            }
        }
        reader.parse(sink)
    }

    /// Opens and aggregates several files under one synthetic document and
    /// model, each as a top-level group named after its file stem.
    pub fn read_files(paths: &[&Path], name: &str, opts: ParseOptions, sink: &mut dyn EventSink) -> Result<()> {
        sink.start_document();
        sink.start_header("", "", "", "", "UTF-8");
        sink.end_header();
        sink.start_model("", name);
        for path in paths {
            let group_name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("group")
                .to_string();
            sink.start_group(&group_name, Vector3::ZERO, 0);
            let file = File::open(path)?;
            let mut sub = PlantModelReader::new(BufReader::new(file), opts.clone());
            if !opts.ignore_attributes {
                sub.attributes = AttributeReader::open_sidecar(path);
            }
            // Each member file is itself a full document; only the inner
            // model's children are relevant here, so the outer HEAD/MODL/END
            // bracketing of the sub-parse is consumed but not re-emitted.
            sub.parse(&mut InnerSink(sink))?;
            sink.end_group();
        }
        sink.end_model();
        sink.end_document();
        Ok(())
    }
}

/// Forwards only group/primitive/metadata/palette events from a nested
/// single-file parse, discarding its own document/header/model bracketing
/// since the aggregate already emitted one of its own.
struct InnerSink<'a>(&'a mut dyn EventSink);

impl EventSink for InnerSink<'_> {
    fn start_group(&mut self, name: &str, translation: Vector3, material_id: u32) {
        self.0.start_group(name, translation, material_id)
    }
    fn end_group(&mut self) {
        self.0.end_group()
    }
    fn start_metadata(&mut self) {
        self.0.start_metadata()
    }
    fn end_metadata(&mut self) {
        self.0.end_metadata()
    }
    fn start_metadata_pair(&mut self, key: &str, value: &str) {
        self.0.start_metadata_pair(key, value)
    }
    fn end_metadata_pair(&mut self) {
        self.0.end_metadata_pair()
    }
    fn create_pyramid(
        &mut self,
        matrix: crate::types::Matrix3x4,
        xbottom: f32,
        ybottom: f32,
        xtop: f32,
        ytop: f32,
        xoffset: f32,
        yoffset: f32,
        height: f32,
    ) {
        self.0
            .create_pyramid(matrix, xbottom, ybottom, xtop, ytop, xoffset, yoffset, height)
    }
    fn create_box(&mut self, matrix: crate::types::Matrix3x4, lx: f32, ly: f32, lz: f32) {
        self.0.create_box(matrix, lx, ly, lz)
    }
    fn create_rectangular_torus(
        &mut self,
        matrix: crate::types::Matrix3x4,
        rinside: f32,
        routside: f32,
        height: f32,
        angle: f32,
    ) {
        self.0
            .create_rectangular_torus(matrix, rinside, routside, height, angle)
    }
    fn create_circular_torus(
        &mut self,
        matrix: crate::types::Matrix3x4,
        rinside: f32,
        routside: f32,
        angle: f32,
    ) {
        self.0.create_circular_torus(matrix, rinside, routside, angle)
    }
    fn create_elliptical_dish(&mut self, matrix: crate::types::Matrix3x4, diameter: f32, radius: f32) {
        self.0.create_elliptical_dish(matrix, diameter, radius)
    }
    fn create_spherical_dish(&mut self, matrix: crate::types::Matrix3x4, diameter: f32, height: f32) {
        self.0.create_spherical_dish(matrix, diameter, height)
    }
    fn create_snout(
        &mut self,
        matrix: crate::types::Matrix3x4,
        dbottom: f32,
        dtop: f32,
        height: f32,
        xoffset: f32,
        yoffset: f32,
        offset_normals: [f32; 4],
    ) {
        self.0
            .create_snout(matrix, dbottom, dtop, height, xoffset, yoffset, offset_normals)
    }
    fn create_cylinder(&mut self, matrix: crate::types::Matrix3x4, radius: f32, height: f32) {
        self.0.create_cylinder(matrix, radius, height)
    }
    fn create_sphere(&mut self, matrix: crate::types::Matrix3x4, diameter: f32) {
        self.0.create_sphere(matrix, diameter)
    }
    fn start_line(&mut self, matrix: crate::types::Matrix3x4, startx: f32, endx: f32) {
        self.0.start_line(matrix, startx, endx)
    }
    fn end_line(&mut self) {
        self.0.end_line()
    }
    fn start_facet_group(&mut self, matrix: crate::types::Matrix3x4, patches: &[Patch]) {
        self.0.start_facet_group(matrix, patches)
    }
    fn end_facet_group(&mut self) {
        self.0.end_facet_group()
    }
    fn update_color_palette(&mut self, index: u32, color: crate::palette::Rgba) {
        self.0.update_color_palette(index, color)
    }
}

/// `PlantModelError` doesn't derive `Clone` (its `io::Error` variant can't),
/// so `last_error()` stores a reconstructed equivalent instead of the
/// original value, matching `last_error`'s advisory (not re-throwable) role.
fn clone_error(e: &PlantModelError) -> PlantModelError {
    match e {
        PlantModelError::MissingHeader => PlantModelError::MissingHeader,
        PlantModelError::BadIdentifier { offset } => {
            PlantModelError::BadIdentifier { offset: *offset }
        }
        PlantModelError::UnexpectedIdentifier { expected, found } => {
            PlantModelError::UnexpectedIdentifier {
                expected: expected.clone(),
                found: found.clone(),
            }
        }
        PlantModelError::UnknownPrimitiveKind(k) => PlantModelError::UnknownPrimitiveKind(*k),
        PlantModelError::Truncated { expected, actual } => PlantModelError::Truncated {
            expected: *expected,
            actual: *actual,
        },
        PlantModelError::Io(io_err) => {
            PlantModelError::Io(std::io::Error::new(io_err.kind(), io_err.to_string()))
        }
        PlantModelError::Encoding(s) => PlantModelError::Encoding(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn word_str(s: &str) -> Vec<u8> {
        let mut out = Vec::new();
        for c in s.chars() {
            out.extend_from_slice(&(c as u32).to_be_bytes());
        }
        out
    }

    fn len_string(s: &str) -> Vec<u8> {
        let padded_len = (s.len() + 3) / 4 * 4;
        let mut bytes = s.as_bytes().to_vec();
        bytes.resize(padded_len.max(4), 0);
        let mut out = (bytes.len() as u32 / 4).to_be_bytes().to_vec();
        out.extend_from_slice(&bytes);
        out
    }

    fn minimal_file() -> Vec<u8> {
        let mut data = Vec::new();
        data.extend(word_str("HEAD"));
        data.extend([0u8; 8]); // 2 skipped words
        data.extend(1u32.to_be_bytes()); // version 1, no encoding string
        data.extend(len_string("banner"));
        data.extend(len_string("note"));
        data.extend(len_string("date"));
        data.extend(len_string("user"));
        data.extend(word_str("MODL"));
        data.extend([0u8; 8]);
        data.extend(1u32.to_be_bytes());
        data.extend(len_string("proj"));
        data.extend(len_string("model"));
        data.extend(word_str("END"));
        data.extend(word_str("END"));
        data
    }

    #[derive(Default)]
    struct CountingSink {
        groups: u32,
        header_seen: bool,
    }

    impl EventSink for CountingSink {
        fn start_header(&mut self, _: &str, _: &str, _: &str, _: &str, _: &str) {
            self.header_seen = true;
        }
        fn start_group(&mut self, _: &str, _: Vector3, _: u32) {
            self.groups += 1;
        }
    }

    #[test]
    fn test_minimal_document_parses() {
        let data = minimal_file();
        let mut reader = PlantModelReader::new(Cursor::new(data), ParseOptions::default());
        let mut sink = CountingSink::default();
        reader.parse(&mut sink).unwrap();
        assert!(sink.header_seen);
        assert_eq!(sink.groups, 0);
    }

    #[test]
    fn test_missing_header_errors() {
        let data = word_str("XXXX");
        let mut reader = PlantModelReader::new(Cursor::new(data), ParseOptions::default());
        let mut sink = CountingSink::default();
        assert!(reader.parse(&mut sink).is_err());
        assert!(reader.last_error().is_some());
    }

    #[derive(Default)]
    struct ColorSink {
        palette_updates: Vec<(u32, crate::palette::Rgba)>,
        header_seen: bool,
    }

    impl EventSink for ColorSink {
        fn start_header(&mut self, _: &str, _: &str, _: &str, _: &str, _: &str) {
            self.header_seen = true;
        }
        fn update_color_palette(&mut self, index: u32, color: crate::palette::Rgba) {
            self.palette_updates.push((index, color));
        }
    }

    /// `COLR` stores its 4 channels as 4 raw bytes (one word total), not
    /// 4 big-endian `u32`s. A wrong width here desyncs every chunk after it.
    #[test]
    fn test_color_chunk_is_four_raw_bytes_and_stream_stays_in_sync() {
        let mut data = Vec::new();
        data.extend(word_str("HEAD"));
        data.extend([0u8; 8]);
        data.extend(1u32.to_be_bytes());
        data.extend(len_string("banner"));
        data.extend(len_string("note"));
        data.extend(len_string("date"));
        data.extend(len_string("user"));
        data.extend(word_str("MODL"));
        data.extend([0u8; 8]);
        data.extend(1u32.to_be_bytes());
        data.extend(len_string("proj"));
        data.extend(len_string("model"));
        data.extend(word_str("COLR"));
        data.extend([0u8; 8]); // 2 skipped words
        data.extend(1u32.to_be_bytes()); // version
        data.extend(7u32.to_be_bytes()); // palette index
        data.extend([0x11, 0x22, 0x33, 0x44]); // r, g, b, a: one word, not four
        data.extend(word_str("END")); // model end
        data.extend(word_str("END")); // document end

        let mut reader = PlantModelReader::new(Cursor::new(data), ParseOptions::default());
        let mut sink = ColorSink::default();
        reader.parse(&mut sink).unwrap();

        assert!(sink.header_seen);
        assert_eq!(
            sink.palette_updates,
            vec![(
                7,
                crate::palette::Rgba {
                    r: 0x11,
                    g: 0x22,
                    b: 0x33,
                    a: 0x44
                }
            )]
        );
    }

    #[test]
    fn test_stray_cnte_at_model_scope_is_rejected() {
        let mut data = Vec::new();
        data.extend(word_str("HEAD"));
        data.extend([0u8; 8]);
        data.extend(1u32.to_be_bytes());
        data.extend(len_string("banner"));
        data.extend(len_string("note"));
        data.extend(len_string("date"));
        data.extend(len_string("user"));
        data.extend(word_str("MODL"));
        data.extend([0u8; 8]);
        data.extend(1u32.to_be_bytes());
        data.extend(len_string("proj"));
        data.extend(len_string("model"));
        data.extend(word_str("CNTE"));
        data.extend([0u8; 12]);

        let mut reader = PlantModelReader::new(Cursor::new(data), ParseOptions::default());
        let mut sink = CountingSink::default();
        assert!(matches!(
            reader.parse(&mut sink),
            Err(PlantModelError::UnexpectedIdentifier { .. })
        ));
    }
}
