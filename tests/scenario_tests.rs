//! Concrete parser/tessellator scenarios.

mod common;

use std::io::Cursor;

use plantmodel_rs::{
    tessellate, EventSink, Matrix3x4, ParseOptions, PlantModelReader, Primitive,
    TessellationOptions, Vector3,
};

#[derive(Default)]
struct RecordingSink {
    started_document: bool,
    headers: Vec<(String, String, String, String, String)>,
    ended_header: bool,
    models: Vec<(String, String)>,
    ended_model: bool,
    ended_document: bool,
    groups: Vec<(String, Vector3, u32)>,
    ended_groups: u32,
    boxes: Vec<(Matrix3x4, f32, f32, f32)>,
}

impl EventSink for RecordingSink {
    fn start_document(&mut self) {
        self.started_document = true;
    }
    fn end_document(&mut self) {
        self.ended_document = true;
    }
    fn start_header(&mut self, banner: &str, note: &str, date: &str, user: &str, encoding: &str) {
        self.headers.push((
            banner.to_string(),
            note.to_string(),
            date.to_string(),
            user.to_string(),
            encoding.to_string(),
        ));
    }
    fn end_header(&mut self) {
        self.ended_header = true;
    }
    fn start_model(&mut self, project_name: &str, name: &str) {
        self.models.push((project_name.to_string(), name.to_string()));
    }
    fn end_model(&mut self) {
        self.ended_model = true;
    }
    fn start_group(&mut self, name: &str, translation: Vector3, material_id: u32) {
        self.groups.push((name.to_string(), translation, material_id));
    }
    fn end_group(&mut self) {
        self.ended_groups += 1;
    }
    fn create_box(&mut self, matrix: Matrix3x4, lx: f32, ly: f32, lz: f32) {
        self.boxes.push((matrix, lx, ly, lz));
    }
}

#[test]
fn scenario_a_empty_document() {
    let data = common::wrap_document(1, Vec::new());
    let mut reader = PlantModelReader::new(Cursor::new(data), ParseOptions::default());
    let mut sink = RecordingSink::default();
    reader.parse(&mut sink).unwrap();

    assert!(sink.started_document);
    assert_eq!(
        sink.headers,
        vec![(
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            "UTF-8".to_string()
        )]
    );
    assert!(sink.ended_header);
    assert_eq!(sink.models, vec![(String::new(), String::new())]);
    assert!(sink.ended_model);
    assert!(sink.ended_document);
    assert!(reader.last_error().is_none());
}

#[test]
fn scenario_b_single_box() {
    let body = common::group("B", (1000.0, 2000.0, 3000.0), 2, common::box_primitive(2.0, 4.0, 6.0));
    let data = common::wrap_document(1, body);
    let mut reader = PlantModelReader::new(Cursor::new(data), ParseOptions::default());
    let mut sink = RecordingSink::default();
    reader.parse(&mut sink).unwrap();

    assert_eq!(sink.groups.len(), 1);
    assert_eq!(sink.groups[0].0, "B");
    assert_eq!(sink.groups[0].1, Vector3::new(1.0, 2.0, 3.0));
    assert_eq!(sink.groups[0].2, 2);
    assert_eq!(sink.ended_groups, 1);
    assert_eq!(sink.boxes.len(), 1);
    assert_eq!(sink.boxes[0].1, 2.0);
    assert_eq!(sink.boxes[0].2, 4.0);
    assert_eq!(sink.boxes[0].3, 6.0);

    let mesh = tessellate(
        &Primitive::Box {
            lx: sink.boxes[0].1,
            ly: sink.boxes[0].2,
            lz: sink.boxes[0].3,
        },
        TessellationOptions::default(),
    )
    .unwrap();
    assert_eq!(mesh.positions.len(), 24);
    for p in &mesh.positions {
        assert_eq!(p.x.abs(), 1.0);
        assert_eq!(p.y.abs(), 2.0);
        assert_eq!(p.z.abs(), 3.0);
    }
}

#[test]
fn scenario_c_forced_color() {
    let body = common::group("B", (0.0, 0.0, 0.0), 2, common::box_primitive(1.0, 1.0, 1.0));
    let data = common::wrap_document(1, body);
    let opts = ParseOptions {
        forced_color: Some(42),
        ..ParseOptions::default()
    };
    let mut reader = PlantModelReader::new(Cursor::new(data), opts);
    let mut sink = RecordingSink::default();
    reader.parse(&mut sink).unwrap();

    assert_eq!(sink.groups[0].2, 42);
}

#[test]
fn scenario_d_object_filter() {
    let tree = common::group(
        "A",
        (0.0, 0.0, 0.0),
        0,
        [
            common::group("B", (0.0, 0.0, 0.0), 0, common::box_primitive(1.0, 1.0, 1.0)),
            common::group("C", (0.0, 0.0, 0.0), 0, common::box_primitive(1.0, 1.0, 1.0)),
        ]
        .concat(),
    );
    let data = common::wrap_document(1, tree);
    let opts = ParseOptions {
        object_name: Some("C".to_string()),
        ..ParseOptions::default()
    };
    let mut reader = PlantModelReader::new(Cursor::new(data), opts);
    let mut sink = RecordingSink::default();
    reader.parse(&mut sink).unwrap();

    let names: Vec<&str> = sink.groups.iter().map(|g| g.0.as_str()).collect();
    assert_eq!(names, vec!["C"]);
    assert_eq!(sink.boxes.len(), 1);
}

#[test]
fn scenario_e_cylinder_resolution() {
    let opts = TessellationOptions {
        max_side_size: 0.5,
        min_sides: 8,
    };
    let mesh = tessellate(
        &Primitive::Cylinder {
            radius: 1.0,
            height: 2.0,
        },
        opts,
    )
    .unwrap();
    // 2 * max(8, ceil(2*pi/0.5)) == 2 * 13 == 26.
    assert_eq!(mesh.positions.len(), 26);
    assert!(mesh.is_valid());
}

#[test]
fn scenario_f_spherical_dish_collapses_to_sphere() {
    let opts = TessellationOptions::default();
    let dish = tessellate(
        &Primitive::SphericalDish {
            diameter: 2.0,
            height: 5.0,
        },
        opts,
    )
    .unwrap();
    let sphere = tessellate(&Primitive::Sphere { diameter: 2.0 }, opts).unwrap();
    assert_eq!(dish, sphere);
}
