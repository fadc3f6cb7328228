//! Shared binary-builder helpers for constructing PlantModel fixtures.

pub fn identifier(s: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for c in s.chars() {
        out.extend_from_slice(&(c as u32).to_be_bytes());
    }
    out
}

pub fn string_field(s: &str) -> Vec<u8> {
    let padded_len = ((s.len() + 3) / 4 * 4).max(4);
    let mut bytes = s.as_bytes().to_vec();
    bytes.resize(padded_len, 0);
    let mut out = (bytes.len() as u32 / 4).to_be_bytes().to_vec();
    out.extend_from_slice(&bytes);
    out
}

pub fn u32_field(v: u32) -> Vec<u8> {
    v.to_be_bytes().to_vec()
}

pub fn f32_field(v: f32) -> Vec<u8> {
    v.to_be_bytes().to_vec()
}

pub fn words(n: usize) -> Vec<u8> {
    vec![0u8; n * 4]
}

pub fn identity_matrix_bytes() -> Vec<u8> {
    let rows: [f32; 12] = [
        1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0,
    ];
    rows.iter().flat_map(|v| v.to_be_bytes()).collect()
}

/// Builds a minimal header + model wrapper around `body`, followed by the
/// model-closing `END` and the outer file-closing `END`.
pub fn wrap_document(header_version: u32, body: Vec<u8>) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend(identifier("HEAD"));
    data.extend(words(2));
    data.extend(u32_field(header_version));
    data.extend(string_field(""));
    data.extend(string_field(""));
    data.extend(string_field(""));
    data.extend(string_field(""));
    data.extend(identifier("MODL"));
    data.extend(words(2));
    data.extend(u32_field(1));
    data.extend(string_field(""));
    data.extend(string_field(""));
    data.extend(body);
    data.extend(identifier("END"));
    data.extend(identifier("END"));
    data
}

/// Builds a `CNTB <name>` group with the given millimetre translation and
/// material id, wrapping `body` and closing with `CNTE`.
pub fn group(name: &str, translation_mm: (f32, f32, f32), material: u32, body: Vec<u8>) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend(identifier("CNTB"));
    data.extend(words(2));
    data.extend(u32_field(1));
    data.extend(string_field(name));
    data.extend(f32_field(translation_mm.0));
    data.extend(f32_field(translation_mm.1));
    data.extend(f32_field(translation_mm.2));
    data.extend(u32_field(material));
    data.extend(body);
    data.extend(identifier("CNTE"));
    data.extend(words(3));
    data
}

/// Builds a `PRIM` box (kind 2) with an identity matrix.
pub fn box_primitive(lx: f32, ly: f32, lz: f32) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend(identifier("PRIM"));
    data.extend(words(2));
    data.extend(u32_field(1));
    data.extend(u32_field(2));
    data.extend(identity_matrix_bytes());
    data.extend(words(6));
    data.extend(f32_field(lx));
    data.extend(f32_field(ly));
    data.extend(f32_field(lz));
    data
}
