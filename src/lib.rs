//! # plantmodel-rs
//!
//! A pure Rust library for streaming-parsing and tessellating PlantModel
//! plant CAD container files: the big-endian, tagged-chunk binary format
//! used to exchange tessellated plant models (pipes, vessels, steelwork)
//! between plant design tools.
//!
//! ## Features
//!
//! - Streaming, single-pass parse: events are emitted as the binary is
//!   read, never buffering the whole document
//! - Full grammar: header, model, nested groups, all 11 primitive kinds,
//!   colour palette updates
//! - Optional `.att` attribute side-car support
//! - A standalone tessellator turning parametric primitives into indexed
//!   triangle meshes, independent of the parser
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use plantmodel_rs::{EventSink, ParseOptions};
//! use plantmodel_rs::reader::PlantModelReader;
//! use std::path::Path;
//!
//! struct PrintingSink;
//! impl EventSink for PrintingSink {
//!     fn start_group(&mut self, name: &str, _t: plantmodel_rs::Vector3, _m: u32) {
//!         println!("group: {name}");
//!     }
//! }
//!
//! let mut sink = PrintingSink;
//! PlantModelReader::read_file(Path::new("plant.rvm"), ParseOptions::default(), &mut sink)?;
//! # Ok::<(), plantmodel_rs::PlantModelError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`reader::PlantModelReader`] — the chunk-level pushdown-automaton
//!   parser, driving an [`EventSink`] implementation supplied by the caller
//! - [`EventSink`] — the visitor trait the core writes to; consumers that
//!   want a document tree, a mesh cache, or a streaming re-encoder
//!   implement it themselves
//! - [`tessellate::tessellate`] — converts a [`Primitive`] into a [`Mesh`],
//!   independent of parsing
//!
//! ## Performance
//!
//! The parser never buffers the whole input; it streams through a
//! `BufReader` and emits events as it goes. Facet groups are the one
//! exception — a group's vertex data is materialised in full before
//! tessellation, bounded by its own declared vertex count.

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod mesh;
pub mod palette;
pub mod primitive;
pub mod reader;
pub mod sink;
pub mod tessellate;
pub mod types;

pub use config::{ParseOptions, TessellationOptions};
pub use error::{PlantModelError, Result};
pub use mesh::Mesh;
pub use palette::{Palette, Rgba, DEFAULT_PALETTE, PALETTE_SIZE};
pub use primitive::{Contour, FacetVertex, Patch, Primitive};
pub use reader::PlantModelReader;
pub use sink::EventSink;
pub use tessellate::{tessellate, tessellate_many};
pub use types::{Matrix3x4, Vector3};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_public_api_is_wired_up() {
        let opts = ParseOptions::default();
        assert_eq!(opts.scale, 1.0);
        let mesh = tessellate::tessellate(
            &Primitive::Box {
                lx: 1.0,
                ly: 1.0,
                lz: 1.0,
            },
            TessellationOptions::default(),
        )
        .unwrap();
        assert!(mesh.is_valid());
    }
}
