//! Streaming binary reader: chunk framing, the container parser, and the
//! attribute side-car reader.

mod attribute_reader;
mod chunk_reader;
mod container_reader;

pub use container_reader::PlantModelReader;
