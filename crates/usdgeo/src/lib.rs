//! Read mesh geometry from scene-description stages for a painting host.
//!
//! This crate is the host-facing entry point. It pairs the extraction core
//! in [`usdgeo_extract`] with environment-sourced configuration and a
//! reader that works over many prims.
//!
//! # Example
//!
//! ```
//! use usdgeo::{ExtractRequest, GeoReader, ReaderConfig};
//! use usdgeo::scene::{MemoryPrim, MeshAttribute, Value};
//! use usdgeo::glam::Vec3;
//!
//! let prim = MemoryPrim::mesh("/geo/tri")
//!     .with_attribute(MeshAttribute::FaceVertexIndices, Value::IntArray(vec![0, 1, 2]))
//!     .with_attribute(MeshAttribute::FaceVertexCounts, Value::IntArray(vec![3]))
//!     .with_attribute(
//!         MeshAttribute::Points,
//!         Value::Vec3fArray(vec![Vec3::ZERO, Vec3::X, Vec3::Y]),
//!     );
//!
//! let reader = GeoReader::new(ReaderConfig::default());
//! let mut log = Vec::new();
//! let mesh = reader.read_mesh(&prim, &prim, &ExtractRequest::new(vec![1]), &mut log);
//! assert!(mesh.is_valid());
//! assert!(log.is_empty());
//! ```

mod config;
mod reader;

pub use config::{READ_FLOAT2_AS_UV_VAR, ReaderConfig};
pub use reader::GeoReader;

pub use usdgeo_extract::{
    ExtractError, ExtractOptions, ExtractRequest, ExtractResult, MeshData, PathFilter,
    Subdivision, UvSets,
};

pub use glam;
pub use usdgeo_extract as extract;
pub use usdgeo_scene as scene;
