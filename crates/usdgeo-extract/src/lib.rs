//! Extract frame-indexed polygonal mesh data from scene-description prims.
//!
//! This crate turns a mesh prim (topology, per-frame points, normals, a UV
//! set and subdivision metadata) into the flat arrays a painting host
//! consumes. All functions are pure synchronous reads through the
//! [`usdgeo_scene::Prim`] trait; the caller owns any parallelism.
//!
//! # Design principles
//!
//! - **Mandatory vs optional data**: topology, the requested UV set and the
//!   requested frames either read completely or fail the prim with one
//!   diagnostic. Normals and subdivision metadata are best effort.
//! - **Explicit time policy**: [`TimePolicy`] decides once per prim whether
//!   topology-adjacent data is read at the earliest sample or the default.
//! - **No globals**: options and path filters are plain values.
//!
//! # Key functions
//!
//! - [`MeshData::extract`]: Full extraction with a diagnostic log
//! - [`is_valid_node`]: Mesh capability and path filter gate
//! - [`discover_uv_sets`]: Count UV sets offered by a prim's primvars
//! - [`read_tex_coords`]: Resolve a UV set into flattened UVs and indices
//! - [`read_frame_vertices`]: Read and transform points at one frame
//! - [`read_subdivision`]: Creases, corners, holes and subdivision rules

mod error;
mod read;

pub mod indices;
pub mod mesh_data;
pub mod normals;
pub mod options;
pub mod path_filter;
pub mod subdiv;
pub mod texcoords;
pub mod time;
pub mod uv_sets;
pub mod vertices;

pub use error::{ExtractError, ExtractResult};
pub use indices::{face_selection_indices, read_face_vertex_counts, read_face_vertex_indices};
pub use mesh_data::MeshData;
pub use normals::{Normals, read_normals};
pub use options::{ExtractOptions, ExtractRequest};
pub use path_filter::{
    IGNORE_PATH_SUBSTR_VAR, PathFilter, REQUIRE_PATH_SUBSTR_VAR, is_valid_node, tokenize,
};
pub use subdiv::{
    FaceVaryingLinearInterpolation, InterpolateBoundary, Subdivision, SubdivisionScheme,
    read_subdivision,
};
pub use texcoords::{TexCoords, is_uv_primvar, is_uv_type, read_tex_coords};
pub use time::TimePolicy;
pub use uv_sets::{UvSets, discover_uv_sets};
pub use vertices::{frame_transform, read_frame_vertices, transform_points};
