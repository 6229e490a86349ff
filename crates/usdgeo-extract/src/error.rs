//! Error types for mesh extraction.

use usdgeo_scene::{Interpolation, ValueType};

/// A condition that makes a prim unusable.
///
/// Each variant renders as one human-readable diagnostic line naming the
/// prim. Optional data (normals, subdivision metadata) never produces an
/// error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExtractError {
    /// The prim has no mesh-geometry capability.
    #[error("Invalid non-mesh prim {path} of type {type_name}")]
    NotAMesh { path: String, type_name: String },

    /// Face-vertex indices are missing or not an int array.
    #[error("Failed getting face vertex indices on {path}")]
    FaceVertexIndices { path: String },

    /// Face-vertex counts are missing, malformed or disagree with the
    /// indices.
    #[error("Failed getting face counts on {path}: {reason}")]
    FaceVertexCounts { path: String, reason: String },

    /// Points could not be read at a requested frame.
    #[error("Failed getting vertices on {path} at frame {frame}")]
    Points { path: String, frame: i32 },

    /// The requested UV set is not a primvar of the prim.
    #[error("Discarding invalid uv set {uv_set} on {path}")]
    UvSetNotFound { path: String, uv_set: String },

    /// The requested UV set has an interpolation or type that cannot hold
    /// texture coordinates.
    #[error(
        "Discarding because vertex or faceVarying interpolation is not defined for the \
         {uv_set} uv set on {path} (found {interpolation} {value_type})"
    )]
    UvSetUnsupported {
        path: String,
        uv_set: String,
        interpolation: Interpolation,
        value_type: ValueType,
    },

    /// The UV set's values could not be read or its indices are out of
    /// range.
    #[error("Discarding because could not read uvs of {uv_set} on {path}: {reason}")]
    UvValues {
        path: String,
        uv_set: String,
        reason: String,
    },
}

/// Result type for extraction stages.
pub type ExtractResult<T> = Result<T, ExtractError>;
