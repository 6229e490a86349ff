//! Attribute values, primvar declarations and schema attribute names.

use std::fmt;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// A resolved attribute value.
///
/// Only the value kinds the mesh schema needs are modelled. Reading an
/// attribute "as" the wrong kind yields `None`, which callers treat as a
/// failed read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    IntArray(Vec<i32>),
    FloatArray(Vec<f32>),
    Vec2fArray(Vec<Vec2>),
    Vec3fArray(Vec<Vec3>),
    Token(String),
}

impl Value {
    #[must_use]
    pub fn as_int_array(&self) -> Option<&[i32]> {
        match self {
            Self::IntArray(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_float_array(&self) -> Option<&[f32]> {
        match self {
            Self::FloatArray(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_vec2f_array(&self) -> Option<&[Vec2]> {
        match self {
            Self::Vec2fArray(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_vec3f_array(&self) -> Option<&[Vec3]> {
        match self {
            Self::Vec3fArray(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_token(&self) -> Option<&str> {
        match self {
            Self::Token(t) => Some(t),
            _ => None,
        }
    }
}

/// Attributes of the mesh schema read during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MeshAttribute {
    FaceVertexIndices,
    FaceVertexCounts,
    Points,
    Normals,
    CreaseIndices,
    CreaseLengths,
    CreaseSharpnesses,
    CornerIndices,
    CornerSharpnesses,
    HoleIndices,
    SubdivisionScheme,
    InterpolateBoundary,
    FaceVaryingLinearInterpolation,
}

impl MeshAttribute {
    pub const ALL: [Self; 13] = [
        Self::FaceVertexIndices,
        Self::FaceVertexCounts,
        Self::Points,
        Self::Normals,
        Self::CreaseIndices,
        Self::CreaseLengths,
        Self::CreaseSharpnesses,
        Self::CornerIndices,
        Self::CornerSharpnesses,
        Self::HoleIndices,
        Self::SubdivisionScheme,
        Self::InterpolateBoundary,
        Self::FaceVaryingLinearInterpolation,
    ];

    /// The schema attribute name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::FaceVertexIndices => "faceVertexIndices",
            Self::FaceVertexCounts => "faceVertexCounts",
            Self::Points => "points",
            Self::Normals => "normals",
            Self::CreaseIndices => "creaseIndices",
            Self::CreaseLengths => "creaseLengths",
            Self::CreaseSharpnesses => "creaseSharpnesses",
            Self::CornerIndices => "cornerIndices",
            Self::CornerSharpnesses => "cornerSharpnesses",
            Self::HoleIndices => "holeIndices",
            Self::SubdivisionScheme => "subdivisionScheme",
            Self::InterpolateBoundary => "interpolateBoundary",
            Self::FaceVaryingLinearInterpolation => "faceVaryingLinearInterpolation",
        }
    }
}

impl fmt::Display for MeshAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a primvar's values map onto mesh elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Interpolation {
    /// One value for the whole prim.
    Constant,
    /// One value per face.
    Uniform,
    /// One value per point, linearly interpolated.
    Varying,
    /// One value per point, interpolated by the surface's basis.
    Vertex,
    /// One value per face-corner.
    FaceVarying,
}

impl Interpolation {
    /// Whether values are laid out per point or per face-corner.
    #[must_use]
    pub fn is_vertex_or_face_varying(self) -> bool {
        matches!(self, Self::Vertex | Self::FaceVarying)
    }

    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::Constant => "constant",
            Self::Uniform => "uniform",
            Self::Varying => "varying",
            Self::Vertex => "vertex",
            Self::FaceVarying => "faceVarying",
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Declared value type of a primvar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ValueType {
    /// `texCoord2f[]`
    TexCoord2fArray,
    /// `float2[]`
    Float2Array,
    /// `float[]`
    FloatArray,
    /// `float3[]`
    Float3Array,
    /// `int[]`
    IntArray,
    /// Any other declared type, kept verbatim.
    Other(String),
}

impl ValueType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::TexCoord2fArray => "texCoord2f[]",
            Self::Float2Array => "float2[]",
            Self::FloatArray => "float[]",
            Self::Float3Array => "float3[]",
            Self::IntArray => "int[]",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ValueType {
    fn from(s: &str) -> Self {
        match s {
            "texCoord2f[]" => Self::TexCoord2fArray,
            "float2[]" => Self::Float2Array,
            "float[]" => Self::FloatArray,
            "float3[]" => Self::Float3Array,
            "int[]" => Self::IntArray,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for ValueType {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<ValueType> for String {
    fn from(t: ValueType) -> Self {
        t.as_str().to_string()
    }
}

/// Declaration info of a primvar, without its values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimvarInfo {
    /// Primvar name without the `primvars:` namespace.
    pub name: String,
    pub value_type: ValueType,
    pub interpolation: Interpolation,
    #[serde(default = "default_element_size")]
    pub element_size: usize,
}

fn default_element_size() -> usize {
    1
}

impl PrimvarInfo {
    #[must_use]
    pub fn new(name: impl Into<String>, value_type: ValueType, interpolation: Interpolation) -> Self {
        Self {
            name: name.into(),
            value_type,
            interpolation,
            element_size: 1,
        }
    }
}
