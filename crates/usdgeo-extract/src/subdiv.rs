//! Subdivision-surface metadata.

use usdgeo_scene::{MeshAttribute, Prim, TimeCode};

use crate::read;

/// Subdivision scheme of a subdivision surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubdivisionScheme {
    CatmullClark,
    Loop,
    Bilinear,
}

impl SubdivisionScheme {
    /// Parse a scheme token. `none` and unknown tokens yield `None`.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "catmullClark" => Some(Self::CatmullClark),
            "loop" => Some(Self::Loop),
            "bilinear" => Some(Self::Bilinear),
            _ => None,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::CatmullClark => "catmullClark",
            Self::Loop => "loop",
            Self::Bilinear => "bilinear",
        }
    }
}

/// Boundary interpolation rule, with the host's integer codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolateBoundary {
    #[default]
    None = 0,
    EdgeAndCorner = 1,
    EdgeOnly = 2,
}

impl InterpolateBoundary {
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "none" => Some(Self::None),
            "edgeAndCorner" => Some(Self::EdgeAndCorner),
            "edgeOnly" => Some(Self::EdgeOnly),
            _ => None,
        }
    }

    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Face-varying linear interpolation rule, with the host's integer codes.
///
/// `cornersPlus1` and `cornersPlus2` share [`Self::CornersPlus`]; they
/// differ in whether corners are propagated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FaceVaryingLinearInterpolation {
    #[default]
    All = 0,
    CornersPlus = 1,
    None = 2,
    Boundaries = 3,
}

impl FaceVaryingLinearInterpolation {
    /// Parse a token into the rule and its corner propagation flag.
    #[must_use]
    pub fn from_token(token: &str) -> Option<(Self, bool)> {
        match token {
            "all" => Some((Self::All, false)),
            "cornersPlus1" => Some((Self::CornersPlus, false)),
            "cornersPlus2" => Some((Self::CornersPlus, true)),
            "none" => Some((Self::None, false)),
            "boundaries" => Some((Self::Boundaries, false)),
            _ => None,
        }
    }

    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Creases, corners, holes and subdivision rules of a mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Subdivision {
    pub crease_indices: Vec<i32>,
    pub crease_lengths: Vec<i32>,
    pub crease_sharpness: Vec<f32>,
    pub corner_indices: Vec<i32>,
    pub corner_sharpness: Vec<f32>,
    pub hole_indices: Vec<i32>,
    pub is_subdiv_mesh: bool,
    /// `None` for non-subdivision meshes and unrecognized schemes.
    pub scheme: Option<SubdivisionScheme>,
    pub interpolate_boundary: InterpolateBoundary,
    pub face_varying_linear_interpolation: FaceVaryingLinearInterpolation,
    /// Only set by `cornersPlus2`.
    pub propagate_corner: bool,
}

impl Subdivision {
    /// Host-facing scheme name, empty when unknown.
    #[must_use]
    pub fn scheme_name(&self) -> &'static str {
        self.scheme.map_or("", SubdivisionScheme::name)
    }
}

/// Read subdivision metadata. Every part is optional; missing data keeps
/// its default.
#[must_use]
pub fn read_subdivision(prim: &dyn Prim, time: TimeCode) -> Subdivision {
    let ints = |attr| read::int_array(prim, attr, time).unwrap_or_default();
    let floats = |attr| read::float_array(prim, attr, time).unwrap_or_default();

    let mut subdiv = Subdivision {
        crease_indices: ints(MeshAttribute::CreaseIndices),
        crease_lengths: ints(MeshAttribute::CreaseLengths),
        crease_sharpness: floats(MeshAttribute::CreaseSharpnesses),
        corner_indices: ints(MeshAttribute::CornerIndices),
        corner_sharpness: floats(MeshAttribute::CornerSharpnesses),
        hole_indices: ints(MeshAttribute::HoleIndices),
        ..Subdivision::default()
    };

    let Some(scheme) = read::token(prim, MeshAttribute::SubdivisionScheme, time) else {
        return subdiv;
    };
    if scheme == "none" {
        return subdiv;
    }

    subdiv.is_subdiv_mesh = true;
    subdiv.scheme = SubdivisionScheme::from_token(&scheme);
    if subdiv.scheme.is_none() {
        tracing::debug!("Unrecognized subdivision scheme '{scheme}' on {}", prim.path());
    }

    if let Some(boundary) = read::token(prim, MeshAttribute::InterpolateBoundary, time)
        .as_deref()
        .and_then(InterpolateBoundary::from_token)
    {
        subdiv.interpolate_boundary = boundary;
    }

    if let Some((rule, propagate)) =
        read::token(prim, MeshAttribute::FaceVaryingLinearInterpolation, time)
            .as_deref()
            .and_then(FaceVaryingLinearInterpolation::from_token)
    {
        subdiv.face_varying_linear_interpolation = rule;
        subdiv.propagate_corner = propagate;
    }

    subdiv
}
