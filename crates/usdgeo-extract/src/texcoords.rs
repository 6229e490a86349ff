//! UV set resolution.

use usdgeo_scene::{Prim, PrimvarInfo, ValueType};

use crate::error::{ExtractError, ExtractResult};
use crate::options::ExtractOptions;
use crate::read;
use crate::time::TimePolicy;

/// Flattened UVs and the face-corner indices into them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TexCoords {
    /// `u, v` pairs.
    pub uvs: Vec<f32>,
    /// One entry per face-corner (or the primvar's own index array).
    pub indices: Vec<i32>,
}

/// Whether a declared type can hold texture coordinates.
#[must_use]
pub fn is_uv_type(value_type: &ValueType, options: &ExtractOptions) -> bool {
    match value_type {
        ValueType::TexCoord2fArray => true,
        ValueType::Float2Array => options.read_float2_as_uv,
        _ => false,
    }
}

/// Whether a primvar is usable as a UV set.
#[must_use]
pub fn is_uv_primvar(info: &PrimvarInfo, options: &ExtractOptions) -> bool {
    info.interpolation.is_vertex_or_face_varying() && is_uv_type(&info.value_type, options)
}

/// Resolve the UV set `uv_set` on `prim`.
///
/// An explicit index array is used verbatim. Without one the values are
/// assumed to be expanded per face-corner and identity indices of length
/// `face_vertex_count` are synthesized. Either way every index must land
/// inside the value array.
pub fn read_tex_coords(
    prim: &dyn Prim,
    uv_set: &str,
    policy: TimePolicy,
    face_vertex_count: usize,
    options: &ExtractOptions,
) -> ExtractResult<TexCoords> {
    let path = || prim.path().to_string();

    let info = prim
        .primvar(uv_set)
        .ok_or_else(|| ExtractError::UvSetNotFound {
            path: path(),
            uv_set: uv_set.to_string(),
        })?;

    if !is_uv_primvar(&info, options) {
        return Err(ExtractError::UvSetUnsupported {
            path: path(),
            uv_set: uv_set.to_string(),
            interpolation: info.interpolation,
            value_type: info.value_type,
        });
    }

    let time = policy.topology();
    let values = read::primvar_vec2f_array(prim, uv_set, time).ok_or_else(|| {
        ExtractError::UvValues {
            path: path(),
            uv_set: uv_set.to_string(),
            reason: format!("no {} values at {time} time", info.value_type),
        }
    })?;

    let indices = if let Some(indices) = prim.primvar_indices(uv_set, time) {
        if let Some(bad) = indices
            .iter()
            .find(|&&i| usize::try_from(i).ok().is_none_or(|i| i >= values.len()))
        {
            return Err(ExtractError::UvValues {
                path: path(),
                uv_set: uv_set.to_string(),
                reason: format!("index {bad} out of range for {} uvs", values.len()),
            });
        }
        indices
    } else {
        if values.len() < face_vertex_count {
            return Err(ExtractError::UvValues {
                path: path(),
                uv_set: uv_set.to_string(),
                reason: format!(
                    "{} unindexed uvs for {face_vertex_count} face-vertices",
                    values.len()
                ),
            });
        }
        read::identity_indices(face_vertex_count)
    };

    tracing::debug!(
        "Read uv set {} on {}: {} uvs, {} indices",
        uv_set,
        prim.path(),
        values.len(),
        indices.len()
    );

    Ok(TexCoords {
        uvs: read::flatten_vec2(&values),
        indices,
    })
}
