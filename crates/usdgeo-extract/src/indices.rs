//! Topology reads.

use usdgeo_scene::{MeshAttribute, Prim};

use crate::error::{ExtractError, ExtractResult};
use crate::read;
use crate::time::TimePolicy;

/// Read the flattened face-corner to vertex index mapping.
pub fn read_face_vertex_indices(prim: &dyn Prim, policy: TimePolicy) -> ExtractResult<Vec<i32>> {
    read::int_array(prim, MeshAttribute::FaceVertexIndices, policy.topology()).ok_or_else(|| {
        ExtractError::FaceVertexIndices {
            path: prim.path().to_string(),
        }
    })
}

/// Read the per-face vertex counts and check that they cover exactly
/// `index_count` face-vertex indices.
pub fn read_face_vertex_counts(
    prim: &dyn Prim,
    policy: TimePolicy,
    index_count: usize,
) -> ExtractResult<Vec<i32>> {
    let fail = |reason: String| ExtractError::FaceVertexCounts {
        path: prim.path().to_string(),
        reason,
    };

    let counts = read::int_array(prim, MeshAttribute::FaceVertexCounts, policy.topology())
        .ok_or_else(|| fail("attribute is missing or not an int array".to_string()))?;

    if let Some(negative) = counts.iter().find(|&&c| c < 0) {
        return Err(fail(format!("negative face count {negative}")));
    }
    let total: i64 = counts.iter().map(|&c| i64::from(c)).sum();
    if usize::try_from(total).ok() != Some(index_count) {
        return Err(fail(format!(
            "counts cover {total} face-vertices but {index_count} indices were read"
        )));
    }

    Ok(counts)
}

/// `0..face_count`, the selection list covering every face.
#[must_use]
pub fn face_selection_indices(face_count: usize) -> Vec<i32> {
    read::identity_indices(face_count)
}
