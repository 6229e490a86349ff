//! Per-frame point reads and transforms.

use glam::{DMat4, DVec4};
use usdgeo_scene::{MeshAttribute, Prim};

use crate::error::{ExtractError, ExtractResult};
use crate::read;
use crate::time::TimePolicy;

/// Transform baked into the points of `prim` at `time`.
///
/// Without a reference this is the prim's local-to-world transform. With
/// one, the reference's placement is removed so the result is relative to
/// the reference: in row-vector terms `p * W * inverse(R)`. A reference
/// whose transform cannot be inverted is ignored.
#[must_use]
pub fn frame_transform(prim: &dyn Prim, reference: Option<&dyn Prim>, time: f64) -> DMat4 {
    let world = prim.local_to_world(time);
    let Some(reference) = reference else {
        return world;
    };
    let inverse = reference.local_to_world(time).inverse();
    if !inverse.is_finite() {
        tracing::warn!(
            "Singular transform on reference {} at time {time}, keeping {} in world space",
            reference.path(),
            prim.path()
        );
        return world;
    }
    inverse * world
}

/// Apply `transform` to flattened `x, y, z` points in place (`w = 1`).
#[allow(clippy::cast_possible_truncation)]
pub fn transform_points(points: &mut [f32], transform: &DMat4) {
    for point in points.chunks_exact_mut(3) {
        let p = *transform
            * DVec4::new(
                f64::from(point[0]),
                f64::from(point[1]),
                f64::from(point[2]),
                1.0,
            );
        point[0] = p.x as f32;
        point[1] = p.y as f32;
        point[2] = p.z as f32;
    }
}

/// Read the points of `prim` at `frame`, baked into world space or into
/// the space of `reference`.
///
/// An identity transform is skipped entirely so untransformed points are
/// returned bit-for-bit.
pub fn read_frame_vertices(
    prim: &dyn Prim,
    reference: Option<&dyn Prim>,
    policy: TimePolicy,
    frame: i32,
) -> ExtractResult<Vec<f32>> {
    let values = read::vec3f_array(prim, MeshAttribute::Points, policy.points(frame)).ok_or_else(
        || ExtractError::Points {
            path: prim.path().to_string(),
            frame,
        },
    )?;
    let mut points = read::flatten_vec3(&values);

    let transform = frame_transform(prim, reference, f64::from(frame));
    if transform == DMat4::IDENTITY {
        tracing::trace!("Frame {frame} of {}: identity transform", prim.path());
    } else {
        tracing::trace!("Frame {frame} of {}: baking transform {transform:?}", prim.path());
        transform_points(&mut points, &transform);
    }

    Ok(points)
}
