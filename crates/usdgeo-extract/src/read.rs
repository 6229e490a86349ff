//! Typed attribute reads.
//!
//! A read yields `None` when the attribute is unauthored at the requested
//! time or holds a different kind of value.

use glam::{Vec2, Vec3};
use usdgeo_scene::{MeshAttribute, Prim, TimeCode};

pub(crate) fn int_array(prim: &dyn Prim, attr: MeshAttribute, time: TimeCode) -> Option<Vec<i32>> {
    prim.get(attr, time)?.as_int_array().map(<[i32]>::to_vec)
}

pub(crate) fn float_array(prim: &dyn Prim, attr: MeshAttribute, time: TimeCode) -> Option<Vec<f32>> {
    prim.get(attr, time)?.as_float_array().map(<[f32]>::to_vec)
}

pub(crate) fn vec3f_array(prim: &dyn Prim, attr: MeshAttribute, time: TimeCode) -> Option<Vec<Vec3>> {
    prim.get(attr, time)?.as_vec3f_array().map(<[Vec3]>::to_vec)
}

pub(crate) fn token(prim: &dyn Prim, attr: MeshAttribute, time: TimeCode) -> Option<String> {
    prim.get(attr, time)?.as_token().map(str::to_string)
}

pub(crate) fn primvar_vec2f_array(prim: &dyn Prim, name: &str, time: TimeCode) -> Option<Vec<Vec2>> {
    prim.primvar_value(name, time)?
        .as_vec2f_array()
        .map(<[Vec2]>::to_vec)
}

/// Flatten 3-component vectors into `x, y, z, x, y, z, ...`.
pub(crate) fn flatten_vec3(values: &[Vec3]) -> Vec<f32> {
    values.iter().flat_map(|v| v.to_array()).collect()
}

/// Flatten 2-component vectors into `u, v, u, v, ...`.
pub(crate) fn flatten_vec2(values: &[Vec2]) -> Vec<f32> {
    values.iter().flat_map(|v| v.to_array()).collect()
}

/// `0, 1, 2, ..., len - 1`.
///
/// `len` is the length of an `i32` face-vertex index array, so every index
/// fits in `i32`.
pub(crate) fn identity_indices(len: usize) -> Vec<i32> {
    (0..len).map_while(|i| i32::try_from(i).ok()).collect()
}
