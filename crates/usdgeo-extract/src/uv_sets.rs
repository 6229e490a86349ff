//! UV set discovery.

use std::collections::BTreeMap;

use usdgeo_scene::{Prim, PrimvarInfo, ValueType};

use crate::options::ExtractOptions;
use crate::texcoords::is_uv_type;

/// UV set name to the number of primvars that provide it.
pub type UvSets = BTreeMap<String, usize>;

/// Prefixes marking a legacy UV channel stored as a scalar float array.
const LEGACY_UV_PREFIXES: [&str; 2] = ["u_", "v_"];

/// Scan the primvars of a geometric prim and count the UV sets they offer.
///
/// Counts accumulate into `sets` so a whole stage can be scanned into one
/// map. Prims without geometric-primitive capability are skipped.
pub fn discover_uv_sets(prim: &dyn Prim, options: &ExtractOptions, sets: &mut UvSets) {
    if !prim.is_gprim() {
        return;
    }

    for info in prim.primvars() {
        if !info.interpolation.is_vertex_or_face_varying() {
            continue;
        }
        if let Some(name) = uv_set_name(&info, options) {
            *sets.entry(name.to_string()).or_insert(0) += 1;
        }
    }
}

/// The UV set a primvar contributes, if any.
///
/// `u_name`/`v_name` float arrays are legacy halves of the `name` set.
fn uv_set_name<'a>(info: &'a PrimvarInfo, options: &ExtractOptions) -> Option<&'a str> {
    let legacy = LEGACY_UV_PREFIXES
        .iter()
        .find_map(|prefix| info.name.strip_prefix(prefix));

    let name = match legacy {
        Some(stripped) if info.value_type == ValueType::FloatArray => stripped,
        _ if is_uv_type(&info.value_type, options) => info.name.as_str(),
        _ => return None,
    };
    (!name.is_empty()).then_some(name)
}
