//! Normal reads.

use usdgeo_scene::{MeshAttribute, Prim};

use crate::read;
use crate::time::TimePolicy;

/// Flattened normals with one index per face-corner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normals {
    /// `x, y, z` triples.
    pub normals: Vec<f32>,
    /// `0..face_vertex_count`. Normals are never shared between corners.
    pub indices: Vec<i32>,
}

/// Read the prim's normals. Absent or unreadable normals yield `None`.
#[must_use]
pub fn read_normals(prim: &dyn Prim, policy: TimePolicy, face_vertex_count: usize) -> Option<Normals> {
    let values = read::vec3f_array(prim, MeshAttribute::Normals, policy.topology())?;
    tracing::debug!("Read {} normals on {}", values.len(), prim.path());
    Some(Normals {
        normals: read::flatten_vec3(&values),
        indices: read::identity_indices(face_vertex_count),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use usdgeo_scene::{MemoryPrim, Value};

    #[test]
    fn normals_are_flattened_with_identity_indices() {
        let prim = MemoryPrim::mesh("/m").with_attribute(
            MeshAttribute::Normals,
            Value::Vec3fArray(vec![Vec3::Z, Vec3::Y]),
        );
        let normals = read_normals(&prim, TimePolicy::default(), 4).unwrap();
        assert_eq!(normals.normals, [0.0, 0.0, 1.0, 0.0, 1.0, 0.0]);
        assert_eq!(normals.indices, [0, 1, 2, 3]);
    }

    #[test]
    fn missing_normals_are_skipped() {
        assert!(read_normals(&MemoryPrim::mesh("/m"), TimePolicy::default(), 3).is_none());
    }

    #[test]
    fn animated_topology_reads_earliest_normals() {
        let prim = MemoryPrim::mesh("/m")
            .with_attribute(MeshAttribute::Normals, Value::Vec3fArray(vec![Vec3::X]))
            .with_sample(MeshAttribute::Normals, 5.0, Value::Vec3fArray(vec![Vec3::Y]));
        let normals = read_normals(&prim, TimePolicy::new(true), 1).unwrap();
        assert_eq!(normals.normals, [0.0, 1.0, 0.0]);
        let normals = read_normals(&prim, TimePolicy::new(false), 1).unwrap();
        assert_eq!(normals.normals, [1.0, 0.0, 0.0]);
    }
}
