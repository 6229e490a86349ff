//! Time selection per attribute category.

use usdgeo_scene::{MeshAttribute, Prim, TimeCode};

/// Chooses the time at which each category of mesh data is read.
///
/// When face-vertex indices are time-sampled the topology is animated and
/// every topology-adjacent read (indices, counts, UVs, normals,
/// subdivision data) uses the earliest sample so that all of them describe
/// the same topology. Otherwise those reads use the default value. Points
/// are always read at the literal frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimePolicy {
    topology_varying: bool,
}

impl TimePolicy {
    #[must_use]
    pub fn new(topology_varying: bool) -> Self {
        Self { topology_varying }
    }

    /// Inspect the prim's face-vertex indices once.
    #[must_use]
    pub fn for_prim(prim: &dyn Prim) -> Self {
        Self::new(prim.time_sample_count(MeshAttribute::FaceVertexIndices) >= 1)
    }

    #[must_use]
    pub fn is_topology_varying(self) -> bool {
        self.topology_varying
    }

    /// Time for topology, UV, normal and subdivision reads.
    #[must_use]
    pub fn topology(self) -> TimeCode {
        if self.topology_varying {
            TimeCode::EarliestTime
        } else {
            TimeCode::Default
        }
    }

    /// Time for point reads at `frame`.
    #[must_use]
    pub fn points(self, frame: i32) -> TimeCode {
        TimeCode::frame(frame)
    }
}
