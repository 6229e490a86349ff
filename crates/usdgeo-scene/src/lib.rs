//! Scene-description runtime interface for mesh extraction.
//!
//! The extractor never talks to a concrete scene runtime. It reads prims
//! through the [`Prim`] trait, which exposes exactly what mesh extraction
//! needs: capability tests, time-sampled schema attributes, primvars and
//! local-to-world transforms.
//!
//! This crate also ships an in-memory runtime ([`MemoryStage`],
//! [`MemoryPrim`]) that can be built in code or loaded from JSON. Hosts
//! with a native runtime implement [`Prim`] over their own prim handles.
//!
//! # Conventions
//!
//! - Matrices use glam's column-vector convention: a point `p` is
//!   transformed as `m * p`. A row-vector runtime hands over the transpose
//!   of its matrix.
//! - A read "fails" when the attribute has no value at the requested time
//!   or holds a value of a different kind.

mod error;
mod memory;
mod sampled;
mod time;
mod value;

pub use error::{SceneError, SceneResult};
pub use memory::{GPRIM_TYPES, MemoryPrim, MemoryPrimvar, MemoryStage, StagePrim};
pub use sampled::Sampled;
pub use time::TimeCode;
pub use value::{Interpolation, MeshAttribute, PrimvarInfo, Value, ValueType};

use glam::DMat4;

/// Prim type name of polygonal meshes.
pub const MESH_TYPE: &str = "Mesh";

/// Read access to a single prim of a scene-description stage.
pub trait Prim {
    /// Absolute prim path, e.g. `/world/geo/body`.
    fn path(&self) -> &str;

    /// Schema type name, e.g. `Mesh` or `Xform`.
    fn type_name(&self) -> &str;

    /// Whether the prim has mesh-geometry capability.
    fn is_mesh(&self) -> bool {
        self.type_name() == MESH_TYPE
    }

    /// Whether the prim has generic geometric-primitive capability.
    fn is_gprim(&self) -> bool {
        GPRIM_TYPES.contains(&self.type_name())
    }

    /// Number of time samples authored on a schema attribute.
    fn time_sample_count(&self, attr: MeshAttribute) -> usize;

    /// Resolve a schema attribute at `time`.
    fn get(&self, attr: MeshAttribute, time: TimeCode) -> Option<Value>;

    /// Declarations of every primvar on the prim.
    fn primvars(&self) -> Vec<PrimvarInfo>;

    /// Declaration of the primvar called `name`.
    fn primvar(&self, name: &str) -> Option<PrimvarInfo> {
        self.primvars().into_iter().find(|info| info.name == name)
    }

    /// Resolve a primvar's values at `time`.
    fn primvar_value(&self, name: &str, time: TimeCode) -> Option<Value>;

    /// Resolve a primvar's index array at `time`. `None` for unindexed
    /// primvars.
    fn primvar_indices(&self, name: &str, time: TimeCode) -> Option<Vec<i32>>;

    /// Local-to-world transform at `time`.
    fn local_to_world(&self, time: f64) -> DMat4;
}

impl<P: Prim + ?Sized> Prim for &P {
    fn path(&self) -> &str {
        (**self).path()
    }

    fn type_name(&self) -> &str {
        (**self).type_name()
    }

    fn is_mesh(&self) -> bool {
        (**self).is_mesh()
    }

    fn is_gprim(&self) -> bool {
        (**self).is_gprim()
    }

    fn time_sample_count(&self, attr: MeshAttribute) -> usize {
        (**self).time_sample_count(attr)
    }

    fn get(&self, attr: MeshAttribute, time: TimeCode) -> Option<Value> {
        (**self).get(attr, time)
    }

    fn primvars(&self) -> Vec<PrimvarInfo> {
        (**self).primvars()
    }

    fn primvar(&self, name: &str) -> Option<PrimvarInfo> {
        (**self).primvar(name)
    }

    fn primvar_value(&self, name: &str, time: TimeCode) -> Option<Value> {
        (**self).primvar_value(name, time)
    }

    fn primvar_indices(&self, name: &str, time: TimeCode) -> Option<Vec<i32>> {
        (**self).primvar_indices(name, time)
    }

    fn local_to_world(&self, time: f64) -> DMat4 {
        (**self).local_to_world(time)
    }
}
