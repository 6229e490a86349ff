//! In-memory stage.

use std::collections::BTreeMap;

use glam::DMat4;
use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};
use crate::{Interpolation, MeshAttribute, Prim, PrimvarInfo, Sampled, TimeCode, Value, ValueType};

/// Type names with generic geometric-primitive capability.
pub const GPRIM_TYPES: &[&str] = &[
    "Mesh",
    "TetMesh",
    "Points",
    "BasisCurves",
    "NurbsCurves",
    "HermiteCurves",
    "NurbsPatch",
    "Capsule",
    "Cone",
    "Cube",
    "Cylinder",
    "Plane",
    "Sphere",
];

/// A primvar with its declaration, values and optional indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryPrimvar {
    #[serde(flatten)]
    pub info: PrimvarInfo,
    #[serde(default)]
    pub values: Sampled<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indices: Option<Sampled<Vec<i32>>>,
}

impl MemoryPrimvar {
    #[must_use]
    pub fn new(name: impl Into<String>, value_type: ValueType, interpolation: Interpolation) -> Self {
        Self {
            info: PrimvarInfo::new(name, value_type, interpolation),
            values: Sampled::default(),
            indices: None,
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: Value) -> Self {
        self.values.set_default(value);
        self
    }

    #[must_use]
    pub fn with_value_sample(mut self, time: f64, value: Value) -> Self {
        self.values.set_sample(time, value);
        self
    }

    #[must_use]
    pub fn with_indices(mut self, indices: Vec<i32>) -> Self {
        self.indices.get_or_insert_with(Sampled::default).set_default(indices);
        self
    }

    #[must_use]
    pub fn with_index_sample(mut self, time: f64, indices: Vec<i32>) -> Self {
        self.indices
            .get_or_insert_with(Sampled::default)
            .set_sample(time, indices);
        self
    }
}

/// A prim held in memory.
///
/// As a standalone [`Prim`] its local transform is also its world
/// transform. Inside a [`MemoryStage`] the transforms of its ancestors are
/// composed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryPrim {
    path: String,
    type_name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<MeshAttribute, Sampled<Value>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    primvars: Vec<MemoryPrimvar>,
    #[serde(default)]
    transform: Sampled<DMat4>,
}

impl MemoryPrim {
    #[must_use]
    pub fn new(path: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            type_name: type_name.into(),
            attributes: BTreeMap::new(),
            primvars: Vec::new(),
            transform: Sampled::default(),
        }
    }

    #[must_use]
    pub fn mesh(path: impl Into<String>) -> Self {
        Self::new(path, crate::MESH_TYPE)
    }

    #[must_use]
    pub fn xform(path: impl Into<String>) -> Self {
        Self::new(path, "Xform")
    }

    /// Author the default value of a schema attribute.
    #[must_use]
    pub fn with_attribute(mut self, attr: MeshAttribute, value: Value) -> Self {
        self.attributes.entry(attr).or_default().set_default(value);
        self
    }

    /// Author a time sample of a schema attribute.
    #[must_use]
    pub fn with_sample(mut self, attr: MeshAttribute, time: f64, value: Value) -> Self {
        self.attributes.entry(attr).or_default().set_sample(time, value);
        self
    }

    /// Add a primvar, replacing any primvar of the same name.
    #[must_use]
    pub fn with_primvar(mut self, primvar: MemoryPrimvar) -> Self {
        self.primvars.retain(|p| p.info.name != primvar.info.name);
        self.primvars.push(primvar);
        self
    }

    /// Author the default local transform.
    #[must_use]
    pub fn with_transform(mut self, transform: DMat4) -> Self {
        self.transform.set_default(transform);
        self
    }

    /// Author a time sample of the local transform.
    #[must_use]
    pub fn with_transform_sample(mut self, time: f64, transform: DMat4) -> Self {
        self.transform.set_sample(time, transform);
        self
    }

    /// Local transform at `time`; identity when none is authored.
    #[must_use]
    pub fn local_transform(&self, time: f64) -> DMat4 {
        self.transform
            .get(TimeCode::Time(time))
            .copied()
            .unwrap_or(DMat4::IDENTITY)
    }

    fn find_primvar(&self, name: &str) -> Option<&MemoryPrimvar> {
        self.primvars.iter().find(|p| p.info.name == name)
    }
}

impl Prim for MemoryPrim {
    fn path(&self) -> &str {
        &self.path
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn time_sample_count(&self, attr: MeshAttribute) -> usize {
        self.attributes
            .get(&attr)
            .map_or(0, Sampled::num_time_samples)
    }

    fn get(&self, attr: MeshAttribute, time: TimeCode) -> Option<Value> {
        self.attributes.get(&attr)?.get(time).cloned()
    }

    fn primvars(&self) -> Vec<PrimvarInfo> {
        self.primvars.iter().map(|p| p.info.clone()).collect()
    }

    fn primvar(&self, name: &str) -> Option<PrimvarInfo> {
        self.find_primvar(name).map(|p| p.info.clone())
    }

    fn primvar_value(&self, name: &str, time: TimeCode) -> Option<Value> {
        self.find_primvar(name)?.values.get(time).cloned()
    }

    fn primvar_indices(&self, name: &str, time: TimeCode) -> Option<Vec<i32>> {
        self.find_primvar(name)?.indices.as_ref()?.get(time).cloned()
    }

    fn local_to_world(&self, time: f64) -> DMat4 {
        self.local_transform(time)
    }
}

/// A flat collection of prims keyed by path.
///
/// Hierarchy is implied by the paths: `/a/b` is a child of `/a`. Ancestors
/// that are not on the stage contribute an identity transform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StageFile", into = "StageFile")]
pub struct MemoryStage {
    prims: BTreeMap<String, MemoryPrim>,
}

#[derive(Serialize, Deserialize)]
struct StageFile {
    prims: Vec<MemoryPrim>,
}

impl TryFrom<StageFile> for MemoryStage {
    type Error = SceneError;

    fn try_from(file: StageFile) -> SceneResult<Self> {
        Self::from_prims(file.prims)
    }
}

impl From<MemoryStage> for StageFile {
    fn from(stage: MemoryStage) -> Self {
        Self {
            prims: stage.prims.into_values().collect(),
        }
    }
}

impl MemoryStage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_prims(prims: impl IntoIterator<Item = MemoryPrim>) -> SceneResult<Self> {
        let mut stage = Self::new();
        for prim in prims {
            stage.insert(prim)?;
        }
        Ok(stage)
    }

    /// Add a prim to the stage.
    pub fn insert(&mut self, prim: MemoryPrim) -> SceneResult<()> {
        if !is_valid_path(&prim.path) {
            return Err(SceneError::InvalidPath(prim.path));
        }
        if self.prims.contains_key(&prim.path) {
            return Err(SceneError::DuplicatePrim(prim.path));
        }
        self.prims.insert(prim.path.clone(), prim);
        Ok(())
    }

    #[must_use]
    pub fn prim(&self, path: &str) -> Option<StagePrim<'_>> {
        self.prims.get(path).map(|prim| StagePrim { stage: self, prim })
    }

    /// All prims in path order (parents before children).
    pub fn prims(&self) -> impl Iterator<Item = StagePrim<'_>> {
        self.prims.values().map(|prim| StagePrim { stage: self, prim })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prims.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prims.is_empty()
    }

    /// Compose the local transforms of `path` and all of its ancestors.
    #[must_use]
    pub fn local_to_world(&self, path: &str, time: f64) -> DMat4 {
        ancestor_paths(path)
            .filter_map(|p| self.prims.get(p))
            .fold(DMat4::IDENTITY, |world, prim| {
                world * prim.local_transform(time)
            })
    }
}

/// A prim borrowed from a [`MemoryStage`].
#[derive(Debug, Clone, Copy)]
pub struct StagePrim<'a> {
    stage: &'a MemoryStage,
    prim: &'a MemoryPrim,
}

impl Prim for StagePrim<'_> {
    fn path(&self) -> &str {
        &self.prim.path
    }

    fn type_name(&self) -> &str {
        &self.prim.type_name
    }

    fn time_sample_count(&self, attr: MeshAttribute) -> usize {
        self.prim.time_sample_count(attr)
    }

    fn get(&self, attr: MeshAttribute, time: TimeCode) -> Option<Value> {
        self.prim.get(attr, time)
    }

    fn primvars(&self) -> Vec<PrimvarInfo> {
        self.prim.primvars()
    }

    fn primvar(&self, name: &str) -> Option<PrimvarInfo> {
        Prim::primvar(self.prim, name)
    }

    fn primvar_value(&self, name: &str, time: TimeCode) -> Option<Value> {
        self.prim.primvar_value(name, time)
    }

    fn primvar_indices(&self, name: &str, time: TimeCode) -> Option<Vec<i32>> {
        self.prim.primvar_indices(name, time)
    }

    fn local_to_world(&self, time: f64) -> DMat4 {
        self.stage.local_to_world(&self.prim.path, time)
    }
}

fn is_valid_path(path: &str) -> bool {
    path.strip_prefix('/')
        .is_some_and(|rest| !rest.is_empty() && rest.split('/').all(|seg| !seg.is_empty()))
}

/// `/a/b/c` yields `/a`, `/a/b`, `/a/b/c`.
fn ancestor_paths(path: &str) -> impl Iterator<Item = &str> {
    path.match_indices('/')
        .skip(1)
        .map(|(i, _)| &path[..i])
        .chain(std::iter::once(path))
}
