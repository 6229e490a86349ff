//! The extracted mesh record.

use std::collections::BTreeMap;

use usdgeo_scene::Prim;

use crate::error::{ExtractError, ExtractResult};
use crate::indices::{face_selection_indices, read_face_vertex_counts, read_face_vertex_indices};
use crate::normals::read_normals;
use crate::options::{ExtractOptions, ExtractRequest};
use crate::subdiv::{Subdivision, read_subdivision};
use crate::texcoords::read_tex_coords;
use crate::time::TimePolicy;
use crate::vertices::read_frame_vertices;

/// Flat, frame-indexed mesh data of one prim.
///
/// Built once per request by [`MeshData::extract`]. When a mandatory read
/// fails the record keeps whatever was read before the failure and
/// [`MeshData::is_valid`] reports it as unusable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    vertex_indices: Vec<i32>,
    face_counts: Vec<i32>,
    face_selection_indices: Vec<i32>,
    vertices: BTreeMap<i32, Vec<f32>>,
    normals: Vec<f32>,
    normal_indices: Vec<i32>,
    uvs: Vec<f32>,
    uv_indices: Vec<i32>,
    subdivision: Subdivision,
    /// Set once every mandatory read succeeded.
    complete: bool,
}

impl MeshData {
    /// Extract `prim` for `request`.
    ///
    /// A fatal condition appends exactly one entry to `log` and stops the
    /// extraction. `model` is the reference for `keep_centered` requests
    /// and is otherwise unused.
    pub fn extract(
        prim: &dyn Prim,
        model: &dyn Prim,
        request: &ExtractRequest,
        options: &ExtractOptions,
        log: &mut Vec<String>,
    ) -> Self {
        let mut data = Self::default();
        if let Err(err) = data.populate(prim, model, request, options) {
            tracing::warn!("{err}");
            log.push(err.to_string());
        }
        data
    }

    /// Extract `prim` for `request`, discarding the record on failure.
    pub fn try_extract(
        prim: &dyn Prim,
        model: &dyn Prim,
        request: &ExtractRequest,
        options: &ExtractOptions,
    ) -> ExtractResult<Self> {
        let mut data = Self::default();
        data.populate(prim, model, request, options)?;
        Ok(data)
    }

    fn populate(
        &mut self,
        prim: &dyn Prim,
        model: &dyn Prim,
        request: &ExtractRequest,
        options: &ExtractOptions,
    ) -> ExtractResult<()> {
        if !prim.is_mesh() {
            return Err(ExtractError::NotAMesh {
                path: prim.path().to_string(),
                type_name: prim.type_name().to_string(),
            });
        }

        let policy = TimePolicy::for_prim(prim);
        tracing::debug!(
            "Reading mesh {} (type {}, topology varying {})",
            prim.path(),
            prim.type_name(),
            policy.is_topology_varying()
        );

        self.vertex_indices = read_face_vertex_indices(prim, policy)?;
        self.face_counts = read_face_vertex_counts(prim, policy, self.vertex_indices.len())?;
        self.face_selection_indices = face_selection_indices(self.face_counts.len());

        // An empty UV set name means a workflow without UVs.
        if !request.uv_set.is_empty() {
            let tex = read_tex_coords(
                prim,
                &request.uv_set,
                policy,
                self.vertex_indices.len(),
                options,
            )?;
            self.uvs = tex.uvs;
            self.uv_indices = tex.indices;
        }

        if let Some(normals) = read_normals(prim, policy, self.vertex_indices.len()) {
            self.normals = normals.normals;
            self.normal_indices = normals.indices;
        }

        let reference = request.keep_centered.then_some(model);
        for &frame in &request.frames {
            let points = read_frame_vertices(prim, reference, policy, frame)?;
            self.vertices.insert(frame, points);
        }

        self.subdivision = read_subdivision(prim, policy.topology());
        self.complete = true;
        self.trace_summary();
        Ok(())
    }

    /// Whether the record holds usable geometry: extraction finished, the
    /// first frame has points and there is at least one face-vertex index.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.complete
            && self
                .vertices
                .values()
                .next()
                .is_some_and(|points| !points.is_empty())
            && !self.vertex_indices.is_empty()
    }

    /// Drop all data and restore defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn vertex_indices(&self) -> &[i32] {
        &self.vertex_indices
    }

    #[must_use]
    pub fn face_counts(&self) -> &[i32] {
        &self.face_counts
    }

    #[must_use]
    pub fn face_selection_indices(&self) -> &[i32] {
        &self.face_selection_indices
    }

    /// Frames with point data, ascending.
    pub fn frames(&self) -> impl Iterator<Item = i32> + '_ {
        self.vertices.keys().copied()
    }

    /// Flattened points at exactly `frame`.
    #[must_use]
    pub fn vertices(&self, frame: i32) -> Option<&[f32]> {
        self.vertices.get(&frame).map(Vec::as_slice)
    }

    /// Flattened points at `frame`, falling back to the lowest stored frame
    /// when `frame` was not extracted.
    #[must_use]
    pub fn vertices_or_first(&self, frame: i32) -> Option<&[f32]> {
        self.vertices(frame)
            .or_else(|| self.vertices.values().next().map(Vec::as_slice))
    }

    #[must_use]
    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    #[must_use]
    pub fn normal_indices(&self) -> &[i32] {
        &self.normal_indices
    }

    #[must_use]
    pub fn uvs(&self) -> &[f32] {
        &self.uvs
    }

    #[must_use]
    pub fn uv_indices(&self) -> &[i32] {
        &self.uv_indices
    }

    #[must_use]
    pub fn subdivision(&self) -> &Subdivision {
        &self.subdivision
    }

    #[must_use]
    pub fn is_subdiv_mesh(&self) -> bool {
        self.subdivision.is_subdiv_mesh
    }

    /// Log counts of everything that was read.
    pub fn trace_summary(&self) {
        tracing::debug!(
            "Mesh summary: {} faces, {} face-vertex indices, {} frames, {} points in first frame",
            self.face_counts.len(),
            self.vertex_indices.len(),
            self.vertices.len(),
            self.vertices.values().next().map_or(0, |v| v.len() / 3)
        );
        tracing::debug!(
            "Mesh summary: {} uvs, {} uv indices, {} normals, {} normal indices",
            self.uvs.len() / 2,
            self.uv_indices.len(),
            self.normals.len() / 3,
            self.normal_indices.len()
        );
        if self.subdivision.is_subdiv_mesh {
            tracing::debug!(
                "Mesh summary: subdivision '{}', boundary {}, face-varying {}, {} creases, {} corners, {} holes",
                self.subdivision.scheme_name(),
                self.subdivision.interpolate_boundary.code(),
                self.subdivision.face_varying_linear_interpolation.code(),
                self.subdivision.crease_lengths.len(),
                self.subdivision.corner_indices.len(),
                self.subdivision.hole_indices.len()
            );
        }
    }
}
