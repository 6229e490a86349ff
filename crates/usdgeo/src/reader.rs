//! High-level reader combining path filtering, UV discovery and extraction.

use usdgeo_extract::{ExtractRequest, ExtractResult, MeshData, UvSets, discover_uv_sets};
use usdgeo_scene::Prim;

use crate::config::ReaderConfig;

/// Geometry reader for a painting host.
///
/// Holds the configuration every read shares. All reads are synchronous
/// and take `&self`, so one reader can serve many threads.
#[derive(Debug, Clone, Default)]
pub struct GeoReader {
    config: ReaderConfig,
}

impl GeoReader {
    #[must_use]
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Create a reader configured from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(ReaderConfig::from_env())
    }

    #[must_use]
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Whether `prim` is a mesh accepted by the path filter.
    #[must_use]
    pub fn is_valid_node(&self, prim: &dyn Prim) -> bool {
        usdgeo_extract::is_valid_node(prim, &self.config.path_filter)
    }

    /// Extract one mesh. Fatal problems land in `log`; check
    /// [`MeshData::is_valid`] before using the record.
    pub fn read_mesh(
        &self,
        prim: &dyn Prim,
        model: &dyn Prim,
        request: &ExtractRequest,
        log: &mut Vec<String>,
    ) -> MeshData {
        MeshData::extract(prim, model, request, &self.config.extract_options(), log)
    }

    /// Extract one mesh as a typed result.
    pub fn try_read_mesh(
        &self,
        prim: &dyn Prim,
        model: &dyn Prim,
        request: &ExtractRequest,
    ) -> ExtractResult<MeshData> {
        MeshData::try_extract(prim, model, request, &self.config.extract_options())
    }

    /// Extract every eligible prim of `prims`, keeping the valid records
    /// keyed by prim path.
    pub fn read_meshes<P: Prim>(
        &self,
        prims: impl IntoIterator<Item = P>,
        model: &dyn Prim,
        request: &ExtractRequest,
        log: &mut Vec<String>,
    ) -> Vec<(String, MeshData)> {
        let mut meshes = Vec::new();
        for prim in prims {
            if !self.is_valid_node(&prim) {
                continue;
            }
            let data = self.read_mesh(&prim, model, request, log);
            if data.is_valid() {
                meshes.push((prim.path().to_string(), data));
            }
        }
        tracing::debug!("Read {} valid meshes", meshes.len());
        meshes
    }

    /// Count the UV sets offered across `prims`.
    pub fn uv_sets<P: Prim>(&self, prims: impl IntoIterator<Item = P>) -> UvSets {
        let options = self.config.extract_options();
        let mut sets = UvSets::new();
        for prim in prims {
            discover_uv_sets(&prim, &options, &mut sets);
        }
        sets
    }

    /// Re-read the path filter lists from the process environment.
    pub fn reload_filters(&mut self) {
        self.config.path_filter.reload_from_env();
    }

    /// Re-read the path filter lists through `lookup`.
    pub fn reload_filters_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        self.config.path_filter.reload_from(lookup);
    }
}
