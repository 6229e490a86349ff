//! Extraction inputs.

/// Process-wide switches consumed by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Accept `float2[]` primvars as UV sets in addition to `texCoord2f[]`.
    pub read_float2_as_uv: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            read_float2_as_uv: true,
        }
    }
}

/// What to extract from one mesh prim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractRequest {
    /// UV set (primvar) name. Empty for workflows without UVs.
    pub uv_set: String,
    /// Frame samples to read points at, in processing order.
    pub frames: Vec<i32>,
    /// Express points relative to the reference model instead of world
    /// space.
    pub keep_centered: bool,
}

impl ExtractRequest {
    #[must_use]
    pub fn new(frames: impl Into<Vec<i32>>) -> Self {
        Self {
            frames: frames.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_uv_set(mut self, uv_set: impl Into<String>) -> Self {
        self.uv_set = uv_set.into();
        self
    }

    #[must_use]
    pub fn keep_centered(mut self, keep_centered: bool) -> Self {
        self.keep_centered = keep_centered;
        self
    }
}
