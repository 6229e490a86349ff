//! Reader configuration sourced from the environment.

use usdgeo_extract::{ExtractOptions, PathFilter};

/// Environment variable toggling whether `float2[]` primvars count as UVs.
pub const READ_FLOAT2_AS_UV_VAR: &str = "MARI_READ_FLOAT2_AS_UV";

/// Configuration shared by every read of a [`crate::GeoReader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Treat `float2[]` primvars as texture coordinates.
    pub read_float2_as_uv: bool,
    /// Path filter applied by [`crate::GeoReader::is_valid_node`].
    pub path_filter: PathFilter,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            read_float2_as_uv: true,
            path_filter: PathFilter::default(),
        }
    }
}

impl ReaderConfig {
    /// Read the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name
    /// to its value. Unset variables keep their defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(READ_FLOAT2_AS_UV_VAR) {
            match parse_flag(&raw) {
                Some(flag) => config.read_float2_as_uv = flag,
                None => tracing::warn!(
                    "Ignoring unrecognized value '{raw}' for {READ_FLOAT2_AS_UV_VAR}"
                ),
            }
        }

        config.path_filter.reload_from(&lookup);
        config
    }

    /// Options handed to every extraction.
    #[must_use]
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            read_float2_as_uv: self.read_float2_as_uv,
        }
    }
}

/// Parse a boolean flag the way shell users write them.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ReaderConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ReaderConfig::default());
        assert!(config.read_float2_as_uv);
        assert!(config.path_filter.require().is_empty());
    }

    #[test]
    fn float2_flag_values() {
        for (raw, expected) in [
            ("0", false),
            ("false", false),
            ("No", false),
            ("OFF", false),
            ("1", true),
            ("true", true),
            (" yes ", true),
        ] {
            let config = ReaderConfig::from_lookup(lookup(&[(READ_FLOAT2_AS_UV_VAR, raw)]));
            assert_eq!(config.read_float2_as_uv, expected, "{raw:?}");
        }
    }

    #[test]
    fn unrecognized_flag_keeps_default() {
        let config = ReaderConfig::from_lookup(lookup(&[(READ_FLOAT2_AS_UV_VAR, "maybe")]));
        assert!(config.read_float2_as_uv);
    }

    #[test]
    fn filters_come_from_lookup() {
        let config = ReaderConfig::from_lookup(lookup(&[
            (usdgeo_extract::REQUIRE_PATH_SUBSTR_VAR, "/char/,/prop/"),
            (usdgeo_extract::IGNORE_PATH_SUBSTR_VAR, "proxy"),
        ]));
        assert_eq!(config.path_filter.require(), ["/char/", "/prop/"]);
        assert_eq!(config.path_filter.ignore(), ["proxy"]);
    }

    #[test]
    fn options_follow_config() {
        let config = ReaderConfig::from_lookup(lookup(&[(READ_FLOAT2_AS_UV_VAR, "off")]));
        assert!(!config.extract_options().read_float2_as_uv);
    }
}
