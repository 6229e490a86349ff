//! Substring filtering of prim paths.

use usdgeo_scene::Prim;

/// Environment variable holding the comma-separated require list.
pub const REQUIRE_PATH_SUBSTR_VAR: &str = "PX_USDREADER_REQUIRE_GEOM_PATH_SUBSTR";
/// Environment variable holding the comma-separated ignore list.
pub const IGNORE_PATH_SUBSTR_VAR: &str = "PX_USDREADER_IGNORE_GEOM_PATH_SUBSTR";

/// Allow/deny filter over prim paths.
///
/// A path passes when the require list is empty or one of its entries is a
/// substring of the path, and no entry of the ignore list is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathFilter {
    require: Vec<String>,
    ignore: Vec<String>,
}

impl PathFilter {
    #[must_use]
    pub fn new(require: Vec<String>, ignore: Vec<String>) -> Self {
        Self { require, ignore }
    }

    /// Build a filter from the two environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let mut filter = Self::default();
        filter.reload_from_env();
        filter
    }

    #[must_use]
    pub fn require(&self) -> &[String] {
        &self.require
    }

    #[must_use]
    pub fn ignore(&self) -> &[String] {
        &self.ignore
    }

    /// Whether `path` passes the filter.
    #[must_use]
    pub fn accepts(&self, path: &str) -> bool {
        // A configured require list that nothing matches rejects.
        if !self.require.is_empty() && !self.require.iter().any(|s| path.contains(s.as_str())) {
            return false;
        }
        !self.ignore.iter().any(|s| path.contains(s.as_str()))
    }

    /// Reload both lists through `lookup`, which maps a variable name to its
    /// value. A variable that is set replaces its list; an unset one leaves
    /// its list as it was.
    pub fn reload_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(ignore) = lookup(IGNORE_PATH_SUBSTR_VAR) {
            self.ignore = tokenize(&ignore);
        }
        if let Some(require) = lookup(REQUIRE_PATH_SUBSTR_VAR) {
            self.require = tokenize(&require);
        }
        tracing::debug!(
            "Path filter: require {:?}, ignore {:?}",
            self.require,
            self.ignore
        );
    }

    /// Reload both lists from the process environment.
    pub fn reload_from_env(&mut self) {
        self.reload_from(|name| std::env::var(name).ok());
    }
}

/// Split a comma-separated list, dropping empty entries.
#[must_use]
pub fn tokenize(list: &str) -> Vec<String> {
    list.split(',')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Cheap eligibility gate run before extraction: the prim is a mesh and its
/// path passes `filter`.
#[must_use]
pub fn is_valid_node(prim: &dyn Prim, filter: &PathFilter) -> bool {
    prim.is_mesh() && filter.accepts(prim.path())
}
