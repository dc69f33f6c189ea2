//! Analyzer configuration.
//!
//! Values are data, not behavior: a project config can widen or narrow the
//! recognized wrapper set without touching any rule. No file I/O happens
//! here - the driver reads the config text and hands it over.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RewriteOptions {
    /// Callee names recognized as single-argument wrapper constructors
    /// for alias resolution (`let el = $(node)`).
    pub wrapper_callees: Vec<String>,
}

impl Default for RewriteOptions {
    fn default() -> RewriteOptions {
        RewriteOptions {
            wrapper_callees: vec!["$".to_string(), "jQuery".to_string()],
        }
    }
}

impl RewriteOptions {
    /// Parse options from a JSON document; missing keys fall back to
    /// defaults.
    pub fn from_json(text: &str) -> Result<RewriteOptions, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn is_wrapper_callee(&self, name: &str) -> bool {
        self.wrapper_callees.iter().any(|c| c == name)
    }
}
