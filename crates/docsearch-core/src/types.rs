//! Domain types shared by the configuration layer and the request booster.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Maps a page-path prefix to a facet filter expression.
///
/// - `path_prefix`: leading path segment, e.g. "/aws/"
/// - `filter`: facet filter injected into boosted requests, e.g.
///   "hierarchy.lvl0:LocalStack for AWS"
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoostRule {
    pub path_prefix: String,
    pub filter: String,
}

impl BoostRule {
    pub fn new(path_prefix: impl Into<String>, filter: impl Into<String>) -> Self {
        Self {
            path_prefix: path_prefix.into(),
            filter: filter.into(),
        }
    }
}

/// An ordered, immutable rule table. Resolution is first-match-wins in
/// declaration order; construction rejects tables where one prefix shadows
/// another, so at most one rule can ever match a given path.
#[derive(Debug, Clone)]
pub struct BoostRules {
    rules: Vec<BoostRule>,
}

impl BoostRules {
    pub fn new(rules: Vec<BoostRule>) -> Result<Self> {
        for rule in &rules {
            if rule.path_prefix.is_empty() {
                return Err(Error::InvalidRules("empty path prefix".to_string()));
            }
            if rule.filter.is_empty() {
                return Err(Error::InvalidRules(format!(
                    "rule for '{}' has an empty filter",
                    rule.path_prefix
                )));
            }
        }
        for (i, a) in rules.iter().enumerate() {
            for b in rules.iter().skip(i + 1) {
                if a.path_prefix.starts_with(&b.path_prefix)
                    || b.path_prefix.starts_with(&a.path_prefix)
                {
                    return Err(Error::InvalidRules(format!(
                        "prefixes '{}' and '{}' overlap",
                        a.path_prefix, b.path_prefix
                    )));
                }
            }
        }
        Ok(Self { rules })
    }

    /// The filter of the first rule whose prefix matches `path`, if any.
    pub fn resolve(&self, path: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|r| path.starts_with(&r.path_prefix))
            .map(|r| r.filter.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }
}

impl Default for BoostRules {
    fn default() -> Self {
        Self {
            rules: default_rules(),
        }
    }
}

/// The built-in rule pair for the documentation site's two product sections.
pub fn default_rules() -> Vec<BoostRule> {
    vec![
        BoostRule::new("/aws/", "hierarchy.lvl0:LocalStack for AWS"),
        BoostRule::new("/snowflake/", "hierarchy.lvl0:LocalStack for Snowflake"),
    ]
}
