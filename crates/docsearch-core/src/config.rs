//! Search client configuration.
//!
//! Uses Figment to merge built-in defaults + `docsearch.toml` +
//! `docsearch.<env>.toml` + `DOCSEARCH_*` env vars, then extracts a typed
//! [`Config`] and validates it.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::{default_rules, BoostRule, BoostRules};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Search application identifier.
    pub app_id: String,
    /// Search-only API key. Safe to embed client-side; not a rotating secret.
    pub search_api_key: String,
    /// Name of the index all requests target.
    pub index_name: String,
    /// Facet attribute the UI groups results by.
    pub group_by: String,
    pub boost: BoostConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoostConfig {
    pub rules: Vec<BoostRule>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_for_env(None)
    }

    pub fn load_for_env(env_name: Option<&str>) -> Result<Self> {
        Self::load_for_env_in(Path::new("."), env_name)
    }

    /// Like [`Config::load_for_env`], resolving config files against `base`
    /// instead of the working directory.
    pub fn load_for_env_in(base: &Path, env_name: Option<&str>) -> Result<Self> {
        let env_name = if let Some(env_name) = env_name {
            env_name.to_string()
        } else {
            env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string())
        };

        let mut figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(base.join("docsearch.toml")));
        match env_name.as_str() {
            "dev" | "development" => {
                figment = figment.merge(Toml::file(base.join("docsearch.dev.toml")));
            }
            "prod" | "production" => {
                figment = figment.merge(Toml::file(base.join("docsearch.prod.toml")));
            }
            "test" | "testing" => {
                figment = figment.merge(Toml::file(base.join("docsearch.test.toml")));
            }
            _ => {}
        }
        figment = figment.merge(Env::prefixed("DOCSEARCH_"));

        Self::extract(figment)
    }

    /// Load from a single TOML file layered over the built-in defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("DOCSEARCH_"));
        Self::extract(figment)
    }

    fn extract(figment: Figment) -> Result<Self> {
        let config: Config = figment
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        tracing::debug!(index = %config.index_name, "loaded search configuration");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.app_id.is_empty() {
            return Err(Error::InvalidConfig("app_id must not be empty".to_string()));
        }
        if self.search_api_key.is_empty() {
            return Err(Error::InvalidConfig(
                "search_api_key must not be empty".to_string(),
            ));
        }
        if self.index_name.is_empty() {
            return Err(Error::InvalidConfig(
                "index_name must not be empty".to_string(),
            ));
        }
        if self.group_by.is_empty() {
            return Err(Error::InvalidConfig(
                "group_by must not be empty".to_string(),
            ));
        }
        // Surfaces overlapping prefixes at load time rather than first use.
        self.rules().map(|_| ())
    }

    /// The validated rule table configured for this site.
    pub fn rules(&self) -> Result<BoostRules> {
        BoostRules::new(self.boost.rules.clone())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            search_api_key: String::new(),
            index_name: "docs".to_string(),
            group_by: "hierarchy.lvl0".to_string(),
            boost: BoostConfig {
                rules: default_rules(),
            },
        }
    }
}
