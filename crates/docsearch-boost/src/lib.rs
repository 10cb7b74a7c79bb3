//! Request booster: rewrites outgoing search payloads so that hits from the
//! section of the docs the reader is currently in rank higher.
//!
//! The transform is additive only. A matched rule attaches an optional facet
//! filter plus the flag telling the backend to sum filter scores into the
//! relevance score instead of excluding non-matching hits. Anything that is
//! not a well-formed batch, or any path outside the rule table, is delegated
//! to the wrapped client untouched.

use anyhow::Result;
use serde_json::{Map, Value};

use docsearch_core::config::Config;
use docsearch_core::traits::{ContextSource, SearchClient};
use docsearch_core::types::BoostRules;

/// Key of the injected facet filter list. Optional filters influence ranking
/// rather than excluding non-matching results.
pub const OPTIONAL_FILTERS_KEY: &str = "optionalFilters";

/// Key of the injected flag that makes optional-filter matches additive.
pub const SUM_OR_FILTERS_SCORES_KEY: &str = "sumOrFiltersScores";

const REQUESTS_KEY: &str = "requests";

/// Type-guarded view of a well-formed payload: an object whose `requests`
/// field is an array. Everything else is forwarded verbatim.
struct ValidBatch<'a> {
    outer: &'a Map<String, Value>,
    requests: &'a [Value],
}

impl<'a> ValidBatch<'a> {
    fn from_payload(payload: &'a Value) -> Option<Self> {
        let outer = payload.as_object()?;
        let requests = outer.get(REQUESTS_KEY)?.as_array()?;
        Some(Self { outer, requests })
    }
}

/// Build a boosted copy of `payload` for the given navigation path.
///
/// Returns `None` when no rule matches the path, the path is absent, or the
/// payload is not a well-formed batch; the caller then delegates the
/// original payload unchanged. On `Some`, the outer object and every
/// descriptor are fresh copies and the input is left untouched.
pub fn boost_payload(rules: &BoostRules, path: Option<&str>, payload: &Value) -> Option<Value> {
    let filter = rules.resolve(path?)?;
    let batch = ValidBatch::from_payload(payload)?;

    let boosted: Vec<Value> = batch
        .requests
        .iter()
        .map(|descriptor| match descriptor {
            Value::Object(fields) => {
                let mut copy = fields.clone();
                copy.insert(
                    OPTIONAL_FILTERS_KEY.to_string(),
                    Value::Array(vec![Value::String(filter.to_string())]),
                );
                copy.insert(SUM_OR_FILTERS_SCORES_KEY.to_string(), Value::Bool(true));
                Value::Object(copy)
            }
            other => other.clone(),
        })
        .collect();

    let mut outer = batch.outer.clone();
    outer.insert(REQUESTS_KEY.to_string(), Value::Array(boosted));
    Some(Value::Object(outer))
}

/// Wraps a [`SearchClient`] so each call is boosted toward the section of
/// the taxonomy the current page belongs to, then delegated.
pub struct BoostedClient<C: SearchClient> {
    inner: C,
    rules: BoostRules,
    context: Box<dyn ContextSource>,
}

impl<C: SearchClient> BoostedClient<C> {
    pub fn new(inner: C, rules: BoostRules, context: Box<dyn ContextSource>) -> Self {
        Self {
            inner,
            rules,
            context,
        }
    }

    /// Wire a wrapped client from site configuration.
    pub fn from_config(
        config: &Config,
        inner: C,
        context: Box<dyn ContextSource>,
    ) -> docsearch_core::error::Result<Self> {
        Ok(Self::new(inner, config.rules()?, context))
    }

    pub fn search(&self, payload: &Value) -> Result<Value> {
        let path = self.context.current_path();
        match boost_payload(&self.rules, path.as_deref(), payload) {
            Some(boosted) => {
                tracing::debug!(path = path.as_deref(), "boosting search request batch");
                self.inner.search(&boosted)
            }
            None => {
                tracing::debug!(path = path.as_deref(), "delegating search request unchanged");
                self.inner.search(payload)
            }
        }
    }
}

impl<C: SearchClient> SearchClient for BoostedClient<C> {
    fn search(&self, payload: &Value) -> Result<Value> {
        Self::search(self, payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn injects_filter_and_additive_flag_into_each_descriptor() {
        let rules = BoostRules::default();
        let payload = json!({ "requests": [{ "query": "s3" }, { "query": "ec2" }] });

        let boosted = boost_payload(&rules, Some("/aws/x"), &payload).expect("boost applies");

        assert_eq!(
            boosted,
            json!({ "requests": [
                {
                    "query": "s3",
                    "optionalFilters": ["hierarchy.lvl0:LocalStack for AWS"],
                    "sumOrFiltersScores": true
                },
                {
                    "query": "ec2",
                    "optionalFilters": ["hierarchy.lvl0:LocalStack for AWS"],
                    "sumOrFiltersScores": true
                }
            ]})
        );
    }

    #[test]
    fn existing_descriptor_fields_survive_and_injected_keys_are_overwritten() {
        let rules = BoostRules::default();
        let payload = json!({ "requests": [{
            "query": "stages",
            "page": 2,
            "optionalFilters": ["stale:value"],
            "sumOrFiltersScores": false
        }]});

        let boosted = boost_payload(&rules, Some("/snowflake/overview"), &payload).unwrap();

        assert_eq!(
            boosted["requests"][0],
            json!({
                "query": "stages",
                "page": 2,
                "optionalFilters": ["hierarchy.lvl0:LocalStack for Snowflake"],
                "sumOrFiltersScores": true
            })
        );
    }

    #[test]
    fn outer_fields_outside_requests_are_preserved() {
        let rules = BoostRules::default();
        let payload = json!({ "strategy": "none", "requests": [{ "query": "q" }] });

        let boosted = boost_payload(&rules, Some("/aws/x"), &payload).unwrap();

        assert_eq!(boosted["strategy"], json!("none"));
    }

    #[test]
    fn no_boost_without_path_or_rule_match() {
        let rules = BoostRules::default();
        let payload = json!({ "requests": [{ "query": "q" }] });

        assert!(boost_payload(&rules, None, &payload).is_none());
        assert!(boost_payload(&rules, Some("/"), &payload).is_none());
        assert!(boost_payload(&rules, Some("/docs/intro"), &payload).is_none());
    }

    #[test]
    fn malformed_payloads_are_not_boosted() {
        let rules = BoostRules::default();

        assert!(boost_payload(&rules, Some("/aws/x"), &Value::Null).is_none());
        assert!(boost_payload(&rules, Some("/aws/x"), &json!("not-an-object")).is_none());
        assert!(boost_payload(&rules, Some("/aws/x"), &json!({ "requests": "not-an-array" })).is_none());
        assert!(boost_payload(&rules, Some("/aws/x"), &json!({ "queries": [] })).is_none());
    }

    #[test]
    fn non_object_descriptors_pass_through_inside_a_boosted_batch() {
        let rules = BoostRules::default();
        let payload = json!({ "requests": [{ "query": "q" }, "free-form"] });

        let boosted = boost_payload(&rules, Some("/aws/x"), &payload).unwrap();

        assert_eq!(boosted["requests"][1], json!("free-form"));
        assert!(boosted["requests"][0].get(OPTIONAL_FILTERS_KEY).is_some());
    }

    #[test]
    fn input_payload_is_never_mutated() {
        let rules = BoostRules::default();
        let payload = json!({ "requests": [{ "query": "s3" }] });
        let before = payload.clone();

        let boosted = boost_payload(&rules, Some("/aws/x"), &payload).unwrap();

        assert_eq!(payload, before);
        assert_ne!(boosted, payload);
    }
}
