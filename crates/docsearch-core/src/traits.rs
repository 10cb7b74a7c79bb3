use serde_json::Value;

/// A search backend client. The payload and response schemas belong to the
/// backend and are treated as opaque JSON; wrappers must preserve them
/// field-for-field.
pub trait SearchClient: Send + Sync {
    fn search(&self, payload: &Value) -> anyhow::Result<Value>;
}

/// Supplies the current navigation path, read fresh on every call.
///
/// Returns `None` when no navigation context exists in the current
/// execution environment (e.g. non-interactive evaluation).
pub trait ContextSource: Send + Sync {
    fn current_path(&self) -> Option<String>;
}

/// A fixed navigation context. Covers both a known page path and the
/// no-context case; hosts with live navigation supply their own source.
#[derive(Debug, Clone)]
pub struct StaticContext {
    path: Option<String>,
}

impl StaticContext {
    pub fn at(path: impl Into<String>) -> Self {
        Self { path: Some(path.into()) }
    }

    pub fn none() -> Self {
        Self { path: None }
    }
}

impl ContextSource for StaticContext {
    fn current_path(&self) -> Option<String> {
        self.path.clone()
    }
}
