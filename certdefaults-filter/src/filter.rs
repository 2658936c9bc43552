use certdefaults_core::CaContext;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Arguments shared by every filter invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterArgs {
    /// Directory under which certificate paths are placed.
    pub base_path: String,

    /// Signing authority for CA-signed certificates.
    #[serde(default)]
    pub ca: CaContext,

    /// Extra keyword arguments. Accepted for compatibility, not interpreted.
    #[serde(default, flatten)]
    pub extra: Map<String, Value>,
}

impl FilterArgs {
    pub fn new(base_path: impl Into<String>, ca: CaContext) -> Self {
        Self {
            base_path: base_path.into(),
            ca,
            extra: Map::new(),
        }
    }
}

/// The core Filter trait. Every named pipeline filter implements this.
pub trait Filter: Send + Sync {
    /// Filter name (must be unique)
    fn name(&self) -> &str;

    /// One-line description shown by `--list-filters`.
    fn description(&self) -> &str {
        ""
    }

    /// Apply the filter to an untyped pipeline value.
    fn apply(&self, input: &Value, args: &FilterArgs) -> anyhow::Result<Value>;
}
