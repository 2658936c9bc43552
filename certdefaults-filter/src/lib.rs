pub mod builtin;
pub mod filter;
pub mod registry;

use registry::FilterRegistry;
use std::sync::Arc;

/// Register all built-in filters.
pub fn register_all(registry: &mut FilterRegistry) {
    registry.register(Arc::new(builtin::append_cert_defaults::AppendCertDefaultsFilter));
}
