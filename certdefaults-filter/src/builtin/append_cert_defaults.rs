use crate::filter::{Filter, FilterArgs};
use anyhow::Context;
use certdefaults_core::document::records_from_value;
use certdefaults_core::transform;
use serde_json::Value;

/// `append_cert_defaults` — turns certificate intents into issuer-ready records.
///
/// Input is a sequence of intent mappings; output is a sequence of the same
/// length with path, provider and signing fields filled in.
pub struct AppendCertDefaultsFilter;

pub const NAME: &str = "append_cert_defaults";

impl Filter for AppendCertDefaultsFilter {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "Derive path, provider and signing fields for certificate intents"
    }

    fn apply(&self, input: &Value, args: &FilterArgs) -> anyhow::Result<Value> {
        if !args.extra.is_empty() {
            tracing::debug!(
                ignored = ?args.extra.keys().collect::<Vec<_>>(),
                "append_cert_defaults: ignoring extra arguments"
            );
        }

        let certs = records_from_value(input)?;
        let out = transform(&certs, &args.base_path, &args.ca)?;
        serde_json::to_value(out).context("append_cert_defaults: failed to serialize records")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use certdefaults_core::{CaContext, CertDefaultsError};
    use serde_json::json;

    fn args() -> FilterArgs {
        FilterArgs::new("/pki", CaContext::new("ca.crt", "ca.key", "pw"))
    }

    #[test]
    fn applies_defaults_to_sequence() {
        let out = AppendCertDefaultsFilter
            .apply(&json!([{"host": "A", "common_name": "B"}]), &args())
            .unwrap();
        assert_eq!(
            out,
            json!([{
                "host": "A",
                "common_name": "B",
                "cert_type": "sites",
                "path": "/pki/sites/a/b/b",
                "ownca_path": "ca.crt",
                "ownca_privatekey_path": "ca.key",
                "ownca_privatekey_passphrase": "pw",
                "provider": "ownca",
            }])
        );
    }

    #[test]
    fn rejects_non_sequence_input() {
        let err = AppendCertDefaultsFilter
            .apply(&json!({"host": "a"}), &args())
            .unwrap_err();
        let core = err.downcast_ref::<CertDefaultsError>().unwrap();
        assert!(matches!(core, CertDefaultsError::InvalidDocument(_)));
    }

    #[test]
    fn core_errors_keep_their_type() {
        let err = AppendCertDefaultsFilter
            .apply(&json!([{"cert_type": "smime", "domain": "d"}]), &args())
            .unwrap_err();
        let core = err.downcast_ref::<CertDefaultsError>().unwrap();
        assert!(matches!(
            core,
            CertDefaultsError::MissingRequiredField { index: 0, field: "name", .. }
        ));
    }

    #[test]
    fn extra_arguments_are_ignored() {
        let mut with_extra = args();
        with_extra.extra.insert("owner".into(), json!("root"));
        let input = json!([{"cert_type": "ca"}]);
        assert_eq!(
            AppendCertDefaultsFilter.apply(&input, &with_extra).unwrap(),
            AppendCertDefaultsFilter.apply(&input, &args()).unwrap()
        );
    }
}
