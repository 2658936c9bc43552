//! Typed view of a certificate intent.
//!
//! A record is parsed into one [`CertIntent`] variant per known `cert_type`,
//! each holding only the fields its derivation reads. Required fields are
//! checked here, before anything is derived.

use serde_json::Value;

use crate::ca::{CaContext, OwnCaCredentials};
use crate::cert_type::CertType;
use crate::error::{CertDefaultsError, Result};
use crate::record::{CertRecord, kind_of};

/// Key usages stamped on every S/MIME certificate, in issuer order.
pub const SMIME_KEY_USAGE: [&str; 3] = ["dataEncipherment", "keyEncipherment", "digitalSignature"];

/// Extended key usages stamped on every S/MIME certificate.
pub const SMIME_EXTENDED_KEY_USAGE: [&str; 2] = ["emailProtection", "clientAuth"];

pub const PROVIDER_SELFSIGNED: &str = "selfsigned";
pub const PROVIDER_OWNCA: &str = "ownca";

/// Validity window as written by the operator. Values are passed through
/// untouched; the issuer interprets them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Validity {
    pub not_before: Option<Value>,
    pub not_after: Option<Value>,
}

impl Validity {
    fn from_record(record: &CertRecord) -> Self {
        Self {
            not_before: record.get("valid_from").cloned(),
            not_after: record.get("valid_till").cloned(),
        }
    }
}

/// Self-signed certificate authority.
#[derive(Debug, Clone, PartialEq)]
pub struct CaIntent {
    pub validity: Validity,
    pub passphrase: Option<Value>,
}

/// Server certificate for `common_name` on `host`.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteIntent {
    pub host: String,
    pub common_name: String,
    pub validity: Validity,
}

/// E-mail certificate for `name@domain`.
#[derive(Debug, Clone, PartialEq)]
pub struct SmimeIntent {
    pub domain: String,
    pub name: String,
    pub validity: Validity,
}

impl SmimeIntent {
    /// Mailbox address, in the case the operator wrote it.
    pub fn full_email(&self) -> String {
        format!("{}@{}", self.name, self.domain)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CertIntent {
    Ca(CaIntent),
    Site(SiteIntent),
    Smime(SmimeIntent),
    /// Unrecognised `cert_type`; nothing is derived.
    Passthrough,
}

impl CertIntent {
    /// Parse record `index` according to its resolved type.
    pub fn parse(index: usize, record: &CertRecord, cert_type: &CertType) -> Result<Self> {
        let intent = match cert_type {
            CertType::Ca => CertIntent::Ca(CaIntent {
                validity: Validity::from_record(record),
                passphrase: record.get("password").cloned(),
            }),
            CertType::Sites => CertIntent::Site(SiteIntent {
                host: required_str(index, cert_type, record, "host")?,
                common_name: required_str(index, cert_type, record, "common_name")?,
                validity: Validity::from_record(record),
            }),
            CertType::Smime => CertIntent::Smime(SmimeIntent {
                domain: required_str(index, cert_type, record, "domain")?,
                name: required_str(index, cert_type, record, "name")?,
                validity: Validity::from_record(record),
            }),
            CertType::Other(_) => CertIntent::Passthrough,
        };
        Ok(intent)
    }

    /// Write the derived fields into `out`, overwriting any existing value.
    pub fn overlay(
        &self,
        index: usize,
        out: &mut CertRecord,
        base_path: &str,
        ca: &CaContext,
    ) -> Result<()> {
        match self {
            CertIntent::Ca(ca_intent) => {
                out.insert("path", join_path(&[base_path, "ca"]));
                out.insert("basic_constraints", vec!["CA:TRUE"]);
                out.insert("cipher", "auto");
                out.insert("selfsigned_not_before", or_null(&ca_intent.validity.not_before));
                out.insert("selfsigned_not_after", or_null(&ca_intent.validity.not_after));
                out.insert("privatekey_passphrase", or_null(&ca_intent.passphrase));
                out.insert("provider", PROVIDER_SELFSIGNED);
            }
            CertIntent::Site(site) => {
                let host = site.host.to_lowercase();
                let cn = site.common_name.to_lowercase();
                out.insert("path", join_path(&[base_path, "sites", &host, &cn, &cn]));
                insert_ownca(out, ca.credentials(index)?, &site.validity);
            }
            CertIntent::Smime(smime) => {
                let domain = smime.domain.to_lowercase();
                let name = smime.name.to_lowercase();
                out.insert("path", join_path(&[base_path, "mails", &domain, &name, &name]));

                let full_email = smime.full_email();
                out.insert("common_name", full_email.as_str());
                out.insert("email_address", full_email.as_str());
                out.insert("subject_alt_name", vec![format!("email:{full_email}")]);
                out.insert("key_usage", SMIME_KEY_USAGE.to_vec());
                out.insert("key_usage_critical", true);
                out.insert("extended_key_usage", SMIME_EXTENDED_KEY_USAGE.to_vec());
                out.insert("use_common_name_for_san", false);

                insert_ownca(out, ca.credentials(index)?, &smime.validity);
            }
            CertIntent::Passthrough => {}
        }
        Ok(())
    }
}

fn insert_ownca(out: &mut CertRecord, creds: OwnCaCredentials<'_>, validity: &Validity) {
    out.insert("ownca_path", creds.cert);
    out.insert("ownca_privatekey_path", creds.key);
    out.insert("ownca_privatekey_passphrase", creds.pw);
    out.insert("ownca_not_before", or_null(&validity.not_before));
    out.insert("ownca_not_after", or_null(&validity.not_after));
    out.insert("provider", PROVIDER_OWNCA);
}

fn join_path(segments: &[&str]) -> String {
    segments.join("/")
}

fn or_null(value: &Option<Value>) -> Value {
    value.clone().unwrap_or(Value::Null)
}

fn required_str(
    index: usize,
    cert_type: &CertType,
    record: &CertRecord,
    field: &'static str,
) -> Result<String> {
    match record.get_present(field) {
        None => Err(CertDefaultsError::MissingRequiredField {
            index,
            cert_type: cert_type.to_string(),
            field,
        }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(CertDefaultsError::InvalidField {
            index,
            field,
            reason: format!("must be a string, got {}", kind_of(other)),
        }),
    }
}
