use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::{CertDefaultsError, Result};

/// The certificate authority used to sign `sites` and `smime` certificates.
///
/// All three keys are optional at load time so a pipeline that only emits
/// `ca` records does not need them. They are checked when a record that is
/// signed by the CA is processed.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaContext {
    /// Path of the CA certificate.
    #[serde(default, deserialize_with = "string_like")]
    pub cert: Option<String>,

    /// Path of the CA private key.
    #[serde(default, deserialize_with = "string_like")]
    pub key: Option<String>,

    /// Passphrase (or secret reference) of the CA private key.
    #[serde(default, deserialize_with = "string_like")]
    pub pw: Option<String>,
}

/// Borrowed, fully-present CA credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnCaCredentials<'a> {
    pub cert: &'a str,
    pub key: &'a str,
    pub pw: &'a str,
}

impl CaContext {
    pub fn new(cert: impl Into<String>, key: impl Into<String>, pw: impl Into<String>) -> Self {
        Self {
            cert: Some(cert.into()),
            key: Some(key.into()),
            pw: Some(pw.into()),
        }
    }

    /// Credentials for signing record `index`, or the first missing key.
    pub fn credentials(&self, index: usize) -> Result<OwnCaCredentials<'_>> {
        Ok(OwnCaCredentials {
            cert: require(&self.cert, index, "cert")?,
            key: require(&self.key, index, "key")?,
            pw: require(&self.pw, index, "pw")?,
        })
    }
}

/// Accept scalars for CA keys: YAML and env providers parse `pw: 123456`
/// as a number, which must still reach the issuer as a string.
fn string_like<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Str(String),
        Int(i64),
        UInt(u64),
        Float(f64),
        Bool(bool),
    }

    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|v| match v {
        Scalar::Str(s) => s,
        Scalar::Int(n) => n.to_string(),
        Scalar::UInt(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Bool(b) => b.to_string(),
    }))
}

fn require<'a>(value: &'a Option<String>, index: usize, field: &'static str) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or(CertDefaultsError::MissingCaField { index, field })
}

impl fmt::Debug for CaContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaContext")
            .field("cert", &self.cert)
            .field("key", &self.key)
            .field("pw", &self.pw.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
