use serde_json::Value;
use std::fmt;

use crate::record::CertRecord;

/// Kind of certificate an intent describes, taken from its `cert_type` field.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CertType {
    /// Self-signed certificate authority.
    Ca,
    /// Server certificate signed by the own CA.
    #[default]
    Sites,
    /// E-mail (S/MIME) certificate signed by the own CA.
    Smime,
    /// Anything else. Carried verbatim and left without derived fields.
    Other(Value),
}

impl CertType {
    pub const FIELD: &'static str = "cert_type";

    /// Resolve the type of a record. Absent or null means `sites`.
    pub fn resolve(record: &CertRecord) -> Self {
        match record.get(Self::FIELD) {
            None | Some(Value::Null) => CertType::Sites,
            Some(Value::String(name)) => Self::from_name(name),
            Some(other) => CertType::Other(other.clone()),
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "ca" => CertType::Ca,
            "sites" => CertType::Sites,
            "smime" => CertType::Smime,
            other => CertType::Other(Value::String(other.to_string())),
        }
    }

    /// The value written back under `cert_type`.
    pub fn to_value(&self) -> Value {
        match self {
            CertType::Ca => Value::from("ca"),
            CertType::Sites => Value::from("sites"),
            CertType::Smime => Value::from("smime"),
            CertType::Other(v) => v.clone(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, CertType::Other(_))
    }
}

impl fmt::Display for CertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CertType::Ca => f.write_str("ca"),
            CertType::Sites => f.write_str("sites"),
            CertType::Smime => f.write_str("smime"),
            CertType::Other(Value::String(s)) => f.write_str(s),
            CertType::Other(v) => write!(f, "{v}"),
        }
    }
}
