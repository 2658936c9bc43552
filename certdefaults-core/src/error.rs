use thiserror::Error;

/// Unified error type for certdefaults.
///
/// Every per-record variant carries the zero-based index of the offending
/// record so the caller can point at it in the source document.
#[derive(Error, Debug)]
pub enum CertDefaultsError {
    #[error("record {index}: {cert_type} certificate is missing required field '{field}'")]
    MissingRequiredField {
        index: usize,
        cert_type: String,
        field: &'static str,
    },

    #[error("record {index}: field '{field}' {reason}")]
    InvalidField {
        index: usize,
        field: &'static str,
        reason: String,
    },

    #[error("record {index}: CA descriptor is missing key '{field}'")]
    MissingCaField { index: usize, field: &'static str },

    #[error("record {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CertDefaultsError {
    /// Index of the record that caused the failure, if the error is per-record.
    pub fn record_index(&self) -> Option<usize> {
        match self {
            CertDefaultsError::MissingRequiredField { index, .. }
            | CertDefaultsError::InvalidField { index, .. }
            | CertDefaultsError::MissingCaField { index, .. }
            | CertDefaultsError::InvalidRecord { index, .. } => Some(*index),
            _ => None,
        }
    }
}

pub type Result<T, E = CertDefaultsError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_field_message_names_record_and_field() {
        let err = CertDefaultsError::MissingRequiredField {
            index: 3,
            cert_type: "sites".into(),
            field: "host",
        };
        assert_eq!(
            err.to_string(),
            "record 3: sites certificate is missing required field 'host'"
        );
        assert_eq!(err.record_index(), Some(3));
    }

    #[test]
    fn missing_ca_field_message() {
        let err = CertDefaultsError::MissingCaField { index: 0, field: "pw" };
        assert_eq!(err.to_string(), "record 0: CA descriptor is missing key 'pw'");
    }

    #[test]
    fn document_errors_have_no_record_index() {
        let err = CertDefaultsError::InvalidDocument("expected a sequence".into());
        assert!(err.record_index().is_none());
        let err = CertDefaultsError::Config("bad".into());
        assert!(err.record_index().is_none());
    }

    #[test]
    fn yaml_parse_errors_convert() {
        let yaml_err = serde_yaml::from_str::<serde_json::Value>("[unclosed").unwrap_err();
        let err: CertDefaultsError = yaml_err.into();
        assert!(matches!(err, CertDefaultsError::Yaml(_)));
        assert!(err.record_index().is_none());
    }
}
