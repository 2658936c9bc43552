use figment::{Figment, providers::{Env, Format, Yaml}};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ca::CaContext;
use crate::error::{CertDefaultsError, Result};

/// Environment prefix for configuration overrides, e.g. `CERTDEFAULTS_CA__PW`.
pub const ENV_PREFIX: &str = "CERTDEFAULTS_";

/// Shared context for one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory under which every certificate path is placed.
    #[serde(default = "default_base_path")]
    pub base_path: String,

    /// Authority that signs `sites` and `smime` certificates.
    #[serde(default)]
    pub ca: CaContext,

    /// Format of the emitted document.
    #[serde(default)]
    pub output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    #[default]
    Yaml,
}

// ── Defaults ──────────────────────────────────────────────────

fn default_base_path() -> String { "/etc/ssl/certdefaults".into() }

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            ca: CaContext::default(),
            output: OutputFormat::default(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from YAML file + env overrides.
    pub fn load(path: &Path) -> Result<Self> {
        Self::figment(path)
            .extract()
            .map_err(|e| CertDefaultsError::Config(e.to_string()))
    }

    fn figment(path: &Path) -> Figment {
        Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    // ── Default values ────────────────────────────────────────────

    #[test]
    fn default_config_has_expected_values() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.base_path, "/etc/ssl/certdefaults");
        assert_eq!(cfg.ca, CaContext::default());
        assert_eq!(cfg.output, OutputFormat::Yaml);
    }

    // ── OutputFormat serde ────────────────────────────────────────

    #[test]
    fn output_format_serializes_to_lowercase() {
        assert_eq!(serde_json::to_string(&OutputFormat::Json).unwrap(), "\"json\"");
        assert_eq!(serde_json::to_string(&OutputFormat::Yaml).unwrap(), "\"yaml\"");
    }

    // ── PipelineConfig::load() ────────────────────────────────────

    // Jail serializes tests that touch the process environment.

    #[test]
    fn load_from_valid_yaml_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "certdefaults.yaml",
                "base_path: /srv/pki\nca:\n  cert: /srv/pki/ca/ca.crt\n  key: /srv/pki/ca/ca.key\n  pw: changeme\n",
            )?;
            let cfg = PipelineConfig::load(Path::new("certdefaults.yaml")).unwrap();
            assert_eq!(cfg.base_path, "/srv/pki");
            assert_eq!(cfg.ca, CaContext::new("/srv/pki/ca/ca.crt", "/srv/pki/ca/ca.key", "changeme"));
            // Defaults still apply for unspecified fields
            assert_eq!(cfg.output, OutputFormat::Yaml);
            Ok(())
        });
    }

    #[test]
    fn load_partial_ca() {
        Jail::expect_with(|jail| {
            jail.create_file("certdefaults.yaml", "output: json\nca:\n  cert: ca.pem\n")?;
            let cfg = PipelineConfig::load(Path::new("certdefaults.yaml")).unwrap();
            assert_eq!(cfg.output, OutputFormat::Json);
            assert_eq!(cfg.ca.cert.as_deref(), Some("ca.pem"));
            assert!(cfg.ca.pw.is_none());
            assert_eq!(cfg.base_path, "/etc/ssl/certdefaults");
            Ok(())
        });
    }

    #[test]
    fn load_numeric_passphrase_from_yaml() {
        Jail::expect_with(|jail| {
            jail.create_file("certdefaults.yaml", "ca:\n  cert: ca.pem\n  key: ca.key\n  pw: 123456\n")?;
            let cfg = PipelineConfig::load(Path::new("certdefaults.yaml")).unwrap();
            assert_eq!(cfg.ca.pw.as_deref(), Some("123456"));
            Ok(())
        });
    }

    #[test]
    fn load_numeric_passphrase_from_env() {
        Jail::expect_with(|jail| {
            jail.create_file("certdefaults.yaml", "base_path: /srv/pki\n")?;
            jail.set_env("CERTDEFAULTS_CA__PW", "123456");
            let cfg = PipelineConfig::load(Path::new("certdefaults.yaml")).unwrap();
            assert_eq!(cfg.base_path, "/srv/pki");
            assert_eq!(cfg.ca.pw.as_deref(), Some("123456"));
            Ok(())
        });
    }

    #[test]
    fn env_overrides_yaml() {
        Jail::expect_with(|jail| {
            jail.create_file("certdefaults.yaml", "base_path: /srv/pki\nca:\n  cert: file.pem\n")?;
            jail.set_env("CERTDEFAULTS_BASE_PATH", "/opt/pki");
            jail.set_env("CERTDEFAULTS_CA__CERT", "env.pem");
            let cfg = PipelineConfig::load(Path::new("certdefaults.yaml")).unwrap();
            assert_eq!(cfg.base_path, "/opt/pki");
            assert_eq!(cfg.ca.cert.as_deref(), Some("env.pem"));
            Ok(())
        });
    }

    #[test]
    fn load_rejects_unknown_output_format() {
        Jail::expect_with(|jail| {
            jail.create_file("certdefaults.yaml", "output: toml\n")?;
            let err = PipelineConfig::load(Path::new("certdefaults.yaml")).unwrap_err();
            assert!(matches!(err, CertDefaultsError::Config(_)));
            Ok(())
        });
    }
}
