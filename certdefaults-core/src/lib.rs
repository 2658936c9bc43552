pub mod ca;
pub mod cert_type;
pub mod config;
pub mod defaults;
pub mod document;
pub mod error;
pub mod intent;
pub mod record;

pub use ca::CaContext;
pub use cert_type::CertType;
pub use config::PipelineConfig;
pub use defaults::transform;
pub use error::{CertDefaultsError, Result};
pub use intent::CertIntent;
pub use record::CertRecord;
