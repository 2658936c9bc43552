use tracing::{debug, info};

use crate::ca::CaContext;
use crate::cert_type::CertType;
use crate::error::Result;
use crate::intent::CertIntent;
use crate::record::CertRecord;

/// Fill in issuer fields for every certificate intent.
///
/// Returns one new record per input record, in input order. Inputs are never
/// modified. The first invalid record aborts the whole batch.
pub fn transform(certs: &[CertRecord], base_path: &str, ca: &CaContext) -> Result<Vec<CertRecord>> {
    let out = certs
        .iter()
        .enumerate()
        .map(|(index, cert)| default_record(index, cert, base_path, ca))
        .collect::<Result<Vec<_>>>()?;

    info!(records = out.len(), base_path, "Applied certificate defaults");
    Ok(out)
}

/// Derive the output record for a single intent at position `index`.
pub fn default_record(
    index: usize,
    cert: &CertRecord,
    base_path: &str,
    ca: &CaContext,
) -> Result<CertRecord> {
    let cert_type = CertType::resolve(cert);
    let intent = CertIntent::parse(index, cert, &cert_type)?;

    let mut out = cert.clone();
    out.insert(CertType::FIELD, cert_type.to_value());
    intent.overlay(index, &mut out, base_path, ca)?;

    if cert_type.is_known() {
        debug!(index, cert_type = %cert_type, "Derived certificate fields");
    } else {
        debug!(index, cert_type = %cert_type, "Unknown cert_type, passing record through");
    }

    Ok(out.pruned())
}
