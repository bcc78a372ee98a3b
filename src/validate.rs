use crate::config::UpdateRequest;
use crate::error::ValidationError;
use std::net::Ipv4Addr;

/// Record name must look like an FQDN. Deliberately minimal: a single `.`
/// is enough, matching what router DDNS clients expect. No label or length
/// checks.
pub fn require_fqdn(record_name: &str) -> Result<(), ValidationError> {
    if record_name.contains('.') {
        Ok(())
    } else {
        Err(ValidationError::NotFqdn(record_name.to_string()))
    }
}

/// Target IP must be a dotted-quad IPv4 address.
pub fn require_ipv4(ip: &str) -> Result<(), ValidationError> {
    ip.parse::<Ipv4Addr>()
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidIp(ip.to_string()))
}

/// Run both checks against a resolved request. Called before any
/// Cloudflare API call.
pub fn check(request: &UpdateRequest) -> Result<(), ValidationError> {
    require_fqdn(&request.record_name)?;
    require_ipv4(&request.ip_address)?;
    Ok(())
}
