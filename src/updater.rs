use crate::cloudflare::CloudflareClient;
use crate::config::UpdateRequest;
use crate::error::UpdateError;
use serde_json::json;

/// Terminal result of one update run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Updated,
    NoChange,
}

/// Run the sequential provider flow: authenticate, resolve zone and record,
/// read the published content, and write the new IP only when it differs.
/// At most one write per invocation.
pub fn run(client: &CloudflareClient, request: &UpdateRequest) -> Result<Outcome, UpdateError> {
    let account = client.verify_user()?;
    log::info!("Authenticated against Cloudflare account: {}", account);

    log::info!("Looking up zone ID for domain name: {}", request.domain_name);
    let zone_id = client.zone_id(&request.domain_name)?;
    log::info!("Found DNS zone ID: {}", zone_id);

    log::info!("Looking up DNS record ID for: {}", request.record_name);
    let record_id = client.record_id(&zone_id, &request.record_name)?;
    log::info!("Found DNS record ID: {}", record_id);

    let record = client.record_details(&zone_id, &record_id)?;
    log::info!("Current IP address published in DNS zone: {}", record.content);

    if record.content == request.ip_address {
        log::info!("NOOP: No IP address change detected, skipping update");
        return Ok(Outcome::NoChange);
    }

    log::info!(
        "Updating IP address in DNS zone - {}",
        json!({
            "type": "A",
            "name": request.record_name,
            "content": request.ip_address,
            "ttl": request.ttl,
            "proxied": request.proxied,
        })
    );
    client.update_record(&zone_id, &record_id, request)?;
    log::info!("{} => {}", record.content, request.ip_address);
    log::info!("SUCCESS: The DNS record was updated");

    Ok(Outcome::Updated)
}
