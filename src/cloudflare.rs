/// Thin sequential client for the Cloudflare v4 REST API, authenticated
/// with the legacy email + global API key header pair.
use crate::config::UpdateRequest;
use crate::error::UpdateError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

const API_BASE: &str = "https://api.cloudflare.com/client/v4";

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: u32,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    errors: Vec<ApiError>,
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
struct User {
    email: String,
}

#[derive(Debug, Deserialize)]
struct Zone {
    id: String,
}

/// The slice of a DNS record the updater cares about.
#[derive(Debug, Deserialize)]
pub struct DnsRecord {
    pub id: String,
    #[serde(default)]
    pub content: String,
}

pub struct CloudflareClient {
    base: String,
    auth_email: String,
    auth_key: String,
}

impl CloudflareClient {
    pub fn new(auth_email: &str, auth_key: &str) -> Self {
        Self::with_base(API_BASE, auth_email, auth_key)
    }

    /// Point the client at a different API base. Used by tests; the real
    /// endpoint is `API_BASE`.
    pub fn with_base(base: &str, auth_email: &str, auth_key: &str) -> Self {
        CloudflareClient {
            base: base.trim_end_matches('/').to_string(),
            auth_email: auth_email.to_string(),
            auth_key: auth_key.to_string(),
        }
    }

    /// Verify the credentials and return the account email. Only used for
    /// logging; a failure here surfaces like any other provider error.
    pub fn verify_user(&self) -> Result<String, UpdateError> {
        let user: User = self.unwrap_response(self.get("/user")?)?;
        Ok(user.email)
    }

    /// Resolve the zone ID for a registrable domain name.
    pub fn zone_id(&self, domain: &str) -> Result<String, UpdateError> {
        let zones: Vec<Zone> = self.unwrap_response(self.get(&format!("/zones?name={}", domain))?)?;
        zones
            .into_iter()
            .next()
            .map(|zone| zone.id)
            .ok_or_else(|| UpdateError::NotFound(format!("no zone found for domain '{}'", domain)))
    }

    /// Resolve the record ID for the A record with the given name.
    pub fn record_id(&self, zone_id: &str, record_name: &str) -> Result<String, UpdateError> {
        let records: Vec<DnsRecord> = self.unwrap_response(self.get(&format!(
            "/zones/{}/dns_records?type=A&name={}",
            zone_id, record_name
        ))?)?;
        records
            .into_iter()
            .next()
            .map(|record| record.id)
            .ok_or_else(|| {
                UpdateError::NotFound(format!("no A record named '{}' in zone", record_name))
            })
    }

    /// Read the current record details, including its published content.
    pub fn record_details(&self, zone_id: &str, record_id: &str) -> Result<DnsRecord, UpdateError> {
        self.unwrap_response(self.get(&format!("/zones/{}/dns_records/{}", zone_id, record_id))?)
    }

    /// Overwrite the record with the target IP, TTL and proxy flag.
    pub fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        request: &UpdateRequest,
    ) -> Result<DnsRecord, UpdateError> {
        let body = json!({
            "type": "A",
            "name": request.record_name,
            "content": request.ip_address,
            "ttl": request.ttl,
            "proxied": request.proxied,
        });

        let response = minreq::put(format!(
            "{}/zones/{}/dns_records/{}",
            self.base, zone_id, record_id
        ))
        .with_header("X-Auth-Email", &self.auth_email)
        .with_header("X-Auth-Key", &self.auth_key)
        .with_header("Content-Type", "application/json")
        .with_header("User-Agent", crate::USER_AGENT)
        .with_json(&body)?
        .send()?;

        self.unwrap_response(response)
    }

    fn get(&self, path_and_query: &str) -> Result<minreq::Response, UpdateError> {
        Ok(minreq::get(format!("{}{}", self.base, path_and_query))
            .with_header("X-Auth-Email", &self.auth_email)
            .with_header("X-Auth-Key", &self.auth_key)
            .with_header("Content-Type", "application/json")
            .with_header("User-Agent", crate::USER_AGENT)
            .send()?)
    }

    /// Classify the HTTP status, then unwrap the Cloudflare result envelope.
    fn unwrap_response<T: DeserializeOwned>(
        &self,
        response: minreq::Response,
    ) -> Result<T, UpdateError> {
        let status = response.status_code;
        if !(200..300).contains(&status) {
            return Err(provider_error(status, &response));
        }

        let envelope: ApiResponse<T> = response.json()?;
        if !envelope.success {
            return Err(envelope_error(status, envelope.errors));
        }

        envelope
            .result
            .ok_or_else(|| UpdateError::NotFound("empty result from Cloudflare".to_string()))
    }
}

fn provider_error(status: i32, response: &minreq::Response) -> UpdateError {
    // Best-effort extraction of the Cloudflare error envelope; transport
    // bodies that are not JSON still produce a usable message.
    match response.json::<ApiResponse<serde_json::Value>>() {
        Ok(envelope) if !envelope.errors.is_empty() => envelope_error(status, envelope.errors),
        _ => UpdateError::Provider {
            status,
            code: 0,
            message: response
                .as_str()
                .map(|body| body.trim().to_string())
                .unwrap_or_default(),
        },
    }
}

fn envelope_error(status: i32, errors: Vec<ApiError>) -> UpdateError {
    let first = errors.into_iter().next().unwrap_or(ApiError {
        code: 0,
        message: "unknown error".to_string(),
    });
    UpdateError::Provider {
        status,
        code: first.code,
        message: first.message,
    }
}
