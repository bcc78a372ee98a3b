use crate::error::UpdateError;

/// Public IP-echo service returning the caller's address as a plain-text body.
pub const ECHO_SERVICE: &str = "https://api.ipify.org";

/// Fetch the current public IP address from an echo service.
///
/// The trimmed response body is returned as-is; whether it is a usable IPv4
/// address is the validator's call. Any transport failure or non-2xx status
/// is fatal for the run.
pub fn detect(url: &str) -> Result<String, UpdateError> {
    let response = minreq::get(url)
        .with_header("User-Agent", crate::USER_AGENT)
        .with_timeout(10)
        .send()?;

    if !(200..300).contains(&response.status_code) {
        return Err(UpdateError::IpDetect(format!(
            "echo service returned status {}",
            response.status_code
        )));
    }

    Ok(response.as_str()?.trim().to_string())
}
