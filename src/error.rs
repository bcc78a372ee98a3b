use thiserror::Error;

/// Local, pre-network validation failures. Each maps to its own DynDNS
/// response token and is reported before any provider call is made.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("record name '{0}' is not a fully-qualified domain name")]
    NotFqdn(String),

    #[error("'{0}' is not a valid IPv4 address")]
    InvalidIp(String),

    #[error("'{0}' is not a valid record TTL")]
    InvalidTtl(String),

    #[error("'{0}' is not a valid proxy flag")]
    InvalidProxy(String),
}

/// Everything that can go wrong during one update run.
///
/// The response token is derived from this enum by a single pure function
/// (`response::Token::from_error`), so every failure path emits exactly one
/// token.
#[derive(Error, Debug)]
pub enum UpdateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IP detection failed: {0}")]
    IpDetect(String),

    #[error("{0}")]
    NotFound(String),

    /// HTTP-status-classified Cloudflare error. `code` and `message` are
    /// pulled from the first entry of the API error envelope when present.
    #[error("Cloudflare API error: status {status} - {message} ({code})")]
    Provider {
        status: i32,
        code: u32,
        message: String,
    },

    #[error("transport error: {0}")]
    Transport(#[from] minreq::Error),
}
