use crate::error::{UpdateError, ValidationError};
use crate::updater::Outcome;
use std::fmt;

/// DynDNS "standard" protocol response tokens, as consumed by router
/// firmware DDNS clients. Exactly one token is printed per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Record updated successfully
    Good,
    /// Record already matched the target IP
    NoChg,
    /// Record name is not a fully-qualified domain name
    NotFqdn,
    /// Malformed parameter (IP address, TTL or proxy flag)
    BadParam,
    /// Provider rejected the credentials (HTTP 401)
    BadAuth,
    /// Provider connection problem (HTTP 408)
    BadConn,
    /// Provider-side failure (HTTP 500)
    Emergency,
    /// Anything else: unexpected provider status, transport or parse error
    BadAgent,
}

impl Token {
    pub fn as_str(&self) -> &'static str {
        match self {
            Token::Good => "good",
            Token::NoChg => "nochg",
            Token::NotFqdn => "notfqdn",
            Token::BadParam => "badparam",
            Token::BadAuth => "badauth",
            Token::BadConn => "badconn",
            Token::Emergency => "911",
            Token::BadAgent => "badagent",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Token::Good | Token::NoChg => 0,
            _ => 1,
        }
    }

    pub fn from_outcome(outcome: &Outcome) -> Token {
        match outcome {
            Outcome::Updated => Token::Good,
            Outcome::NoChange => Token::NoChg,
        }
    }

    pub fn from_error(error: &UpdateError) -> Token {
        match error {
            UpdateError::Validation(ValidationError::NotFqdn(_)) => Token::NotFqdn,
            UpdateError::Validation(_) => Token::BadParam,
            UpdateError::Provider { status: 401, .. } => Token::BadAuth,
            UpdateError::Provider { status: 408, .. } => Token::BadConn,
            UpdateError::Provider { status: 500, .. } => Token::Emergency,
            _ => Token::BadAgent,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
