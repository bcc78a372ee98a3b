/// Configuration resolution.
///
/// The updater accepts two input sources and normalizes both into a single
/// `UpdateRequest` before validation runs:
/// - router/plugin invocation: four positional arguments used verbatim
/// - cron invocation: environment variables plus a public IP-echo lookup
use crate::args::Args;
use crate::error::{UpdateError, ValidationError};
use crate::validate;
use std::env;

/// One canonical update request, whatever the input source.
#[derive(Debug, Clone)]
pub struct UpdateRequest {
    pub auth_email: String,
    pub auth_key: String,
    pub record_name: String,
    /// Passed through verbatim as the record content once validated.
    pub ip_address: String,
    /// Registrable zone name, used for the zone ID lookup.
    pub domain_name: String,
    /// 1 means "automatic" on Cloudflare.
    pub ttl: u32,
    pub proxied: bool,
}

/// Raw environment configuration, untyped. Typing of TTL and proxy flag
/// happens in `resolve` so malformed values surface as validation errors.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub domain_name: Option<String>,
    pub auth_email: Option<String>,
    pub auth_key: Option<String>,
    pub record_name: Option<String>,
    pub record_ttl: Option<String>,
    pub record_proxy: Option<String>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        EnvConfig {
            domain_name: env::var("DOMAIN_NAME").ok(),
            auth_email: env::var("AUTH_EMAIL").ok(),
            auth_key: env::var("AUTH_KEY").ok(),
            record_name: env::var("RECORD_NAME").ok(),
            record_ttl: env::var("RECORD_TTL").ok(),
            record_proxy: env::var("RECORD_PROXY").ok(),
        }
    }
}

/// Resolve args + environment into one `UpdateRequest`.
///
/// `detect_ip` is only invoked in environment mode, and only after the
/// record name has passed the FQDN check, so an invalid record name never
/// causes a network call.
pub fn resolve<F>(args: &Args, env: &EnvConfig, detect_ip: F) -> Result<UpdateRequest, UpdateError>
where
    F: FnOnce() -> Result<String, UpdateError>,
{
    let ttl = parse_ttl(env.record_ttl.as_deref())?;
    let proxied = parse_proxy(env.record_proxy.as_deref())?;

    let (auth_email, auth_key, record_name, ip_address) = match (
        &args.auth_email,
        &args.auth_key,
        &args.record_name,
        &args.ip_address,
    ) {
        // Router/plugin invocation: all four arguments, taken verbatim.
        (Some(email), Some(key), Some(record), Some(ip)) => (
            email.clone(),
            key.clone(),
            record.clone(),
            ip.clone(),
        ),
        // Anything less falls back to cron/environment mode.
        _ => {
            let email = require(env.auth_email.as_ref(), "AUTH_EMAIL")?;
            let key = require(env.auth_key.as_ref(), "AUTH_KEY")?;
            let record = require(env.record_name.as_ref(), "RECORD_NAME")?;
            validate::require_fqdn(&record)?;

            log::info!("Detecting public IP address...");
            let ip = detect_ip()?;
            log::info!("Detected public IP address from remote service: {}", ip);

            (email, key, record, ip)
        }
    };

    let domain_name = env
        .domain_name
        .clone()
        .unwrap_or_else(|| registrable_domain(&record_name));

    Ok(UpdateRequest {
        auth_email,
        auth_key,
        record_name,
        ip_address,
        domain_name,
        ttl,
        proxied,
    })
}

fn require(value: Option<&String>, name: &str) -> Result<String, UpdateError> {
    value
        .filter(|v| !v.is_empty())
        .cloned()
        .ok_or_else(|| UpdateError::Config(format!("{} is not set", name)))
}

fn parse_ttl(raw: Option<&str>) -> Result<u32, ValidationError> {
    match raw {
        None => Ok(1),
        Some(s) => s
            .trim()
            .parse::<u32>()
            .map_err(|_| ValidationError::InvalidTtl(s.to_string())),
    }
}

fn parse_proxy(raw: Option<&str>) -> Result<bool, ValidationError> {
    match raw {
        None => Ok(true),
        Some(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(ValidationError::InvalidProxy(s.to_string())),
        },
    }
}

/// Registrable root domain fallback when DOMAIN_NAME is unset: the last two
/// labels of the record name. A name with fewer labels is returned as-is and
/// left for validation to reject.
fn registrable_domain(record_name: &str) -> String {
    let mut labels = record_name.rsplit('.');
    match (labels.next(), labels.next()) {
        (Some(tld), Some(sld)) if !sld.is_empty() => format!("{}.{}", sld, tld),
        _ => record_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plugin_args() -> Args {
        Args {
            auth_email: Some("user@example.com".to_string()),
            auth_key: Some("secret-key".to_string()),
            record_name: Some("home.example.com".to_string()),
            ip_address: Some("1.2.3.5".to_string()),
        }
    }

    fn full_env() -> EnvConfig {
        EnvConfig {
            domain_name: Some("example.com".to_string()),
            auth_email: Some("env@example.com".to_string()),
            auth_key: Some("env-key".to_string()),
            record_name: Some("home.example.com".to_string()),
            record_ttl: None,
            record_proxy: None,
        }
    }

    fn no_lookup() -> Result<String, UpdateError> {
        panic!("IP echo lookup must not run");
    }

    #[test]
    fn test_plugin_invocation_uses_args_verbatim() {
        let request = resolve(&plugin_args(), &EnvConfig::default(), no_lookup).unwrap();
        assert_eq!(request.auth_email, "user@example.com");
        assert_eq!(request.auth_key, "secret-key");
        assert_eq!(request.record_name, "home.example.com");
        assert_eq!(request.ip_address, "1.2.3.5");
        assert_eq!(request.ttl, 1);
        assert!(request.proxied);
    }

    #[test]
    fn test_plugin_invocation_skips_ip_lookup() {
        // no_lookup panics if called; resolution must not reach it
        let result = resolve(&plugin_args(), &full_env(), no_lookup);
        assert!(result.is_ok());
    }

    #[test]
    fn test_env_invocation_performs_one_lookup() {
        let request = resolve(&Args::default(), &full_env(), || Ok("9.9.9.9".to_string()))
            .unwrap();
        assert_eq!(request.auth_email, "env@example.com");
        assert_eq!(request.ip_address, "9.9.9.9");
        assert_eq!(request.domain_name, "example.com");
    }

    #[test]
    fn test_partial_args_fall_back_to_env() {
        let args = Args {
            auth_email: Some("user@example.com".to_string()),
            ..Default::default()
        };
        let request = resolve(&args, &full_env(), || Ok("9.9.9.9".to_string())).unwrap();
        assert_eq!(request.auth_email, "env@example.com");
    }

    #[test]
    fn test_env_mode_checks_fqdn_before_lookup() {
        let mut env = full_env();
        env.record_name = Some("nohost".to_string());
        let err = resolve(&Args::default(), &env, no_lookup).unwrap_err();
        assert!(matches!(
            err,
            UpdateError::Validation(ValidationError::NotFqdn(_))
        ));
    }

    #[test]
    fn test_missing_env_credentials() {
        let mut env = full_env();
        env.auth_key = None;
        let err = resolve(&Args::default(), &env, no_lookup).unwrap_err();
        assert!(matches!(err, UpdateError::Config(_)));
        assert!(err.to_string().contains("AUTH_KEY"));
    }

    #[test]
    fn test_ttl_and_proxy_parsing() {
        let mut env = full_env();
        env.record_ttl = Some("300".to_string());
        env.record_proxy = Some("false".to_string());
        let request = resolve(&Args::default(), &env, || Ok("9.9.9.9".to_string())).unwrap();
        assert_eq!(request.ttl, 300);
        assert!(!request.proxied);
    }

    #[test]
    fn test_proxy_flag_spellings() {
        assert!(parse_proxy(Some("TRUE")).unwrap());
        assert!(parse_proxy(Some("1")).unwrap());
        assert!(parse_proxy(Some("on")).unwrap());
        assert!(!parse_proxy(Some("0")).unwrap());
        assert!(!parse_proxy(Some("No")).unwrap());
        assert!(parse_proxy(None).unwrap());
    }

    #[test]
    fn test_malformed_ttl_is_rejected() {
        let err = parse_ttl(Some("soon")).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidTtl(_)));
        let err = parse_proxy(Some("maybe")).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidProxy(_)));
    }

    #[test]
    fn test_registrable_domain_fallback() {
        assert_eq!(registrable_domain("home.example.com"), "example.com");
        assert_eq!(registrable_domain("example.com"), "example.com");
        assert_eq!(registrable_domain("a.b.c.example.org"), "example.org");
        assert_eq!(registrable_domain("nohost"), "nohost");
    }

    #[test]
    fn test_domain_name_env_wins_over_derivation() {
        let mut env = full_env();
        env.domain_name = Some("other.net".to_string());
        let request = resolve(&plugin_args(), &env, no_lookup).unwrap();
        assert_eq!(request.domain_name, "other.net");
    }
}
