use clap::Parser;

#[derive(Parser, Debug, Clone, Default)]
#[command(version, about = "Cloudflare dynamic DNS updater with DynDNS-style router responses", long_about = None)]
pub struct Args {
    /// Cloudflare account email (router/plugin invocation)
    pub auth_email: Option<String>,

    /// Cloudflare API key
    pub auth_key: Option<String>,

    /// DNS record name to update (FQDN)
    pub record_name: Option<String>,

    /// IPv4 address to publish
    pub ip_address: Option<String>,
}

impl Args {
    pub fn new() -> Self {
        Self::parse()
    }
}
