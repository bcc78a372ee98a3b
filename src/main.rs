mod args;
mod cloudflare;
mod config;
mod error;
mod ip;
mod logger;
mod response;
mod updater;
mod validate;

use error::UpdateError;
use response::Token;
use std::io::Write;
use std::process;
use updater::Outcome;

/// User-Agent header value for HTTP requests
pub const USER_AGENT: &str = concat!("cfddns/", env!("CARGO_PKG_VERSION"));

fn main() {
    let args = args::Args::new();
    logger::init();

    let token = run(&args);

    // One token on stdout, no trailing newline: router DDNS clients parse
    // this verbatim.
    print!("{}", token);
    let _ = std::io::stdout().flush();
    log::logger().flush();

    process::exit(token.exit_code());
}

fn run(args: &args::Args) -> Token {
    match try_update(args) {
        Ok(outcome) => Token::from_outcome(&outcome),
        Err(error) => {
            log::error!("{}", error);
            Token::from_error(&error)
        }
    }
}

fn try_update(args: &args::Args) -> Result<Outcome, UpdateError> {
    let env = config::EnvConfig::from_env();
    let request = config::resolve(args, &env, || ip::detect(ip::ECHO_SERVICE))?;
    validate::check(&request)?;

    let client = cloudflare::CloudflareClient::new(&request.auth_email, &request.auth_key);
    updater::run(&client, &request)
}
