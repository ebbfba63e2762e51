use std::{net::IpAddr, path::Path};

use anyhow::Context;
use config::{File, FileFormat};
use email_address::EmailAddress;
use portfolio_models::Sensitive;
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Environment variable holding the Resend API key.
pub const RESEND_API_KEY_VAR: &str = "RESEND_API_KEY";

/// Load the configuration by merging the given TOML files in order, then
/// overlaying the delivery credential from the environment.
///
/// A missing credential is not an error here; it surfaces per request as a
/// server error response.
pub fn load(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    let mut config: Config = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .build()?
        .try_deserialize()
        .context("Failed to load config")?;

    if let Ok(api_key) = std::env::var(RESEND_API_KEY_VAR) {
        if !api_key.is_empty() {
            config.email.api_key = Some(api_key.into());
        }
    }

    Ok(config)
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    /// Sender in `Name <address>` form.
    pub from: String,
    /// Usually sourced from the `RESEND_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<Sensitive<String>>,
    #[serde(default)]
    pub endpoint_override: Option<Url>,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    /// Site owner address the contact form submissions are forwarded to.
    pub email: EmailAddress,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_default_config() {
        load(&[Path::new(DEFAULT_CONFIG_PATH)]).unwrap();
    }
}
