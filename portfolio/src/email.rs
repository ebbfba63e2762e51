use portfolio_config::EmailConfig;
use portfolio_email_impl::{ResendEmailService, ResendEmailServiceConfig};

/// Construct the Resend delivery client.
pub fn client(config: &EmailConfig) -> ResendEmailService {
    ResendEmailService::new(ResendEmailServiceConfig::new(
        config.endpoint_override.clone(),
        config.api_key.clone(),
        config.from.clone(),
    ))
}
