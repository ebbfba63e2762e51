use std::sync::Arc;

use portfolio_api_rest::RestServer;
use portfolio_config::Config;
use portfolio_core_contact_impl::{ContactServiceConfig, ContactServiceImpl};
use portfolio_email_contracts::EmailService;
use portfolio_templates_impl::TemplateServiceImpl;
use tracing::{info, warn};

use crate::email;

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let email = email::client(&config.email);
    if !email.is_configured() {
        warn!("RESEND_API_KEY is not set; contact submissions will be rejected");
    }

    let contact = ContactServiceImpl::new(
        email,
        TemplateServiceImpl::new(),
        ContactServiceConfig {
            email: Arc::new(config.contact.email),
        },
    );

    let server = RestServer::new(contact);
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve(config.http.host, config.http.port).await
}
