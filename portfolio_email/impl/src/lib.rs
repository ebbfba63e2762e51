use std::sync::Arc;

use anyhow::Context;
use email_address::EmailAddress;
use portfolio_email_contracts::{
    ContentType, DeliveryError, DeliveryReceipt, Email, EmailSendError, EmailService,
};
use portfolio_models::Sensitive;
use serde::Serialize;
use url::Url;

use crate::http::HttpClient;

mod http;

const API_ENDPOINT: &str = "https://api.resend.com/";

/// [`EmailService`] backed by the Resend transactional email API.
#[derive(Debug, Clone)]
pub struct ResendEmailService {
    config: ResendEmailServiceConfig,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct ResendEmailServiceConfig {
    endpoint: Arc<Url>,
    api_key: Option<Arc<Sensitive<String>>>,
    from: Arc<str>,
}

impl ResendEmailServiceConfig {
    pub fn new(
        endpoint_override: Option<Url>,
        api_key: Option<Sensitive<String>>,
        from: String,
    ) -> Self {
        Self {
            endpoint: endpoint_override
                .unwrap_or_else(|| API_ENDPOINT.parse().unwrap())
                .into(),
            api_key: api_key.map(Into::into),
            from: from.into(),
        }
    }
}

impl ResendEmailService {
    pub fn new(config: ResendEmailServiceConfig) -> Self {
        Self {
            config,
            client: HttpClient::default(),
        }
    }
}

impl EmailService for ResendEmailService {
    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn send(&self, email: Email) -> Result<DeliveryReceipt, EmailSendError> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or(EmailSendError::MissingApiKey)?;

        let (html, text) = match email.content_type {
            ContentType::Html => (Some(email.body.as_str()), None),
            ContentType::Text => (None, Some(email.body.as_str())),
        };

        let request = SendEmailRequest {
            from: &self.config.from,
            to: vec![email.recipient.as_str()],
            subject: &email.subject,
            html,
            text,
            reply_to: email.reply_to.as_ref().map(EmailAddress::as_str),
        };

        let url = self
            .config
            .endpoint
            .join("emails")
            .context("Failed to construct Resend API url")?;

        let response = self
            .client
            .post(url)
            .bearer_auth(&api_key.0)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to the Resend API")?;

        let status = response.status();
        if status.is_success() {
            let receipt = response
                .json::<DeliveryReceipt>()
                .await
                .context("Failed to deserialize Resend confirmation")?;
            tracing::debug!(id = %receipt.id, "email accepted by provider");
            Ok(receipt)
        } else {
            // Resend reports errors as {statusCode, name, message}; anything
            // else is mapped onto the same shape from the HTTP status.
            let error = response
                .json::<DeliveryError>()
                .await
                .unwrap_or_else(|_| DeliveryError {
                    status_code: status.as_u16(),
                    name: "application_error".into(),
                    message: format!("Resend API responded with status {status}"),
                });
            Err(EmailSendError::Provider(error))
        }
    }
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use portfolio_utils::assert_matches;

    use super::*;

    #[test]
    fn default_endpoint() {
        let config = ResendEmailServiceConfig::new(None, None, "Portfolio <a@b.dev>".into());
        assert_eq!(config.endpoint.as_str(), API_ENDPOINT);
    }

    #[test]
    fn endpoint_override() {
        let endpoint = "http://localhost:8058/".parse::<Url>().unwrap();
        let config = ResendEmailServiceConfig::new(
            Some(endpoint.clone()),
            None,
            "Portfolio <a@b.dev>".into(),
        );
        assert_eq!(*config.endpoint, endpoint);
    }

    #[tokio::test]
    async fn send_without_api_key() {
        // Arrange
        let sut = ResendEmailService::new(ResendEmailServiceConfig::new(
            None,
            None,
            "Portfolio <onboarding@resend.dev>".into(),
        ));

        // Act
        let result = sut
            .send(Email {
                recipient: "owner@example.com".parse().unwrap(),
                subject: "Test".into(),
                body: "Hello World!".into(),
                content_type: ContentType::Text,
                reply_to: None,
            })
            .await;

        // Assert
        assert_matches!(result, Err(EmailSendError::MissingApiKey));
    }
}
