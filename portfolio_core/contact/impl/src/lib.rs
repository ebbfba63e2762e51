use std::sync::Arc;

use email_address::EmailAddress;
use portfolio_core_contact_contracts::{ContactSendMessageError, ContactService};
use portfolio_email_contracts::{ContentType, DeliveryReceipt, Email, EmailSendError, EmailService};
use portfolio_models::contact::ContactSubmission;
use portfolio_templates_contracts::{ContactMessageTemplate, TemplateService};

const SUBJECT: &str = "Contact me from portfolio";

#[derive(Debug, Clone)]
pub struct ContactServiceImpl<Email, Templates> {
    email: Email,
    templates: Templates,
    config: ContactServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ContactServiceConfig {
    /// Site owner address the submissions are forwarded to.
    pub email: Arc<EmailAddress>,
}

impl<Email, Templates> ContactServiceImpl<Email, Templates> {
    pub fn new(email: Email, templates: Templates, config: ContactServiceConfig) -> Self {
        Self {
            email,
            templates,
            config,
        }
    }
}

impl<EmailS, TemplateS> ContactService for ContactServiceImpl<EmailS, TemplateS>
where
    EmailS: EmailService,
    TemplateS: TemplateService,
{
    fn delivery_configured(&self) -> bool {
        self.email.is_configured()
    }

    async fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> Result<DeliveryReceipt, ContactSendMessageError> {
        let body = self.templates.render(&ContactMessageTemplate {
            full_name: (*submission.full_name).clone(),
            email: submission.email.to_string(),
            message: (*submission.message).clone(),
        })?;

        let email = Email {
            recipient: (*self.config.email).clone(),
            subject: SUBJECT.into(),
            body,
            content_type: ContentType::Html,
            reply_to: Some(submission.email),
        };

        self.email.send(email).await.map_err(|err| match err {
            EmailSendError::MissingApiKey => ContactSendMessageError::NotConfigured,
            EmailSendError::Provider(err) => ContactSendMessageError::Delivery(err),
            EmailSendError::Other(err) => ContactSendMessageError::Other(err),
        })
    }
}

#[cfg(test)]
mod tests {
    use portfolio_email_contracts::{DeliveryError, DeliveryReceipt, MockEmailService};
    use portfolio_templates_contracts::MockTemplateService;
    use portfolio_utils::assert_matches;

    use super::*;

    fn submission() -> ContactSubmission {
        ContactSubmission {
            full_name: "Jane Doe".to_owned().try_into().unwrap(),
            email: "jane@example.com".parse().unwrap(),
            message: "Hello, I would like to connect.".to_owned().try_into().unwrap(),
        }
    }

    fn template() -> ContactMessageTemplate {
        ContactMessageTemplate {
            full_name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            message: "Hello, I would like to connect.".into(),
        }
    }

    fn expected_email() -> Email {
        Email {
            recipient: "owner@example.com".parse().unwrap(),
            subject: "Contact me from portfolio".into(),
            body: "<rendered>".into(),
            content_type: ContentType::Html,
            reply_to: Some("jane@example.com".parse().unwrap()),
        }
    }

    fn config() -> ContactServiceConfig {
        ContactServiceConfig {
            email: Arc::new("owner@example.com".parse().unwrap()),
        }
    }

    #[tokio::test]
    async fn ok() {
        // Arrange
        let email = MockEmailService::new().with_send(
            expected_email(),
            Ok(DeliveryReceipt { id: "49a3999c-0ce1-4ea6-ab68-afcd6dc2e794".into() }),
        );
        let templates = MockTemplateService::new().with_render(template(), "<rendered>".into());

        let sut = ContactServiceImpl::new(email, templates, config());

        // Act
        let result = sut.send_message(submission()).await;

        // Assert
        assert_eq!(
            result.unwrap(),
            DeliveryReceipt { id: "49a3999c-0ce1-4ea6-ab68-afcd6dc2e794".into() }
        );
    }

    #[tokio::test]
    async fn provider_error() {
        // Arrange
        let provider_error = DeliveryError {
            status_code: 403,
            name: "validation_error".into(),
            message: "The `from` address is not allowed.".into(),
        };
        let email = MockEmailService::new().with_send(
            expected_email(),
            Err(EmailSendError::Provider(provider_error.clone())),
        );
        let templates = MockTemplateService::new().with_render(template(), "<rendered>".into());

        let sut = ContactServiceImpl::new(email, templates, config());

        // Act
        let result = sut.send_message(submission()).await;

        // Assert
        assert_matches!(result, Err(ContactSendMessageError::Delivery(err)) if *err == provider_error);
    }

    #[tokio::test]
    async fn missing_api_key() {
        // Arrange
        let email = MockEmailService::new()
            .with_send(expected_email(), Err(EmailSendError::MissingApiKey));
        let templates = MockTemplateService::new().with_render(template(), "<rendered>".into());

        let sut = ContactServiceImpl::new(email, templates, config());

        // Act
        let result = sut.send_message(submission()).await;

        // Assert
        assert_matches!(result, Err(ContactSendMessageError::NotConfigured));
    }

    #[tokio::test]
    async fn delivery_configured_delegates() {
        for configured in [true, false] {
            // Arrange
            let email = MockEmailService::new().with_is_configured(configured);
            let templates = MockTemplateService::new();

            let sut = ContactServiceImpl::new(email, templates, config());

            // Act + Assert
            assert_eq!(sut.delivery_configured(), configured);
        }
    }
}
