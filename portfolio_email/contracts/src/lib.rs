use std::future::Future;

use email_address::EmailAddress;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailService: Send + Sync + 'static {
    /// Whether the delivery provider credential is available.
    fn is_configured(&self) -> bool;

    /// Send the email and return the provider's confirmation.
    fn send(
        &self,
        email: Email,
    ) -> impl Future<Output = Result<DeliveryReceipt, EmailSendError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub recipient: EmailAddress,
    pub subject: String,
    pub body: String,
    pub content_type: ContentType,
    pub reply_to: Option<EmailAddress>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Text,
    Html,
}

/// Confirmation payload returned by the delivery provider on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    pub id: String,
}

/// Error object reported by the delivery provider, forwarded as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{name}: {message}")]
pub struct DeliveryError {
    pub status_code: u16,
    pub name: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum EmailSendError {
    #[error("Missing RESEND_API_KEY environment variable.")]
    MissingApiKey,
    #[error(transparent)]
    Provider(#[from] DeliveryError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockEmailService {
    pub fn with_is_configured(mut self, configured: bool) -> Self {
        self.expect_is_configured().return_const(configured);
        self
    }

    pub fn with_send(
        mut self,
        email: Email,
        result: Result<DeliveryReceipt, EmailSendError>,
    ) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
