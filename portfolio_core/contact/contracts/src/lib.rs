use std::future::Future;

use portfolio_email_contracts::{DeliveryError, DeliveryReceipt};
use portfolio_models::contact::ContactSubmission;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactService: Send + Sync + 'static {
    /// Whether the delivery provider credential is available. Checked before
    /// the request body is even parsed.
    fn delivery_configured(&self) -> bool;

    /// Forward a validated submission to the site owner via email.
    fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> impl Future<Output = Result<DeliveryReceipt, ContactSendMessageError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSendMessageError {
    #[error("Missing RESEND_API_KEY environment variable.")]
    NotConfigured,
    #[error(transparent)]
    Delivery(DeliveryError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactService {
    pub fn with_delivery_configured(mut self, configured: bool) -> Self {
        self.expect_delivery_configured().return_const(configured);
        self
    }

    pub fn with_send_message(
        mut self,
        submission: ContactSubmission,
        result: Result<DeliveryReceipt, ContactSendMessageError>,
    ) -> Self {
        self.expect_send_message()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
