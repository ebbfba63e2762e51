use portfolio_email_contracts::DeliveryError;
use serde::Serialize;

/// Response body used when the delivery provider reports an error; the
/// provider's error object is forwarded unmodified.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResendError {
    #[serde(rename = "resendError")]
    pub resend_error: DeliveryError,
}
