use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::{
    api::funding,
    client::ApiClient,
    error::{ApiError, ApiResult},
    feedback::Notification,
    models::NewFunding,
    session::Identity,
};

pub const ANONYMOUS_NAME: &str = "Anonymous";
pub const ANONYMOUS_EMAIL: &str = "anonymous@bloodaid.com";
pub const SUCCEEDED: &str = "succeeded";

/// PaymentConfirmation
///
/// What the gateway reports after confirming a card payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConfirmation {
    pub id: String,
    pub status: String,
}

impl PaymentConfirmation {
    pub fn succeeded(&self) -> bool {
        self.status == SUCCEEDED
    }
}

/// PaymentGateway
///
/// Card confirmation against a payment-intent client secret.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn confirm_card_payment(&self, client_secret: &str) -> ApiResult<PaymentConfirmation>;
}

/// MockPaymentGateway
///
/// Answers every confirmation with a fixed result and records the secrets it saw.
#[derive(Clone)]
pub struct MockPaymentGateway {
    result: ApiResult<PaymentConfirmation>,
    secrets: Arc<Mutex<Vec<String>>>,
}

impl MockPaymentGateway {
    pub fn succeeding(payment_id: impl Into<String>) -> Self {
        Self::with_result(Ok(PaymentConfirmation {
            id: payment_id.into(),
            status: SUCCEEDED.to_string(),
        }))
    }

    pub fn declining(message: impl Into<String>) -> Self {
        Self::with_result(Err(ApiError::Payment(message.into())))
    }

    pub fn with_result(result: ApiResult<PaymentConfirmation>) -> Self {
        Self {
            result,
            secrets: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn seen_secrets(&self) -> Vec<String> {
        self.secrets
            .lock()
            .map(|secrets| secrets.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn confirm_card_payment(&self, client_secret: &str) -> ApiResult<PaymentConfirmation> {
        if let Ok(mut secrets) = self.secrets.lock() {
            secrets.push(client_secret.to_string());
        }
        self.result.clone()
    }
}

/// Builds the record saved after a successful payment. Missing identity falls back
/// to the anonymous donor.
pub fn funding_record(donor: Option<&Identity>, amount: f64, payment_id: &str) -> NewFunding {
    let user_name = donor
        .and_then(|identity| {
            identity
                .display_name
                .clone()
                .filter(|name| !name.is_empty())
                .or_else(|| Some(identity.email.clone()).filter(|email| !email.is_empty()))
        })
        .unwrap_or_else(|| ANONYMOUS_NAME.to_string());
    let user_email = donor
        .map(|identity| identity.email.clone())
        .filter(|email| !email.is_empty())
        .unwrap_or_else(|| ANONYMOUS_EMAIL.to_string());

    NewFunding {
        user_name,
        user_email,
        amount,
        funding_date: Utc::now(),
        payment_id: payment_id.to_string(),
        status: SUCCEEDED.to_string(),
    }
}

/// donate
///
/// Creates a payment intent, confirms it with the gateway and, only when the
/// gateway reports `succeeded`, saves the funding record. Returns the saved record.
pub async fn donate(
    client: &ApiClient,
    gateway: &dyn PaymentGateway,
    donor: Option<&Identity>,
    amount: f64,
) -> ApiResult<NewFunding> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ApiError::Payment("Please enter a valid amount.".to_string()));
    }

    let intent = funding::create_payment_intent(client, amount).await?;
    let confirmation = gateway.confirm_card_payment(&intent.client_secret).await?;
    if !confirmation.succeeded() {
        tracing::warn!(status = %confirmation.status, "payment not completed");
        return Err(ApiError::Payment(format!(
            "Payment status is {}",
            confirmation.status
        )));
    }

    let record = funding_record(donor, amount, &confirmation.id);
    funding::save_funding(client, &record).await?;
    tracing::info!(amount, payment_id = %confirmation.id, "funding saved");
    Ok(record)
}

/// The modal shown once `donate` finishes.
pub fn donation_notification(result: &ApiResult<NewFunding>) -> Notification {
    match result {
        Ok(record) => Notification::success(
            "Thank you!",
            format!("Your donation of ${:.2} was received.", record.amount),
        ),
        Err(err) => Notification::from_error("Payment failed", err),
    }
}
