use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use voya_core::Notifier;
use voya_quote::Quote;
use voya_request::TravelRequest;
use voya_shared::models::events::QuoteRespondedEvent;

use crate::templates;

const RESEND_EMAILS_URL: &str = "https://api.resend.com/emails";

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("email request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("email provider rejected the message (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

/// Transactional email over the Resend HTTP API.
pub struct ResendMailer {
    http: reqwest::Client,
    api_key: String,
    from: String,
    agency_address: String,
    base_url: String,
}

impl ResendMailer {
    pub fn new(api_key: String, from: String, agency_address: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            from,
            agency_address,
            base_url,
        }
    }

    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), MailError> {
        let response = self
            .http
            .post(RESEND_EMAILS_URL)
            .bearer_auth(&self.api_key)
            .json(&SendEmailRequest {
                from: &self.from,
                to: [to],
                subject,
                html,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let sent: SendEmailResponse = response.json().await?;
        tracing::info!(email_id = %sent.id, subject, "email dispatched");
        Ok(())
    }
}

#[async_trait]
impl Notifier for ResendMailer {
    async fn request_submitted(
        &self,
        request: &TravelRequest,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let subject = format!("New travel request from {}", request.user_name);
        let html = templates::request_submitted(request);
        self.send(&self.agency_address, &subject, &html).await?;
        Ok(())
    }

    async fn quote_created(
        &self,
        quote: &Quote,
        request: &TravelRequest,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let subject = format!("New travel quote: {}", quote.title);
        let html = templates::quote_created(quote, request, &self.base_url);
        self.send(&request.user_email, &subject, &html).await?;
        Ok(())
    }

    async fn quote_responded(
        &self,
        quote: &Quote,
        event: &QuoteRespondedEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if event.accepted {
            let subject = format!("Your quote is confirmed: {}", quote.title);
            let html = templates::quote_accepted(quote, event);
            self.send(&event.user_email.0, &subject, &html).await?;
        } else {
            let subject = format!("Quote rejected by {}", event.user_name);
            let html = templates::quote_rejected(quote, event);
            self.send(&self.agency_address, &subject, &html).await?;
        }
        Ok(())
    }
}
