//! Lead mailer
//!
//! Sends the operator notification through a Resend-compatible transactional
//! email API (`POST {api_base}/emails`).
//!
//! One attempt per submission: no retry, no idempotency key, and the client's
//! default timeout. A failure is final for that submission; the user resubmits.

use crate::config::ServerConfig;
use crate::email::{email_subject, render_email_html, SubmittedLead};
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

/// Errors from sending a lead email.
#[derive(Debug, Error)]
pub enum MailError {
    /// No provider key and not in dev mode
    #[error("email service is not configured")]
    NotConfigured,

    /// Provider answered with a non-success status
    #[error("email provider rejected the request: {status} - {body}")]
    Provider { status: u16, body: String },

    /// Request never got a response
    #[error("network error talking to email provider: {0}")]
    Transport(#[from] reqwest::Error),
}

/// How a lead was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Accepted by the provider
    Sent,
    /// Logged locally because no provider key is configured (dev mode)
    Logged,
}

#[derive(Debug, Serialize)]
struct OutboundEmail<'a> {
    from: &'a str,
    to: &'a str,
    reply_to: &'a str,
    subject: String,
    html: String,
}

pub struct LeadMailer {
    client: Client,
    api_key: Option<String>,
    api_base: String,
    lead_inbox: String,
    mail_from: String,
    dev_mode: bool,
}

// Custom Debug to avoid exposing api_key
impl std::fmt::Debug for LeadMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeadMailer")
            .field("has_api_key", &self.api_key.is_some())
            .field("api_base", &self.api_base)
            .field("lead_inbox", &self.lead_inbox)
            .field("dev_mode", &self.dev_mode)
            .finish()
    }
}

impl LeadMailer {
    pub fn new(config: &ServerConfig) -> Self {
        LeadMailer {
            client: Client::new(),
            api_key: config.api_key.clone(),
            api_base: config.api_base.clone(),
            lead_inbox: config.lead_inbox.clone(),
            mail_from: config.mail_from.clone(),
            dev_mode: config.dev_mode,
        }
    }

    /// Send (or, in dev mode without a key, log) the lead notification
    pub async fn send(&self, submitted: &SubmittedLead) -> Result<Delivery, MailError> {
        let lead = &submitted.lead;
        let html = render_email_html(submitted);

        let api_key = match &self.api_key {
            Some(key) => key,
            None if self.dev_mode => {
                tracing::warn!("RESEND_API_KEY is not set; logging lead instead of sending");
                tracing::info!(
                    reference = %submitted.reference,
                    to = %self.lead_inbox,
                    reply_to = %lead.email,
                    subject = %email_subject(lead),
                    body = %html,
                    "lead email (dev mode)"
                );
                return Ok(Delivery::Logged);
            }
            None => {
                tracing::error!("RESEND_API_KEY is not set");
                return Err(MailError::NotConfigured);
            }
        };

        let payload = OutboundEmail {
            from: &self.mail_from,
            to: &self.lead_inbox,
            reply_to: &lead.email,
            subject: email_subject(lead),
            html,
        };

        let response = self
            .client
            .post(format!("{}/emails", self.api_base))
            .header(AUTHORIZATION, format!("Bearer {}", api_key))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "email provider error");
            return Err(MailError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(
            reference = %submitted.reference,
            product = %lead.product_name,
            market = %lead.target_market,
            "lead email sent"
        );
        Ok(Delivery::Sent)
    }
}
