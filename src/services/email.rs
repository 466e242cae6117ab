//! Receipt email delivery.
//!
//! Uses SMTP via lettre. The transport sits behind the [`Mailer`] trait so the
//! rest of the service never depends on a live SMTP server.

use crate::config::EmailConfig;
use crate::entities::EmailRequest;
use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType,
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// No SMTP settings were configured.
    #[error("Email delivery is not configured")]
    NotConfigured,
}

/// Something that can deliver a plain-text email
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError>;
}

/// SMTP mailer over a STARTTLS relay.
#[derive(Clone)]
pub struct SmtpMailer {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpMailer {
    /// Create a new mailer from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the relay host cannot be used for STARTTLS.
    pub fn new(config: &EmailConfig) -> Result<Self, EmailError> {
        let credentials =
            Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(to
                .parse()
                .map_err(|_| EmailError::InvalidAddress(to.to_string()))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;

        self.mailer.send(email).await?;

        tracing::info!(to = %to, subject = %subject, "Email sent successfully");
        Ok(())
    }
}

/// Sends basket receipts
#[derive(Clone)]
pub struct EmailService {
    mailer: Option<Arc<dyn Mailer>>,
    subject: String,
}

impl EmailService {
    pub fn new(mailer: Option<Arc<dyn Mailer>>, subject: impl Into<String>) -> Self {
        Self {
            mailer,
            subject: subject.into(),
        }
    }

    /// Service that rejects every send
    pub fn disabled() -> Self {
        Self::new(None, EmailConfig::DEFAULT_SUBJECT)
    }

    pub fn is_enabled(&self) -> bool {
        self.mailer.is_some()
    }

    /// Send the receipt in `request` to its recipient
    pub async fn send_receipt(&self, request: &EmailRequest) -> Result<(), EmailError> {
        let Some(mailer) = &self.mailer else {
            tracing::warn!(to = %request.to_email, "receipt requested but email is not configured");
            return Err(EmailError::NotConfigured);
        };
        mailer
            .send(&request.to_email, &self.subject, &request.body)
            .await
    }
}
