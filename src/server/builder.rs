//! ServerBuilder for fluent API to build the HTTP server

use super::router::build_router;
use super::state::AppState;
use crate::config::{AppConfig, EmailConfig};
use crate::services::{EmailService, Mailer, SmtpMailer};
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the ufund HTTP server
///
/// # Example
///
/// ```ignore
/// let config = AppConfig::load()?;
/// ServerBuilder::new(config).serve().await?;
/// ```
pub struct ServerBuilder {
    config: AppConfig,
    mailer: Option<Arc<dyn Mailer>>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            mailer: None,
        }
    }

    /// Use `mailer` for receipts instead of the SMTP settings in the config
    pub fn with_mailer(mut self, mailer: impl Mailer + 'static) -> Self {
        self.mailer = Some(Arc::new(mailer));
        self
    }

    /// Open the stores and build the REST router
    pub fn build(self) -> Result<Router> {
        let email = self.email_service()?;
        let state = AppState::open(&self.config.storage, email)
            .context("failed to open data files")?;
        build_router(state, &self.config.server)
    }

    fn email_service(&self) -> Result<EmailService> {
        let subject = self
            .config
            .email
            .as_ref()
            .map_or(EmailConfig::DEFAULT_SUBJECT, |email| email.subject.as_str());

        if let Some(mailer) = &self.mailer {
            return Ok(EmailService::new(Some(mailer.clone()), subject));
        }

        match &self.config.email {
            Some(email) => {
                let mailer = SmtpMailer::new(email).context("invalid SMTP configuration")?;
                tracing::info!(host = %email.smtp_host, port = email.smtp_port, "receipt email enabled");
                Ok(EmailService::new(Some(Arc::new(mailer)), subject))
            }
            None => {
                tracing::warn!("no email settings, receipts are disabled");
                Ok(EmailService::disabled())
            }
        }
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the configured `host:port`
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.bind_address();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
