//! Order notification email service.
//!
//! New orders trigger a mail to the shop owner through the configured SMTP
//! relay. Dispatch is fire-and-forget: the request path never awaits the
//! send, and a failed send is logged and dropped, never surfaced to the
//! ordering customer.

use askama::Template;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::EmailConfig;
use crate::models::Order;

/// HTML body for the new-order notification.
#[derive(Template)]
#[template(path = "email/order_placed.html")]
struct OrderPlacedHtml<'a> {
    order: &'a Order,
}

/// Plain text body for the new-order notification.
#[derive(Template)]
#[template(path = "email/order_placed.txt")]
struct OrderPlacedText<'a> {
    order: &'a Order,
}

/// Errors that can occur when sending a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("template error: {0}")]
    Template(#[from] askama::Error),
}

/// Sends order notifications over SMTP.
#[derive(Clone)]
pub struct OrderNotifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
    notify_address: String,
}

impl OrderNotifier {
    /// Create a notifier from the SMTP configuration block.
    ///
    /// # Errors
    ///
    /// Returns an error if the relay transport cannot be constructed.
    pub fn new(config: &EmailConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
            notify_address: config.notify_address.clone(),
        })
    }

    /// Send the new-order notification to the shop owner.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or sending fails.
    pub async fn send_order_placed(&self, order: &Order) -> Result<(), NotifyError> {
        let html = OrderPlacedHtml { order }.render()?;
        let text = OrderPlacedText { order }.render()?;

        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| NotifyError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(self
                .notify_address
                .parse()
                .map_err(|_| NotifyError::InvalidAddress(self.notify_address.clone()))?)
            .subject(format!(
                "New order from {} - Rs. {}",
                order.customer_name, order.total_amount
            ))
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html),
                    ),
            )?;

        self.mailer.send(email).await?;

        tracing::info!(order_id = %order.id, "order notification sent");
        Ok(())
    }
}

/// Dispatch the new-order notification as a detached task.
///
/// The contract here is "do not propagate failure": when the relay is not
/// configured the notification is skipped, and when a send fails the error
/// is logged and swallowed. Order creation has already committed by the
/// time this runs and is never rolled back.
pub fn notify_order_placed(notifier: Option<&OrderNotifier>, order: &Order) {
    let Some(notifier) = notifier else {
        tracing::debug!(order_id = %order.id, "mail relay not configured; skipping notification");
        return;
    };

    let notifier = notifier.clone();
    let order = order.clone();
    tokio::spawn(async move {
        if let Err(e) = notifier.send_order_placed(&order).await {
            tracing::warn!(error = %e, order_id = %order.id, "order notification failed");
        }
    });
}
