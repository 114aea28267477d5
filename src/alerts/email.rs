use anyhow::{Context, Result};
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::Config;

/// Sends the price-drop alert email over authenticated STARTTLS SMTP.
///
/// The transport is configured once at startup; malformed sender or
/// recipient addresses fail construction before the monitor loop starts.
pub struct EmailAlerter {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
    product_url: String,
}

impl EmailAlerter {
    pub fn new(config: &Config) -> Result<Self> {
        let email = &config.email;

        let credentials =
            Credentials::new(email.email_address.clone(), email.email_password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&email.smtp_server)
            .with_context(|| format!("Invalid SMTP server: {}", email.smtp_server))?
            .port(email.smtp_port)
            .credentials(credentials)
            .timeout(Some(config.smtp_timeout()))
            .build();

        let from: Mailbox = email
            .email_address
            .parse()
            .with_context(|| format!("Invalid sender address: {}", email.email_address))?;
        let to: Mailbox = email
            .to_address
            .parse()
            .with_context(|| format!("Invalid recipient address: {}", email.to_address))?;

        Ok(Self {
            transport,
            from,
            to,
            product_url: config.product.url.clone(),
        })
    }

    /// Send one plaintext alert for the given price. The SMTP session is
    /// scoped to this call and closed whether or not the send succeeds.
    /// No retry here; the caller decides what a failure means.
    pub async fn send(&self, price: f64) -> Result<()> {
        let message = self.build_message(price)?;

        self.transport
            .send(message)
            .await
            .context("Failed to send alert email")?;
        Ok(())
    }

    fn build_message(&self, price: f64) -> Result<Message> {
        let body = format!(
            "The price has dropped to {price}.\nCheck the product here: {}",
            self.product_url
        );

        Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject("Price Alert: Item now below threshold!")
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .context("Failed to build alert message")
    }
}
