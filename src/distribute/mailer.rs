//! Outgoing mail.

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox as Address, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use super::config::SmtpSettings;
use crate::error::LabelError;

/// A plain-text email with one binary attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub subject: String,
    pub body: String,
    pub attachment_name: String,
    pub attachment: Vec<u8>,
}

impl OutgoingMail {
    /// The label archive email for an order.
    pub fn for_order(order_id: &str, archive_name: String, archive: Vec<u8>) -> Self {
        Self {
            subject: format!("Barcodes for {}", order_id),
            body: format!(
                "Please find attached the barcode labels for order {}.\n",
                order_id
            ),
            attachment_name: archive_name,
            attachment: archive,
        }
    }
}

/// Delivers outgoing mail to a fixed recipient list.
pub trait Mailer {
    fn send(&self, mail: &OutgoingMail) -> Result<(), LabelError>;
}

/// SMTP delivery via lettre.
pub struct SmtpMailer {
    transport: SmtpTransport,
    from: Address,
    recipients: Vec<Address>,
}

impl SmtpMailer {
    pub fn new(settings: &SmtpSettings, recipients: &[String]) -> Result<Self, LabelError> {
        let builder = if settings.starttls {
            SmtpTransport::starttls_relay(&settings.host)
        } else {
            SmtpTransport::relay(&settings.host)
        }
        .map_err(|e| LabelError::Mail(format!("Invalid SMTP host {}: {}", settings.host, e)))?;

        let mut builder = builder.credentials(Credentials::new(
            settings.username.clone(),
            settings.password.clone(),
        ));
        if let Some(port) = settings.port {
            builder = builder.port(port);
        }

        if recipients.is_empty() {
            return Err(LabelError::Mail("No recipients configured".to_string()));
        }

        Ok(Self {
            transport: builder.build(),
            from: parse_address(&settings.from)?,
            recipients: recipients
                .iter()
                .map(|r| parse_address(r))
                .collect::<Result<_, _>>()?,
        })
    }

    /// Build the MIME message for `mail`.
    pub fn compose(&self, mail: &OutgoingMail) -> Result<Message, LabelError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(mail.subject.clone());
        for to in &self.recipients {
            builder = builder.to(to.clone());
        }

        let content_type = ContentType::parse("application/zip")
            .map_err(|e| LabelError::Mail(format!("Bad attachment type: {}", e)))?;
        let attachment =
            Attachment::new(mail.attachment_name.clone()).body(mail.attachment.clone(), content_type);

        builder
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(mail.body.clone()))
                    .singlepart(attachment),
            )
            .map_err(|e| LabelError::Mail(format!("Failed to build message: {}", e)))
    }
}

impl Mailer for SmtpMailer {
    fn send(&self, mail: &OutgoingMail) -> Result<(), LabelError> {
        let message = self.compose(mail)?;
        self.transport
            .send(&message)
            .map_err(|e| LabelError::Mail(format!("SMTP delivery failed: {}", e)))?;
        log::info!(
            "Sent '{}' to {} recipient(s)",
            mail.subject,
            self.recipients.len()
        );
        Ok(())
    }
}

fn parse_address(raw: &str) -> Result<Address, LabelError> {
    raw.parse()
        .map_err(|e| LabelError::Mail(format!("Invalid email address '{}': {}", raw, e)))
}
