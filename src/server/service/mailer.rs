//! SMTP mail delivery.
//!
//! Thin wrapper over the blocking lettre transport. Message assembly and the
//! send itself live here; retry and templating belong to the notifier.

use lettre::message::header::ContentType;
use lettre::message::{Attachment, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::server::config::SmtpConfig;
use crate::server::error::notify::NotifyError;

/// A rendered mail ready for delivery.
pub struct OutboundMail {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub attachment: Option<MailAttachment>,
}

pub struct MailAttachment {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct Mailer {
    transport: SmtpTransport,
    sender: String,
}

impl Mailer {
    /// Creates a pooled SMTP transport from the relay configuration.
    pub fn new(config: &SmtpConfig) -> Result<Self, NotifyError> {
        let credentials = Credentials::new(config.username.clone(), config.password.clone());

        let transport = SmtpTransport::relay(&config.host)
            .map_err(|err| NotifyError::Transport(err.to_string()))?
            .port(config.port)
            .credentials(credentials)
            .build();

        Ok(Self {
            transport,
            sender: config.sender.clone(),
        })
    }

    /// Delivers one mail over the blocking SMTP transport.
    pub async fn send(&self, mail: &OutboundMail) -> Result<(), NotifyError> {
        let message = self.assemble(mail)?;
        let transport = self.transport.clone();

        tokio::task::spawn_blocking(move || {
            transport
                .send(&message)
                .map_err(|err| NotifyError::Transport(err.to_string()))
        })
        .await
        .map_err(|err| NotifyError::Join(err.to_string()))??;

        Ok(())
    }

    fn assemble(&self, mail: &OutboundMail) -> Result<Message, NotifyError> {
        let builder = Message::builder()
            .from(
                self.sender
                    .parse()
                    .map_err(|err| NotifyError::address(&self.sender, err))?,
            )
            .to(mail
                .to
                .parse()
                .map_err(|err| NotifyError::address(&mail.to, err))?)
            .subject(mail.subject.clone());

        let message = match &mail.attachment {
            Some(attachment) => {
                let content_type = "application/pdf"
                    .parse::<ContentType>()
                    .map_err(|err| NotifyError::Message(err.to_string()))?;
                let pdf = Attachment::new(attachment.filename.clone())
                    .body(attachment.bytes.clone(), content_type);

                builder
                    .multipart(
                        MultiPart::mixed()
                            .singlepart(SinglePart::html(mail.html.clone()))
                            .singlepart(pdf),
                    )
                    .map_err(|err| NotifyError::Message(err.to_string()))?
            }
            None => builder
                .header(ContentType::TEXT_HTML)
                .body(mail.html.clone())
                .map_err(|err| NotifyError::Message(err.to_string()))?,
        };

        Ok(message)
    }
}
