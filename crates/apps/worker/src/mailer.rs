use app_state::MailSettings;
use async_trait::async_trait;
use color_eyre::Result;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

pub const EXPORT_SUBJECT: &str = "Playlist export";
pub const EXPORT_TEXT: &str = "Attached is the export of your playlist.";
pub const EXPORT_ATTACHMENT_NAME: &str = "playlist.json";
pub const EXPORT_CONTENT_TYPE: &str = "application/json";

/// One outgoing mail carrying a single JSON attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub attachment_name: String,
    pub attachment: String,
}

impl ExportMail {
    #[must_use]
    pub fn playlist_export(from: &str, to: &str, attachment: String) -> Self {
        Self {
            from: from.to_owned(),
            to: to.to_owned(),
            subject: EXPORT_SUBJECT.to_owned(),
            text: EXPORT_TEXT.to_owned(),
            attachment_name: EXPORT_ATTACHMENT_NAME.to_owned(),
            attachment,
        }
    }

    /// Builds the MIME message: a plain text part followed by the attachment.
    pub fn to_message(&self) -> Result<Message> {
        let from: Mailbox = self.from.parse()?;
        let to: Mailbox = self.to.parse()?;
        let attachment = Attachment::new(self.attachment_name.clone())
            .body(self.attachment.clone(), ContentType::parse(EXPORT_CONTENT_TYPE)?);

        Ok(Message::builder()
            .from(from)
            .to(to)
            .subject(&self.subject)
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(self.text.clone()))
                    .singlepart(attachment),
            )?)
    }
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, mail: ExportMail) -> Result<()>;
}

/// Sends mail through an SMTP relay using STARTTLS.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(settings: &MailSettings) -> Result<Self> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
            .port(settings.port);
        if !settings.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ));
        }
        info!("📮 Mail transport using {}:{}", settings.host, settings.port);
        Ok(Self {
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, mail: ExportMail) -> Result<()> {
        let message = mail.to_message()?;
        let response = self.transport.send(message).await?;
        debug!("SMTP server answered {:?}", response.code());
        Ok(())
    }
}
