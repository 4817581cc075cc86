use std::sync::Arc;

use askama::Template;
use tracing::{instrument, Span};

use crate::{
    domain::{
        notification::{
            admin_subject, AdminNotification, SubmitterAcknowledgment, ACKNOWLEDGMENT_SUBJECT,
        },
        ContactForm, MissingFields, Submission,
    },
    email::{MailTransport, OutgoingMail, TransportError},
};

#[derive(thiserror::Error, Debug)]
pub enum DispatchError {
    #[error(transparent)]
    Validation(#[from] MissingFields),
    #[error(transparent)]
    Render(#[from] askama::Error),
    #[error(transparent)]
    Delivery(#[from] TransportError),
}

/// Turns a contact form into the administrator notification and the submitter
/// acknowledgment, and hands both to the mail transport in that order.
#[derive(Clone)]
pub struct ContactDispatcher {
    transport: Arc<dyn MailTransport>,
    sender: String,
    admin_recipient: String,
}

impl ContactDispatcher {
    pub fn new(
        transport: Arc<dyn MailTransport>,
        sender: String,
        admin_recipient: String,
    ) -> Self {
        Self {
            transport,
            sender,
            admin_recipient,
        }
    }

    /// The acknowledgment is only sent once the administrator notification went through.
    /// A failure of either send fails the whole submission.
    #[instrument(
        name = "submitting contact form",
        skip(self, form),
        fields(name = tracing::field::Empty, email = tracing::field::Empty, category = tracing::field::Empty)
    )]
    pub async fn submit_contact(&self, form: ContactForm) -> Result<(), DispatchError> {
        let submission = Submission::try_from(form).map_err(|e| {
            tracing::warn!(missing = ?e.0, "rejecting incomplete contact form");
            e
        })?;

        let span = Span::current();
        span.record("name", submission.name());
        span.record("email", submission.email());
        span.record("category", submission.category());

        let admin_mail = self.admin_notification(&submission)?;
        let acknowledgment = self.submitter_acknowledgment(&submission)?;

        self.deliver(&admin_mail).await?;
        self.deliver(&acknowledgment).await?;

        Ok(())
    }

    fn admin_notification(
        &self,
        submission: &Submission,
    ) -> Result<OutgoingMail, askama::Error> {
        Ok(OutgoingMail {
            from: self.sender.clone(),
            to: self.admin_recipient.clone(),
            subject: admin_subject(submission.category()),
            html: AdminNotification { submission }.render()?,
        })
    }

    fn submitter_acknowledgment(
        &self,
        submission: &Submission,
    ) -> Result<OutgoingMail, askama::Error> {
        Ok(OutgoingMail {
            from: self.sender.clone(),
            to: submission.email().to_owned(),
            subject: ACKNOWLEDGMENT_SUBJECT.to_owned(),
            html: SubmitterAcknowledgment {
                submission,
                studio_email: &self.sender,
            }
            .render()?,
        })
    }

    async fn deliver(&self, mail: &OutgoingMail) -> Result<(), TransportError> {
        match self.transport.send(mail).await {
            Ok(()) => {
                tracing::info!(to = %mail.to, subject = %mail.subject, "email sent");
                Ok(())
            }
            Err(e) => {
                tracing::error!(detail = %e, to = %mail.to, "failed to send email");
                Err(e)
            }
        }
    }
}
