use askama::Template;

use super::Submission;

pub const ACKNOWLEDGMENT_SUBJECT: &str = "Thank You for Contacting Satvik Yoga Studio";

pub fn admin_subject(category: &str) -> String {
    format!("New Contact Form Submission - {}", category)
}

/// Card sent to the studio listing every submitted field.
#[derive(Template)]
#[template(path = "admin_notification.html")]
pub struct AdminNotification<'a> {
    pub submission: &'a Submission,
}

/// Card sent back to the submitter.
#[derive(Template)]
#[template(path = "submitter_acknowledgment.html")]
pub struct SubmitterAcknowledgment<'a> {
    pub submission: &'a Submission,
    pub studio_email: &'a str,
}
