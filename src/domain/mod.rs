pub mod notification;
pub mod submission;

pub use self::submission::{ContactForm, MissingFields, Submission};
