pub mod mailer;
pub mod templates;

pub use mailer::{MailError, ResendMailer};
