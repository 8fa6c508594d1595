//! Email outbound adapters.

mod resend;

pub use resend::{RESEND_ENDPOINT, ResendEmailSender};
