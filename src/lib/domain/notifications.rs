//! Notification-facing construction layer.
//!
//! Application code assembles a [`TemplateMessage`] from event data; the
//! [`TemplateChannel`] turns it into one template/message pair and hands
//! the serialized payload to the configured sender.

mod channel;
mod errors;
mod template_message;

pub use channel::TemplateChannel;
pub use errors::SendTemplateError;
pub use template_message::TemplateMessage;
