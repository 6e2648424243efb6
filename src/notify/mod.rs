//! Chat delivery for status messages.

mod telegram;

pub use telegram::{Notifier, TelegramNotifier};

#[cfg(test)]
pub use telegram::MockNotifier;
