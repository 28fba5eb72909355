mod notifier;
mod telegram;

pub use notifier::{notify, Notification, Notifier};
pub use telegram::TelegramNotifier;
