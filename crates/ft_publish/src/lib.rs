pub mod message;
pub mod publisher;
pub mod telegram;

pub use message::format_message;
pub use publisher::{Publisher, PREFERRED_CATEGORIES};
pub use telegram::TelegramClient;
