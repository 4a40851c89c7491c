pub mod conversation;
pub mod email;

pub use conversation::conversation_id;
pub use email::normalize_email;
