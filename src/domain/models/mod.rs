mod author;
mod conversation;
mod database;
mod error;
mod llm;
mod mail;
mod message;

pub use author::*;
pub use conversation::*;
pub use database::*;
pub use error::*;
pub use llm::*;
pub use mail::*;
pub use message::*;
