//! Terminal side of the chat session: the welcome banner and the readline
//! adapter the conversation loop reads from.

pub mod banner;
pub mod input;
