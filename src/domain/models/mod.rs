mod chat_exchange;
mod conversation;
mod turn;

pub use chat_exchange::*;
pub use conversation::*;
pub use turn::*;
