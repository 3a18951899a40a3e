mod chat_turn;
mod check_model;

pub use chat_turn::*;
pub use check_model::*;
