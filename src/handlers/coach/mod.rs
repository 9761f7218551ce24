pub mod conversation;
pub mod generation;
