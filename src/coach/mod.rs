pub mod prompts;
pub mod replies;
