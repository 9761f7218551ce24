pub mod activity_log;
pub mod profile;
pub mod progress_email;
