pub mod accounts;
pub mod achievements;
pub mod activity_log;
pub mod challenges;
pub mod chat_history;
pub mod helpers;
pub mod pending_registrations;
pub mod weekly_plans;
pub mod weight_logs;
