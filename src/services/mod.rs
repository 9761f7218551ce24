pub mod account_service;
pub mod activity_log;
pub mod coach_service;
pub mod daily_challenge;
pub mod email;
pub mod generative_model;
pub mod identity;
pub mod otp_store;
pub mod plan_service;
pub mod progression_ledger;

pub use account_service::AccountService;
pub use activity_log::ActivityLog;
pub use coach_service::CoachService;
pub use daily_challenge::DailyChallengeService;
pub use email::EmailSender;
pub use generative_model::GenerativeModel;
pub use identity::IdentityVerifier;
pub use otp_store::OtpStore;
pub use plan_service::PlanService;
pub use progression_ledger::ProgressionLedger;
