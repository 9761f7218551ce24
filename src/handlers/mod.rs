pub mod auth_handler;
pub mod backend_health_handler;
pub mod coach;
pub mod game;
pub mod plans;
pub mod profile;
pub mod registration_handler;
