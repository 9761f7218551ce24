pub mod achievement;
pub mod activity;
pub mod auth;
pub mod challenge;
pub mod coach;
pub mod game;
pub mod plan;
pub mod user;
