pub mod settings;
pub mod jwt;
pub mod email;
pub mod firebase;
pub mod otp;
pub mod generative_model;
