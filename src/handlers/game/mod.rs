pub mod achievements;
pub mod daily_challenge;
pub mod leaderboard;
pub mod power_level;
pub mod water;
pub mod weight;
