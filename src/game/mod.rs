pub mod achievements;
pub mod challenges;
pub mod leaderboard;
pub mod progression;
pub mod streak;
