pub mod meals;
pub mod progress;
pub mod workouts;
