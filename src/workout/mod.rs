pub mod grocery_list;
pub mod plan_generator;
pub mod progress_stats;
pub mod templates;
