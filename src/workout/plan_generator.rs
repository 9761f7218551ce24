use crate::models::plan::{CompletionStatus, DailyMeals, DayPlan, Exercise, PlanDay};
use crate::models::user::Goal;
use crate::workout::templates::{exercises_for, exercises_per_day, meals_for, MealTemplate};

/// Rotates through the goal's exercise library so consecutive days pick up
/// where the previous day stopped.
pub fn generate_workout(goal: Goal, day: PlanDay) -> Vec<Exercise> {
    let library = exercises_for(goal);
    let per_day = exercises_per_day(goal);
    let day_index = day.index();

    (0..per_day)
        .map(|i| library[(day_index * per_day + i) % library.len()].to_exercise())
        .collect()
}

fn rotate(slot: &[MealTemplate], offset: usize) -> crate::models::plan::Meal {
    slot[offset % slot.len()].to_meal()
}

pub fn generate_meals(goal: Goal, day: PlanDay) -> DailyMeals {
    let library = meals_for(goal);
    let day_index = day.index();

    DailyMeals::new(
        rotate(library.breakfast, day_index),
        rotate(library.lunch, day_index),
        rotate(library.dinner, day_index),
        vec![
            rotate(library.snacks, day_index),
            rotate(library.snacks, day_index + 1),
        ],
    )
}

pub fn generate_day(goal: Goal, day: PlanDay) -> DayPlan {
    let exercises = generate_workout(goal, day);
    let meals = generate_meals(goal, day);
    let completed_status = CompletionStatus::fresh(exercises.len(), meals.snacks.len());
    DayPlan { day, exercises, meals, completed_status }
}

/// Seven day plans, Monday first.
pub fn generate_week(goal: Goal) -> Vec<DayPlan> {
    PlanDay::ALL.into_iter().map(|day| generate_day(goal, day)).collect()
}
