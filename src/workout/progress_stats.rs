use serde::{Deserialize, Serialize};

use crate::models::plan::WeeklyPlan;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyStats {
    pub exercises_completed: usize,
    pub total_exercises: usize,
    pub meals_completed: usize,
    pub total_meals: usize,
    pub calories_consumed: i32,
    pub calories_target: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub day: String,
    pub exercises_completed: usize,
    pub total_exercises: usize,
    pub meals_completed: usize,
    pub total_meals: usize,
    pub calories_consumed: i32,
    pub calories_target: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    pub weekly_stats: WeeklyStats,
    pub daily_stats: Vec<DailyStats>,
}

fn day_stats(plan: &WeeklyPlan) -> DailyStats {
    let status = &plan.completed_status;
    let meals = &plan.meals;

    let exercises_completed = status
        .exercises
        .iter()
        .filter(|(index, done)| **done && **index < plan.exercises.len())
        .count();

    let mut meals_completed = 0;
    let mut calories_consumed = 0;
    for (done, meal) in [
        (status.meals.breakfast, &meals.breakfast),
        (status.meals.lunch, &meals.lunch),
        (status.meals.dinner, &meals.dinner),
    ] {
        if done {
            meals_completed += 1;
            calories_consumed += meal.calories;
        }
    }
    // flags pointing past the snack list are ignored
    for (index, done) in &status.meals.snacks {
        if let (true, Some(snack)) = (*done, meals.snacks.get(*index)) {
            meals_completed += 1;
            calories_consumed += snack.calories;
        }
    }

    DailyStats {
        day: plan.day.clone(),
        exercises_completed,
        total_exercises: plan.exercises.len(),
        meals_completed,
        total_meals: 3 + meals.snacks.len(),
        calories_consumed,
        calories_target: meals.total_calories,
    }
}

pub fn progress_report(plans: &[WeeklyPlan]) -> ProgressReport {
    let daily_stats: Vec<DailyStats> = plans.iter().map(day_stats).collect();

    let weekly_stats = daily_stats.iter().fold(WeeklyStats::default(), |mut week, day| {
        week.exercises_completed += day.exercises_completed;
        week.total_exercises += day.total_exercises;
        week.meals_completed += day.meals_completed;
        week.total_meals += day.total_meals;
        week.calories_consumed += day.calories_consumed;
        week.calories_target += day.calories_target;
        week
    });

    ProgressReport { weekly_stats, daily_stats }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    use crate::models::plan::PlanDay;
    use crate::models::user::Goal;
    use crate::workout::plan_generator::generate_day;

    fn stored(goal: Goal, day: PlanDay) -> WeeklyPlan {
        let generated = generate_day(goal, day);
        WeeklyPlan {
            id: 1,
            user_id: Uuid::new_v4(),
            day: day.to_string(),
            exercises: generated.exercises,
            meals: generated.meals,
            completed_status: generated.completed_status,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_week_reports_zeroes() {
        let report = progress_report(&[]);
        assert_eq!(report.weekly_stats, WeeklyStats::default());
        assert!(report.daily_stats.is_empty());
    }

    #[test]
    fn completed_items_count_toward_day_and_week() {
        let mut monday = stored(Goal::WeightLoss, PlanDay::Monday);
        monday.completed_status.exercises.insert(0, true);
        monday.completed_status.exercises.insert(2, true);
        monday.completed_status.meals.breakfast = true;
        monday.completed_status.meals.snacks.insert(1, true);
        let tuesday = stored(Goal::WeightLoss, PlanDay::Tuesday);

        let report = progress_report(&[monday.clone(), tuesday]);
        let day = &report.daily_stats[0];

        assert_eq!(day.exercises_completed, 2);
        assert_eq!(day.total_exercises, 4);
        assert_eq!(day.meals_completed, 2);
        assert_eq!(day.total_meals, 5);
        assert_eq!(
            day.calories_consumed,
            monday.meals.breakfast.calories + monday.meals.snacks[1].calories
        );

        assert_eq!(report.weekly_stats.exercises_completed, 2);
        assert_eq!(report.weekly_stats.total_exercises, 8);
        assert_eq!(report.weekly_stats.total_meals, 10);
    }

    #[test]
    fn serialises_with_camel_case_keys() {
        let report = progress_report(&[stored(Goal::Maintenance, PlanDay::Friday)]);
        let value = serde_json::to_value(&report).unwrap();
        assert!(value["weeklyStats"]["caloriesTarget"].as_i64().unwrap() > 0);
        assert_eq!(value["dailyStats"][0]["day"], "Friday");
    }
}
