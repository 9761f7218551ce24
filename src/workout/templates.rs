//! Goal-indexed exercise and meal libraries used to seed weekly plans.

use crate::models::plan::{Exercise, Meal};
use crate::models::user::Goal;

pub struct ExerciseTemplate {
    pub name: &'static str,
    pub sets: i32,
    pub reps: &'static str,
    pub instructions: &'static str,
}

impl ExerciseTemplate {
    pub fn to_exercise(&self) -> Exercise {
        Exercise {
            name: self.name.to_string(),
            sets: self.sets,
            reps: self.reps.to_string(),
            instructions: self.instructions.to_string(),
        }
    }
}

pub struct MealTemplate {
    pub name: &'static str,
    pub calories: i32,
    pub description: &'static str,
}

impl MealTemplate {
    pub fn to_meal(&self) -> Meal {
        Meal {
            name: self.name.to_string(),
            calories: self.calories,
            description: self.description.to_string(),
        }
    }
}

pub struct MealLibrary {
    pub breakfast: &'static [MealTemplate],
    pub lunch: &'static [MealTemplate],
    pub dinner: &'static [MealTemplate],
    pub snacks: &'static [MealTemplate],
}

const fn ex(name: &'static str, sets: i32, reps: &'static str, instructions: &'static str) -> ExerciseTemplate {
    ExerciseTemplate { name, sets, reps, instructions }
}

const fn meal(name: &'static str, calories: i32, description: &'static str) -> MealTemplate {
    MealTemplate { name, calories, description }
}

const WEIGHT_LOSS_EXERCISES: &[ExerciseTemplate] = &[
    ex("Cardio Warm-up", 1, "10 minutes", "Light jogging or brisk walking"),
    ex("Burpees", 3, "10-15", "Full body exercise: squat, jump, push-up, jump"),
    ex("Jumping Jacks", 3, "30-50", "Stand with feet together, jump while raising arms"),
    ex("Mountain Climbers", 3, "20-30", "In plank position, alternate bringing knees to chest"),
    ex("High Knees", 3, "30 seconds", "Run in place, bringing knees up high"),
    ex("Plank", 3, "30-60 seconds", "Hold plank position, keep body straight"),
    ex("Squats", 3, "15-20", "Lower body until thighs parallel to floor"),
    ex("Lunges", 3, "12 each leg", "Step forward, lower back knee toward ground"),
];

const MUSCLE_GAIN_EXERCISES: &[ExerciseTemplate] = &[
    ex("Push-ups", 4, "10-15", "Keep body straight, lower chest to ground"),
    ex("Pull-ups/Chin-ups", 4, "8-12", "Hang from bar, pull body up until chin over bar"),
    ex("Dumbbell Shoulder Press", 4, "8-12", "Press weights overhead, control descent"),
    ex("Barbell/Dumbbell Rows", 4, "8-12", "Bend over, pull weight to lower chest"),
    ex("Squats", 4, "8-12", "Lower until thighs parallel, drive through heels"),
    ex("Deadlifts", 4, "6-10", "Lift weight from ground, keep back straight"),
    ex("Bench Press", 4, "8-12", "Lower bar to chest, press up explosively"),
    ex("Bicep Curls", 3, "10-12", "Curl weight to shoulders, control descent"),
    ex("Tricep Dips", 3, "10-15", "Lower body by bending arms, push back up"),
];

const MAINTENANCE_EXERCISES: &[ExerciseTemplate] = &[
    ex("Warm-up Cardio", 1, "5-10 minutes", "Light jogging or cycling"),
    ex("Push-ups", 3, "10-15", "Standard push-up form"),
    ex("Squats", 3, "12-15", "Bodyweight squats"),
    ex("Plank", 3, "30-45 seconds", "Hold plank position"),
    ex("Lunges", 3, "10 each leg", "Alternating forward lunges"),
    ex("Bicep Curls", 3, "12-15", "Light weights or resistance bands"),
    ex("Stretching", 1, "10 minutes", "Full body stretching routine"),
];

const WEIGHT_LOSS_MEALS: MealLibrary = MealLibrary {
    breakfast: &[
        meal("Greek Yogurt with Berries", 250, "1 cup Greek yogurt, 1/2 cup mixed berries"),
        meal("Oatmeal with Banana", 300, "1 cup cooked oatmeal, 1 medium banana"),
        meal("Scrambled Eggs with Vegetables", 280, "2 eggs, mixed vegetables, whole grain toast"),
    ],
    lunch: &[
        meal("Grilled Chicken Salad", 350, "4oz grilled chicken, mixed greens, light dressing"),
        meal("Quinoa Bowl with Vegetables", 400, "1 cup quinoa, roasted vegetables, olive oil"),
        meal("Turkey Wrap", 380, "Whole grain wrap, 3oz turkey, vegetables"),
    ],
    dinner: &[
        meal("Baked Salmon with Vegetables", 450, "5oz salmon, steamed broccoli, sweet potato"),
        meal("Lean Beef Stir-fry", 420, "4oz lean beef, mixed vegetables, brown rice"),
        meal("Grilled Chicken with Quinoa", 440, "5oz chicken breast, 1 cup quinoa, vegetables"),
    ],
    snacks: &[
        meal("Apple with Almond Butter", 200, "1 medium apple, 1 tbsp almond butter"),
        meal("Carrot Sticks with Hummus", 150, "Carrot sticks, 2 tbsp hummus"),
        meal("Protein Shake", 180, "1 scoop protein powder, water or almond milk"),
    ],
};

const MUSCLE_GAIN_MEALS: MealLibrary = MealLibrary {
    breakfast: &[
        meal("Protein Pancakes", 550, "3 protein pancakes, 2 eggs, 1 banana"),
        meal("Egg Scramble with Toast", 600, "4 eggs, whole grain toast, avocado"),
        meal("Oatmeal with Protein", 580, "1.5 cups oatmeal, protein powder, nuts"),
    ],
    lunch: &[
        meal("Chicken and Rice Bowl", 650, "6oz chicken, 1.5 cups rice, vegetables"),
        meal("Beef and Sweet Potato", 680, "6oz lean beef, large sweet potato, vegetables"),
        meal("Salmon with Pasta", 620, "6oz salmon, whole grain pasta, vegetables"),
    ],
    dinner: &[
        meal("Steak with Potatoes", 750, "8oz steak, baked potato, vegetables"),
        meal("Chicken Pasta", 720, "8oz chicken, pasta, marinara sauce"),
        meal("Pork with Rice", 700, "7oz pork, 1.5 cups rice, vegetables"),
    ],
    snacks: &[
        meal("Protein Shake with Banana", 350, "2 scoops protein, banana, milk"),
        meal("Greek Yogurt with Nuts", 300, "1.5 cups Greek yogurt, mixed nuts"),
        meal("Peanut Butter Sandwich", 400, "Whole grain bread, 2 tbsp peanut butter"),
    ],
};

const MAINTENANCE_MEALS: MealLibrary = MealLibrary {
    breakfast: &[
        meal("Avocado Toast with Eggs", 450, "2 slices whole grain toast, avocado, 2 eggs"),
        meal("Smoothie Bowl", 420, "Mixed fruits, Greek yogurt, granola"),
        meal("Breakfast Burrito", 480, "Whole grain tortilla, eggs, beans, vegetables"),
    ],
    lunch: &[
        meal("Chicken Salad Wrap", 500, "5oz chicken, whole grain wrap, vegetables"),
        meal("Pasta with Vegetables", 520, "Whole grain pasta, vegetables, olive oil"),
        meal("Quinoa Salad Bowl", 480, "Quinoa, mixed vegetables, feta cheese"),
    ],
    dinner: &[
        meal("Grilled Chicken with Vegetables", 550, "6oz chicken, roasted vegetables, rice"),
        meal("Fish with Quinoa", 530, "6oz fish, quinoa, steamed vegetables"),
        meal("Vegetable Stir-fry with Tofu", 510, "Tofu, mixed vegetables, brown rice"),
    ],
    snacks: &[
        meal("Mixed Nuts", 250, "1/4 cup mixed nuts"),
        meal("Fruit and Yogurt", 200, "1 cup Greek yogurt, mixed fruits"),
        meal("Trail Mix", 220, "Nuts, dried fruits, seeds"),
    ],
};

pub fn exercises_for(goal: Goal) -> &'static [ExerciseTemplate] {
    match goal {
        Goal::WeightLoss => WEIGHT_LOSS_EXERCISES,
        Goal::MuscleGain => MUSCLE_GAIN_EXERCISES,
        Goal::Maintenance => MAINTENANCE_EXERCISES,
    }
}

pub fn meals_for(goal: Goal) -> &'static MealLibrary {
    match goal {
        Goal::WeightLoss => &WEIGHT_LOSS_MEALS,
        Goal::MuscleGain => &MUSCLE_GAIN_MEALS,
        Goal::Maintenance => &MAINTENANCE_MEALS,
    }
}

/// Exercises scheduled per day for a goal.
pub fn exercises_per_day(goal: Goal) -> usize {
    match goal {
        Goal::MuscleGain => 5,
        Goal::WeightLoss | Goal::Maintenance => 4,
    }
}
