use std::fmt::Write;

use crate::models::plan::DailyMeals;

/// Plain-text shopping list for one day's meals.
pub fn grocery_list(day: &str, meals: &DailyMeals) -> String {
    let mut list = format!("Grocery List for {}\n\n", day);

    for (label, meal) in [("BREAKFAST", &meals.breakfast), ("LUNCH", &meals.lunch), ("DINNER", &meals.dinner)] {
        let _ = writeln!(list, "[{}] {}", label, meal.name);
        let _ = writeln!(list, "  Note: {}", meal.description);
    }

    if !meals.snacks.is_empty() {
        list.push_str("\n[SNACKS]\n");
        for snack in &meals.snacks {
            let _ = writeln!(list, "- {}", snack.name);
        }
    }

    list
}
