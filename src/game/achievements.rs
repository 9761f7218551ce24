use std::collections::HashMap;

use crate::models::achievement::{BadgeStatus, UnlockedAchievement};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub badge_type: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

pub const BADGES: [Badge; 10] = [
    Badge { badge_type: "first_workout", name: "First Workout", icon: "fitness_center", description: "Complete your first workout" },
    Badge { badge_type: "first_meal", name: "First Meal", icon: "restaurant", description: "Log your first meal" },
    Badge { badge_type: "streak_3", name: "3-Day Streak", icon: "local_fire_department", description: "Maintain a 3-day streak" },
    Badge { badge_type: "streak_7", name: "Week Warrior", icon: "emoji_events", description: "Maintain a 7-day streak" },
    Badge { badge_type: "streak_30", name: "Monthly Master", icon: "military_tech", description: "Maintain a 30-day streak" },
    Badge { badge_type: "level_5", name: "Power Up!", icon: "bolt", description: "Reach Power Level 5" },
    Badge { badge_type: "level_10", name: "Warrior Spirit", icon: "shield", description: "Reach Power Level 10" },
    Badge { badge_type: "level_20", name: "Elite Force", icon: "star", description: "Reach Power Level 20" },
    Badge { badge_type: "calories_1000", name: "Calorie Crusher", icon: "whatshot", description: "Burn 1000 calories" },
    Badge { badge_type: "hydration_hero", name: "Hydration Hero", icon: "water_drop", description: "Complete water intake 7 days" },
];

pub fn find_badge(badge_type: &str) -> Option<&'static Badge> {
    BADGES.iter().find(|b| b.badge_type == badge_type)
}

/// Full catalog in display order, marking what the account has unlocked.
pub fn badge_statuses(unlocked: Vec<UnlockedAchievement>) -> Vec<BadgeStatus> {
    let unlocked: HashMap<String, UnlockedAchievement> = unlocked
        .into_iter()
        .map(|a| (a.badge_type.clone(), a))
        .collect();

    BADGES
        .iter()
        .map(|badge| {
            let entry = unlocked.get(badge.badge_type);
            BadgeStatus {
                badge_type: badge.badge_type.to_string(),
                name: badge.name.to_string(),
                icon: badge.icon.to_string(),
                description: badge.description.to_string(),
                unlocked: entry.is_some(),
                unlocked_at: entry.map(|a| a.unlocked_at),
            }
        })
        .collect()
}
