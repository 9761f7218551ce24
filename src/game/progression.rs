use crate::models::game::{PowerLevel, XP_PER_LEVEL};

/// Power level reached with `xp` total experience points.
pub fn level_for(xp: i32) -> i32 {
    xp.max(0) / XP_PER_LEVEL + 1
}

pub fn title_for(level: i32) -> &'static str {
    match level {
        l if l >= 50 => "Legend",
        l if l >= 20 => "Elite",
        l if l >= 10 => "Warrior",
        l if l >= 5 => "Fighter",
        _ => "Rookie",
    }
}

/// True when going from `previous_xp` to `new_xp` crosses a level boundary.
pub fn leveled_up(previous_xp: i32, new_xp: i32) -> bool {
    level_for(new_xp) > level_for(previous_xp)
}

pub fn progress(xp_points: i32, power_level: i32, title: String) -> PowerLevel {
    PowerLevel {
        xp_points,
        power_level,
        title,
        xp_for_next_level: power_level.saturating_mul(XP_PER_LEVEL),
        xp_progress_percent: xp_points.rem_euclid(XP_PER_LEVEL),
    }
}
