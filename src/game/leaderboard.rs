use uuid::Uuid;

use crate::models::game::{LeaderboardEntry, LeaderboardRow};

/// Numbers the already ordered rows from 1 and flags the caller's own row.
pub fn rank_entries(rows: Vec<LeaderboardRow>, current_user: Uuid) -> Vec<LeaderboardEntry> {
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| LeaderboardEntry {
            rank: index + 1,
            is_current_user: row.id == current_user,
            name: row.name,
            power_level: row.power_level,
            title: row.title,
            xp_points: row.xp_points,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: Uuid, name: &str, power_level: i32) -> LeaderboardRow {
        LeaderboardRow {
            id,
            name: name.to_string(),
            power_level,
            title: "Rookie".to_string(),
            xp_points: (power_level - 1) * 100,
        }
    }

    #[test]
    fn ranks_start_at_one_and_mark_the_caller() {
        let me = Uuid::new_v4();
        let entries = rank_entries(
            vec![row(Uuid::new_v4(), "Grace", 7), row(me, "Ada", 4), row(Uuid::new_v4(), "Linus", 2)],
            me,
        );

        assert_eq!(entries.iter().map(|e| e.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(entries.iter().filter(|e| e.is_current_user).count(), 1);
        assert!(entries[1].is_current_user);
        assert_eq!(entries[1].name, "Ada");
    }
}
