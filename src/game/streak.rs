//! Consecutive-day streak rules.
//!
//! Both the transition on activity and the lazy reset on read measure the
//! gap in whole calendar days between the stored date and today, so the two
//! can never disagree about what "yesterday" means.

use chrono::{Local, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakState {
    pub streak_count: i32,
    pub last_activity_date: Option<NaiveDate>,
}

/// Today's date on the server's local calendar.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

fn gap_in_days(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// New state after a qualifying activity on `today`, or `None` when the
/// activity doesn't change anything (same day).
pub fn advance(state: StreakState, today: NaiveDate) -> Option<StreakState> {
    let streak_count = match state.last_activity_date {
        None => 1,
        Some(last) => match gap_in_days(last, today) {
            // A stored date ahead of the server clock counts as today
            gap if gap <= 0 => return None,
            1 => state.streak_count + 1,
            _ => 1,
        },
    };

    Some(StreakState {
        streak_count,
        last_activity_date: Some(today),
    })
}

/// True when a read on `today` must zero the streak. The stored date itself
/// stays untouched.
pub fn is_broken(state: StreakState, today: NaiveDate) -> bool {
    match state.last_activity_date {
        Some(last) => state.streak_count > 0 && gap_in_days(last, today) > 1,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn state(count: i32, last: Option<NaiveDate>) -> StreakState {
        StreakState { streak_count: count, last_activity_date: last }
    }

    #[test]
    fn first_activity_starts_a_streak() {
        let today = day(2025, 3, 10);
        let next = advance(state(0, None), today).unwrap();
        assert_eq!(next, state(1, Some(today)));
    }

    #[test]
    fn same_day_activity_is_a_no_op() {
        let today = day(2025, 3, 10);
        assert_eq!(advance(state(4, Some(today)), today), None);
    }

    #[test]
    fn consecutive_day_extends_the_streak() {
        let today = day(2025, 3, 10);
        let next = advance(state(4, Some(today - Duration::days(1))), today).unwrap();
        assert_eq!(next, state(5, Some(today)));
    }

    #[test]
    fn missed_day_restarts_at_one() {
        let today = day(2025, 3, 10);
        let next = advance(state(9, Some(today - Duration::days(2))), today).unwrap();
        assert_eq!(next, state(1, Some(today)));
    }

    #[test]
    fn streak_survives_across_month_boundaries() {
        let next = advance(state(2, Some(day(2025, 2, 28))), day(2025, 3, 1)).unwrap();
        assert_eq!(next.streak_count, 3);
    }

    #[test]
    fn future_dated_activity_is_treated_as_today() {
        let today = day(2025, 3, 10);
        assert_eq!(advance(state(3, Some(today + Duration::days(1))), today), None);
    }

    #[test]
    fn read_only_resets_after_a_full_missed_day() {
        let today = day(2025, 3, 10);
        assert!(!is_broken(state(5, Some(today)), today));
        assert!(!is_broken(state(5, Some(today - Duration::days(1))), today));
        assert!(is_broken(state(5, Some(today - Duration::days(2))), today));
    }

    #[test]
    fn zero_streak_is_never_reported_as_broken() {
        let today = day(2025, 3, 10);
        assert!(!is_broken(state(0, Some(today - Duration::days(30))), today));
        assert!(!is_broken(state(0, None), today));
    }
}
